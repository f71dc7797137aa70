use std::time::Duration;

use tapper::bundle::{Bundle, BundleError, SavedGame, SCORE_KEY, TIME_LEFT_KEY};

#[test]
fn empty_bundle_means_no_saved_game() {
    assert_eq!(SavedGame::read_from(&Bundle::new()), Ok(None));
}

#[test]
fn saved_game_survives_the_bundle() {
    let mut bundle = Bundle::new();
    let saved = SavedGame::new(3, Duration::from_secs(45));
    saved.write_to(&mut bundle);

    assert_eq!(SavedGame::read_from(&bundle), Ok(Some(saved)));
}

#[test]
fn half_written_bundle_is_an_error() {
    let mut bundle = Bundle::new();
    bundle.put_int(SCORE_KEY, 3);
    assert_eq!(
        SavedGame::read_from(&bundle),
        Err(BundleError::MissingKey(TIME_LEFT_KEY))
    );

    let mut bundle = Bundle::new();
    bundle.put_int(TIME_LEFT_KEY, 3_000);
    assert_eq!(
        SavedGame::read_from(&bundle),
        Err(BundleError::MissingKey(SCORE_KEY))
    );
}

#[test]
fn negative_values_are_rejected() {
    let mut bundle = Bundle::new();
    bundle.put_int(SCORE_KEY, -1);
    bundle.put_int(TIME_LEFT_KEY, 1_000);
    assert_eq!(
        SavedGame::read_from(&bundle),
        Err(BundleError::OutOfRange {
            key: SCORE_KEY,
            value: -1
        })
    );

    let mut bundle = Bundle::new();
    bundle.put_int(SCORE_KEY, 1);
    bundle.put_int(TIME_LEFT_KEY, -5);
    let err = SavedGame::read_from(&bundle).expect_err("negative time should fail");
    assert_eq!(
        err.to_string(),
        "saved value for `TIME_LEFT_KEY` is out of range: -5"
    );
}

#[test]
fn bundle_serializes_as_a_plain_map() {
    let mut bundle = Bundle::new();
    SavedGame::new(7, Duration::from_secs(12)).write_to(&mut bundle);

    let json = serde_json::to_value(&bundle).expect("serialize bundle");
    assert_eq!(json["values"]["SCORE_KEY"], 7);
    assert_eq!(json["values"]["TIME_LEFT_KEY"], 12_000);
}
