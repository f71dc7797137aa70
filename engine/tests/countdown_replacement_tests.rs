use std::time::Duration;

use engine::countdown::{Countdown, CountdownEvent, CountdownId};
use tokio::sync::mpsc;
use tokio::time::Instant;

const SECOND: Duration = Duration::from_secs(1);

#[tokio::test(start_paused = true)]
async fn replaced_countdown_only_reports_the_new_id() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let first = Countdown::new(60 * SECOND, SECOND).spawn(CountdownId(1), tx.clone());
    let event = rx.recv().await.expect("first countdown should tick");
    assert_eq!(event.id(), CountdownId(1));

    first.cancel();
    let second = Countdown::new(3 * SECOND, SECOND).spawn(CountdownId(2), tx.clone());

    let mut seen = Vec::new();
    loop {
        let event = rx.recv().await.expect("channel stays open while tx is held");
        seen.push(event);
        if matches!(event, CountdownEvent::Finished { .. }) {
            break;
        }
    }

    assert!(
        seen.iter().all(|e| e.id() == second.id()),
        "expected only events from the replacement, got {seen:?}"
    );
    assert_eq!(
        seen,
        vec![
            CountdownEvent::Tick {
                id: CountdownId(2),
                remaining: 2 * SECOND
            },
            CountdownEvent::Tick {
                id: CountdownId(2),
                remaining: SECOND
            },
            CountdownEvent::Finished { id: CountdownId(2) },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn countdown_reports_monotonic_remaining_on_the_second_grid() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let started = Instant::now();
    let handle = Countdown::new(60 * SECOND, SECOND).spawn(CountdownId(9), tx);
    assert_eq!(handle.countdown().duration(), 60 * SECOND);

    let mut last = 60 * SECOND;
    let mut ticks = 0;
    while let Some(event) = rx.recv().await {
        match event {
            CountdownEvent::Tick { remaining, .. } => {
                assert!(remaining < last, "{remaining:?} should be below {last:?}");
                assert_eq!(remaining.subsec_millis(), 0);
                last = remaining;
                ticks += 1;
            }
            CountdownEvent::Finished { .. } => break,
        }
    }

    assert_eq!(ticks, 59);
    assert_eq!(started.elapsed(), 60 * SECOND);
    assert_eq!(rx.recv().await, None);
    assert!(handle.is_finished());
}
