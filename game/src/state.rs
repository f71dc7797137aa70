use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of a full round.
pub const ROUND_LENGTH: Duration = Duration::from_secs(60);
/// Spacing between countdown ticks. Observed time left is always a multiple of this.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh game waiting for its first tap.
    NotStarted,
    Running,
    /// Started, but the countdown is parked until the host resumes.
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    #[serde(with = "millis")]
    pub time_remaining: Duration,
    pub started: bool,
    #[serde(default)]
    pub suspended: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl GameState {
    pub fn fresh() -> Self {
        Self {
            score: 0,
            time_remaining: ROUND_LENGTH,
            started: false,
            suspended: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match (self.started, self.suspended) {
            (false, _) => GamePhase::NotStarted,
            (true, false) => GamePhase::Running,
            (true, true) => GamePhase::Suspended,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == GamePhase::Running
    }
}

/// Durations as whole milliseconds in serialized form. Anything past
/// `u64::MAX` ms is written as `u64::MAX`.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_full_round_not_started() {
        let state = GameState::fresh();
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining, Duration::from_millis(60_000));
        assert_eq!(state.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn round_length_sits_on_the_tick_grid() {
        assert_eq!(ROUND_LENGTH.as_millis() % TICK_INTERVAL.as_millis(), 0);
    }

    #[test]
    fn json_uses_millis_and_defaults_suspended() {
        let state: GameState =
            serde_json::from_str(r#"{"score":4,"time_remaining":45000,"started":true}"#)
                .expect("state JSON should parse");
        assert_eq!(state.time_remaining, Duration::from_secs(45));
        assert!(!state.suspended);
        assert_eq!(state.phase(), GamePhase::Running);

        let json = serde_json::to_value(&state).expect("serialize state");
        assert_eq!(json["time_remaining"], 45000);
    }

    #[test]
    fn oversized_durations_saturate_when_written() {
        let state = GameState {
            time_remaining: Duration::MAX,
            ..GameState::fresh()
        };
        let json = serde_json::to_value(&state).expect("serialize state");
        assert_eq!(json["time_remaining"], u64::MAX);
    }
}
