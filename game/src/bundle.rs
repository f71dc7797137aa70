//! State carried across a configuration change.
//!
//! A host tears the controller down and builds a new one when the screen is
//! reconfigured; the [`Bundle`] written on the way out is what the new
//! controller starts from. It lives in memory only and does not survive the
//! process.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{GameState, ROUND_LENGTH, TICK_INTERVAL};

pub const SCORE_KEY: &str = "SCORE_KEY";
pub const TIME_LEFT_KEY: &str = "TIME_LEFT_KEY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BundleError {
    #[error("saved game is missing `{0}`")]
    MissingKey(&'static str),
    #[error("saved value for `{key}` is out of range: {value}")]
    OutOfRange { key: &'static str, value: i64 },
}

/// String-keyed integer storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    values: BTreeMap<String, i64>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }
}

/// Snapshot handed out on suspend and accepted on start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub score: u32,
    #[serde(with = "crate::state::millis")]
    pub time_remaining: Duration,
}

impl SavedGame {
    pub fn new(score: u32, time_remaining: Duration) -> Self {
        Self {
            score,
            time_remaining,
        }
    }

    pub fn of(state: &GameState) -> Self {
        Self::new(state.score, state.time_remaining)
    }

    /// Clamps time left to one round and rounds it up onto the tick grid.
    pub fn sanitized(mut self) -> Self {
        let tick = TICK_INTERVAL.as_millis() as u64;
        let millis = self.time_remaining.min(ROUND_LENGTH).as_millis() as u64;
        self.time_remaining = Duration::from_millis(millis.div_ceil(tick) * tick).min(ROUND_LENGTH);
        self
    }

    pub fn write_to(&self, bundle: &mut Bundle) {
        bundle.put_int(SCORE_KEY, i64::from(self.score));
        let millis = i64::try_from(self.time_remaining.as_millis()).unwrap_or(i64::MAX);
        bundle.put_int(TIME_LEFT_KEY, millis);
    }

    /// `Ok(None)` when the bundle holds no saved game at all.
    pub fn read_from(bundle: &Bundle) -> Result<Option<Self>, BundleError> {
        let score = bundle.get_int(SCORE_KEY);
        let time_left = bundle.get_int(TIME_LEFT_KEY);

        let (score, time_left) = match (score, time_left) {
            (None, None) => return Ok(None),
            (None, Some(_)) => return Err(BundleError::MissingKey(SCORE_KEY)),
            (Some(_), None) => return Err(BundleError::MissingKey(TIME_LEFT_KEY)),
            (Some(score), Some(time_left)) => (score, time_left),
        };

        let score = u32::try_from(score).map_err(|_| BundleError::OutOfRange {
            key: SCORE_KEY,
            value: score,
        })?;
        let millis = u64::try_from(time_left).map_err(|_| BundleError::OutOfRange {
            key: TIME_LEFT_KEY,
            value: time_left,
        })?;

        Ok(Some(Self::new(score, Duration::from_millis(millis))))
    }
}
