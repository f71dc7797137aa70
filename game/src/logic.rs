use std::time::Duration;

use engine::{GameLogic, Step};

use crate::bundle::SavedGame;
use crate::settings::GameplaySettings;
use crate::state::{GameState, ROUND_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Screen created. `saved` is present when it is being re-created after a
    /// configuration change.
    Start { saved: Option<SavedGame> },
    Tap,
    Tick { remaining: Duration },
    Expired,
    /// Screen about to go away. The countdown must stop.
    Suspend,
    /// Screen visible again without having been re-created.
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEffect {
    ShowScore(u32),
    ShowTimeLeft(Duration),
    AcknowledgeTap,
    /// Replace whatever countdown is running with a new one of this length.
    StartCountdown(Duration),
    CancelCountdown,
    AnnounceFinalScore(u32),
}

/// The tap game's rules as a pure state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapGame {
    auto_restart_after_expiry: bool,
}

impl Default for TapGame {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TapGame {
    pub fn new(auto_restart_after_expiry: bool) -> Self {
        Self {
            auto_restart_after_expiry,
        }
    }

    pub fn from_settings(settings: &GameplaySettings) -> Self {
        Self::new(settings.auto_restart_after_expiry)
    }

    fn start(&self, saved: Option<SavedGame>) -> Step<GameState, GameEffect> {
        let state = match saved.map(SavedGame::sanitized) {
            Some(saved) => GameState {
                score: saved.score,
                time_remaining: saved.time_remaining,
                started: true,
                suspended: false,
            },
            None => GameState::fresh(),
        };

        let mut step = Step::new(state).with_effect(GameEffect::CancelCountdown);
        step.effects.extend(labels(&step.state));
        if step.state.started {
            step.push(GameEffect::StartCountdown(step.state.time_remaining));
        }
        step
    }

    fn tap(&self, state: &GameState) -> Step<GameState, GameEffect> {
        let mut next = state.clone();
        let mut effects = Vec::with_capacity(3);
        if !next.started {
            next.started = true;
            next.suspended = false;
            next.time_remaining = ROUND_LENGTH;
            effects.push(GameEffect::StartCountdown(ROUND_LENGTH));
        }
        next.score = next.score.saturating_add(1);
        effects.push(GameEffect::AcknowledgeTap);
        effects.push(GameEffect::ShowScore(next.score));
        Step {
            state: next,
            effects,
        }
    }

    fn tick(&self, state: &GameState, remaining: Duration) -> Step<GameState, GameEffect> {
        if !state.is_running() {
            return Step::new(state.clone());
        }
        let mut next = state.clone();
        next.time_remaining = remaining.min(state.time_remaining);
        let shown = next.time_remaining;
        Step::new(next).with_effect(GameEffect::ShowTimeLeft(shown))
    }

    fn expire(&self, state: &GameState) -> Step<GameState, GameEffect> {
        if !state.is_running() {
            return Step::new(state.clone());
        }

        let mut next = GameState::fresh();
        next.started = self.auto_restart_after_expiry;

        let mut step = Step::new(next)
            .with_effect(GameEffect::CancelCountdown)
            .with_effect(GameEffect::AnnounceFinalScore(state.score));
        step.effects.extend(labels(&step.state));
        if self.auto_restart_after_expiry {
            step.push(GameEffect::StartCountdown(ROUND_LENGTH));
        }
        step
    }

    fn suspend(&self, state: &GameState) -> Step<GameState, GameEffect> {
        let mut next = state.clone();
        next.suspended = true;
        Step::new(next).with_effect(GameEffect::CancelCountdown)
    }

    fn resume(&self, state: &GameState) -> Step<GameState, GameEffect> {
        if !state.suspended {
            return Step::new(state.clone());
        }
        let mut next = state.clone();
        next.suspended = false;
        let mut step = Step::new(next);
        if state.started {
            step.push(GameEffect::StartCountdown(state.time_remaining));
        }
        step
    }
}

/// Effects that bring both labels in line with `state`.
fn labels(state: &GameState) -> [GameEffect; 2] {
    [
        GameEffect::ShowScore(state.score),
        GameEffect::ShowTimeLeft(state.time_remaining),
    ]
}

impl GameLogic for TapGame {
    type State = GameState;
    type Input = GameEvent;
    type Effect = GameEffect;

    fn initial_state(&self) -> Self::State {
        GameState::fresh()
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Step<Self::State, Self::Effect> {
        match input {
            GameEvent::Start { saved } => self.start(saved),
            GameEvent::Tap => self.tap(state),
            GameEvent::Tick { remaining } => self.tick(state, remaining),
            GameEvent::Expired => self.expire(state),
            GameEvent::Suspend => self.suspend(state),
            GameEvent::Resume => self.resume(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GamePhase;

    #[test]
    fn first_tap_starts_the_countdown_once() {
        let game = TapGame::default();
        let first = game.step(&GameState::fresh(), GameEvent::Tap);
        assert_eq!(
            first.effects,
            vec![
                GameEffect::StartCountdown(ROUND_LENGTH),
                GameEffect::AcknowledgeTap,
                GameEffect::ShowScore(1),
            ]
        );

        let second = game.step(&first.state, GameEvent::Tap);
        assert_eq!(
            second.effects,
            vec![GameEffect::AcknowledgeTap, GameEffect::ShowScore(2)]
        );
        assert_eq!(second.state.phase(), GamePhase::Running);
    }

    #[test]
    fn ticks_before_the_first_tap_are_ignored() {
        let game = TapGame::default();
        let step = game.step(
            &GameState::fresh(),
            GameEvent::Tick {
                remaining: Duration::from_secs(12),
            },
        );
        assert_eq!(step.state, GameState::fresh());
        assert!(step.effects.is_empty());
    }

    #[test]
    fn a_tick_never_adds_time() {
        let game = TapGame::default();
        let mut state = GameState::fresh();
        state.started = true;
        state.time_remaining = Duration::from_secs(30);

        let step = game.step(
            &state,
            GameEvent::Tick {
                remaining: Duration::from_secs(50),
            },
        );
        assert_eq!(step.state.time_remaining, Duration::from_secs(30));
    }

    #[test]
    fn expiry_without_auto_restart_matches_the_initial_reset() {
        let game = TapGame::new(false);
        let mut state = GameState::fresh();
        state.started = true;
        state.score = 9;

        let step = game.step(&state, GameEvent::Expired);
        assert_eq!(step.state, GameState::fresh());
        assert_eq!(
            step.effects,
            vec![
                GameEffect::CancelCountdown,
                GameEffect::AnnounceFinalScore(9),
                GameEffect::ShowScore(0),
                GameEffect::ShowTimeLeft(ROUND_LENGTH),
            ]
        );
    }

    #[test]
    fn resume_only_restarts_a_started_game() {
        let game = TapGame::default();

        let idle = game.step(&GameState::fresh(), GameEvent::Suspend).state;
        let resumed = game.step(&idle, GameEvent::Resume);
        assert!(resumed.effects.is_empty());
        assert_eq!(resumed.state.phase(), GamePhase::NotStarted);

        let mut playing = GameState::fresh();
        playing.started = true;
        playing.time_remaining = Duration::from_secs(17);
        let parked = game.step(&playing, GameEvent::Suspend);
        assert_eq!(parked.effects, vec![GameEffect::CancelCountdown]);
        assert_eq!(parked.state.phase(), GamePhase::Suspended);

        let resumed = game.step(&parked.state, GameEvent::Resume);
        assert_eq!(
            resumed.effects,
            vec![GameEffect::StartCountdown(Duration::from_secs(17))]
        );
        assert!(resumed.state.is_running());
    }

    #[test]
    fn score_saturates() {
        let game = TapGame::default();
        let mut state = GameState::fresh();
        state.started = true;
        state.score = u32::MAX;
        assert_eq!(game.step(&state, GameEvent::Tap).state.score, u32::MAX);
    }
}
