use std::time::Duration;

use engine::GameLogic;
use engine::countdown::{Countdown, CountdownEvent, CountdownHandle, CountdownId};
use log::{debug, info};
use tokio::sync::mpsc;

use crate::bundle::{Bundle, SavedGame};
use crate::logic::{GameEffect, GameEvent, TapGame};
use crate::menu::{AboutInfo, MenuAction};
use crate::settings::PlayerSettings;
use crate::state::{GameState, TICK_INTERVAL};
use crate::surface::Surface;
use crate::text;

/// Host-facing side of the game.
///
/// Hosts forward their lifecycle callbacks and user input to the `on_*`
/// methods and feed countdown events back in through
/// [`GameController::next_countdown_event`] / [`GameController::pump`]. All of
/// it happens on one task, so state is never touched concurrently.
///
/// Starting a countdown spawns a tokio task, so the controller must be driven
/// from inside a tokio runtime.
pub struct GameController<S: Surface> {
    logic: TapGame,
    state: GameState,
    surface: S,
    reduce_motion: bool,
    countdown: Option<CountdownHandle>,
    last_countdown_id: CountdownId,
    events_tx: mpsc::UnboundedSender<CountdownEvent>,
    events_rx: mpsc::UnboundedReceiver<CountdownEvent>,
}

impl<S: Surface> GameController<S> {
    pub fn new(surface: S, settings: &PlayerSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let logic = TapGame::from_settings(&settings.gameplay);
        Self {
            state: logic.initial_state(),
            logic,
            surface,
            reduce_motion: settings.accessibility.reduce_motion,
            countdown: None,
            last_countdown_id: CountdownId(0),
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tears the controller down, cancelling any countdown, and hands the
    /// surface back to the host.
    pub fn into_surface(mut self) -> S {
        self.cancel_countdown();
        self.surface
    }

    pub fn countdown(&self) -> Option<&CountdownHandle> {
        self.countdown.as_ref()
    }

    pub fn is_countdown_active(&self) -> bool {
        self.countdown.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn on_start(&mut self, saved: Option<SavedGame>) {
        match saved {
            Some(saved) => debug!(
                "restoring score {} with {}ms left",
                saved.score,
                saved.time_remaining.as_millis()
            ),
            None => debug!("starting a fresh game"),
        }
        self.dispatch(GameEvent::Start { saved });
    }

    pub fn on_tap(&mut self) {
        self.dispatch(GameEvent::Tap);
    }

    pub fn on_tick(&mut self, remaining: Duration) {
        self.dispatch(GameEvent::Tick { remaining });
    }

    pub fn on_timer_expired(&mut self) {
        self.dispatch(GameEvent::Expired);
    }

    /// Stops the countdown and returns what the host should keep.
    pub fn on_suspend(&mut self) -> SavedGame {
        self.dispatch(GameEvent::Suspend);
        let saved = SavedGame::of(&self.state);
        debug!(
            "saving score {} with {}ms left",
            saved.score,
            saved.time_remaining.as_millis()
        );
        saved
    }

    /// [`GameController::on_suspend`] writing straight into a [`Bundle`].
    pub fn on_save_instance_state(&mut self, bundle: &mut Bundle) {
        self.on_suspend().write_to(bundle);
    }

    pub fn on_resume(&mut self) {
        self.dispatch(GameEvent::Resume);
    }

    pub fn on_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::About => self.surface.show_about(&AboutInfo::current()),
        }
    }

    /// Applies an event from the owned countdown. Returns `false` when the
    /// event belongs to a countdown that has since been cancelled or replaced.
    pub fn on_countdown(&mut self, event: CountdownEvent) -> bool {
        let current = self.countdown.as_ref().map(CountdownHandle::id);
        if current != Some(event.id()) {
            debug!("dropping event from stale countdown {:?}", event.id());
            return false;
        }

        match event {
            CountdownEvent::Tick { remaining, .. } => self.on_tick(remaining),
            CountdownEvent::Finished { .. } => {
                self.countdown = None;
                self.on_timer_expired();
            }
        }
        true
    }

    /// Waits for the next countdown event. Pending forever while no countdown
    /// is running.
    pub async fn next_countdown_event(&mut self) -> Option<CountdownEvent> {
        self.events_rx.recv().await
    }

    /// Waits for the next countdown event and applies it.
    pub async fn pump(&mut self) -> bool {
        match self.next_countdown_event().await {
            Some(event) => self.on_countdown(event),
            None => false,
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        let step = self.logic.step(&self.state, event);
        self.state = step.state;
        for effect in step.effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: GameEffect) {
        match effect {
            GameEffect::ShowScore(score) => self.surface.show_score(&text::score_label(score)),
            GameEffect::ShowTimeLeft(time) => {
                self.surface.show_time_left(&text::time_left_label(time))
            }
            GameEffect::AcknowledgeTap => {
                if !self.reduce_motion {
                    self.surface.acknowledge_tap();
                }
            }
            GameEffect::StartCountdown(duration) => self.start_countdown(duration),
            GameEffect::CancelCountdown => self.cancel_countdown(),
            GameEffect::AnnounceFinalScore(score) => {
                info!("round over with score {score}");
                self.surface.notify(&text::game_over_message(score));
            }
        }
    }

    fn start_countdown(&mut self, duration: Duration) {
        self.cancel_countdown();
        let id = self.last_countdown_id.next();
        self.last_countdown_id = id;
        let countdown = Countdown::new(duration, TICK_INTERVAL);
        self.countdown = Some(countdown.spawn(id, self.events_tx.clone()));
    }

    fn cancel_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.cancel();
        }
    }
}
