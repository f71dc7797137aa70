use std::time::Duration;

use log::{debug, trace};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Identifies one spawned countdown so late events can be told apart from
/// events of its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountdownId(pub u64);

impl CountdownId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { id: CountdownId, remaining: Duration },
    Finished { id: CountdownId },
}

impl CountdownEvent {
    pub fn id(&self) -> CountdownId {
        match *self {
            CountdownEvent::Tick { id, .. } | CountdownEvent::Finished { id } => id,
        }
    }
}

/// A fixed-interval countdown.
///
/// Tick `k` is due `min(k * interval, duration)` after the countdown was
/// spawned. Every tick with time left emits [`CountdownEvent::Tick`]; reaching
/// zero emits a single [`CountdownEvent::Finished`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    interval: Duration,
}

impl Countdown {
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    pub fn new(duration: Duration, interval: Duration) -> Self {
        Self {
            duration,
            interval: interval.max(Self::MIN_INTERVAL),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts the countdown on the current tokio runtime. Events go to
    /// `events` until the countdown finishes or the handle is cancelled.
    pub fn spawn(
        self,
        id: CountdownId,
        events: mpsc::UnboundedSender<CountdownEvent>,
    ) -> CountdownHandle {
        debug!(
            "starting countdown {:?}: {}ms every {}ms",
            id,
            self.duration.as_millis(),
            self.interval.as_millis()
        );
        let start = Instant::now();
        let task = tokio::spawn(self.run(id, start, events));
        CountdownHandle {
            id,
            countdown: self,
            task,
        }
    }

    async fn run(
        self,
        id: CountdownId,
        start: Instant,
        events: mpsc::UnboundedSender<CountdownEvent>,
    ) {
        let mut elapsed = Duration::ZERO;
        loop {
            if elapsed >= self.duration {
                trace!("countdown {:?} finished", id);
                let _ = events.send(CountdownEvent::Finished { id });
                return;
            }

            elapsed = elapsed.saturating_add(self.interval).min(self.duration);
            sleep_until(start + elapsed).await;

            let remaining = self.duration - elapsed;
            if remaining.is_zero() {
                continue;
            }
            trace!("countdown {:?} tick, {}ms left", id, remaining.as_millis());
            if events.send(CountdownEvent::Tick { id, remaining }).is_err() {
                // Nobody is listening anymore.
                return;
            }
        }
    }
}

/// Owner of a running countdown. Dropping the handle cancels the countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    id: CountdownId,
    countdown: Countdown,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    pub fn id(&self) -> CountdownId {
        self.id
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("cancelling countdown {:?}", self.id);
            self.task.abort();
        }
    }
}
