use crate::menu::AboutInfo;

/// Everything the game draws on. Hosts implement this; the controller never
/// talks to a display any other way.
pub trait Surface {
    fn show_score(&mut self, text: &str);
    fn show_time_left(&mut self, text: &str);
    /// Short visual acknowledgement of a tap.
    fn acknowledge_tap(&mut self);
    /// Transient notification.
    fn notify(&mut self, text: &str);
    fn show_about(&mut self, about: &AboutInfo);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Score(String),
    TimeLeft(String),
    TapAcknowledged,
    Notification(String),
    About(AboutInfo),
}

/// Surface that only remembers what it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn last_score(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Score(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_time_left(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::TimeLeft(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Notification(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn show_score(&mut self, text: &str) {
        self.calls.push(SurfaceCall::Score(text.to_string()));
    }

    fn show_time_left(&mut self, text: &str) {
        self.calls.push(SurfaceCall::TimeLeft(text.to_string()));
    }

    fn acknowledge_tap(&mut self) {
        self.calls.push(SurfaceCall::TapAcknowledged);
    }

    fn notify(&mut self, text: &str) {
        self.calls.push(SurfaceCall::Notification(text.to_string()));
    }

    fn show_about(&mut self, about: &AboutInfo) {
        self.calls.push(SurfaceCall::About(about.clone()));
    }
}
