use serde::{Deserialize, Serialize};

use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    About,
}

impl MenuAction {
    pub fn all() -> &'static [MenuAction] {
        &[MenuAction::About]
    }

    pub fn id(self) -> &'static str {
        match self {
            MenuAction::About => "actionAbout",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::About => "About",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|action| action.id() == id)
    }
}

/// Contents of the about dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub title: String,
    pub message: String,
}

impl AboutInfo {
    pub fn current() -> Self {
        Self {
            title: text::about_title(),
            message: text::about_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for action in MenuAction::all() {
            assert_eq!(MenuAction::from_id(action.id()), Some(*action));
        }
        assert_eq!(MenuAction::from_id("actionSettings"), None);
    }
}
