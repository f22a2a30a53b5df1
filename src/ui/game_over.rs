//! Game Over overlay
//!
//! Shared by every game. The overlay never mutates a session itself: its
//! buttons yield an [`OverlayAction`] that the selector applies.

use serde::Serialize;

use crate::games::GameStatus;
use crate::sim::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverlayAction {
    Restart,
    Back,
}

impl OverlayAction {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayAction::Restart => "Try Again 🔄",
            OverlayAction::Back => "Back to Menu",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOverOverlay {
    pub title: &'static str,
    pub emoji: &'static str,
    pub final_score: u32,
    pub accent: &'static str,
    pub actions: [OverlayAction; 2],
}

impl GameOverOverlay {
    /// Build the overlay for a finished session, `None` while still playing
    pub fn from_status(status: &GameStatus) -> Option<Self> {
        if status.phase != Phase::GameOver {
            return None;
        }
        Some(Self {
            title: "Game Over!",
            emoji: "😵",
            final_score: status.reported_score,
            accent: status.id.accent(),
            actions: [OverlayAction::Restart, OverlayAction::Back],
        })
    }

    pub fn score_line(&self) -> String {
        format!("Final Score: {}", self.final_score)
    }
}
