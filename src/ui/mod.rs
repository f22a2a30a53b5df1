//! View models handed to the host page

pub mod game_over;
pub mod menu;

pub use game_over::{GameOverOverlay, OverlayAction};
pub use menu::{MenuEntry, menu};
