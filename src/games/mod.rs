//! The six round games and the selector that mounts one at a time

pub mod color;
pub mod count;
pub mod math;
pub mod memory;
pub mod pop;
pub mod selector;
pub mod spelling;

pub use color::ColorQuest;
pub use count::QuickCount;
pub use math::MathWhiz;
pub use memory::MemoryMatch;
pub use pop::EmojiPop;
pub use selector::{ActiveGame, GameSelector, GameStatus};
pub use spelling::{SpellAction, SpellingBee};

use serde::Serialize;

/// Identifies one of the games on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Memory,
    Math,
    Pop,
    Spell,
    Color,
    Count,
}

impl GameId {
    /// Menu order
    pub const ALL: [GameId; 6] = [
        GameId::Memory,
        GameId::Math,
        GameId::Pop,
        GameId::Spell,
        GameId::Color,
        GameId::Count,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Memory => "memory",
            GameId::Math => "math",
            GameId::Pop => "pop",
            GameId::Spell => "spell",
            GameId::Color => "color",
            GameId::Count => "count",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Accent colour used by the game's card and its Game Over overlay
    pub fn accent(&self) -> &'static str {
        match self {
            GameId::Memory => "#22C55E",
            GameId::Math => "#3B82F6",
            GameId::Pop => "#EC4899",
            GameId::Spell => "#A855F7",
            GameId::Color => "#F97316",
            GameId::Count => "#06B6D4",
        }
    }
}

/// Player input, routed by the selector to whichever game is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    /// Memory Match: flip the card at this index
    Flip(usize),
    /// Math Whiz / Quick Count: pick a numeric option
    Choose(u32),
    /// Emoji Pop: tap the target
    Pop,
    /// Color Quest: tap the swatch at this index
    Pick(usize),
    /// Spelling Bee
    Submit(String),
    GiveUp,
    NextWord,
}
