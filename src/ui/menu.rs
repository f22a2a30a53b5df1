use serde::Serialize;

use crate::games::GameId;

/// One card on the game menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: GameId,
    pub title: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
    pub tagline: &'static str,
}

impl MenuEntry {
    pub fn for_game(id: GameId) -> Self {
        let (title, icon, tagline) = match id {
            GameId::Memory => ("Memory Match", "🧩", "Find the twins!"),
            GameId::Math => ("Math Whiz", "🧮", "Numbers are fun!"),
            GameId::Pop => ("Emoji Pop", "🎈", "Pop pop pop!"),
            GameId::Spell => ("Spelling Bee", "🐝", "Unscramble words!"),
            GameId::Color => ("Color Quest", "🎨", "Find the rainbow!"),
            GameId::Count => ("Quick Count", "🔢", "1, 2, 3... Go!"),
        };
        Self {
            id,
            title,
            icon,
            accent: id.accent(),
            tagline,
        }
    }
}

/// Menu cards in display order
pub fn menu() -> Vec<MenuEntry> {
    GameId::ALL.into_iter().map(MenuEntry::for_game).collect()
}
