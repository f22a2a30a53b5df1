//! Game selector
//!
//! Holds at most one live session. Selecting a game always mounts a fresh
//! session; going back drops it, and its pending tasks with it.

use std::time::Duration;

use serde::Serialize;

use super::{
    ColorQuest, EmojiPop, GameAction, GameId, MathWhiz, MemoryMatch, QuickCount, SpellAction,
    SpellingBee,
};
use crate::config::Catalog;
use crate::sim::{GameRng, Outcome, Phase, Session};
use crate::ui::{GameOverOverlay, OverlayAction};

/// The mounted session, one variant per game
#[derive(Debug)]
pub enum ActiveGame {
    Memory(Session<MemoryMatch>),
    Math(Session<MathWhiz>),
    Pop(Session<EmojiPop>),
    Spell(Session<SpellingBee>),
    Color(Session<ColorQuest>),
    Count(Session<QuickCount>),
}

/// Run the same expression against whichever session is mounted
macro_rules! each_session {
    ($game:expr, $s:ident => $body:expr) => {
        match $game {
            ActiveGame::Memory($s) => $body,
            ActiveGame::Math($s) => $body,
            ActiveGame::Pop($s) => $body,
            ActiveGame::Spell($s) => $body,
            ActiveGame::Color($s) => $body,
            ActiveGame::Count($s) => $body,
        }
    };
}

impl ActiveGame {
    fn mount(id: GameId, catalog: &Catalog, seed: u64) -> Self {
        match id {
            GameId::Memory => {
                ActiveGame::Memory(Session::new(MemoryMatch::new(catalog.symbols.clone()), seed))
            }
            GameId::Math => ActiveGame::Math(Session::new(MathWhiz, seed)),
            GameId::Pop => ActiveGame::Pop(Session::new(EmojiPop::new(catalog.symbols.clone()), seed)),
            GameId::Spell => {
                ActiveGame::Spell(Session::new(SpellingBee::new(catalog.words.clone()), seed))
            }
            GameId::Color => {
                ActiveGame::Color(Session::new(ColorQuest::new(catalog.swatches.clone()), seed))
            }
            GameId::Count => {
                ActiveGame::Count(Session::new(QuickCount::new(catalog.symbols.clone()), seed))
            }
        }
    }

    pub fn id(&self) -> GameId {
        match self {
            ActiveGame::Memory(_) => GameId::Memory,
            ActiveGame::Math(_) => GameId::Math,
            ActiveGame::Pop(_) => GameId::Pop,
            ActiveGame::Spell(_) => GameId::Spell,
            ActiveGame::Color(_) => GameId::Color,
            ActiveGame::Count(_) => GameId::Count,
        }
    }

    pub fn score(&self) -> u32 {
        each_session!(self, s => s.score())
    }

    pub fn reported_score(&self) -> u32 {
        each_session!(self, s => s.reported_score())
    }

    pub fn phase(&self) -> Phase {
        each_session!(self, s => s.phase())
    }

    pub fn pending_tasks(&self) -> usize {
        each_session!(self, s => s.pending_tasks())
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            id: self.id(),
            score: self.score(),
            reported_score: self.reported_score(),
            phase: self.phase(),
        }
    }

    fn act(&mut self, action: GameAction) -> Outcome {
        match (self, action) {
            (ActiveGame::Memory(s), GameAction::Flip(i)) => s.act(i),
            (ActiveGame::Math(s), GameAction::Choose(n)) => s.act(n),
            (ActiveGame::Count(s), GameAction::Choose(n)) => s.act(n),
            (ActiveGame::Pop(s), GameAction::Pop) => s.act(()),
            (ActiveGame::Color(s), GameAction::Pick(i)) => s.act(i),
            (ActiveGame::Spell(s), GameAction::Submit(text)) => s.act(SpellAction::Submit(text)),
            (ActiveGame::Spell(s), GameAction::GiveUp) => s.act(SpellAction::GiveUp),
            (ActiveGame::Spell(s), GameAction::NextWord) => s.act(SpellAction::NextWord),
            (game, action) => {
                log::debug!("{:?} does not apply to {}", action, game.id().as_str());
                Outcome::Ignored
            }
        }
    }

    fn advance(&mut self, dt: Duration) -> Vec<Outcome> {
        each_session!(self, s => s.advance(dt))
    }

    fn restart(&mut self) {
        each_session!(self, s => s.restart())
    }

    fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        let id = self.id();
        each_session!(self, s => serde_json::to_string(&Tagged { id, session: s.snapshot() }))
    }
}

#[derive(Serialize)]
struct Tagged<S> {
    id: GameId,
    #[serde(flatten)]
    session: S,
}

/// Summary of the mounted session for the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub id: GameId,
    pub score: u32,
    pub reported_score: u32,
    pub phase: Phase,
}

#[derive(Debug)]
pub struct GameSelector {
    catalog: Catalog,
    rng: GameRng,
    active: Option<ActiveGame>,
}

impl GameSelector {
    /// `seed` drives the seeds handed to every session this selector mounts
    pub fn new(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: GameRng::new(seed),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<GameId> {
        self.active.as_ref().map(ActiveGame::id)
    }

    /// Mount a fresh session of `id`, replacing whatever was mounted
    pub fn select(&mut self, id: GameId) -> &ActiveGame {
        let seed = self.rng.fork_seed();
        self.select_seeded(id, seed)
    }

    pub fn select_seeded(&mut self, id: GameId, seed: u64) -> &ActiveGame {
        if let Some(previous) = self.active.take() {
            log::debug!("unmounting {}", previous.id().as_str());
        }
        self.active.insert(ActiveGame::mount(id, &self.catalog, seed))
    }

    /// Return to the menu. The session and its pending tasks are dropped.
    pub fn back(&mut self) -> Option<GameId> {
        let previous = self.active.take()?;
        log::info!("back to menu from {}", previous.id().as_str());
        Some(previous.id())
    }

    /// Route an action to the mounted game
    pub fn act(&mut self, action: GameAction) -> Outcome {
        match self.active.as_mut() {
            Some(game) => game.act(action),
            None => {
                log::debug!("{:?} with no game mounted", action);
                Outcome::Ignored
            }
        }
    }

    /// Advance the mounted session's clock
    pub fn advance(&mut self, dt: Duration) -> Vec<Outcome> {
        self.active
            .as_mut()
            .map(|game| game.advance(dt))
            .unwrap_or_default()
    }

    /// Restart the mounted session. Returns false with nothing mounted.
    pub fn restart(&mut self) -> bool {
        match self.active.as_mut() {
            Some(game) => {
                game.restart();
                true
            }
            None => false,
        }
    }

    pub fn status(&self) -> Option<GameStatus> {
        self.active.as_ref().map(ActiveGame::status)
    }

    /// JSON view of the mounted session, `null` on the menu
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        match &self.active {
            Some(game) => game.snapshot_json(),
            None => Ok("null".to_string()),
        }
    }

    /// The Game Over overlay, shown only while the mounted session is over
    pub fn overlay(&self) -> Option<GameOverOverlay> {
        self.status().and_then(|status| GameOverOverlay::from_status(&status))
    }

    pub fn apply_overlay(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Restart => {
                self.restart();
            }
            OverlayAction::Back => {
                self.back();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> GameSelector {
        GameSelector::new(Catalog::default(), 11)
    }

    #[test]
    fn test_menu_has_nothing_mounted() {
        let mut sel = selector();
        assert_eq!(sel.active_id(), None);
        assert_eq!(sel.act(GameAction::Pop), Outcome::Ignored);
        assert!(sel.advance(Duration::from_secs(10)).is_empty());
        assert!(!sel.restart());
        assert_eq!(sel.snapshot_json().unwrap(), "null");
        assert!(sel.overlay().is_none());
    }

    #[test]
    fn test_action_for_other_game_ignored() {
        let mut sel = selector();
        sel.select(GameId::Math);
        assert_eq!(sel.act(GameAction::Flip(0)), Outcome::Ignored);
        assert_eq!(sel.act(GameAction::GiveUp), Outcome::Ignored);
        assert_eq!(sel.status().unwrap().phase, Phase::InProgress);
    }

    #[test]
    fn test_reselect_mounts_fresh_session() {
        let mut sel = selector();
        sel.select(GameId::Pop);
        sel.act(GameAction::Pop);
        sel.act(GameAction::Pop);
        assert_eq!(sel.status().unwrap().score, 2);

        sel.select(GameId::Pop);
        assert_eq!(sel.status().unwrap().score, 0);
    }

    #[test]
    fn test_back_drops_pending_tasks() {
        let mut sel = selector();
        let game = sel.select(GameId::Pop);
        assert_eq!(game.pending_tasks(), 1);
        assert_eq!(sel.back(), Some(GameId::Pop));
        assert_eq!(sel.back(), None);
        assert!(sel.advance(Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn test_overlay_restart_and_back() {
        let mut sel = selector();
        sel.select(GameId::Count);
        assert!(sel.overlay().is_none());
        // 0 is never a valid count
        assert_eq!(sel.act(GameAction::Choose(0)), Outcome::Failed);

        let overlay = sel.overlay().unwrap();
        assert_eq!(overlay.score_line(), "Final Score: 0");
        assert_eq!(overlay.accent, "#06B6D4");

        sel.apply_overlay(OverlayAction::Restart);
        assert_eq!(sel.status().unwrap().phase, Phase::InProgress);

        sel.act(GameAction::Choose(0));
        sel.apply_overlay(OverlayAction::Back);
        assert_eq!(sel.active_id(), None);
    }

    #[test]
    fn test_snapshot_json_tagged_with_id() {
        let mut sel = selector();
        sel.select(GameId::Spell);
        let json: serde_json::Value = serde_json::from_str(&sel.snapshot_json().unwrap()).unwrap();
        assert_eq!(json["id"], "spell");
        assert_eq!(json["game"], "Spelling Bee");
        assert_eq!(json["phase"], "InProgress");
        assert!(json["round"]["scrambled"].is_string());
    }
}
