//! Emoji Pop
//!
//! Tap the symbol before the 30 second countdown runs out. Every tap moves
//! it somewhere new.

use serde::Serialize;

use crate::consts::{POP_MAX_PERCENT, POP_MIN_PERCENT, POP_SECONDS, POP_TICK};
use crate::sim::{Ctx, GameRng, Outcome, RoundGame, Timers};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub symbol: String,
    /// Position as a percentage of the play area, each axis in [15, 85)
    pub top: f32,
    pub left: f32,
    pub seconds_left: u32,
    pub pops: u32,
}

impl Target {
    /// Position as CSS percentages, e.g. `("42.0%", "17.5%")`
    pub fn css_position(&self) -> (String, String) {
        (format!("{:.1}%", self.top), format!("{:.1}%", self.left))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopTask {
    /// One second of the countdown elapsed
    Tick,
}

#[derive(Debug, Clone)]
pub struct EmojiPop {
    symbols: Vec<String>,
    seconds: u32,
}

impl EmojiPop {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            seconds: POP_SECONDS,
        }
    }

    pub fn with_seconds(mut self, seconds: u32) -> Self {
        self.seconds = seconds.max(1);
        self
    }

    fn relocate(&self, target: &mut Target, rng: &mut GameRng) {
        if let Some(symbol) = rng.pick(&self.symbols) {
            target.symbol = symbol.clone();
        }
        target.top = rng.range_f32(POP_MIN_PERCENT, POP_MAX_PERCENT);
        target.left = rng.range_f32(POP_MIN_PERCENT, POP_MAX_PERCENT);
    }
}

impl RoundGame for EmojiPop {
    type Round = Target;
    type Action = ();
    type Task = PopTask;

    fn name(&self) -> &'static str {
        "Emoji Pop"
    }

    fn deal(&self, rng: &mut GameRng) -> Target {
        let mut target = Target {
            symbol: String::new(),
            top: 50.0,
            left: 50.0,
            seconds_left: self.seconds,
            pops: 0,
        };
        self.relocate(&mut target, rng);
        target
    }

    fn arm(&self, _target: &Target, timers: &mut Timers<PopTask>) {
        timers.every(POP_TICK, PopTask::Tick);
    }

    fn play(&self, target: &mut Target, _tap: (), ctx: &mut Ctx<'_, PopTask>) -> Outcome {
        target.pops += 1;
        self.relocate(target, ctx.rng);
        Outcome::Scored {
            points: 1,
            next_round: false,
        }
    }

    fn fire(&self, target: &mut Target, task: PopTask, _ctx: &mut Ctx<'_, PopTask>) -> Outcome {
        match task {
            PopTask::Tick => {
                target.seconds_left = target.seconds_left.saturating_sub(1);
                if target.seconds_left == 0 {
                    Outcome::Failed
                } else {
                    Outcome::Pending
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Catalog;
    use crate::sim::{Phase, Session};

    fn session(seed: u64) -> Session<EmojiPop> {
        Session::new(EmojiPop::new(Catalog::default().symbols), seed)
    }

    #[test]
    fn test_target_inside_band() {
        let mut s = session(1);
        for _ in 0..100 {
            let t = s.round();
            assert!((POP_MIN_PERCENT..POP_MAX_PERCENT).contains(&t.top));
            assert!((POP_MIN_PERCENT..POP_MAX_PERCENT).contains(&t.left));
            s.act(());
        }
    }

    #[test]
    fn test_tap_scores_and_keeps_clock() {
        let mut s = session(2);
        s.advance(Duration::from_secs(5));
        assert_eq!(s.round().seconds_left, 25);
        s.act(());
        s.act(());
        assert_eq!(s.score(), 2);
        assert_eq!(s.round().seconds_left, 25);
    }

    #[test]
    fn test_countdown_ends_session() {
        let mut s = session(3);
        assert_eq!(s.round().seconds_left, 30);
        s.act(());
        s.act(());
        s.act(());
        for _ in 0..29 {
            s.advance(Duration::from_secs(1));
        }
        assert_eq!(s.phase(), Phase::InProgress);
        assert_eq!(s.round().seconds_left, 1);
        assert_eq!(s.advance(Duration::from_secs(1)), vec![Outcome::Failed]);
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.score(), 3);
        assert_eq!(s.pending_tasks(), 0);

        // Late taps do nothing
        assert_eq!(s.act(()), Outcome::Ignored);
        assert_eq!(s.score(), 3);
    }

    #[test]
    fn test_short_countdown() {
        let mut s = Session::new(EmojiPop::new(Catalog::default().symbols).with_seconds(0), 5);
        assert_eq!(s.round().seconds_left, 1);
        s.act(());
        assert_eq!(s.advance(Duration::from_secs(1)), vec![Outcome::Failed]);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_css_position() {
        let target = Target {
            symbol: "🎈".to_string(),
            top: 42.04,
            left: 17.5,
            seconds_left: 30,
            pops: 0,
        };
        assert_eq!(
            target.css_position(),
            ("42.0%".to_string(), "17.5%".to_string())
        );
    }

    #[test]
    fn test_restart_resets_countdown() {
        let mut s = session(4);
        s.advance(Duration::from_secs(30));
        assert!(s.is_over());
        s.restart();
        assert_eq!(s.round().seconds_left, 30);
        assert_eq!(s.pending_tasks(), 1);
    }
}
