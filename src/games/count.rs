//! Quick Count
//!
//! Show a handful of one symbol and ask how many there are.

use serde::Serialize;

use crate::consts::{CHOICE_COUNT, COUNT_MAX, COUNT_MIN, COUNT_OPTION_MAX};
use crate::sim::{Ctx, GameRng, Outcome, RoundGame};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub symbol: String,
    pub count: u32,
    /// Shuffled answer buttons, `count` included exactly once
    pub options: Vec<u32>,
}

impl Tally {
    /// The symbols to draw, `count` of them
    pub fn items(&self) -> Vec<&str> {
        vec![self.symbol.as_str(); self.count as usize]
    }
}

#[derive(Debug, Clone)]
pub struct QuickCount {
    symbols: Vec<String>,
}

impl QuickCount {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }
}

impl RoundGame for QuickCount {
    type Round = Tally;
    type Action = u32;
    type Task = ();

    fn name(&self) -> &'static str {
        "Quick Count"
    }

    fn deal(&self, rng: &mut GameRng) -> Tally {
        let count = rng.range(COUNT_MIN, COUNT_MAX);
        let symbol = rng.pick(&self.symbols).cloned().unwrap_or_default();
        let candidates: Vec<u32> = (1..=COUNT_OPTION_MAX).collect();
        let options = rng.choices(count, &candidates, CHOICE_COUNT);
        Tally {
            symbol,
            count,
            options,
        }
    }

    fn play(&self, tally: &mut Tally, choice: u32, _ctx: &mut Ctx<'_, ()>) -> Outcome {
        if choice == tally.count {
            Outcome::Scored {
                points: 1,
                next_round: true,
            }
        } else {
            Outcome::Failed
        }
    }
}
