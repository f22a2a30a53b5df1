//! Memory Match
//!
//! Every symbol is dealt twice, face down. Two flipped cards either lock in
//! as a pair after a short delay or flip back and count as a miss.

use serde::Serialize;

use crate::consts::{MATCH_DELAY, MAX_MISSES, MISMATCH_DELAY, POINTS_PER_MATCH};
use crate::sim::{Ctx, GameRng, Outcome, RoundGame};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: u32,
    pub symbol: String,
    pub flipped: bool,
    pub matched: bool,
}

impl Card {
    /// Whether the face is showing
    pub fn face_up(&self) -> bool {
        self.flipped || self.matched
    }
}

/// The dealt board plus its running tallies
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub cards: Vec<Card>,
    /// Indices flipped this turn (at most two)
    pub selection: Vec<usize>,
    pub matches: u32,
    pub misses: u32,
    pub max_misses: u32,
}

impl Board {
    pub fn pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// All pairs found
    pub fn is_won(&self) -> bool {
        self.matches == self.pairs()
    }

    /// A full selection is waiting to resolve
    pub fn is_resolving(&self) -> bool {
        self.selection.len() == 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryTask {
    /// Lock a matching pair in
    Match(usize, usize),
    /// Turn a mismatched pair back over
    Mismatch(usize, usize),
}

#[derive(Debug, Clone)]
pub struct MemoryMatch {
    symbols: Vec<String>,
    max_misses: u32,
}

impl MemoryMatch {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            max_misses: MAX_MISSES,
        }
    }

    pub fn with_max_misses(mut self, max_misses: u32) -> Self {
        self.max_misses = max_misses.max(1);
        self
    }
}

impl RoundGame for MemoryMatch {
    type Round = Board;
    type Action = usize;
    type Task = MemoryTask;

    fn name(&self) -> &'static str {
        "Memory Match"
    }

    fn deal(&self, rng: &mut GameRng) -> Board {
        let mut symbols: Vec<&String> = self.symbols.iter().chain(self.symbols.iter()).collect();
        rng.shuffle(&mut symbols);
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Card {
                id: i as u32,
                symbol: symbol.clone(),
                flipped: false,
                matched: false,
            })
            .collect();
        Board {
            cards,
            selection: Vec::with_capacity(2),
            matches: 0,
            misses: 0,
            max_misses: self.max_misses,
        }
    }

    fn play(&self, board: &mut Board, index: usize, ctx: &mut Ctx<'_, MemoryTask>) -> Outcome {
        if board.is_resolving() {
            return Outcome::Ignored;
        }
        let Some(card) = board.cards.get_mut(index) else {
            return Outcome::Ignored;
        };
        if card.face_up() {
            return Outcome::Ignored;
        }
        card.flipped = true;
        board.selection.push(index);

        if let [first, second] = board.selection[..] {
            if board.cards[first].symbol == board.cards[second].symbol {
                ctx.timers.after(MATCH_DELAY, MemoryTask::Match(first, second));
            } else {
                ctx.timers
                    .after(MISMATCH_DELAY, MemoryTask::Mismatch(first, second));
            }
        }
        Outcome::Pending
    }

    fn fire(&self, board: &mut Board, task: MemoryTask, _ctx: &mut Ctx<'_, MemoryTask>) -> Outcome {
        board.selection.clear();
        match task {
            MemoryTask::Match(a, b) => {
                board.cards[a].matched = true;
                board.cards[b].matched = true;
                board.matches += 1;
                if board.is_won() {
                    log::info!("Memory Match cleared with {} misses", board.misses);
                }
                Outcome::Scored {
                    points: 1,
                    next_round: false,
                }
            }
            MemoryTask::Mismatch(a, b) => {
                board.cards[a].flipped = false;
                board.cards[b].flipped = false;
                board.misses += 1;
                if board.misses >= board.max_misses {
                    Outcome::Failed
                } else {
                    Outcome::Pending
                }
            }
        }
    }

    fn reported_score(&self, score: u32) -> u32 {
        score * POINTS_PER_MATCH
    }
}
