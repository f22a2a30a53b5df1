//! Generic session state machine
//!
//! Every game shares one lifecycle: a fresh round is dealt on mount, actions
//! either score, advance, or fail the session, and restart deals again with
//! the score zeroed. A game only supplies the round generator (`deal`), the
//! success predicate (`play`) and the points it awards.

use std::fmt::Debug;
use std::time::Duration;

use serde::Serialize;

use super::rng::GameRng;
use super::timers::Timers;

/// Coarse lifecycle position of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    InProgress,
    GameOver,
}

/// Result of a player action or a fired task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected: session over, or the action does not apply right now
    Ignored,
    /// Accepted, nothing to score yet (first card flipped, timer ticked)
    Pending,
    /// Points awarded; `next_round` deals a new round immediately
    Scored { points: u32, next_round: bool },
    /// Deal a new round without scoring
    NextRound,
    /// The game's failure rule fired; the session is over
    Failed,
}

/// Mutable services a game may use while handling an action or task
pub struct Ctx<'a, T> {
    pub rng: &'a mut GameRng,
    pub timers: &'a mut Timers<T>,
}

/// The per-game part of the state machine
pub trait RoundGame {
    /// Puzzle state for one round (one problem, one board, one word)
    type Round: Clone + Debug + Serialize;
    /// Player input understood by this game
    type Action: Debug;
    /// Deferred work this game schedules
    type Task: Clone + Debug;

    /// Name used in logs and snapshots
    fn name(&self) -> &'static str;

    /// Generate a fresh round
    fn deal(&self, rng: &mut GameRng) -> Self::Round;

    /// Schedule session-long tasks (countdowns). Called on mount and restart.
    fn arm(&self, _round: &Self::Round, _timers: &mut Timers<Self::Task>) {}

    /// Judge a player action against the current round
    fn play(
        &self,
        round: &mut Self::Round,
        action: Self::Action,
        ctx: &mut Ctx<'_, Self::Task>,
    ) -> Outcome;

    /// Handle a task that came due
    fn fire(
        &self,
        _round: &mut Self::Round,
        _task: Self::Task,
        _ctx: &mut Ctx<'_, Self::Task>,
    ) -> Outcome {
        Outcome::Pending
    }

    /// Score as shown to the player (Memory Match reports pairs × 10)
    fn reported_score(&self, score: u32) -> u32 {
        score
    }
}

/// Serializable view of a session for the host page
#[derive(Debug, Serialize)]
pub struct Snapshot<'a, R: Serialize> {
    pub game: &'static str,
    pub score: u32,
    pub reported_score: u32,
    pub phase: Phase,
    pub round: &'a R,
}

/// One play-through of a single game
#[derive(Debug)]
pub struct Session<G: RoundGame> {
    game: G,
    rng: GameRng,
    timers: Timers<G::Task>,
    round: G::Round,
    score: u32,
    phase: Phase,
}

impl<G: RoundGame> Session<G> {
    /// Mount a session with a freshly dealt round
    pub fn new(game: G, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let round = game.deal(&mut rng);
        let mut timers = Timers::new();
        game.arm(&round, &mut timers);
        log::info!("{} started (seed {})", game.name(), seed);
        Self {
            game,
            rng,
            timers,
            round,
            score: 0,
            phase: Phase::InProgress,
        }
    }

    /// Mount a session on a prepared round (scripted play and replays)
    pub fn with_round(game: G, seed: u64, round: G::Round) -> Self {
        let mut timers = Timers::new();
        game.arm(&round, &mut timers);
        Self {
            game,
            rng: GameRng::new(seed),
            timers,
            round,
            score: 0,
            phase: Phase::InProgress,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn round(&self) -> &G::Round {
        &self.round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reported_score(&self) -> u32 {
        self.game.reported_score(self.score)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Deferred tasks still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.timers.pending()
    }

    /// Apply a player action. A no-op once the session is over.
    pub fn act(&mut self, action: G::Action) -> Outcome {
        if self.is_over() {
            log::debug!("{}: ignoring {:?} after game over", self.game.name(), action);
            return Outcome::Ignored;
        }
        let mut ctx = Ctx {
            rng: &mut self.rng,
            timers: &mut self.timers,
        };
        let outcome = self.game.play(&mut self.round, action, &mut ctx);
        self.apply(outcome)
    }

    /// Advance the session clock and handle every task that comes due.
    /// Returns the outcome of each fired task in firing order.
    pub fn advance(&mut self, dt: Duration) -> Vec<Outcome> {
        self.timers.advance(dt);
        let mut fired = Vec::new();
        while !self.is_over() {
            let Some(task) = self.timers.pop_due() else {
                break;
            };
            let mut ctx = Ctx {
                rng: &mut self.rng,
                timers: &mut self.timers,
            };
            let outcome = self.game.fire(&mut self.round, task, &mut ctx);
            fired.push(self.apply(outcome));
        }
        fired
    }

    /// Start over: cancel pending tasks, zero the score, deal a new round
    pub fn restart(&mut self) {
        self.timers.cancel_all();
        self.score = 0;
        self.phase = Phase::InProgress;
        self.round = self.game.deal(&mut self.rng);
        self.game.arm(&self.round, &mut self.timers);
        log::info!("{} restarted", self.game.name());
    }

    pub fn snapshot(&self) -> Snapshot<'_, G::Round> {
        Snapshot {
            game: self.game.name(),
            score: self.score,
            reported_score: self.reported_score(),
            phase: self.phase,
            round: &self.round,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> Outcome {
        match outcome {
            Outcome::Scored { points, next_round } => {
                self.score = self.score.saturating_add(points);
                if next_round {
                    self.round = self.game.deal(&mut self.rng);
                }
            }
            Outcome::NextRound => {
                self.round = self.game.deal(&mut self.rng);
            }
            Outcome::Failed => {
                self.phase = Phase::GameOver;
                self.timers.cancel_all();
                log::info!(
                    "{} over, final score {}",
                    self.game.name(),
                    self.reported_score()
                );
            }
            Outcome::Ignored | Outcome::Pending => {}
        }
        outcome
    }
}
