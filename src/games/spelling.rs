//! Spelling Bee
//!
//! Unscramble the word. A right answer lingers on a success banner and then
//! moves on; giving up reveals the word without ending the session, and the
//! revealed word can still be checked.

use serde::Serialize;

use crate::consts::{SPELL_ADVANCE_DELAY, SPELL_POINTS};
use crate::sim::{Ctx, GameRng, Outcome, RoundGame};

/// Player input for Spelling Bee
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellAction {
    /// Check a typed answer
    Submit(String),
    /// Reveal the word
    GiveUp,
    /// Move on after a reveal
    NextWord,
}

/// Banner under the input box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Banner {
    Solved,
    Revealed(String),
}

impl Banner {
    pub fn text(&self) -> String {
        match self {
            Banner::Solved => "✨ Brilliant! ✨".to_string(),
            Banner::Revealed(word) => format!("The word was {}! 🐝", word),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    pub word: String,
    pub scrambled: String,
    pub banner: Option<Banner>,
}

impl Puzzle {
    /// Answer accepted, waiting for the auto-advance
    pub fn is_solved(&self) -> bool {
        self.banner == Some(Banner::Solved)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.banner, Some(Banner::Revealed(_)))
    }

    /// Case-insensitive comparison against the target word
    pub fn accepts(&self, guess: &str) -> bool {
        !guess.is_empty() && guess.to_uppercase() == self.word
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellTask {
    Advance,
}

#[derive(Debug, Clone)]
pub struct SpellingBee {
    words: Vec<String>,
}

impl SpellingBee {
    /// Words are matched upper-case
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.to_uppercase()).collect(),
        }
    }
}

/// Shuffle the letters of `word`
pub fn scramble(word: &str, rng: &mut GameRng) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    rng.shuffle(&mut letters);
    letters.into_iter().collect()
}

impl RoundGame for SpellingBee {
    type Round = Puzzle;
    type Action = SpellAction;
    type Task = SpellTask;

    fn name(&self) -> &'static str {
        "Spelling Bee"
    }

    fn deal(&self, rng: &mut GameRng) -> Puzzle {
        let word = rng.pick(&self.words).cloned().unwrap_or_default();
        let scrambled = scramble(&word, rng);
        Puzzle {
            word,
            scrambled,
            banner: None,
        }
    }

    fn play(
        &self,
        puzzle: &mut Puzzle,
        action: SpellAction,
        ctx: &mut Ctx<'_, SpellTask>,
    ) -> Outcome {
        match action {
            SpellAction::Submit(_) if puzzle.is_solved() => Outcome::Ignored,
            SpellAction::GiveUp if puzzle.banner.is_some() => Outcome::Ignored,
            SpellAction::Submit(guess) => {
                if puzzle.accepts(&guess) {
                    puzzle.banner = Some(Banner::Solved);
                    ctx.timers.after(SPELL_ADVANCE_DELAY, SpellTask::Advance);
                    Outcome::Scored {
                        points: SPELL_POINTS,
                        next_round: false,
                    }
                } else {
                    Outcome::Failed
                }
            }
            SpellAction::GiveUp => {
                puzzle.banner = Some(Banner::Revealed(puzzle.word.clone()));
                Outcome::Pending
            }
            SpellAction::NextWord if puzzle.is_revealed() => Outcome::NextRound,
            SpellAction::NextWord => Outcome::Ignored,
        }
    }

    fn fire(&self, _puzzle: &mut Puzzle, task: SpellTask, _ctx: &mut Ctx<'_, SpellTask>) -> Outcome {
        match task {
            SpellTask::Advance => Outcome::NextRound,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::sim::{Phase, Session};

    fn mango() -> Session<SpellingBee> {
        Session::new(SpellingBee::new(vec!["mango".to_string()]), 8)
    }

    fn sorted(s: &str) -> Vec<char> {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn test_scramble_is_permutation() {
        let mut rng = GameRng::new(1);
        for word in ["APPLE", "SCHOOL", "DOGGY", "A", ""] {
            let scrambled = scramble(word, &mut rng);
            assert_eq!(scrambled.len(), word.len());
            assert_eq!(sorted(&scrambled), sorted(word));
        }
    }

    #[test]
    fn test_lowercase_answer_accepted() {
        let mut s = mango();
        assert_eq!(s.round().word, "MANGO");
        assert_eq!(
            s.act(SpellAction::Submit("mango".into())),
            Outcome::Scored {
                points: 10,
                next_round: false
            }
        );
        assert!(s.round().is_solved());
        assert_eq!(s.round().banner.as_ref().map(Banner::text).unwrap(), "✨ Brilliant! ✨");

        // Resubmitting while the banner lingers does not score twice
        assert_eq!(s.act(SpellAction::Submit("MANGO".into())), Outcome::Ignored);
        assert_eq!(s.score(), 10);

        assert_eq!(
            s.advance(Duration::from_millis(1000)),
            vec![Outcome::NextRound]
        );
        assert!(s.round().banner.is_none());
    }

    #[test]
    fn test_wrong_or_empty_submission_fails() {
        let mut s = mango();
        assert_eq!(s.act(SpellAction::Submit(String::new())), Outcome::Failed);
        assert_eq!(s.phase(), Phase::GameOver);

        let mut s = mango();
        assert_eq!(s.act(SpellAction::Submit("MONGA".into())), Outcome::Failed);
    }

    #[test]
    fn test_give_up_reveals_without_failing() {
        let mut s = mango();
        assert_eq!(s.act(SpellAction::NextWord), Outcome::Ignored);
        assert_eq!(s.act(SpellAction::GiveUp), Outcome::Pending);
        assert_eq!(s.phase(), Phase::InProgress);
        assert_eq!(
            s.round().banner.as_ref().map(Banner::text).unwrap(),
            "The word was MANGO! 🐝"
        );
        assert_eq!(s.act(SpellAction::GiveUp), Outcome::Ignored);

        assert_eq!(s.act(SpellAction::NextWord), Outcome::NextRound);
        assert!(!s.round().is_revealed());
    }

    #[test]
    fn test_revealed_word_can_still_be_checked() {
        let mut s = mango();
        s.act(SpellAction::GiveUp);
        assert_eq!(
            s.act(SpellAction::Submit("MANGO".into())),
            Outcome::Scored {
                points: 10,
                next_round: false
            }
        );
        assert!(s.round().is_solved());
        assert_eq!(s.act(SpellAction::Submit("MANGO".into())), Outcome::Ignored);
        assert_eq!(s.act(SpellAction::NextWord), Outcome::Ignored);
        assert_eq!(s.score(), 10);
        assert_eq!(
            s.advance(Duration::from_millis(1000)),
            vec![Outcome::NextRound]
        );
        assert!(s.round().banner.is_none());
    }

    #[test]
    fn test_restart_cancels_pending_advance() {
        let mut s = mango();
        s.act(SpellAction::Submit("mango".into()));
        assert_eq!(s.pending_tasks(), 1);
        s.restart();
        assert_eq!(s.pending_tasks(), 0);
        assert_eq!(s.score(), 0);
        assert!(s.advance(Duration::from_secs(5)).is_empty());
    }
}
