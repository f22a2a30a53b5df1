//! Color Quest
//!
//! Name a colour, show every swatch in a new order, tap the right one.

use serde::Serialize;

use crate::config::Swatch;
use crate::sim::{Ctx, GameRng, Outcome, RoundGame};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub target: Swatch,
    /// Every swatch exactly once, shuffled
    pub swatches: Vec<Swatch>,
}

#[derive(Debug, Clone)]
pub struct ColorQuest {
    swatches: Vec<Swatch>,
}

impl ColorQuest {
    pub fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }
}

impl RoundGame for ColorQuest {
    type Round = Prompt;
    /// Index of the tapped swatch in display order
    type Action = usize;
    type Task = ();

    fn name(&self) -> &'static str {
        "Color Quest"
    }

    fn deal(&self, rng: &mut GameRng) -> Prompt {
        let mut swatches = self.swatches.clone();
        rng.shuffle(&mut swatches);
        let target = rng
            .pick(&self.swatches)
            .cloned()
            .unwrap_or_else(|| Swatch::new("", "#000000"));
        Prompt { target, swatches }
    }

    fn play(&self, prompt: &mut Prompt, index: usize, _ctx: &mut Ctx<'_, ()>) -> Outcome {
        match prompt.swatches.get(index) {
            None => Outcome::Ignored,
            Some(swatch) if swatch.name == prompt.target.name => Outcome::Scored {
                points: 1,
                next_round: true,
            },
            Some(_) => Outcome::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;
    use crate::sim::{Phase, Session};

    fn session(seed: u64) -> Session<ColorQuest> {
        Session::new(ColorQuest::new(Catalog::default().swatches), seed)
    }

    fn target_index(prompt: &Prompt) -> usize {
        prompt
            .swatches
            .iter()
            .position(|s| s == &prompt.target)
            .unwrap()
    }

    #[test]
    fn test_all_swatches_offered_once() {
        let mut rng = GameRng::new(5);
        let game = ColorQuest::new(Catalog::default().swatches);
        for _ in 0..50 {
            let prompt = game.deal(&mut rng);
            assert_eq!(prompt.swatches.len(), 6);
            assert_eq!(
                prompt.swatches.iter().filter(|s| **s == prompt.target).count(),
                1
            );
            let mut names: Vec<&str> = prompt.swatches.iter().map(|s| s.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), 6);
        }
    }

    #[test]
    fn test_right_swatch_scores_wrong_fails() {
        let mut s = session(1);
        for expected in 1..=5 {
            let idx = target_index(s.round());
            s.act(idx);
            assert_eq!(s.score(), expected);
        }
        let wrong = (target_index(s.round()) + 1) % 6;
        assert_eq!(s.act(wrong), Outcome::Failed);
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.score(), 5);
    }

    #[test]
    fn test_missing_swatch_ignored() {
        let mut s = session(2);
        assert_eq!(s.act(6), Outcome::Ignored);
        assert_eq!(s.phase(), Phase::InProgress);
    }
}
