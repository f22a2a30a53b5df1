//! Math Whiz
//!
//! One-step addition or subtraction with three answer buttons.

use serde::Serialize;

use crate::consts::{
    CHOICE_COUNT, MATH_DISTRACTOR_SPREAD, MATH_MAX_OPERAND, MATH_MIN_OPERAND, MATH_POINTS,
};
use crate::sim::{Ctx, GameRng, Outcome, RoundGame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub lhs: u32,
    pub rhs: u32,
    pub op: Operator,
    pub answer: u32,
    /// Shuffled answer buttons, `answer` included exactly once
    pub options: Vec<u32>,
}

impl Problem {
    /// Build a problem; subtraction is floored at zero and sums saturate
    pub fn new(lhs: u32, rhs: u32, op: Operator, rng: &mut GameRng) -> Self {
        let answer = match op {
            Operator::Plus => lhs.saturating_add(rhs),
            Operator::Minus => lhs.saturating_sub(rhs),
        };
        let lo = answer.saturating_sub(MATH_DISTRACTOR_SPREAD);
        let candidates: Vec<u32> = (lo..=answer.saturating_add(MATH_DISTRACTOR_SPREAD)).collect();
        let options = rng.choices(answer, &candidates, CHOICE_COUNT);
        Self {
            lhs,
            rhs,
            op,
            answer,
            options,
        }
    }

    /// Prompt text, e.g. `7 + 2 = ?`
    pub fn question(&self) -> String {
        format!("{} {} {} = ?", self.lhs, self.op.symbol(), self.rhs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MathWhiz;

impl RoundGame for MathWhiz {
    type Round = Problem;
    type Action = u32;
    type Task = ();

    fn name(&self) -> &'static str {
        "Math Whiz"
    }

    fn deal(&self, rng: &mut GameRng) -> Problem {
        let lhs = rng.range(MATH_MIN_OPERAND, MATH_MAX_OPERAND);
        let rhs = rng.range(MATH_MIN_OPERAND, MATH_MAX_OPERAND);
        let op = if rng.coin() {
            Operator::Plus
        } else {
            Operator::Minus
        };
        Problem::new(lhs, rhs, op, rng)
    }

    fn play(&self, problem: &mut Problem, choice: u32, _ctx: &mut Ctx<'_, ()>) -> Outcome {
        if choice == problem.answer {
            Outcome::Scored {
                points: MATH_POINTS,
                next_round: true,
            }
        } else {
            Outcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Phase, Session};

    #[test]
    fn test_subtraction_floors_at_zero() {
        let mut rng = GameRng::new(1);
        let p = Problem::new(3, 9, Operator::Minus, &mut rng);
        assert_eq!(p.answer, 0);
        assert!(p.options.contains(&0));
        assert_eq!(p.question(), "3 - 9 = ?");
    }

    #[test]
    fn test_huge_operands_saturate() {
        let p = Problem::new(u32::MAX - 1, 5, Operator::Plus, &mut GameRng::new(2));
        assert_eq!(p.answer, u32::MAX);
        assert_eq!(p.options.len(), 3);
        assert!(p.options.contains(&u32::MAX));
        assert!(p.options.iter().all(|&o| o >= u32::MAX - MATH_DISTRACTOR_SPREAD));
    }

    #[test]
    fn test_options_near_answer() {
        let mut rng = GameRng::new(2);
        for _ in 0..200 {
            let p = MathWhiz.deal(&mut rng);
            assert_eq!(p.options.len(), CHOICE_COUNT);
            assert_eq!(p.options.iter().filter(|&&o| o == p.answer).count(), 1);
            for &o in &p.options {
                assert!(o.abs_diff(p.answer) <= MATH_DISTRACTOR_SPREAD);
            }
        }
    }

    #[test]
    fn test_seven_plus_two() {
        let mut rng = GameRng::new(70);
        let problem = Problem::new(7, 2, Operator::Plus, &mut rng);
        assert_eq!(problem.question(), "7 + 2 = ?");
        assert_eq!(problem.answer, 9);

        // Right answer: +10 and a new problem
        let mut right = Session::with_round(MathWhiz, 7, problem.clone());
        assert_eq!(
            right.act(9),
            Outcome::Scored {
                points: 10,
                next_round: true
            }
        );
        assert_eq!(right.score(), 10);

        // Wrong answers end the session with the score unchanged
        for wrong in [6, 12] {
            let mut s = Session::with_round(MathWhiz, 7, problem.clone());
            assert_eq!(s.act(wrong), Outcome::Failed);
            assert_eq!(s.phase(), Phase::GameOver);
            assert_eq!(s.score(), 0);
            assert_eq!(s.act(9), Outcome::Ignored);
        }
    }
}
