//! Seeded randomness shared by every game
//!
//! Each session owns one generator. Shuffles are uniform (Fisher-Yates via
//! `SliceRandom::shuffle`).

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Seeded PCG generator that remembers its seed
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent seed (used to seed child sessions)
    pub fn fork_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform integer in `lo..=hi`
    pub fn range(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.random_range(lo..=hi)
    }

    /// Uniform float in `lo..hi`
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.rng.random_range(lo..hi)
    }

    /// Fair coin
    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Pick one item; `None` only for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Uniform in-place shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Build a shuffled option list: `answer` plus up to `count - 1` distinct
    /// distractors drawn from `candidates` (values equal to `answer` and
    /// repeats are skipped). The answer is always present exactly once.
    pub fn choices(&mut self, answer: u32, candidates: &[u32], count: usize) -> Vec<u32> {
        let mut pool: Vec<u32> = Vec::with_capacity(candidates.len());
        for &c in candidates {
            if c != answer && !pool.contains(&c) {
                pool.push(c);
            }
        }
        self.shuffle(&mut pool);

        let mut options = Vec::with_capacity(count);
        options.push(answer);
        options.extend(pool.into_iter().take(count.saturating_sub(1)));
        self.shuffle(&mut options);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..20 {
            assert_eq!(a.range(1, 10), b.range(1, 10));
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_choices_distinct_with_answer() {
        let mut rng = GameRng::new(3);
        for answer in 0u32..20 {
            let candidates: Vec<u32> = (answer.saturating_sub(3)..=answer + 3).collect();
            let options = rng.choices(answer, &candidates, 3);
            assert_eq!(options.len(), 3);
            assert_eq!(options.iter().filter(|&&o| o == answer).count(), 1);
            let mut sorted = options.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 3);
        }
    }

    #[test]
    fn test_choices_with_small_pool() {
        let mut rng = GameRng::new(1);
        // Only one usable distractor: the list is shorter, never duplicated
        let options = rng.choices(5, &[5, 6, 6], 3);
        assert_eq!(options.len(), 2);
        assert!(options.contains(&5) && options.contains(&6));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(11);
        let mut items: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }
}
