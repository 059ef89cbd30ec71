//! Monte Carlo cross-check of the optimal-path probability.
//!
//! Plays `turns` uniform rolls of 1, 2 or 3 per trial and counts how often the
//! player lands exactly on the last square. Trials that overshoot stop early
//! and count as misses.

use challenge::core::board::STEPS;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fraction of `trials` whose first `turns` rolls land exactly on `board_len`.
pub fn optimal_path_rate(board_len: usize, turns: usize, trials: u32, seed: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let hits = (0..trials)
        .filter(|_| lands_exactly(&mut rng, board_len, turns))
        .count();
    hits as f64 / f64::from(trials)
}

fn lands_exactly(rng: &mut StdRng, board_len: usize, turns: usize) -> bool {
    let mut position = 0;
    for _ in 0..turns {
        position += STEPS[rng.gen_range(0..STEPS.len())];
        if position > board_len {
            return false;
        }
    }
    position == board_len
}
