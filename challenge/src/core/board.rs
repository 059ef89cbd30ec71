//! Board-game analysis over a roulette that moves a player 1, 2 or 3 squares.
//!
//! The player starts on square 0 (before square 1) and wins by landing exactly
//! on square `n`. A roll that would carry the player past square `n` is a loop;
//! loops never contribute to any count computed here. Restart dynamics after a
//! loop are not modelled.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, instrument};

/// Smallest legal board.
pub const MIN_BOARD_LEN: i64 = 3;

/// Squares a single roll can move the player.
pub const STEPS: [usize; 3] = [1, 2, 3];

const MAX_STEP: usize = 3;
const STEP_PROBABILITY: f64 = 1.0 / 3.0;
const UNREACHABLE: usize = usize::MAX;

/// Errors returned by [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have at least {min} squares, got {board_len}", min = MIN_BOARD_LEN)]
    InvalidBoardSize { board_len: i64 },
    #[error("board of {board_len} squares cannot be indexed on this platform")]
    BoardTooLarge { board_len: i64 },
}

/// Metrics derived from a single board length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardAnalysis {
    pub board_len: usize,
    /// Minimum number of turns to land exactly on the last square.
    pub optimal_turns: usize,
    /// Distinct roll sequences of `optimal_turns` rolls that land on the last square.
    #[serde(serialize_with = "serialize_decimal")]
    pub optimal_paths: BigUint,
    /// Probability that `optimal_turns` uniform rolls follow an optimal path.
    pub optimal_probability: f64,
    /// Distinct roll sequences of any length that land on the last square without looping.
    #[serde(serialize_with = "serialize_decimal")]
    pub no_loop_combinations: BigUint,
}

impl BoardAnalysis {
    /// `(optimal_turns, optimal_probability, no_loop_combinations)`.
    pub fn into_triple(self) -> (usize, f64, BigUint) {
        (
            self.optimal_turns,
            self.optimal_probability,
            self.no_loop_combinations,
        )
    }
}

/// Analyze a board of `board_len` squares.
///
/// Fails with [`BoardError::InvalidBoardSize`] when `board_len < 3`.
#[instrument(level = "debug")]
pub fn analyze(board_len: i64) -> Result<BoardAnalysis, BoardError> {
    if board_len < MIN_BOARD_LEN {
        return Err(BoardError::InvalidBoardSize { board_len });
    }
    let len = usize::try_from(board_len).map_err(|_| BoardError::BoardTooLarge { board_len })?;

    let optimal_turns = min_turns(len);
    let optimal_paths = count_paths(len, optimal_turns);
    let optimal_probability = path_probability(&optimal_paths, optimal_turns);
    let no_loop_combinations = count_no_loop_sequences(len);

    debug!(
        optimal_turns,
        %optimal_paths,
        optimal_probability,
        combination_bits = no_loop_combinations.bits(),
        "board analyzed"
    );

    Ok(BoardAnalysis {
        board_len: len,
        optimal_turns,
        optimal_paths,
        optimal_probability,
        no_loop_combinations,
    })
}

/// Number of ordered sequences of exactly `turns` rolls that sum to `target`.
///
/// Built bottom-up one turn at a time. Row `t` only holds the `remaining`
/// values that can be non-zero after `t` rolls (`t <= remaining <= 3t`) and
/// can still finish on `target` in the rolls left, so for `turns` close to
/// `target / 3` every row is at most three cells wide.
pub fn count_paths(target: usize, turns: usize) -> BigUint {
    if target < turns || target > turns.saturating_mul(MAX_STEP) {
        return BigUint::zero();
    }

    // count_paths(0, 0) = 1
    let mut row = PathRow {
        start: 0,
        counts: vec![BigUint::one()],
    };
    for taken in 1..=turns {
        let left = turns - taken;
        let lo = taken.max(target.saturating_sub(left.saturating_mul(MAX_STEP)));
        let hi = taken.saturating_mul(MAX_STEP).min(target - left);
        let counts = (lo..=hi)
            .map(|remaining| {
                STEPS
                    .iter()
                    .filter_map(|&step| remaining.checked_sub(step))
                    .filter_map(|prev| row.get(prev))
                    .sum()
            })
            .collect();
        row = PathRow { start: lo, counts };
    }

    row.get(target).cloned().unwrap_or_default()
}

/// One turn of the path-count table, covering `start..start + counts.len()`.
struct PathRow {
    start: usize,
    counts: Vec<BigUint>,
}

impl PathRow {
    fn get(&self, remaining: usize) -> Option<&BigUint> {
        remaining
            .checked_sub(self.start)
            .and_then(|offset| self.counts.get(offset))
    }
}

/// Forward DP over positions; overshooting rolls are discarded.
fn min_turns(board_len: usize) -> usize {
    let mut dp_min = vec![UNREACHABLE; board_len + 1];
    dp_min[0] = 0;

    for position in 0..=board_len {
        let turns = dp_min[position];
        if turns == UNREACHABLE {
            continue;
        }
        for step in STEPS {
            let next = position + step;
            if next > board_len {
                break;
            }
            dp_min[next] = dp_min[next].min(turns + 1);
        }
    }

    dp_min[board_len]
}

/// Forward push DP counting loop-free sequences that end exactly on `board_len`.
///
/// `dp_count[p]` only feeds `p + 1..=p + 3`, so the table is kept as a ring of
/// four cells: slot `p % 4` is drained before `p + 4` can write to it.
fn count_no_loop_sequences(board_len: usize) -> BigUint {
    const RING: usize = MAX_STEP + 1;

    let mut dp_count: [BigUint; RING] = Default::default();
    dp_count[0] = BigUint::one();

    for position in 0..board_len {
        let count = std::mem::take(&mut dp_count[position % RING]);
        if count.is_zero() {
            continue;
        }
        for step in STEPS {
            let next = position + step;
            if next > board_len {
                break;
            }
            dp_count[next % RING] += &count;
        }
    }

    std::mem::take(&mut dp_count[board_len % RING])
}

fn path_probability(paths: &BigUint, turns: usize) -> f64 {
    let paths = paths.to_f64().unwrap_or(f64::INFINITY);
    paths * STEP_PROBABILITY.powf(turns as f64)
}

fn serialize_decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
