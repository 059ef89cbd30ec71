//! Arithmetic sequence `11, 18, 25, 32, 39, ...`.

use thiserror::Error;

pub const FIRST_TERM: i64 = 11;
pub const COMMON_DIFFERENCE: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("position must be >= 1, got {position}")]
    InvalidPosition { position: i64 },
    #[error("term at position {position} does not fit in a 64-bit integer")]
    Overflow { position: i64 },
}

/// Value at 1-based `position`: `11 + (position - 1) * 7`.
pub fn term_at(position: i64) -> Result<i64, SequenceError> {
    if position < 1 {
        return Err(SequenceError::InvalidPosition { position });
    }
    (position - 1)
        .checked_mul(COMMON_DIFFERENCE)
        .and_then(|offset| offset.checked_add(FIRST_TERM))
        .ok_or(SequenceError::Overflow { position })
}

/// Inverse of [`term_at`]. Returns `None` when `value` is not a term.
pub fn position_of(value: i64) -> Option<i64> {
    let offset = value.checked_sub(FIRST_TERM)?;
    if offset < 0 || offset % COMMON_DIFFERENCE != 0 {
        return None;
    }
    Some(offset / COMMON_DIFFERENCE + 1)
}

/// First `count` terms, saturating at the last term that fits.
pub fn first_terms(count: usize) -> Vec<i64> {
    (1..)
        .take(count)
        .map_while(|position| term_at(position).ok())
        .collect()
}
