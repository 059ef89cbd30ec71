//! Stable exit codes for the `challenge` CLI.

/// Command succeeded.
pub const OK: i32 = 0;
/// Input was rejected (board too small, bad position, bad dates) or config is invalid.
pub const INVALID: i32 = 1;
