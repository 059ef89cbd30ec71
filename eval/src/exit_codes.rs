//! Stable exit codes for the `eval` CLI.

/// Every selected case passed.
pub const OK: i32 = 0;
/// Cases could not be loaded or results could not be written.
pub const INVALID: i32 = 1;
/// At least one case failed a check.
pub const FAILED: i32 = 2;
