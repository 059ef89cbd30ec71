//! Solutions to a four-part programming challenge.
//!
//! The centerpiece is [`core::board`], which analyzes a board game where a
//! roulette moves the player 1, 2 or 3 squares per turn. The sibling exercises
//! ([`core::text`], [`core::sequence`], [`core::benefits`]) are small pure
//! functions kept alongside it so the `eval` runner can exercise all four.
//!
//! - **[`core`]**: Pure, deterministic logic. No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config files).
//! - **[`report`]**: Text rendering for the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
