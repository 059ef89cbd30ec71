//! Side-effecting helpers for the CLI.
//!
//! Filesystem access is isolated here so that [`crate::core`] stays pure.

pub mod config;
