//! Pure exercise logic.
//!
//! Core modules are free of I/O side effects. Every operation is a function of
//! its arguments and returns the same output on every call.

pub mod benefits;
pub mod board;
pub mod sequence;
pub mod text;
