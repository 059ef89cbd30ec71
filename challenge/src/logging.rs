//! Diagnostics for the `challenge` and `eval` binaries.
//!
//! What is traced:
//! - `core::board::analyze` runs in a debug span and emits the turn count,
//!   the exact path count and the bit width of the combination count.
//! - `core::benefits::calculate` logs the anniversary and accrual months it used.
//! - `eval` logs run milestones (`starting runs`, `case run complete`) at
//!   `info` and every failed check at `warn`.
//!
//! All of it goes to stderr under `RUST_LOG`; reports stay on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. Call once, first thing in `main`.
///
/// `RUST_LOG` picks the filter; unset means `warn`, which only shows failed
/// eval checks. `RUST_LOG=challenge=debug` adds the per-board metrics.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
