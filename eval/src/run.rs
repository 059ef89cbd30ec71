//! Case execution orchestration.
//!
//! Runs a case's checks against the challenge library and captures results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, instrument};

use crate::case::CaseFile;
use crate::judge::run_checks;
use crate::outcome::{Outcome, classify_outcome};
use crate::results::{CaptureInput, capture_results, eval_run_id};

/// Result of running a single case.
#[derive(Debug)]
pub struct RunOutcome {
    /// Unique identifier for this eval run.
    pub eval_run_id: String,
    /// Path to the results directory.
    pub results_dir: PathBuf,
    /// Classified outcome.
    pub outcome: Outcome,
    pub checks_passed: usize,
    pub checks_total: usize,
}

/// Run a case end-to-end: checks, classification, result capture.
#[instrument(skip_all, fields(case_id = %case.case.id, run_num = run_num))]
pub fn run_case(
    results_base: &Path,
    case_path: &Path,
    case: &CaseFile,
    run_num: u32,
) -> Result<RunOutcome> {
    info!("case run started");

    let started_at = Utc::now();
    let eval_run_id = eval_run_id(started_at, run_num);
    let judgment = run_checks(&case.checks);
    let finished_at = Utc::now();

    let outcome = classify_outcome(&judgment);
    let capture_input = CaptureInput {
        case_id: &case.case.id,
        case_path,
        eval_run_id: &eval_run_id,
        judgment: &judgment,
        outcome,
        started_at,
        finished_at,
    };
    let results_dir = capture_results(results_base, &capture_input).context("capture results")?;

    info!(outcome = ?outcome, results_dir = %results_dir.display(), "case run complete");

    Ok(RunOutcome {
        eval_run_id,
        results_dir,
        outcome,
        checks_passed: judgment.passed_count(),
        checks_total: judgment.checks.len(),
    })
}
