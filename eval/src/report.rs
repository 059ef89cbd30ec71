//! Aggregation of stored runs for `eval report`.
//!
//! Pass rates are grouped by check type so a report answers "which exercise
//! regressed"; individual failing checks are listed with how often they failed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::judge::Judgment;
use crate::outcome::Outcome;
use crate::results::EvalMeta;

/// Checks of one type that passed out of those run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassRate {
    pub passed: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub runs: usize,
    pub pass: usize,
    pub fail: usize,
    pub error: usize,
    pub avg_duration_secs: Option<f64>,
    /// Check type (`board`, `benefits`, ...) -> pass rate across all runs.
    pub by_kind: BTreeMap<String, PassRate>,
    /// Check label -> number of runs in which it failed.
    pub failing_checks: BTreeMap<String, usize>,
}

/// A run directory whose `meta.json` and `checks.json` both parsed.
struct StoredRun {
    meta: EvalMeta,
    judgment: Judgment,
}

impl ReportSummary {
    fn record(&mut self, run: &StoredRun) {
        self.runs += 1;
        match run.meta.outcome {
            Some(Outcome::Pass) => self.pass += 1,
            Some(Outcome::Fail) => self.fail += 1,
            Some(Outcome::Error) | None => self.error += 1,
        }
        for check in &run.judgment.checks {
            let kind = if check.kind.is_empty() {
                kind_from_label(&check.label)
            } else {
                check.kind.as_str()
            };
            let rate = self.by_kind.entry(kind.to_string()).or_default();
            rate.total += 1;
            if check.passed {
                rate.passed += 1;
            } else {
                *self.failing_checks.entry(check.label.clone()).or_default() += 1;
            }
        }
    }
}

/// Aggregate every run under `case_results_dir`.
///
/// Runs with unreadable result files are skipped and reported as warnings.
pub fn aggregate(case_results_dir: &Path) -> Result<(ReportSummary, Vec<String>)> {
    let mut summary = ReportSummary::default();
    let mut warnings = Vec::new();
    let mut durations = Vec::new();

    for run_dir in run_dirs(case_results_dir)? {
        match load_run(&run_dir) {
            Ok(run) => {
                summary.record(&run);
                durations.push(run.meta.duration_secs);
            }
            Err(err) => warnings.push(format!("skip {}: {err:#}", run_dir.display())),
        }
    }

    if !durations.is_empty() {
        summary.avg_duration_secs = Some(durations.iter().sum::<f64>() / durations.len() as f64);
    }
    Ok((summary, warnings))
}

fn run_dirs(case_results_dir: &Path) -> Result<Vec<PathBuf>> {
    if !case_results_dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(case_results_dir)
        .with_context(|| format!("read {}", case_results_dir.display()))?;
    let mut dirs = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .context("read run entry")?;
    dirs.retain(|path| path.is_dir());
    dirs.sort();
    Ok(dirs)
}

fn load_run(run_dir: &Path) -> Result<StoredRun> {
    Ok(StoredRun {
        meta: read_json(&run_dir.join("meta.json"))?,
        judgment: read_json(&run_dir.join("checks.json"))?,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// `board(5)` -> `board`, for results written before checks carried a type.
fn kind_from_label(label: &str) -> &str {
    label.split_once('(').map_or(label, |(kind, _)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::CheckOutcome;
    use tempfile::tempdir;

    fn write_run(dir: &Path, outcome: Outcome, duration: f64, checks: &[(&str, &str, bool)]) {
        fs::create_dir_all(dir).expect("run dir");
        let meta = EvalMeta {
            case_id: "case".to_string(),
            eval_run_id: "run".to_string(),
            case_hash: "hash".to_string(),
            eval_version: "0.1.0".to_string(),
            outcome: Some(outcome),
            start_time: "now".to_string(),
            end_time: "later".to_string(),
            duration_secs: duration,
            checks_passed: checks.iter().filter(|(_, _, passed)| *passed).count(),
            checks_total: checks.len(),
            errors: Vec::new(),
        };
        let judgment = Judgment {
            checks: checks
                .iter()
                .map(|&(kind, label, passed)| CheckOutcome {
                    kind: kind.to_string(),
                    label: label.to_string(),
                    passed,
                    expected: String::new(),
                    actual: String::new(),
                })
                .collect(),
        };
        let meta = serde_json::to_string_pretty(&meta).expect("meta json");
        fs::write(dir.join("meta.json"), meta).expect("write meta");
        let checks = serde_json::to_string_pretty(&judgment).expect("checks json");
        fs::write(dir.join("checks.json"), checks).expect("write checks");
    }

    #[test]
    fn groups_pass_rates_by_check_type() {
        let temp = tempdir().expect("tempdir");
        write_run(
            &temp.path().join("run1"),
            Outcome::Pass,
            0.5,
            &[
                ("board", "board(3)", true),
                ("board", "board(5)", true),
                ("benefits", "benefits(3000, 2023-01-15, 2024-06-20)", true),
            ],
        );
        write_run(
            &temp.path().join("run2"),
            Outcome::Fail,
            1.5,
            &[
                ("board", "board(3)", true),
                ("board", "board(5)", false),
                ("benefits", "benefits(3000, 2023-01-15, 2024-06-20)", true),
            ],
        );

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert!(warnings.is_empty());
        assert_eq!((summary.runs, summary.pass, summary.fail), (2, 1, 1));
        assert_eq!(summary.avg_duration_secs, Some(1.0));
        assert_eq!(
            summary.by_kind.get("board"),
            Some(&PassRate {
                passed: 3,
                total: 4
            })
        );
        assert_eq!(
            summary.by_kind.get("benefits"),
            Some(&PassRate {
                passed: 2,
                total: 2
            })
        );
        assert_eq!(summary.failing_checks.len(), 1);
        assert_eq!(summary.failing_checks.get("board(5)"), Some(&1));
    }

    #[test]
    fn untyped_checks_fall_back_to_label_prefix() {
        let temp = tempdir().expect("tempdir");
        write_run(
            &temp.path().join("run1"),
            Outcome::Fail,
            0.1,
            &[("", "sequence_term(1)", false)],
        );
        let (summary, _) = aggregate(temp.path()).expect("aggregate");
        assert_eq!(
            summary.by_kind.get("sequence_term"),
            Some(&PassRate {
                passed: 0,
                total: 1
            })
        );
    }

    #[test]
    fn skips_runs_with_invalid_meta() {
        let temp = tempdir().expect("tempdir");
        write_run(&temp.path().join("run1"), Outcome::Pass, 0.2, &[("text", "text(\"BA\")", true)]);
        fs::write(temp.path().join("run1").join("meta.json"), "not json").expect("write meta");

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.avg_duration_secs, None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("meta.json"));
    }

    #[test]
    fn missing_results_dir_is_empty() {
        let temp = tempdir().expect("tempdir");
        let (summary, warnings) = aggregate(&temp.path().join("absent")).expect("aggregate");
        assert_eq!(summary.runs, 0);
        assert!(warnings.is_empty());
    }
}
