//! Check execution and outcome recording.
//!
//! Calls the challenge library for each check and records expected and
//! actual values side by side.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use challenge::core::benefits::calculate;
use challenge::core::board::{BoardError, analyze};
use challenge::core::sequence::term_at;
use challenge::core::text::{starts_with_b_ends_with_a, starts_with_b_ends_with_a_ignore_case};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::case::Check;
use crate::simulate::optimal_path_rate;

/// Largest accepted difference between expected and computed probabilities.
pub const PROBABILITY_EPSILON: f64 = 1e-12;

/// Largest accepted difference between expected and computed amounts.
pub const MONEY_EPSILON: f64 = 0.005;

/// Collected check outcomes for a run.
#[derive(Debug, Serialize, Deserialize)]
pub struct Judgment {
    pub checks: Vec<CheckOutcome>,
}

impl Judgment {
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|check| check.passed).count()
    }
}

/// Result of running a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckOutcome {
    /// Check type, e.g. `board` or `benefits`.
    #[serde(default)]
    pub kind: String,
    pub label: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

/// Run all checks and collect outcomes.
#[instrument(skip_all, fields(check_count = checks.len()))]
pub fn run_checks(checks: &[Check]) -> Judgment {
    let outcomes = checks.iter().map(run_check).collect();
    Judgment { checks: outcomes }
}

fn run_check(check: &Check) -> CheckOutcome {
    let label = check.label();
    let (passed, expected, actual) = match check {
        Check::Text {
            text,
            ignore_case,
            expected,
        } => {
            let actual = if *ignore_case {
                starts_with_b_ends_with_a_ignore_case(text)
            } else {
                starts_with_b_ends_with_a(text)
            };
            (actual == *expected, expected.to_string(), actual.to_string())
        }
        Check::SequenceTerm { position, expected } => match term_at(*position) {
            Ok(actual) => (actual == *expected, expected.to_string(), actual.to_string()),
            Err(err) => (false, expected.to_string(), format!("error: {err}")),
        },
        Check::SequenceRejected { position } => match term_at(*position) {
            Ok(actual) => (false, "error".to_string(), actual.to_string()),
            Err(err) => (true, "error".to_string(), format!("error: {err}")),
        },
        Check::Board {
            board,
            turns,
            probability,
            combinations,
        } => judge_board(*board, *turns, *probability, *combinations),
        Check::BoardRejected { board } => match analyze(*board) {
            Ok(analysis) => (
                false,
                "invalid board size".to_string(),
                format!("turns={}", analysis.optimal_turns),
            ),
            Err(err) => (
                matches!(err, BoardError::InvalidBoardSize { .. }),
                "invalid board size".to_string(),
                format!("error: {err}"),
            ),
        },
        Check::BoardSimulation {
            board,
            trials,
            seed,
            tolerance,
        } => judge_simulation(*board, *trials, *seed, *tolerance),
        Check::Benefits {
            salary,
            hired,
            dismissed,
            vacation,
            thirteenth,
        } => {
            let expected = format!("vacation={vacation:.2} thirteenth={thirteenth:.2}");
            match calculate(*salary, *hired, *dismissed) {
                Ok(benefits) => (
                    (benefits.vacation - vacation).abs() < MONEY_EPSILON
                        && (benefits.thirteenth - thirteenth).abs() < MONEY_EPSILON,
                    expected,
                    format!(
                        "vacation={:.2} thirteenth={:.2}",
                        benefits.vacation, benefits.thirteenth
                    ),
                ),
                Err(err) => (false, expected, format!("error: {err}")),
            }
        }
    };

    if passed {
        debug!(check = %label, "check passed");
    } else {
        warn!(check = %label, %expected, %actual, "check failed");
    }
    CheckOutcome {
        kind: check.kind().to_string(),
        label,
        passed,
        expected,
        actual,
    }
}

fn judge_board(
    board: i64,
    turns: Option<usize>,
    probability: Option<f64>,
    combinations: Option<u64>,
) -> (bool, String, String) {
    let mut expected = Vec::new();
    if let Some(turns) = turns {
        expected.push(format!("turns={turns}"));
    }
    if let Some(probability) = probability {
        expected.push(format!("probability={probability}"));
    }
    if let Some(combinations) = combinations {
        expected.push(format!("combinations={combinations}"));
    }
    let expected = expected.join(" ");

    let analysis = match analyze(board) {
        Ok(analysis) => analysis,
        Err(err) => return (false, expected, format!("error: {err}")),
    };
    let actual = format!(
        "turns={} probability={} combinations={}",
        analysis.optimal_turns, analysis.optimal_probability, analysis.no_loop_combinations
    );
    let turns_match = turns.is_none_or(|turns| turns == analysis.optimal_turns);
    let probability_match = probability.is_none_or(|probability| {
        (probability - analysis.optimal_probability).abs() <= PROBABILITY_EPSILON
    });
    let combinations_match = combinations
        .is_none_or(|combinations| BigUint::from(combinations) == analysis.no_loop_combinations);
    (
        turns_match && probability_match && combinations_match,
        expected,
        actual,
    )
}

fn judge_simulation(board: i64, trials: u32, seed: u64, tolerance: f64) -> (bool, String, String) {
    let analysis = match analyze(board) {
        Ok(analysis) => analysis,
        Err(err) => return (false, "simulation".to_string(), format!("error: {err}")),
    };
    let rate = optimal_path_rate(analysis.board_len, analysis.optimal_turns, trials, seed);
    let exact = analysis.optimal_probability;
    (
        (rate - exact).abs() <= tolerance,
        format!("{exact:.6} ± {tolerance}"),
        format!("{rate:.6} over {trials} trials"),
    )
}

pub fn write_judgment(path: &Path, judgment: &Judgment) -> Result<()> {
    let contents = serde_json::to_string_pretty(judgment).context("serialize checks")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("date")
    }

    fn single(check: Check) -> CheckOutcome {
        let judgment = run_checks(&[check]);
        assert_eq!(judgment.checks.len(), 1);
        judgment.checks[0].clone()
    }

    #[test]
    fn board_reference_passes() {
        let outcome = single(Check::Board {
            board: 5,
            turns: Some(2),
            probability: Some(0.2222222222222222),
            combinations: Some(13),
        });
        assert!(outcome.passed, "{outcome:?}");
        assert_eq!(outcome.actual, "turns=2 probability=0.2222222222222222 combinations=13");
    }

    #[test]
    fn board_mismatch_fails() {
        let outcome = single(Check::Board {
            board: 4,
            turns: None,
            probability: None,
            combinations: Some(4),
        });
        assert!(!outcome.passed);
        assert_eq!(outcome.expected, "combinations=4");
    }

    #[test]
    fn board_error_fails_board_check() {
        let outcome = single(Check::Board {
            board: 2,
            turns: Some(1),
            probability: None,
            combinations: None,
        });
        assert!(!outcome.passed);
        assert!(outcome.actual.starts_with("error:"));
    }

    #[test]
    fn board_combinations_compare_exactly() {
        let outcome = single(Check::Board {
            board: 20,
            turns: None,
            probability: None,
            combinations: Some(121_415),
        });
        assert!(outcome.passed, "{outcome:?}");

        let outcome = single(Check::Board {
            board: 20,
            turns: None,
            probability: None,
            combinations: Some(121_416),
        });
        assert!(!outcome.passed);
        assert!(outcome.actual.ends_with("combinations=121415"));
    }

    #[test]
    fn board_rejected_requires_invalid_size() {
        assert!(single(Check::BoardRejected { board: 0 }).passed);
        assert!(!single(Check::BoardRejected { board: 3 }).passed);
    }

    #[test]
    fn simulation_agrees_with_exact_probability() {
        let outcome = single(Check::BoardSimulation {
            board: 5,
            trials: 20_000,
            seed: 11,
            tolerance: 0.02,
        });
        assert!(outcome.passed, "{outcome:?}");
    }

    #[test]
    fn sequence_checks() {
        assert!(single(Check::SequenceTerm {
            position: 200,
            expected: 1404
        })
        .passed);
        assert!(!single(Check::SequenceTerm {
            position: 200,
            expected: 1403
        })
        .passed);
        assert!(single(Check::SequenceRejected { position: 0 }).passed);
        assert!(!single(Check::SequenceRejected { position: 1 }).passed);
    }

    #[test]
    fn text_checks() {
        assert!(single(Check::Text {
            text: "BA".to_string(),
            ignore_case: false,
            expected: true
        })
        .passed);
        assert!(single(Check::Text {
            text: "bola".to_string(),
            ignore_case: true,
            expected: true
        })
        .passed);
    }

    #[test]
    fn benefits_compare_to_the_cent() {
        let outcome = single(Check::Benefits {
            salary: 3000.0,
            hired: date(2023, 1, 15),
            dismissed: date(2024, 6, 20),
            vacation: 1666.67,
            thirteenth: 1500.0,
        });
        assert!(outcome.passed, "{outcome:?}");

        let outcome = single(Check::Benefits {
            salary: 3000.0,
            hired: date(2023, 1, 15),
            dismissed: date(2024, 6, 20),
            vacation: 1750.0,
            thirteenth: 1500.0,
        });
        assert!(!outcome.passed);
    }

    #[test]
    fn judgment_counts_passes() {
        let judgment = run_checks(&[
            Check::BoardRejected { board: 1 },
            Check::BoardRejected { board: 10 },
        ]);
        assert_eq!(judgment.passed_count(), 1);
        assert!(judgment.checks.iter().all(|check| check.kind == "board_rejected"));
    }
}
