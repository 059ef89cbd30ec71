//! Case file parsing and validation.
//!
//! Cases are TOML files listing checks against the challenge library.
//! See `eval/cases/` for examples.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::Deserialize;

/// A parsed case file: metadata plus the checks to run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CaseFile {
    pub case: CaseMeta,
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// Case metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseMeta {
    /// Unique identifier (slug format: `[a-z0-9_-]+`).
    pub id: String,
    /// What the case covers, shown by `eval list`.
    pub description: String,
}

/// Single expectation against one exercise function.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Prefix/suffix check on a string.
    Text {
        text: String,
        #[serde(default)]
        ignore_case: bool,
        expected: bool,
    },
    /// Value at a position of the arithmetic sequence.
    SequenceTerm { position: i64, expected: i64 },
    /// Position that must be rejected.
    SequenceRejected { position: i64 },
    /// Board metrics; omitted fields are not compared.
    Board {
        board: i64,
        turns: Option<usize>,
        probability: Option<f64>,
        combinations: Option<u64>,
    },
    /// Board size that must be rejected with an invalid-size error.
    BoardRejected { board: i64 },
    /// Seeded Monte Carlo estimate of the optimal-path probability.
    BoardSimulation {
        board: i64,
        trials: u32,
        seed: u64,
        tolerance: f64,
    },
    /// Vacation and thirteenth salary amounts, compared to the cent.
    Benefits {
        salary: f64,
        hired: NaiveDate,
        dismissed: NaiveDate,
        vacation: f64,
        thirteenth: f64,
    },
}

impl CaseFile {
    /// Load and validate a case file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read case {}", path.display()))?;
        let case: CaseFile =
            toml::from_str(&contents).with_context(|| format!("parse case {}", path.display()))?;
        case.validate()
            .with_context(|| format!("validate case {}", path.display()))?;
        Ok(case)
    }

    #[cfg(test)]
    pub fn parse_str(contents: &str) -> Result<Self> {
        let case: CaseFile = toml::from_str(contents).context("parse case")?;
        case.validate()?;
        Ok(case)
    }

    fn validate(&self) -> Result<()> {
        validate_case_id(&self.case.id)?;
        if self.case.description.trim().is_empty() {
            bail!("case.description must be non-empty");
        }
        if self.checks.is_empty() {
            bail!("checks must be a non-empty array");
        }
        for (index, check) in self.checks.iter().enumerate() {
            check
                .validate()
                .with_context(|| format!("checks[{}] invalid", index))?;
        }
        Ok(())
    }
}

impl Check {
    fn validate(&self) -> Result<()> {
        match self {
            Check::Board {
                turns,
                probability,
                combinations,
                ..
            } => {
                if turns.is_none() && probability.is_none() && combinations.is_none() {
                    bail!("board needs at least one of turns, probability, combinations");
                }
                if let Some(probability) = probability
                    && !(0.0..=1.0).contains(probability)
                {
                    bail!("board.probability must be in [0, 1]");
                }
            }
            Check::BoardSimulation {
                trials, tolerance, ..
            } => {
                if *trials == 0 {
                    bail!("board_simulation.trials must be > 0");
                }
                if !(*tolerance > 0.0 && *tolerance < 1.0) {
                    bail!("board_simulation.tolerance must be in (0, 1)");
                }
            }
            Check::Benefits { salary, .. } => {
                if !salary.is_finite() {
                    bail!("benefits.salary must be a finite number");
                }
            }
            Check::Text { .. }
            | Check::SequenceTerm { .. }
            | Check::SequenceRejected { .. }
            | Check::BoardRejected { .. } => {}
        }
        Ok(())
    }

    /// Check type as written in the case file's `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Check::Text { .. } => "text",
            Check::SequenceTerm { .. } => "sequence_term",
            Check::SequenceRejected { .. } => "sequence_rejected",
            Check::Board { .. } => "board",
            Check::BoardRejected { .. } => "board_rejected",
            Check::BoardSimulation { .. } => "board_simulation",
            Check::Benefits { .. } => "benefits",
        }
    }

    /// Stable label identifying this check in output and reports.
    pub fn label(&self) -> String {
        match self {
            Check::Text {
                text, ignore_case, ..
            } => {
                if *ignore_case {
                    format!("text_ignore_case({text:?})")
                } else {
                    format!("text({text:?})")
                }
            }
            Check::SequenceTerm { position, .. } => format!("sequence_term({position})"),
            Check::SequenceRejected { position } => format!("sequence_rejected({position})"),
            Check::Board { board, .. } => format!("board({board})"),
            Check::BoardRejected { board } => format!("board_rejected({board})"),
            Check::BoardSimulation { board, seed, .. } => {
                format!("board_simulation({board}, seed={seed})")
            }
            Check::Benefits {
                salary,
                hired,
                dismissed,
                ..
            } => format!("benefits({salary}, {hired}, {dismissed})"),
        }
    }
}

/// Path of the case file for `case_id` inside `cases_dir`.
pub fn case_path(cases_dir: &Path, case_id: &str) -> PathBuf {
    cases_dir.join(format!("{case_id}.toml"))
}

/// Discover and load all case files from a directory.
///
/// Returns `(path, case)` pairs sorted by id. Errors if duplicate ids are found.
pub fn discover_cases(dir: &Path) -> Result<Vec<(PathBuf, CaseFile)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut cases = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read cases dir {}", dir.display()))? {
        let entry = entry.context("read case entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        let case = CaseFile::load(&path)?;
        cases.push((path, case));
    }
    cases.sort_by(|(_, left), (_, right)| left.case.id.cmp(&right.case.id));
    for pair in cases.windows(2) {
        if pair[0].1.case.id == pair[1].1.case.id {
            return Err(anyhow!("duplicate case.id {}", pair[0].1.case.id));
        }
    }
    Ok(cases)
}

fn validate_case_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        bail!("case.id must be non-empty");
    }
    if id.contains('/') || id.contains('\\') {
        bail!("case.id must not contain path separators");
    }
    if id.contains("..") {
        bail!("case.id must not contain '..'");
    }
    if !id
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("case.id must use [a-z0-9_-] only");
    }
    Ok(())
}
