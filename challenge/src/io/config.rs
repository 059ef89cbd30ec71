//! CLI configuration stored in `challenge.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::board::MIN_BOARD_LEN;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "challenge.toml";

/// Largest precision that still shows meaningful `f64` digits.
pub const MAX_PROBABILITY_DIGITS: usize = 17;

/// CLI configuration (TOML).
///
/// Missing fields default to the reference board sizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ChallengeConfig {
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    /// Boards analyzed by `challenge board` when no size is given.
    pub report_sizes: Vec<i64>,

    /// Boards listed by `challenge summary` when no size is given.
    pub summary_sizes: Vec<i64>,

    /// Decimal places used when printing probabilities.
    pub probability_digits: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            report_sizes: vec![3, 4, 5, 6, 7, 8, 9, 10, 15, 20],
            summary_sizes: vec![3, 5, 10, 15, 20],
            probability_digits: 10,
        }
    }
}

impl ChallengeConfig {
    pub fn validate(&self) -> Result<()> {
        validate_sizes("board.report_sizes", &self.board.report_sizes)?;
        validate_sizes("board.summary_sizes", &self.board.summary_sizes)?;
        if !(1..=MAX_PROBABILITY_DIGITS).contains(&self.board.probability_digits) {
            return Err(anyhow!(
                "board.probability_digits must be in 1..={MAX_PROBABILITY_DIGITS}"
            ));
        }
        Ok(())
    }
}

fn validate_sizes(field: &str, sizes: &[i64]) -> Result<()> {
    if sizes.is_empty() {
        return Err(anyhow!("{field} must be a non-empty array"));
    }
    if let Some(size) = sizes.iter().find(|&&size| size < MIN_BOARD_LEN) {
        return Err(anyhow!(
            "{field} entries must be >= {MIN_BOARD_LEN}, got {size}"
        ));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ChallengeConfig::default()`.
pub fn load_config(path: &Path) -> Result<ChallengeConfig> {
    if !path.exists() {
        let cfg = ChallengeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ChallengeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ChallengeConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
