//! Command-line front end for the challenge exercises.
//!
//! Each subcommand calls one pure function from the library and prints the
//! result. Rejected input exits with [`exit_codes::INVALID`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use challenge::core::benefits::calculate;
use challenge::core::board::{BoardAnalysis, analyze};
use challenge::core::sequence::{first_terms, position_of, term_at};
use challenge::core::text::{starts_with_b_ends_with_a, starts_with_b_ends_with_a_ignore_case};
use challenge::exit_codes;
use challenge::io::config::{CONFIG_FILE, ChallengeConfig, load_config, write_config};
use challenge::logging;
use challenge::report::{benefits_statement, board_report, summary_table};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "challenge",
    version,
    about = "Board-game analysis and sibling programming exercises"
)]
struct Cli {
    /// Config file (missing file means defaults).
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Analyze boards: minimum turns, optimal-path probability, loop-free combinations.
    Board {
        /// Board sizes (default: `board.report_sizes` from config).
        #[arg(allow_negative_numbers = true)]
        sizes: Vec<i64>,
        /// Print JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Compare several boards in one table.
    Summary {
        /// Board sizes (default: `board.summary_sizes` from config).
        #[arg(allow_negative_numbers = true)]
        sizes: Vec<i64>,
    },
    /// Check whether TEXT starts with `B` and ends with `A`.
    Text {
        text: String,
        #[arg(long)]
        ignore_case: bool,
    },
    /// Query the sequence 11, 18, 25, 32, ...
    Sequence {
        /// 1-based position whose value to print.
        #[arg(
            allow_negative_numbers = true,
            required_unless_present_any = ["position_of", "first"],
            conflicts_with_all = ["position_of", "first"]
        )]
        position: Option<i64>,
        /// Print the position of VALUE instead.
        #[arg(long, value_name = "VALUE", allow_negative_numbers = true, conflicts_with = "first")]
        position_of: Option<i64>,
        /// Print the first COUNT terms instead.
        #[arg(long, value_name = "COUNT")]
        first: Option<usize>,
    },
    /// Vacation pay and thirteenth salary owed on dismissal.
    Benefits {
        /// Monthly salary.
        #[arg(long)]
        salary: f64,
        /// Hire date (YYYY-MM-DD).
        #[arg(long)]
        hired: NaiveDate,
        /// Dismissal date (YYYY-MM-DD).
        #[arg(long)]
        dismissed: NaiveDate,
        /// Print JSON instead of the statement.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Board { sizes, json } => {
            let cfg = load(&cli.config)?;
            cmd_board(&cfg, sizes, json)
        }
        Command::Summary { sizes } => {
            let cfg = load(&cli.config)?;
            cmd_summary(&cfg, sizes)
        }
        Command::Text { text, ignore_case } => {
            let matches = if ignore_case {
                starts_with_b_ends_with_a_ignore_case(&text)
            } else {
                starts_with_b_ends_with_a(&text)
            };
            println!("{matches}");
            Ok(())
        }
        Command::Sequence {
            position,
            position_of: value,
            first,
        } => cmd_sequence(position, value, first),
        Command::Benefits {
            salary,
            hired,
            dismissed,
            json,
        } => {
            let benefits = calculate(salary, hired, dismissed).context("calculate benefits")?;
            if json {
                print_json(&benefits)
            } else {
                print!("{}", benefits_statement(&benefits));
                Ok(())
            }
        }
    }
}

fn load(path: &Path) -> Result<ChallengeConfig> {
    let cfg = load_config(path)?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &ChallengeConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_board(cfg: &ChallengeConfig, sizes: Vec<i64>, json: bool) -> Result<()> {
    let analyses = analyze_all(or_default(sizes, &cfg.board.report_sizes))?;
    if json {
        return print_json(&analyses);
    }
    for analysis in &analyses {
        print!("{}", board_report(analysis, cfg.board.probability_digits));
        println!();
    }
    Ok(())
}

fn cmd_summary(cfg: &ChallengeConfig, sizes: Vec<i64>) -> Result<()> {
    let analyses = analyze_all(or_default(sizes, &cfg.board.summary_sizes))?;
    print!(
        "{}",
        summary_table(&analyses, cfg.board.probability_digits)
    );
    Ok(())
}

fn cmd_sequence(position: Option<i64>, value: Option<i64>, first: Option<usize>) -> Result<()> {
    if let Some(count) = first {
        let terms: Vec<String> = first_terms(count).iter().map(i64::to_string).collect();
        println!("{}", terms.join(", "));
        return Ok(());
    }
    if let Some(value) = value {
        match position_of(value) {
            Some(position) => println!("{position}"),
            None => bail!("{value} is not a term of the sequence"),
        }
        return Ok(());
    }
    let position = position.context("position is required")?;
    let term = term_at(position).context("sequence term")?;
    println!("{term}");
    Ok(())
}

fn or_default(sizes: Vec<i64>, defaults: &[i64]) -> Vec<i64> {
    if sizes.is_empty() {
        defaults.to_vec()
    } else {
        sizes
    }
}

fn analyze_all(sizes: Vec<i64>) -> Result<Vec<BoardAnalysis>> {
    sizes
        .into_iter()
        .map(|size| analyze(size).with_context(|| format!("analyze board of {size} squares")))
        .collect()
}

/// Serialize `value` to pretty-printed JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}
