mod case;
mod cli;
mod exit_codes;
mod judge;
mod outcome;
mod report;
mod results;
mod run;
mod simulate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eval",
    version,
    about = "Evaluation harness for the challenge exercises"
)]
struct Cli {
    /// Directory holding case files.
    #[arg(long, global = true, default_value = "eval/cases")]
    cases: PathBuf,

    /// Directory where run results are stored.
    #[arg(long, global = true, default_value = "eval/results")]
    results: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available cases.
    List,
    /// Run one case, or every case when no id is given.
    Run {
        case_id: Option<String>,
        #[arg(long, default_value_t = 1)]
        runs: u32,
    },
    /// Aggregate stored results for a case.
    Report { case_id: String },
    /// Delete stored results for a case.
    Clean { case_id: String },
}

fn main() {
    challenge::logging::init();
    let code = match run() {
        Ok(true) => exit_codes::OK,
        Ok(false) => exit_codes::FAILED,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

/// Returns `false` when a run completed but a case failed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    match cli.command {
        Command::List => cli::list_cases(&cli.cases).map(|()| true),
        Command::Run { case_id, runs } => {
            if runs == 0 {
                anyhow::bail!("--runs must be at least 1");
            }
            cli::run_cases(&cli.cases, &cli.results, case_id.as_deref(), runs)
        }
        Command::Report { case_id } => cli::report_case(&cli.results, &case_id).map(|()| true),
        Command::Clean { case_id } => cli::clean_case(&cli.results, &case_id).map(|()| true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_without_case_id_selects_all() {
        let cli = Cli::try_parse_from(["eval", "run", "--runs", "3"]).expect("parse");
        match cli.command {
            Command::Run { case_id, runs } => {
                assert_eq!(case_id, None);
                assert_eq!(runs, 3);
            }
            _ => panic!("expected run"),
        }
        assert_eq!(cli.cases, PathBuf::from("eval/cases"));
    }

    #[test]
    fn global_dirs_apply_after_subcommand() {
        let cli = Cli::try_parse_from(["eval", "report", "board", "--results", "/tmp/out"])
            .expect("parse");
        assert_eq!(cli.results, PathBuf::from("/tmp/out"));
        assert!(matches!(cli.command, Command::Report { ref case_id } if case_id == "board"));
    }

    #[test]
    fn clean_requires_case_id() {
        assert!(Cli::try_parse_from(["eval", "clean"]).is_err());
    }
}
