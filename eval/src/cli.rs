//! CLI command implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::case::{CaseFile, case_path, discover_cases};
use crate::outcome::Outcome;
use crate::report::aggregate;
use crate::run::run_case;

/// List all available cases.
pub fn list_cases(cases_dir: &Path) -> Result<()> {
    for (_, case) in discover_cases(cases_dir)? {
        println!("{} {}", case.case.id, case.case.description);
    }
    Ok(())
}

/// Run one case (or every case when `case_id` is `None`), `runs` times each.
///
/// Returns `true` when every run passed.
pub fn run_cases(
    cases_dir: &Path,
    results_dir: &Path,
    case_id: Option<&str>,
    runs: u32,
) -> Result<bool> {
    let cases = match case_id {
        Some(case_id) => {
            let path = case_path(cases_dir, case_id);
            if !path.exists() {
                bail!("case {} not found at {}", case_id, path.display());
            }
            let case = CaseFile::load(&path).context("load case")?;
            vec![(path, case)]
        }
        None => discover_cases(cases_dir)?,
    };
    if cases.is_empty() {
        bail!("no cases found in {}", cases_dir.display());
    }

    info!(cases = cases.len(), runs, "starting runs");
    let mut all_passed = true;
    for (path, case) in &cases {
        for run_num in 1..=runs {
            debug!(case_id = %case.case.id, run_num, runs, "starting run");
            let outcome = run_case(results_dir, path, case, run_num).context("run case")?;
            println!(
                "run: case={} eval_run_id={} outcome={:?} checks={}/{} results={}",
                case.case.id,
                outcome.eval_run_id,
                outcome.outcome,
                outcome.checks_passed,
                outcome.checks_total,
                outcome.results_dir.display()
            );
            all_passed &= outcome.outcome == Outcome::Pass;
        }
    }
    Ok(all_passed)
}

/// Show aggregated results for a case.
pub fn report_case(results_dir: &Path, case_id: &str) -> Result<()> {
    let (summary, warnings) = aggregate(&results_dir.join(case_id))?;
    println!("report: case={} runs={}", case_id, summary.runs);
    println!(
        "report: pass={} fail={} error={}",
        summary.pass, summary.fail, summary.error
    );
    if let Some(avg) = summary.avg_duration_secs {
        println!("report: avg_duration_secs={:.3}", avg);
    }
    for (kind, rate) in &summary.by_kind {
        println!("report: {} {}/{} passed", kind, rate.passed, rate.total);
    }
    for (label, failures) in &summary.failing_checks {
        println!("report: failing {} in {} run(s)", label, failures);
    }
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}

/// Remove stored results for a case.
pub fn clean_case(results_dir: &Path, case_id: &str) -> Result<()> {
    let case_results = results_dir.join(case_id);
    if case_results.exists() {
        std::fs::remove_dir_all(&case_results)
            .with_context(|| format!("remove {}", case_results.display()))?;
    }
    println!(
        "clean: case={} results={}",
        case_id,
        case_results.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PASSING: &str = "[case]\nid = \"ok\"\ndescription = \"x\"\n[[checks]]\ntype = \"board_rejected\"\nboard = 2\n";
    const FAILING: &str = "[case]\nid = \"bad\"\ndescription = \"x\"\n[[checks]]\ntype = \"board_rejected\"\nboard = 3\n";

    #[test]
    fn run_all_reports_failure_when_any_case_fails() {
        let temp = tempdir().expect("tempdir");
        let cases = temp.path().join("cases");
        let results = temp.path().join("results");
        fs::create_dir_all(&cases).expect("cases dir");
        fs::write(cases.join("ok.toml"), PASSING).expect("write ok");
        assert!(run_cases(&cases, &results, None, 2).expect("run"));

        fs::write(cases.join("bad.toml"), FAILING).expect("write bad");
        assert!(!run_cases(&cases, &results, None, 1).expect("run"));
        assert!(run_cases(&cases, &results, Some("ok"), 1).expect("run"));
    }

    #[test]
    fn run_unknown_case_errors() {
        let temp = tempdir().expect("tempdir");
        let err = run_cases(temp.path(), temp.path(), Some("missing"), 1).expect_err("missing");
        assert!(err.to_string().contains("case missing not found"));
    }

    #[test]
    fn run_with_no_cases_errors() {
        let temp = tempdir().expect("tempdir");
        assert!(run_cases(&temp.path().join("none"), temp.path(), None, 1).is_err());
    }

    #[test]
    fn clean_removes_case_results() {
        let temp = tempdir().expect("tempdir");
        let case_results = temp.path().join("ok").join("eval-1");
        fs::create_dir_all(&case_results).expect("results");
        clean_case(temp.path(), "ok").expect("clean");
        assert!(!temp.path().join("ok").exists());
    }
}
