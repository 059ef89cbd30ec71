//! Human-readable reports printed by the CLI.
//!
//! Rendering is kept apart from [`crate::core`] so the analyzers only return
//! values; every function here returns a `String` and performs no I/O.

use std::fmt::Write;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::core::benefits::Benefits;
use crate::core::board::{BoardAnalysis, STEPS};

const RULE_WIDTH: usize = 60;

/// `K` in "1 in K": `floor(1 / p)`, computed exactly as `3^turns / paths`.
///
/// `None` when the printed probability is zero or its inverse is not finite.
pub fn one_in(analysis: &BoardAnalysis) -> Option<BigUint> {
    let inverse = 1.0 / analysis.optimal_probability;
    if !inverse.is_finite() || analysis.optimal_paths.is_zero() {
        return None;
    }
    let turns = u32::try_from(analysis.optimal_turns).ok()?;
    let outcomes = BigUint::from(STEPS.len()).pow(turns);
    Some(outcomes / &analysis.optimal_paths)
}

/// Detailed report for a single board.
pub fn board_report(analysis: &BoardAnalysis, digits: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let squares = analysis.board_len;
    let turns = analysis.optimal_turns;
    let probability = analysis.optimal_probability;
    let combinations = &analysis.no_loop_combinations;
    let odds = one_in(analysis).map_or_else(|| "infinity".to_string(), |k| k.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Board with {squares} squares");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "1. Optimal path (minimum turns): {turns}");
    let _ = writeln!(
        out,
        "   - Covering {squares} squares takes at least {turns} turns"
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "2. Probability of the optimal path: {probability:.digits$}"
    );
    let _ = writeln!(out, "   - Equivalent to {:.6}%", probability * 100.0);
    let _ = writeln!(out, "   - Or roughly 1 in {odds}");
    let _ = writeln!(out);
    let _ = writeln!(out, "3. Loop-free combinations: {combinations}");
    let _ = writeln!(
        out,
        "   - {combinations} distinct roll sequences land exactly on square {squares}"
    );
    let _ = writeln!(out, "     without overshooting it");
    out
}

/// Side-by-side comparison of several boards.
pub fn summary_table(analyses: &[BoardAnalysis], digits: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<10} {:<20} {:<15}",
        "Squares", "Turns", "Probability", "Combinations"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for analysis in analyses {
        let _ = writeln!(
            out,
            "{:<8} {:<10} {:<20.*} {:<15}",
            analysis.board_len,
            analysis.optimal_turns,
            digits,
            analysis.optimal_probability,
            analysis.no_loop_combinations
        );
    }
    out
}

/// Termination statement for the benefits calculation.
pub fn benefits_statement(benefits: &Benefits) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let breakdown = &benefits.breakdown;
    let vacation = &breakdown.vacation;
    let thirteenth = &breakdown.thirteenth;
    let date_format = "%d/%m/%Y";

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "TERMINATION STATEMENT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  Monthly salary: {:.2}", breakdown.salary);
    let _ = writeln!(out, "  Hired: {}", breakdown.hired.format(date_format));
    let _ = writeln!(out, "  Dismissed: {}", breakdown.dismissed.format(date_format));
    let _ = writeln!(out);
    let _ = writeln!(out, "VACATION");
    let _ = writeln!(
        out,
        "  Last anniversary: {}",
        vacation.last_anniversary.format(date_format)
    );
    let _ = writeln!(out, "  Months worked: {}", vacation.months_worked);
    let _ = writeln!(out, "  Proportional vacation: {:.2}", vacation.proportional);
    let _ = writeln!(out, "  One-third bonus: {:.2}", vacation.one_third_bonus);
    let _ = writeln!(out, "  Total vacation: {:.2}", benefits.vacation);
    let _ = writeln!(out);
    let _ = writeln!(out, "THIRTEENTH SALARY");
    let _ = writeln!(out, "  Reference year: {}", thirteenth.reference_year);
    let _ = writeln!(
        out,
        "  Accrual start: {}",
        thirteenth.accrual_start.format(date_format)
    );
    let _ = writeln!(out, "  Months worked: {}", thirteenth.months_worked);
    let _ = writeln!(out, "  Total thirteenth: {:.2}", benefits.thirteenth);
    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  TOTAL DUE: {:.2}", breakdown.total);
    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::benefits::calculate;
    use crate::core::board::analyze;
    use crate::test_support::date;

    fn odds(board_len: i64) -> Option<BigUint> {
        one_in(&analyze(board_len).expect("analyze"))
    }

    #[test]
    fn one_in_floors_inverse() {
        assert_eq!(odds(3), Some(BigUint::from(3u32)));
        // 9 / 2 paths
        assert_eq!(odds(5), Some(BigUint::from(4u32)));
        // 81 / 10 paths
        assert_eq!(odds(10), Some(BigUint::from(8u32)));
    }

    #[test]
    fn one_in_is_exact_beyond_u64() {
        // one optimal path of 50 threes
        let k = odds(150).expect("finite odds");
        assert!(k > BigUint::from(u64::MAX));
        assert_eq!(k.to_string(), "717897987691852588770249");

        let report = board_report(&analyze(150).expect("analyze"), 10);
        assert!(report.contains("1 in 717897987691852588770249"));
    }

    #[test]
    fn one_in_guards_zero_probability() {
        assert_eq!(odds(3_000), None);
    }

    #[test]
    fn board_report_lists_all_metrics() {
        let analysis = analyze(5).expect("analyze");
        let report = board_report(&analysis, 10);
        assert!(report.contains("Board with 5 squares"));
        assert!(report.contains("Optimal path (minimum turns): 2"));
        assert!(report.contains("Probability of the optimal path: 0.2222222222"));
        assert!(report.contains("Equivalent to 22.222222%"));
        assert!(report.contains("1 in 4"));
        assert!(report.contains("Loop-free combinations: 13"));
    }

    #[test]
    fn board_report_marks_vanishing_probability_as_infinite_odds() {
        let analysis = analyze(3_000).expect("analyze");
        let report = board_report(&analysis, 10);
        assert!(report.contains("1 in infinity"));
    }

    #[test]
    fn summary_table_has_row_per_board() {
        let analyses: Vec<_> = [3, 5, 10]
            .into_iter()
            .map(|n| analyze(n).expect("analyze"))
            .collect();
        let table = summary_table(&analyses, 4);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("3        1          0.3333"));
        assert!(lines[3].contains("0.2222"));
        assert!(lines[4].trim_end().ends_with("274"));
    }

    #[test]
    fn benefits_statement_shows_totals() {
        let benefits = calculate(3000.0, date(2023, 1, 15), date(2024, 6, 20)).expect("calc");
        let statement = benefits_statement(&benefits);
        assert!(statement.contains("Hired: 15/01/2023"));
        assert!(statement.contains("Total vacation: 1666.67"));
        assert!(statement.contains("Total thirteenth: 1500.00"));
        assert!(statement.contains("TOTAL DUE: 3166.67"));
    }
}
