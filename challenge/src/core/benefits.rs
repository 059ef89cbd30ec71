//! Proportional vacation pay and thirteenth salary owed on dismissal.
//!
//! Vacation accrues from the last employment anniversary (earlier periods are
//! assumed taken) and carries a one-third bonus. The thirteenth salary accrues
//! from January 1 of the dismissal year. A month counts once at least 15 days
//! of it were worked.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Days worked in a month for it to count as a full month.
pub const MIN_DAYS_FOR_MONTH: u32 = 15;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BenefitsError {
    #[error("dismissal date {dismissed} is before hire date {hired}")]
    DismissalBeforeHire {
        hired: NaiveDate,
        dismissed: NaiveDate,
    },
    #[error("salary must not be negative, got {salary}")]
    NegativeSalary { salary: f64 },
    #[error("salary must be a finite number")]
    NonFiniteSalary,
}

/// Amounts owed plus the inputs that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benefits {
    /// Vacation pay including the one-third bonus, rounded to cents.
    pub vacation: f64,
    /// Thirteenth salary, rounded to cents.
    pub thirteenth: f64,
    pub breakdown: BenefitsBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitsBreakdown {
    pub salary: f64,
    pub hired: NaiveDate,
    pub dismissed: NaiveDate,
    pub vacation: VacationBreakdown,
    pub thirteenth: ThirteenthBreakdown,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacationBreakdown {
    pub last_anniversary: NaiveDate,
    pub months_worked: u32,
    pub proportional: f64,
    pub one_third_bonus: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThirteenthBreakdown {
    pub reference_year: i32,
    pub accrual_start: NaiveDate,
    pub months_worked: u32,
    pub total: f64,
}

/// Compute vacation pay and thirteenth salary for a monthly `salary`.
pub fn calculate(
    salary: f64,
    hired: NaiveDate,
    dismissed: NaiveDate,
) -> Result<Benefits, BenefitsError> {
    if dismissed < hired {
        return Err(BenefitsError::DismissalBeforeHire { hired, dismissed });
    }
    if !salary.is_finite() {
        return Err(BenefitsError::NonFiniteSalary);
    }
    if salary < 0.0 {
        return Err(BenefitsError::NegativeSalary { salary });
    }

    let vacation = vacation(salary, hired, dismissed);
    let thirteenth = thirteenth(salary, hired, dismissed);
    debug!(
        last_anniversary = %vacation.last_anniversary,
        vacation_months = vacation.months_worked,
        thirteenth_months = thirteenth.months_worked,
        "benefits computed"
    );

    Ok(Benefits {
        vacation: vacation.total,
        thirteenth: thirteenth.total,
        breakdown: BenefitsBreakdown {
            salary,
            hired,
            dismissed,
            total: vacation.total + thirteenth.total,
            vacation,
            thirteenth,
        },
    })
}

fn vacation(salary: f64, hired: NaiveDate, dismissed: NaiveDate) -> VacationBreakdown {
    let last_anniversary = last_anniversary(hired, dismissed);
    let months_worked = proportional_months(last_anniversary, dismissed);
    let proportional = f64::from(months_worked) / MONTHS_PER_YEAR * salary;
    let one_third_bonus = proportional / 3.0;
    VacationBreakdown {
        last_anniversary,
        months_worked,
        proportional: round_cents(proportional),
        one_third_bonus: round_cents(one_third_bonus),
        total: round_cents(proportional + one_third_bonus),
    }
}

fn thirteenth(salary: f64, hired: NaiveDate, dismissed: NaiveDate) -> ThirteenthBreakdown {
    let reference_year = dismissed.year();
    let accrual_start = NaiveDate::from_ymd_opt(reference_year, 1, 1)
        .map_or(hired, |year_start| year_start.max(hired));
    let months_worked = proportional_months(accrual_start, dismissed);
    ThirteenthBreakdown {
        reference_year,
        accrual_start,
        months_worked,
        total: round_cents(f64::from(months_worked) / MONTHS_PER_YEAR * salary),
    }
}

/// Most recent employment anniversary on or before `dismissed`, never before `hired`.
pub fn last_anniversary(hired: NaiveDate, dismissed: NaiveDate) -> NaiveDate {
    let year = dismissed.year();
    let anniversary = match anniversary_in(year, hired) {
        Some(date) if date <= dismissed => Some(date),
        _ => anniversary_in(year - 1, hired),
    };
    match anniversary {
        Some(date) if date >= hired => date,
        _ => hired,
    }
}

/// Hire month/day in `year`; February 29 falls back to the 28th.
fn anniversary_in(year: i32, hired: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, hired.month(), hired.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, hired.month(), 28))
}

/// Months between `start` and `end`, counting a partial month of 15+ days.
pub fn proportional_months(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());

    if end.day() < start.day() {
        months -= 1;
        if end.day() >= MIN_DAYS_FOR_MONTH {
            months += 1;
        }
    } else if end.day() - start.day() + 1 >= MIN_DAYS_FOR_MONTH {
        months += 1;
    }

    u32::try_from(months.max(0)).unwrap_or(u32::MAX)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
