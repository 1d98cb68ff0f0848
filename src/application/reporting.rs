use serde::Serialize;

use crate::domain::{Cents, MonthKey};

/// Read-only spend-vs-income summary for one month. Computed from current
/// state on every call, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct MonthDashboard {
    pub month: MonthKey,
    pub total_cents: Cents,
    pub income_cents: Cents,
    pub closed: bool,
    pub fixed_cents: Cents,
    pub variable_cents: Cents,
    /// Share of income spent, rounded to one decimal place. Zero when no
    /// income is configured.
    pub percent_of_income: f64,
    pub categories: Vec<CategoryTotal>,
}

/// Summed expense amount for one category within a month.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total_cents: Cents,
}

/// Spend as a percentage of income, rounded to one decimal place.
/// Guards the income = 0 case instead of dividing by zero.
pub fn percent_of_income(total: Cents, income: Cents) -> f64 {
    if income <= 0 {
        return 0.0;
    }
    (total as f64 / income as f64 * 1000.0).round() / 10.0
}
