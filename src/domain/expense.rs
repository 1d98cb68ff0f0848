use serde::Serialize;

use super::{CategoryId, Cents, MonthKey};

pub type ExpenseId = i64;

/// Classification of an expense as recurring or discretionary.
/// Stored and transmitted with the Portuguese wire vocabulary the
/// original frontend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageTag {
    #[serde(rename = "FIXO")]
    Fixed,
    #[serde(rename = "VARIAVEL")]
    Variable,
}

impl UsageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTag::Fixed => "FIXO",
            UsageTag::Variable => "VARIAVEL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FIXO" => Some(UsageTag::Fixed),
            "VARIAVEL" => Some(UsageTag::Variable),
            _ => None,
        }
    }
}

impl std::fmt::Display for UsageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expense. Belongs to exactly one month and one category.
/// Immutable after insert except for the paid flag (set-true only) and
/// deletion.
#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category_id: CategoryId,
    pub amount_cents: Cents,
    pub month: MonthKey,
    /// Due date as an ISO "YYYY-MM-DD" string; listings sort on it
    /// lexicographically.
    pub due_date: String,
    pub usage_tag: UsageTag,
    pub paid: bool,
}

/// An expense joined with its category name, as returned by listings.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseWithCategory {
    pub expense: Expense,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_tag_roundtrip() {
        for tag in [UsageTag::Fixed, UsageTag::Variable] {
            let s = tag.as_str();
            let parsed = UsageTag::from_str(s).unwrap();
            assert_eq!(tag, parsed);
        }
    }

    #[test]
    fn test_usage_tag_is_case_insensitive() {
        assert_eq!(UsageTag::from_str("fixo"), Some(UsageTag::Fixed));
        assert_eq!(UsageTag::from_str("Variavel"), Some(UsageTag::Variable));
    }

    #[test]
    fn test_usage_tag_rejects_unknown() {
        assert_eq!(UsageTag::from_str("RECORRENTE"), None);
        assert_eq!(UsageTag::from_str(""), None);
    }
}
