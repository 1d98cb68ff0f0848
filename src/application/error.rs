use thiserror::Error;

use crate::domain::{CategoryId, ExpenseId, MonthKey};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Month {0} is closed, changes are blocked")]
    MonthClosed(MonthKey),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Category already exists: {0}")]
    CategoryAlreadyExists(String),

    #[error("Invalid category name: {0}")]
    InvalidCategoryName(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
