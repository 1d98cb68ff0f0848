use chrono::Utc;

use crate::domain::{
    Category, CategoryId, Cents, Expense, ExpenseId, ExpenseWithCategory, ExportLogEntry,
    MonthKey, UsageTag,
};
use crate::storage::Repository;

use super::reporting::{percent_of_income, CategoryTotal, MonthDashboard};
use super::AppError;

/// Application service providing the month-partitioned expense ledger
/// operations. This is the primary interface for any client (HTTP, CLI,
/// tests); the repository is injected and no global state is held.
pub struct ExpenseService {
    repo: Repository,
}

impl ExpenseService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Month lock guard: a missing config row counts as open; a closed
    /// month rejects the guarded mutation before any side effect.
    async fn ensure_month_open(&self, month: &MonthKey) -> Result<(), AppError> {
        match self.repo.get_month_config(month).await? {
            Some(config) if config.closed => Err(AppError::MonthClosed(month.clone())),
            _ => Ok(()),
        }
    }

    // ========================
    // Category operations
    // ========================

    /// Create a new category with a unique name.
    pub async fn add_category(&self, name: &str) -> Result<Category, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidCategoryName(
                "name must not be empty".to_string(),
            ));
        }

        if self.repo.get_category_by_name(name).await?.is_some() {
            return Err(AppError::CategoryAlreadyExists(name.to_string()));
        }

        let category = self.repo.save_category(name).await?;
        tracing::info!(id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// List all categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.repo.list_categories().await?)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense for a month. The month must be open and the
    /// category must exist; the expense starts unpaid.
    pub async fn add_expense(
        &self,
        category_id: CategoryId,
        amount_cents: Cents,
        month: &MonthKey,
        due_date: &str,
        usage_tag: UsageTag,
    ) -> Result<Expense, AppError> {
        self.ensure_month_open(month).await?;

        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        if self.repo.get_category(category_id).await?.is_none() {
            return Err(AppError::CategoryNotFound(category_id));
        }

        let expense = self
            .repo
            .save_expense(category_id, amount_cents, month, due_date, usage_tag)
            .await?;

        tracing::info!(id = expense.id, month = %month, "expense recorded");
        Ok(expense)
    }

    /// Mark an expense as paid. Idempotent: re-marking a paid expense is
    /// harmless.
    pub async fn mark_paid(&self, id: ExpenseId) -> Result<(), AppError> {
        let expense = self
            .repo
            .get_expense(id)
            .await?
            .ok_or(AppError::ExpenseNotFound(id))?;

        self.ensure_month_open(&expense.month).await?;
        self.repo.mark_expense_paid(id).await?;
        Ok(())
    }

    /// Delete an expense permanently.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<(), AppError> {
        let expense = self
            .repo
            .get_expense(id)
            .await?
            .ok_or(AppError::ExpenseNotFound(id))?;

        self.ensure_month_open(&expense.month).await?;
        self.repo.delete_expense(id).await?;
        tracing::info!(id, month = %expense.month, "expense deleted");
        Ok(())
    }

    /// List a month's expenses joined with category names, ordered by due
    /// date ascending. Pure read, no admin or lock check.
    pub async fn list_expenses(
        &self,
        month: &MonthKey,
    ) -> Result<Vec<ExpenseWithCategory>, AppError> {
        Ok(self.repo.list_expenses_for_month(month).await?)
    }

    // ========================
    // Month lifecycle
    // ========================

    /// Close a month: idempotently set the closed flag and append one
    /// export audit record. Subsequent mutations for the month fail until
    /// it is reopened.
    pub async fn close_month(&self, month: &MonthKey) -> Result<(), AppError> {
        let exported_at = Utc::now().format("%d/%m/%Y %H:%M").to_string();
        self.repo
            .close_month(month, &exported_at, ExportLogEntry::STATUS_EXPORTED)
            .await?;

        tracing::info!(month = %month, "month closed");
        Ok(())
    }

    /// Reopen a month, restoring mutability. A month never written to
    /// before gets its config row created open.
    pub async fn reopen_month(&self, month: &MonthKey) -> Result<(), AppError> {
        self.repo.reopen_month(month).await?;
        tracing::info!(month = %month, "month reopened");
        Ok(())
    }

    /// List the export audit records for a month, oldest first.
    pub async fn export_log(&self, month: &MonthKey) -> Result<Vec<ExportLogEntry>, AppError> {
        Ok(self.repo.list_export_log(month).await?)
    }

    // ========================
    // Income
    // ========================

    /// Set the monthly income. The month must be open; last write wins.
    pub async fn set_income(&self, month: &MonthKey, income_cents: Cents) -> Result<(), AppError> {
        self.ensure_month_open(month).await?;

        if income_cents < 0 {
            return Err(AppError::InvalidAmount(
                "Income must not be negative".to_string(),
            ));
        }

        self.repo.upsert_income(month, income_cents).await?;
        Ok(())
    }

    // ========================
    // Dashboard
    // ========================

    /// Compute the spend-vs-income summary for a month from current state.
    pub async fn dashboard(&self, month: &MonthKey) -> Result<MonthDashboard, AppError> {
        let totals = self.repo.month_totals(month).await?;
        let config = self.repo.get_month_config(month).await?;

        let (income_cents, closed) = config
            .map(|c| (c.income_cents, c.closed))
            .unwrap_or((0, false));

        let categories = self
            .repo
            .category_totals(month)
            .await?
            .into_iter()
            .map(|(name, total_cents)| CategoryTotal { name, total_cents })
            .collect();

        Ok(MonthDashboard {
            month: month.clone(),
            total_cents: totals.total,
            income_cents,
            closed,
            fixed_cents: totals.fixed,
            variable_cents: totals.variable,
            percent_of_income: percent_of_income(totals.total, income_cents),
            categories,
        })
    }
}
