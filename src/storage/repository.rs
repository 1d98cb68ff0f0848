use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::{
    Category, CategoryId, Cents, Expense, ExpenseId, ExpenseWithCategory, ExportLogEntry,
    MonthConfig, MonthKey, UsageTag,
};

use super::{MIGRATION_001_INITIAL, MIGRATION_002_EXPORT_LOG};

/// Aggregated expense sums for one month, split by usage tag.
#[derive(Debug, Clone, Copy)]
pub struct MonthTotals {
    pub total: Cents,
    pub fixed: Cents,
    pub variable: Cents,
}

/// Repository for persisting and querying categories, expenses, and
/// month configuration.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Every statement is idempotent, so this is
    /// safe to call at each startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::query(MIGRATION_002_EXPORT_LOG)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Category operations
    // ========================

    /// Save a new category and return it with its assigned id.
    pub async fn save_category(&self, name: &str) -> Result<Category> {
        let row = sqlx::query("INSERT INTO categories (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to save category")?;

        Self::row_to_category(&row)
    }

    /// Get a category by id.
    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch category")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    /// Get a category by name.
    pub async fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch category by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    /// List all categories, ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list categories")?;

        rows.iter().map(Self::row_to_category).collect()
    }

    fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
        Ok(Category {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense with paid = false and return it with its
    /// assigned id.
    pub async fn save_expense(
        &self,
        category_id: CategoryId,
        amount_cents: Cents,
        month: &MonthKey,
        due_date: &str,
        usage_tag: UsageTag,
    ) -> Result<Expense> {
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (category_id, amount_cents, month, due_date, usage_tag, paid)
            VALUES (?, ?, ?, ?, ?, 0)
            RETURNING id
            "#,
        )
        .bind(category_id)
        .bind(amount_cents)
        .bind(month.as_str())
        .bind(due_date)
        .bind(usage_tag.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to save expense")?;

        Ok(Expense {
            id: row.get("id"),
            category_id,
            amount_cents,
            month: month.clone(),
            due_date: due_date.to_string(),
            usage_tag,
            paid: false,
        })
    }

    /// Get an expense by id.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, category_id, amount_cents, month, due_date, usage_tag, paid
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_expense(&row)?)),
            None => Ok(None),
        }
    }

    /// List all expenses for a month joined with their category name,
    /// ordered ascending by due date.
    pub async fn list_expenses_for_month(
        &self,
        month: &MonthKey,
    ) -> Result<Vec<ExpenseWithCategory>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.category_id, e.amount_cents, e.month, e.due_date, e.usage_tag, e.paid,
                   c.name AS category
            FROM expenses e
            JOIN categories c ON e.category_id = c.id
            WHERE e.month = ?
            ORDER BY e.due_date ASC
            "#,
        )
        .bind(month.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter()
            .map(|row| {
                Ok(ExpenseWithCategory {
                    expense: Self::row_to_expense(row)?,
                    category: row.get("category"),
                })
            })
            .collect()
    }

    /// Set an expense's paid flag. Re-applying to an already-paid expense
    /// is harmless.
    pub async fn mark_expense_paid(&self, id: ExpenseId) -> Result<()> {
        sqlx::query("UPDATE expenses SET paid = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to mark expense paid")?;
        Ok(())
    }

    /// Delete an expense permanently.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<()> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;
        Ok(())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let month_str: String = row.get("month");
        let usage_tag_str: String = row.get("usage_tag");

        Ok(Expense {
            id: row.get("id"),
            category_id: row.get("category_id"),
            amount_cents: row.get("amount_cents"),
            month: MonthKey::parse(&month_str).context("Invalid month key")?,
            due_date: row.get("due_date"),
            usage_tag: UsageTag::from_str(&usage_tag_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid usage tag: {}", usage_tag_str))?,
            paid: row.get::<i64, _>("paid") != 0,
        })
    }

    // ========================
    // Month configuration
    // ========================

    /// Get the configuration row for a month, if one exists.
    pub async fn get_month_config(&self, month: &MonthKey) -> Result<Option<MonthConfig>> {
        let row = sqlx::query(
            "SELECT month, income_cents, closed FROM month_configs WHERE month = ?",
        )
        .bind(month.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch month config")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_month_config(&row)?)),
            None => Ok(None),
        }
    }

    /// Upsert the monthly income. Last write wins.
    pub async fn upsert_income(&self, month: &MonthKey, income_cents: Cents) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO month_configs (month, income_cents) VALUES (?, ?)
            ON CONFLICT(month) DO UPDATE SET income_cents = excluded.income_cents
            "#,
        )
        .bind(month.as_str())
        .bind(income_cents)
        .execute(&self.pool)
        .await
        .context("Failed to set monthly income")?;
        Ok(())
    }

    /// Close a month and append the export audit record in one
    /// transaction.
    pub async fn close_month(
        &self,
        month: &MonthKey,
        exported_at: &str,
        status: &str,
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO month_configs (month, closed) VALUES (?, 1)
            ON CONFLICT(month) DO UPDATE SET closed = 1
            "#,
        )
        .bind(month.as_str())
        .execute(&mut *tx)
        .await
        .context("Failed to close month")?;

        sqlx::query("INSERT INTO export_log (month, exported_at, status) VALUES (?, ?, ?)")
            .bind(month.as_str())
            .bind(exported_at)
            .bind(status)
            .execute(&mut *tx)
            .await
            .context("Failed to append export log")?;

        tx.commit().await.context("Failed to commit month close")?;
        Ok(())
    }

    /// Reopen a month. Creates the config row open if it was never
    /// written before.
    pub async fn reopen_month(&self, month: &MonthKey) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO month_configs (month, closed) VALUES (?, 0)
            ON CONFLICT(month) DO UPDATE SET closed = 0
            "#,
        )
        .bind(month.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to reopen month")?;
        Ok(())
    }

    fn row_to_month_config(row: &sqlx::sqlite::SqliteRow) -> Result<MonthConfig> {
        let month_str: String = row.get("month");

        Ok(MonthConfig {
            month: MonthKey::parse(&month_str).context("Invalid month key")?,
            income_cents: row.get("income_cents"),
            closed: row.get::<i64, _>("closed") != 0,
        })
    }

    // ========================
    // Export log
    // ========================

    /// List export log entries for a month, oldest first.
    pub async fn list_export_log(&self, month: &MonthKey) -> Result<Vec<ExportLogEntry>> {
        let rows = sqlx::query(
            "SELECT id, month, exported_at, status FROM export_log WHERE month = ? ORDER BY id",
        )
        .bind(month.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list export log")?;

        rows.iter()
            .map(|row| {
                let month_str: String = row.get("month");
                Ok(ExportLogEntry {
                    id: row.get("id"),
                    month: MonthKey::parse(&month_str).context("Invalid month key")?,
                    exported_at: row.get("exported_at"),
                    status: row.get("status"),
                })
            })
            .collect()
    }

    // ========================
    // Dashboard aggregation
    // ========================

    /// Compute total, fixed, and variable expense sums for a month using
    /// SQL aggregation. Months with no expenses yield zeros.
    pub async fn month_totals(&self, month: &MonthKey) -> Result<MonthTotals> {
        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(amount_cents), 0) AS total,
                COALESCE(SUM(CASE WHEN usage_tag = 'FIXO' THEN amount_cents ELSE 0 END), 0) AS fixed,
                COALESCE(SUM(CASE WHEN usage_tag = 'VARIAVEL' THEN amount_cents ELSE 0 END), 0) AS variable
            FROM expenses
            WHERE month = ?
            "#,
        )
        .bind(month.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute month totals")?;

        Ok(MonthTotals {
            total: row.get("total"),
            fixed: row.get("fixed"),
            variable: row.get("variable"),
        })
    }

    /// Sum expense amounts per category name for a month. Only categories
    /// with at least one expense that month appear.
    pub async fn category_totals(&self, month: &MonthKey) -> Result<Vec<(String, Cents)>> {
        let rows = sqlx::query(
            r#"
            SELECT c.name, SUM(e.amount_cents) AS total
            FROM expenses e
            JOIN categories c ON e.category_id = c.id
            WHERE e.month = ?
            GROUP BY c.name
            ORDER BY c.name
            "#,
        )
        .bind(month.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to compute category totals")?;

        Ok(rows
            .iter()
            .map(|row| (row.get("name"), row.get("total")))
            .collect())
    }
}
