//! Expense endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::{cents_from_units, units_from_cents, ExpenseId, ExpenseWithCategory, MonthKey, UsageTag};
use crate::http::error::ApiError;
use crate::http::extractors::RequireAdmin;
use crate::http::server::AppState;

use super::common::{MonthQuery, StatusResponse};

/// Create expense request
#[derive(Deserialize)]
pub struct CreateExpenseRequest {
    pub categoria_id: i64,
    pub valor: f64,
    pub mes: String,
    pub vencimento: String,
    pub uso: String,
}

/// Expense row joined with its category name
#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub categoria_id: i64,
    pub valor: f64,
    pub mes: String,
    pub vencimento: String,
    pub uso: &'static str,
    pub pago: bool,
    pub categoria: String,
}

impl From<ExpenseWithCategory> for ExpenseRow {
    fn from(row: ExpenseWithCategory) -> Self {
        Self {
            id: row.expense.id,
            categoria_id: row.expense.category_id,
            valor: units_from_cents(row.expense.amount_cents),
            mes: row.expense.month.as_str().to_string(),
            vencimento: row.expense.due_date,
            uso: row.expense.usage_tag.as_str(),
            pago: row.expense.paid,
            categoria: row.category,
        }
    }
}

/// GET /despesas-v2?mes= - list a month's expenses, due date ascending
async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<ExpenseRow>>, ApiError> {
    let month = MonthKey::parse(&query.mes)?;
    let expenses = state.service.list_expenses(&month).await?;
    Ok(Json(expenses.into_iter().map(ExpenseRow::from).collect()))
}

/// POST /despesas-v2 - record a new expense
async fn create_expense(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let month = MonthKey::parse(&req.mes)?;
    let usage_tag = UsageTag::from_str(&req.uso).ok_or_else(|| ApiError::Validation {
        message: format!("unknown usage tag '{}'", req.uso),
    })?;

    state
        .service
        .add_expense(
            req.categoria_id,
            cents_from_units(req.valor),
            &month,
            &req.vencimento,
            usage_tag,
        )
        .await?;

    Ok(Json(StatusResponse::OK))
}

/// PATCH /despesas-v2/{id}/pagar - mark an expense as paid
async fn pay_expense(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ExpenseId>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.service.mark_paid(id).await?;
    Ok(Json(StatusResponse::OK))
}

/// DELETE /despesas-v2/{id} - delete an expense
async fn remove_expense(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ExpenseId>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.service.delete_expense(id).await?;
    Ok(Json(StatusResponse::OK))
}

/// Expense routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/despesas-v2", get(list_expenses).post(create_expense))
        .route("/despesas-v2/{id}/pagar", patch(pay_expense))
        .route("/despesas-v2/{id}", delete(remove_expense))
}
