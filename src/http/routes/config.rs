//! Month lifecycle and income endpoints

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::domain::{cents_from_units, MonthKey};
use crate::http::error::ApiError;
use crate::http::extractors::RequireAdmin;
use crate::http::server::AppState;

use super::common::{MonthQuery, StatusResponse};

/// Query string for setting income, e.g. `?mes=2024-05&valor=3000`.
#[derive(Deserialize)]
pub struct IncomeQuery {
    pub mes: String,
    pub valor: f64,
}

/// POST /config/fechar-mes?mes= - close a month and append the export
/// audit record
async fn close_month(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<MonthQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let month = MonthKey::parse(&query.mes)?;
    state.service.close_month(&month).await?;
    Ok(Json(StatusResponse::CLOSED))
}

/// POST /config/reabrir-mes?mes= - reopen a month
async fn reopen_month(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<MonthQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let month = MonthKey::parse(&query.mes)?;
    state.service.reopen_month(&month).await?;
    Ok(Json(StatusResponse::REOPENED))
}

/// POST /config/renda?mes=&valor= - set the monthly income
async fn set_income(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<IncomeQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let month = MonthKey::parse(&query.mes)?;
    state
        .service
        .set_income(&month, cents_from_units(query.valor))
        .await?;
    Ok(Json(StatusResponse::OK))
}

/// Month configuration routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config/fechar-mes", post(close_month))
        .route("/config/reabrir-mes", post(reopen_month))
        .route("/config/renda", post(set_income))
}
