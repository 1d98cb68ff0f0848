//! Month dashboard endpoint

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::application::MonthDashboard;
use crate::domain::{units_from_cents, MonthKey};
use crate::http::error::ApiError;
use crate::http::server::AppState;

use super::common::MonthQuery;

/// Dashboard response in the wire vocabulary the frontend speaks.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_gastos: f64,
    pub renda_mensal: f64,
    pub fechado: bool,
    pub fixo: f64,
    pub variavel: f64,
    pub percentual_uso: f64,
    pub distribuicao_categoria: Vec<CategorySlice>,
}

/// One category's summed spend within the month.
#[derive(Serialize)]
pub struct CategorySlice {
    pub nome: String,
    pub total: f64,
}

impl From<MonthDashboard> for DashboardResponse {
    fn from(dash: MonthDashboard) -> Self {
        Self {
            total_gastos: units_from_cents(dash.total_cents),
            renda_mensal: units_from_cents(dash.income_cents),
            fechado: dash.closed,
            fixo: units_from_cents(dash.fixed_cents),
            variavel: units_from_cents(dash.variable_cents),
            percentual_uso: dash.percent_of_income,
            distribuicao_categoria: dash
                .categories
                .into_iter()
                .map(|c| CategorySlice {
                    nome: c.name,
                    total: units_from_cents(c.total_cents),
                })
                .collect(),
        }
    }
}

/// GET /dashboard-v2?mes= - spend-vs-income summary for a month
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let month = MonthKey::parse(&query.mes)?;
    let dashboard = state.service.dashboard(&month).await?;
    Ok(Json(DashboardResponse::from(dashboard)))
}

/// Dashboard routes
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard-v2", get(get_dashboard))
}
