//! Category endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::Category;
use crate::http::error::ApiError;
use crate::http::extractors::RequireAdmin;
use crate::http::server::AppState;

/// Create category request
#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub nome: String,
}

/// Category response
#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub nome: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            nome: category.name,
        }
    }
}

/// GET /categorias - list all categories
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.service.list_categories().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// POST /categorias - create a new category
async fn create_category(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state.service.add_category(&req.nome).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Category routes
pub fn router() -> Router<AppState> {
    Router::new().route("/categorias", get(list_categories).post(create_category))
}
