use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::state::AppState;
use crate::store::ListQuery;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
/// Highest page whose offset still fits in an `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
    /// Recipes per page (default: 10, clamped to 1..=100)
    pub limit: Option<i64>,
    /// Only recipes whose ingredient list contains this text
    pub ingredients: Option<String>,
    /// Random order instead of oldest first
    #[serde(default)]
    pub random: bool,
}

impl ListRecipesParams {
    fn to_query(&self) -> ListQuery {
        ListQuery {
            page: self.page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            ingredients: self.ingredients.clone(),
            random: self.random,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub data: Vec<Recipe>,
    pub pagination: Pagination,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "One page of recipes", body = ListRecipesResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    params: Result<Query<ListRecipesParams>, QueryRejection>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let Query(params) = params?;
    let query = params.to_query();

    let page = state.store.list_paged(&query)?;

    Ok(Json(ListRecipesResponse {
        data: page.rows,
        pagination: Pagination {
            total: page.total,
            page: query.page,
            limit: query.limit,
            total_pages: (page.total + query.limit - 1) / query.limit,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = ListRecipesParams::default().to_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert!(!query.random);
    }

    #[test]
    fn test_limit_and_page_are_clamped() {
        let query = ListRecipesParams {
            page: Some(0),
            limit: Some(5000),
            ..Default::default()
        }
        .to_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_LIMIT);

        let query = ListRecipesParams {
            limit: Some(-3),
            ..Default::default()
        }
        .to_query();
        assert_eq!(query.limit, 1);

        let query = ListRecipesParams {
            page: Some(i64::MAX),
            limit: Some(MAX_LIMIT),
            ..Default::default()
        }
        .to_query();
        assert_eq!(query.page, MAX_PAGE);
        assert!(query.offset() > 0);
    }
}
