use crate::api::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use nutrichef_core::{build_shopping_list, ShoppingError, ShoppingList};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ShoppingParams {
    /// Portions to shop for (default: 1)
    pub servings: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/recipes/{id}/shopping-list",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ShoppingParams
    ),
    responses(
        (status = 200, description = "Search links for each ingredient", body = ShoppingList),
        (status = 400, description = "Invalid servings", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn shopping_list(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    params: Result<Query<ShoppingParams>, QueryRejection>,
) -> Result<Json<ShoppingList>, ApiError> {
    let Path(id) = id?;
    let Query(params) = params?;

    let recipe = state.store.get(id)?;
    let servings = params.servings.unwrap_or(1);

    build_shopping_list(&recipe.ingredients, servings, &state.shopping_search_url)
        .map(Json)
        .map_err(|e| match e {
            ShoppingError::InvalidServings | ShoppingError::NoIngredients => {
                ApiError::Validation(e.to_string())
            }
            ShoppingError::InvalidSearchUrl(_) => ApiError::Internal(e.to_string()),
        })
}
