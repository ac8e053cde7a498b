use crate::api::recipes::create::RecipeRequest;
use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe replaced", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Another recipe has this title and instructions", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let content = request.into_content()?;

    let recipe = state.store.update(id, &content)?;
    tracing::info!(recipe_id = id, "Updated recipe");
    Ok(Json(recipe))
}
