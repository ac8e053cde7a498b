use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/recipes/random",
    tag = "recipes",
    responses(
        (status = 200, description = "A random stored recipe", body = Recipe),
        (status = 404, description = "No recipes stored yet", body = ErrorResponse)
    )
)]
pub async fn random_recipe(State(state): State<AppState>) -> Result<Json<Recipe>, ApiError> {
    state
        .store
        .random()?
        .map(Json)
        .ok_or(ApiError::NotFound("No recipes found"))
}
