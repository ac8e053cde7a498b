use crate::api::ApiError;
use crate::models::Recipe;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/recipes/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorite recipes, oldest favorite first", body = Vec<Recipe>)
    )
)]
pub async fn list_favorites(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(state.store.list_favorites()?))
}
