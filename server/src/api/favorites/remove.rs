use crate::api::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

#[utoipa::path(
    delete,
    path = "/recipes/favorites/{id}",
    tag = "favorites",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe is not a favorite"),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse)
    )
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if state.store.remove_favorite(id)? {
        tracing::info!(recipe_id = id, "Removed favorite");
    }
    Ok(StatusCode::NO_CONTENT)
}
