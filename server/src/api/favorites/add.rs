use crate::api::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub recipe_id: i32,
}

#[utoipa::path(
    post,
    path = "/recipes/favorites",
    tag = "favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Recipe is a favorite"),
        (status = 400, description = "Recipe does not exist", body = ErrorResponse)
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state.store.add_favorite(request.recipe_id)?;
    tracing::info!(recipe_id = request.recipe_id, "Added favorite");
    Ok(StatusCode::CREATED)
}
