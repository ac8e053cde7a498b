use crate::api::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

#[utoipa::path(
    get,
    path = "/recipes/favorites/check/{id}",
    tag = "favorites",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Whether the recipe is a favorite", body = FavoriteStatus),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse)
    )
)]
pub async fn check_favorite(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<FavoriteStatus>, ApiError> {
    let Path(id) = id?;
    Ok(Json(FavoriteStatus {
        is_favorite: state.store.is_favorite(id)?,
    }))
}
