use crate::api::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePreferencesRequest {
    pub user_id: Option<String>,
    /// Any JSON value other than null
    #[schema(value_type = Object)]
    pub preferences: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/user/preferences",
    tag = "preferences",
    request_body = SavePreferencesRequest,
    responses(
        (status = 200, description = "Preferences saved", body = MessageResponse),
        (status = 400, description = "User ID or preferences missing", body = ErrorResponse)
    )
)]
pub async fn save_preferences(
    State(state): State<AppState>,
    payload: Result<Json<SavePreferencesRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;

    let user_id = request
        .user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    let preferences = request.preferences.filter(|p| !p.is_null());
    let (Some(user_id), Some(preferences)) = (user_id, preferences) else {
        return Err(ApiError::Validation(
            "User ID and preferences are required.".to_string(),
        ));
    };

    state.store.save_preferences(&user_id, &preferences)?;
    tracing::info!(user_id = %user_id, "Saved preferences");

    Ok(Json(MessageResponse {
        message: "Preferences saved.".to_string(),
    }))
}
