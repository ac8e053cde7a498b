pub mod save;

use crate::state::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /user endpoints (mounted at /user)
pub fn router() -> Router<AppState> {
    Router::new().route("/preferences", post(save::save_preferences))
}

#[derive(OpenApi)]
#[openapi(
    paths(save::save_preferences),
    components(schemas(save::SavePreferencesRequest, save::MessageResponse))
)]
pub struct ApiDoc;
