pub mod add;
pub mod check;
pub mod list;
pub mod remove;

use crate::state::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for favorites (mounted at /recipes/favorites)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_favorites).post(add::add_favorite))
        .route("/{id}", delete(remove::remove_favorite))
        .route("/check/{id}", get(check::check_favorite))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        add::add_favorite,
        list::list_favorites,
        remove::remove_favorite,
        check::check_favorite,
    ),
    components(schemas(add::AddFavoriteRequest, check::FavoriteStatus))
)]
pub struct ApiDoc;
