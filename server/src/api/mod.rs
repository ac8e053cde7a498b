mod error;
pub mod favorites;
pub mod preferences;
pub mod recipes;


pub use error::ApiError;

use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::models::Recipe;
use crate::state::AppState;
use nutrichef_core::{NutritionConstraint, ShoppingItem, ShoppingList};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// All API routes, without state or middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipes::router())
        .nest("/user", preferences::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "NutriChef API"),
        components(schemas(
            ErrorResponse,
            Recipe,
            NutritionConstraint,
            ShoppingItem,
            ShoppingList
        ))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        recipes::ApiDoc::openapi(),
        favorites::ApiDoc::openapi(),
        preferences::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.merge(module_spec);
    }

    spec
}
