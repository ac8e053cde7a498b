pub mod create;
pub mod delete;
pub mod generate;
pub mod generate_prompt;
pub mod get;
pub mod list;
pub mod random;
pub mod shopping;
pub mod update;

use crate::api::favorites;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /recipes endpoints (mounted at /recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/random", get(random::random_recipe))
        .route(
            "/generate",
            get(generate::generate_recipe).post(generate::generate_for_targets),
        )
        .route(
            "/generate/prompt",
            post(generate_prompt::generate_from_user_prompt),
        )
        .nest("/favorites", favorites::router())
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/shopping-list", get(shopping::shopping_list))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        random::random_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        shopping::shopping_list,
        generate::generate_recipe,
        generate::generate_for_targets,
        generate_prompt::generate_from_user_prompt,
    ),
    components(schemas(
        create::RecipeRequest,
        list::ListRecipesResponse,
        list::Pagination,
        generate::GenerateTargetsRequest,
        generate_prompt::GeneratePromptRequest,
        generate_prompt::GeneratePromptResponse,
    ))
)]
pub struct ApiDoc;
