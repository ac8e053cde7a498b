use crate::api::recipes::generate::stored_response;
use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nutrichef_core::{build_shopping_list, generate_from_prompt, NutritionConstraint, ShoppingItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GeneratePromptRequest {
    /// What the user wants, in their own words
    pub prompt: Option<String>,
    /// Portions to shop for (default: 1)
    pub servings: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptResponse {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub servings: u32,
    /// Bounds read from the prompt
    pub constraint: NutritionConstraint,
    pub shopping_list: Vec<ShoppingItem>,
    /// One search covering every ingredient
    pub shopping_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/recipes/generate/prompt",
    tag = "generate",
    request_body = GeneratePromptRequest,
    responses(
        (status = 201, description = "New recipe generated and stored", body = GeneratePromptResponse),
        (status = 200, description = "Generated recipe was already stored", body = GeneratePromptResponse),
        (status = 400, description = "Blank prompt, bad servings, or infeasible constraints", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_from_user_prompt(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePromptRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GeneratePromptResponse>), ApiError> {
    let Json(request) = payload?;

    let prompt = request.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(ApiError::Validation("prompt is required".to_string()));
    }
    let servings = request.servings.unwrap_or(1);
    if servings == 0 {
        return Err(ApiError::Validation(
            "servings must be at least 1".to_string(),
        ));
    }

    let outcome = generate_from_prompt(state.ai.as_ref(), &prompt, state.generation).await?;
    let insertion = state.store.insert_or_existing(&outcome.recipe)?;
    let (status, Json(recipe)) = stored_response(insertion);

    let (shopping_list, shopping_url) =
        match build_shopping_list(&recipe.ingredients, servings, &state.shopping_search_url) {
            Ok(list) => (list.items, Some(list.search_url)),
            Err(e) => {
                tracing::warn!(recipe_id = recipe.id, error = %e, "Could not build shopping list");
                (Vec::new(), None)
            }
        };

    Ok((
        status,
        Json(GeneratePromptResponse {
            recipe,
            servings,
            constraint: outcome.constraint,
            shopping_list,
            shopping_url,
        }),
    ))
}
