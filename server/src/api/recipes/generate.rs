use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::state::AppState;
use crate::store::Insertion;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use nutrichef_core::{
    generate_from_filter, generate_from_targets, MacroTargets, NutritionConstraint, RecipeHints,
    StructuredFilter,
};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct GenerateParams {
    /// Dish name to use or draw inspiration from
    pub title: Option<String>,
    /// Ingredients the recipe should include
    pub ingredients: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_protein: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_protein: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_calories: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_calories: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_carbs: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_carbs: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_fat: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_fat: Option<f64>,
    /// e.g. "vegetarian, gluten-free"
    pub dietary_restrictions: Option<String>,
}

/// A blank query value such as `maxCalories=` leaves the bound unset.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl From<GenerateParams> for StructuredFilter {
    fn from(params: GenerateParams) -> Self {
        StructuredFilter {
            constraint: NutritionConstraint {
                min_protein: params.min_protein,
                max_protein: params.max_protein,
                min_calories: params.min_calories,
                max_calories: params.max_calories,
                min_carbs: params.min_carbs,
                max_carbs: params.max_carbs,
                min_fat: params.min_fat,
                max_fat: params.max_fat,
            },
            hints: RecipeHints {
                title: params.title,
                ingredients: params.ingredients,
                dietary_restrictions: params.dietary_restrictions,
                request: None,
            },
        }
    }
}

/// Macro targets; every field is required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GenerateTargetsRequest {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl GenerateTargetsRequest {
    fn into_targets(self) -> Result<MacroTargets, ApiError> {
        match (self.calories, self.protein, self.carbs, self.fat) {
            (Some(calories), Some(protein), Some(carbs), Some(fat)) => Ok(MacroTargets {
                calories,
                protein,
                carbs,
                fat,
            }),
            _ => Err(ApiError::Validation(
                "calories, protein, carbs and fat are required".to_string(),
            )),
        }
    }
}

/// 201 for a new recipe, 200 when an identical one was already stored.
pub(crate) fn stored_response(insertion: Insertion) -> (StatusCode, Json<Recipe>) {
    if insertion.created {
        tracing::info!(recipe_id = insertion.recipe.id, "Stored generated recipe");
        (StatusCode::CREATED, Json(insertion.recipe))
    } else {
        tracing::info!(
            recipe_id = insertion.recipe.id,
            "Generated recipe matches a stored one"
        );
        (StatusCode::OK, Json(insertion.recipe))
    }
}

#[utoipa::path(
    get,
    path = "/recipes/generate",
    tag = "generate",
    params(GenerateParams),
    responses(
        (status = 201, description = "New recipe generated and stored", body = Recipe),
        (status = 200, description = "Generated recipe was already stored", body = Recipe),
        (status = 400, description = "No filter, invalid bound, or infeasible constraints", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    params: Result<Query<GenerateParams>, QueryRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Query(params) = params?;
    let filter = StructuredFilter::from(params);

    let outcome = generate_from_filter(state.ai.as_ref(), &filter, state.generation).await?;
    let insertion = state.store.insert_or_existing(&outcome.recipe)?;
    Ok(stored_response(insertion))
}

#[utoipa::path(
    post,
    path = "/recipes/generate",
    tag = "generate",
    request_body = GenerateTargetsRequest,
    responses(
        (status = 201, description = "New recipe generated and stored", body = Recipe),
        (status = 200, description = "Generated recipe was already stored", body = Recipe),
        (status = 400, description = "Missing or negative targets, or infeasible targets", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_for_targets(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTargetsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(request) = payload?;
    let targets = request.into_targets()?;

    let outcome = generate_from_targets(state.ai.as_ref(), &targets, state.generation).await?;
    let insertion = state.store.insert_or_existing(&outcome.recipe)?;
    Ok(stored_response(insertion))
}
