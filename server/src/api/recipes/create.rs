use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nutrichef_core::RecipeContent;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of create and update requests.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeRequest {
    pub title: Option<String>,
    /// Comma-delimited, optionally with quantities
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl RecipeRequest {
    /// Check required text fields and build the stored content.
    pub fn into_content(self) -> Result<RecipeContent, ApiError> {
        let title = required(self.title, "title")?;
        let ingredients = required(self.ingredients, "ingredients")?;
        let instructions = required(self.instructions, "instructions")?;

        let numbers = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        for (name, value) in numbers {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(ApiError::Validation(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }

        Ok(RecipeContent {
            title,
            ingredients,
            instructions,
            calories: self.calories.unwrap_or(0.0),
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{} is required", name))),
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 200, description = "Identical recipe already stored", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(request) = payload?;
    let content = request.into_content()?;

    let insertion = state.store.insert_or_existing(&content)?;
    if insertion.created {
        tracing::info!(recipe_id = insertion.recipe.id, "Created recipe");
        Ok((StatusCode::CREATED, Json(insertion.recipe)))
    } else {
        tracing::info!(recipe_id = insertion.recipe.id, "Recipe already stored");
        Ok((StatusCode::OK, Json(insertion.recipe)))
    }
}
