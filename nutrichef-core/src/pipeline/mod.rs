//! The recipe generation pipeline.
//!
//! Every flow runs the same stages:
//! 1. derive a `NutritionConstraint` (structured, macro targets, or free text)
//! 2. `check_pre`, which must pass before the provider is called
//! 3. render the prompt and generate
//! 4. `check_post` against the requested calorie ceiling
//!
//! Persistence is left to the caller.

use serde::Serialize;
use thiserror::Error;

use crate::ai::prompts::{render_generation_prompt, render_target_prompt};
use crate::ai::{AiClient, AiConfig};
use crate::constraints::{self, ExtractError, StructuredFilter};
use crate::generate::{generate, GenerationError};
use crate::nutrition::{check_post, check_pre, FeasibilityError, NutritionConstraint};
use crate::types::{MacroTargets, RecipeContent, RecipeHints};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Infeasible(#[from] FeasibilityError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<ExtractError> for PipelineError {
    fn from(e: ExtractError) -> Self {
        PipelineError::Validation(e.to_string())
    }
}

/// Sampling settings for the two kinds of provider call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub extraction_temperature: f32,
    pub generation_temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            extraction_temperature: crate::ai::DEFAULT_EXTRACTION_TEMPERATURE,
            generation_temperature: crate::ai::DEFAULT_GENERATION_TEMPERATURE,
        }
    }
}

impl From<&AiConfig> for GenerationSettings {
    fn from(config: &AiConfig) -> Self {
        Self {
            extraction_temperature: config.extraction_temperature,
            generation_temperature: config.generation_temperature,
        }
    }
}

/// A generated recipe together with the constraint it was generated under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub constraint: NutritionConstraint,
    pub recipe: RecipeContent,
}

/// Generate from structured bounds and hints.
pub async fn generate_from_filter(
    ai_client: &dyn AiClient,
    filter: &StructuredFilter,
    settings: GenerationSettings,
) -> Result<GenerationOutcome, PipelineError> {
    let constraint = constraints::from_structured(filter)?;
    check_pre(&constraint)?;

    let prompt = render_generation_prompt(&constraint, &filter.hints);
    run_generation(ai_client, constraint, prompt, settings).await
}

/// Generate for exact macro targets.
///
/// Targets are checked as minimum macros under a calorie ceiling.
pub async fn generate_from_targets(
    ai_client: &dyn AiClient,
    targets: &MacroTargets,
    settings: GenerationSettings,
) -> Result<GenerationOutcome, PipelineError> {
    for (name, value) in [
        ("calories", targets.calories),
        ("protein", targets.protein),
        ("carbs", targets.carbs),
        ("fat", targets.fat),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(PipelineError::Validation(format!(
                "{} must be a non-negative number",
                name
            )));
        }
    }

    let constraint = NutritionConstraint {
        min_protein: Some(targets.protein),
        min_carbs: Some(targets.carbs),
        min_fat: Some(targets.fat),
        max_calories: Some(targets.calories),
        ..Default::default()
    };
    check_pre(&constraint)?;

    let prompt = render_target_prompt(targets);
    run_generation(ai_client, constraint, prompt, settings).await
}

/// Generate from a free-text request.
///
/// The bounds come from an extraction call; an unparseable extraction reply
/// leaves the request unconstrained.
pub async fn generate_from_prompt(
    ai_client: &dyn AiClient,
    request: &str,
    settings: GenerationSettings,
) -> Result<GenerationOutcome, PipelineError> {
    let request = request.trim();
    if request.is_empty() {
        return Err(PipelineError::Validation("prompt is required".to_string()));
    }

    let constraint =
        constraints::from_prompt(ai_client, request, settings.extraction_temperature)
            .await
            .map_err(GenerationError::from)?;

    tracing::debug!(?constraint, "Extracted constraint from prompt");
    check_pre(&constraint)?;

    let hints = RecipeHints {
        request: Some(request.to_string()),
        ..Default::default()
    };
    let prompt = render_generation_prompt(&constraint, &hints);
    run_generation(ai_client, constraint, prompt, settings).await
}

async fn run_generation(
    ai_client: &dyn AiClient,
    constraint: NutritionConstraint,
    prompt: String,
    settings: GenerationSettings,
) -> Result<GenerationOutcome, PipelineError> {
    let recipe = generate(ai_client, prompt, settings.generation_temperature).await?;

    if let Err(e) = check_post(&recipe, constraint.max_calories) {
        tracing::warn!(title = %recipe.title, error = %e, "Generated recipe failed calorie check");
        return Err(e.into());
    }

    Ok(GenerationOutcome { constraint, recipe })
}
