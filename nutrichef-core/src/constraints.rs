//! Building a `NutritionConstraint` from caller input.
//!
//! Structured input is read directly. Free text is handed to the AI client,
//! which answers with a JSON object of bounds; a reply that cannot be parsed
//! degrades to an empty constraint instead of failing the request.

use serde_json::Value;
use thiserror::Error;

use crate::ai::prompts::extract_constraints::{
    render_extract_constraints_system_prompt, render_extract_constraints_user_prompt,
    EXTRACT_CONSTRAINTS_PROMPT_NAME,
};
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest};
use crate::generate::strip_code_fence;
use crate::nutrition::{Nutrient, NutritionConstraint};
use crate::types::RecipeHints;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("no filter provided")]
    NoFilter,

    #[error("{0} must be a non-negative number")]
    NegativeBound(&'static str),
}

/// Structured generation filter: numeric bounds plus text hints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredFilter {
    pub constraint: NutritionConstraint,
    pub hints: RecipeHints,
}

/// Validate a structured filter and return its constraint.
///
/// At least one bound or one hint must be present.
pub fn from_structured(filter: &StructuredFilter) -> Result<NutritionConstraint, ExtractError> {
    if let Some(name) = filter.constraint.first_invalid_bound() {
        return Err(ExtractError::NegativeBound(name));
    }

    if filter.constraint.is_empty() && filter.hints.is_empty() {
        return Err(ExtractError::NoFilter);
    }

    Ok(filter.constraint)
}

/// Ask the AI client which bounds a free-text request implies.
///
/// Provider failures propagate. A reply that does not parse yields an empty
/// constraint.
pub async fn from_prompt(
    ai_client: &dyn AiClient,
    request: &str,
    temperature: f32,
) -> Result<NutritionConstraint, AiError> {
    let chat = ChatRequest {
        messages: vec![
            ChatMessage::system(render_extract_constraints_system_prompt()),
            ChatMessage::user(render_extract_constraints_user_prompt(request)),
        ],
        json_response: true,
        max_tokens: Some(256),
        temperature: Some(temperature),
    };

    let response = ai_client
        .complete(EXTRACT_CONSTRAINTS_PROMPT_NAME, chat)
        .await?;

    Ok(parse_extraction_reply(&response.content))
}

/// Leniently parse an extraction reply.
///
/// Each key may hold `{"min": n, "max": n}`. A bare number is read as a lower
/// bound for macros and an upper bound for calories. Negative, non-numeric and
/// unknown values are ignored.
pub fn parse_extraction_reply(reply: &str) -> NutritionConstraint {
    let mut constraint = NutritionConstraint::default();

    let object = match serde_json::from_str::<Value>(strip_code_fence(reply)) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            tracing::warn!("Constraint extraction reply is not a JSON object, ignoring it");
            return constraint;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse constraint extraction reply, ignoring it");
            return constraint;
        }
    };

    for nutrient in Nutrient::ALL {
        match object.get(nutrient.key()) {
            Some(Value::Object(bounds)) => {
                constraint.set_min(nutrient, bound_value(bounds.get("min")));
                constraint.set_max(nutrient, bound_value(bounds.get("max")));
            }
            Some(value @ Value::Number(_)) => {
                let value = bound_value(Some(value));
                if nutrient == Nutrient::Calories {
                    constraint.set_max(nutrient, value);
                } else {
                    constraint.set_min(nutrient, value);
                }
            }
            _ => {}
        }
    }

    constraint
}

fn bound_value(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
}
