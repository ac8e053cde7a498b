//! Recipe generation through the AI client.
//!
//! The provider's reply is untrusted text. It must be a single JSON object with
//! string `title`/`ingredients`/`instructions` and numeric
//! `calories`/`protein`/`carbs`/`fat`; anything else is a `GenerationError`.

use thiserror::Error;

use crate::ai::prompts::generate_recipe::GENERATE_RECIPE_PROMPT_NAME;
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest};
use crate::types::RecipeContent;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider call failed: {0}")]
    Provider(#[from] AiError),

    #[error("invalid provider output: {0}")]
    InvalidOutput(String),
}

/// Send a rendered generation prompt and parse the reply into a recipe.
///
/// One attempt; retries, if any, belong to the client.
pub async fn generate(
    ai_client: &dyn AiClient,
    prompt: String,
    temperature: f32,
) -> Result<RecipeContent, GenerationError> {
    let request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        json_response: true,
        max_tokens: Some(1024),
        temperature: Some(temperature),
    };

    let response = ai_client
        .complete(GENERATE_RECIPE_PROMPT_NAME, request)
        .await?;

    let recipe = parse_recipe_reply(&response.content)?;

    tracing::info!(
        title = %recipe.title,
        calories = recipe.calories,
        protein = recipe.protein,
        carbs = recipe.carbs,
        fat = recipe.fat,
        "Generated recipe"
    );

    Ok(recipe)
}

/// Strictly parse a generation reply.
///
/// Missing fields default to empty text or 0; wrongly typed fields fail.
pub fn parse_recipe_reply(reply: &str) -> Result<RecipeContent, GenerationError> {
    let body = strip_code_fence(reply);

    if !body.starts_with('{') {
        return Err(GenerationError::InvalidOutput(
            "reply is not a JSON object".to_string(),
        ));
    }

    serde_json::from_str::<RecipeContent>(body)
        .map_err(|e| GenerationError::InvalidOutput(e.to_string()))
}

/// Remove surrounding whitespace and one surrounding markdown code fence.
pub(crate) fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening line, e.g. ```json
    match inner.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body.trim(),
        _ => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    const GOOD_REPLY: &str = r#"{
        "title": "Turkey Chili",
        "ingredients": "200 g ground turkey, 1 can kidney beans, 1 onion",
        "instructions": "1. Brown the turkey.\n2. Add beans and onion.\n3. Simmer.",
        "calories": 620,
        "protein": 55,
        "carbs": 48,
        "fat": 18.5
    }"#;

    #[test]
    fn test_parse_valid_reply() {
        let recipe = parse_recipe_reply(GOOD_REPLY).unwrap();
        assert_eq!(recipe.title, "Turkey Chili");
        assert!(recipe.ingredients.starts_with("200 g ground turkey"));
        assert_eq!(recipe.calories, 620.0);
        assert_eq!(recipe.fat, 18.5);
    }

    #[test]
    fn test_parse_missing_numbers_default_to_zero() {
        let recipe =
            parse_recipe_reply(r#"{"title": "Toast", "ingredients": "bread", "instructions": "Toast it."}"#)
                .unwrap();
        assert_eq!(recipe.calories, 0.0);
        assert_eq!(recipe.protein, 0.0);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_recipe_reply("Sure! Here is a recipe for you: pancakes.").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidOutput(_)));
        assert!(err.to_string().starts_with("invalid provider output"));
    }

    #[test]
    fn test_parse_rejects_stringly_numbers() {
        let result = parse_recipe_reply(r#"{"title": "Soup", "calories": "300 kcal"}"#);
        assert!(matches!(result, Err(GenerationError::InvalidOutput(_))));
    }

    #[test]
    fn test_parse_rejects_array_ingredients() {
        let result = parse_recipe_reply(r#"{"title": "Soup", "ingredients": ["water", "salt"]}"#);
        assert!(matches!(result, Err(GenerationError::InvalidOutput(_))));
    }

    #[test]
    fn test_parse_rejects_truncated_json() {
        let result = parse_recipe_reply(r#"{"title": "Soup", "calories": 3"#);
        assert!(matches!(result, Err(GenerationError::InvalidOutput(_))));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```{}"), "```{}");
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_parses() {
        let client = FakeAiClient::with_response(GENERATE_RECIPE_PROMPT_NAME, GOOD_REPLY);
        let log = client.call_log();

        let recipe = generate(&client, "Make chili".to_string(), 0.8).await.unwrap();
        assert_eq!(recipe.title, "Turkey Chili");

        let calls = log.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].request.temperature, Some(0.8));
        assert!(calls[0].request.json_response);
    }

    #[tokio::test]
    async fn test_generate_invalid_output() {
        let client = FakeAiClient::new().with_default_response("no recipe today");
        let result = generate(&client, "Make chili".to_string(), 0.8).await;
        assert!(matches!(result, Err(GenerationError::InvalidOutput(_))));
    }

    #[tokio::test]
    async fn test_generate_provider_failure() {
        let client = FakeAiClient::new().with_failures(1);
        let result = generate(&client, "Make chili".to_string(), 0.8).await;
        assert!(matches!(result, Err(GenerationError::Provider(_))));
    }
}
