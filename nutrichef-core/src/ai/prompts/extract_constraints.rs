//! Prompt for pulling calorie and macro bounds out of a free-text request.

/// Prompt name used in logs.
pub const EXTRACT_CONSTRAINTS_PROMPT_NAME: &str = "extract_constraints";

/// Render the system prompt for constraint extraction.
pub fn render_extract_constraints_system_prompt() -> String {
    r#"You are a nutrition assistant. The user will describe a meal they want. Identify any minimum or maximum amounts of protein, carbs, fat and calories they ask for.

IMPORTANT RULES:
- Return ONLY valid JSON matching the exact schema below. No other text.
- Protein, carbs and fat are in grams; calories are kcal.
- Use null for any bound the user did not mention. Do not guess.
- "High protein" without a number is not a bound.

JSON Schema:
{
  "protein": {"min": "number or null", "max": "number or null"},
  "carbs": {"min": "number or null", "max": "number or null"},
  "fat": {"min": "number or null", "max": "number or null"},
  "calories": {"min": "number or null", "max": "number or null"}
}"#
    .to_string()
}

/// Render the user message carrying the request text.
pub fn render_extract_constraints_user_prompt(request: &str) -> String {
    format!("Meal request: {}", request.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_all_keys() {
        let prompt = render_extract_constraints_system_prompt();
        for key in ["\"protein\"", "\"carbs\"", "\"fat\"", "\"calories\""] {
            assert!(prompt.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_user_prompt_trims_request() {
        assert_eq!(
            render_extract_constraints_user_prompt("  at least 40g protein \n"),
            "Meal request: at least 40g protein"
        );
    }
}
