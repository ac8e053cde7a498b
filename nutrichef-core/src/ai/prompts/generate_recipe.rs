//! Recipe generation prompts.

use crate::amounts::format_amount;
use crate::nutrition::NutritionConstraint;
use crate::types::{MacroTargets, RecipeHints};

/// Prompt name used in logs.
pub const GENERATE_RECIPE_PROMPT_NAME: &str = "generate_recipe";

const JSON_INSTRUCTIONS: &str = "\nThe recipe should make a single serving and the nutrition values must describe that serving.\n\
Return only a JSON object with the following fields:\n\
- title\n\
- ingredients (comma separated, with quantities)\n\
- instructions\n\
- calories (number)\n\
- protein (number of grams)\n\
- carbs (number of grams)\n\
- fat (number of grams)\n";

/// Render the generation prompt for a constraint set plus free-text hints.
///
/// Every set bound becomes one guideline line.
pub fn render_generation_prompt(constraint: &NutritionConstraint, hints: &RecipeHints) -> String {
    let mut prompt = String::from("Generate a realistic, unique recipe");

    if let Some(title) = non_blank(&hints.title) {
        prompt.push_str(&format!(" using or inspired by \"{}\"", title));
    }
    if let Some(ingredients) = non_blank(&hints.ingredients) {
        prompt.push_str(&format!(
            " that includes ingredients such as: {}",
            ingredients
        ));
    }

    if constraint.is_empty() {
        prompt.push_str(".\n");
    } else {
        prompt.push_str(" that meets these nutritional guidelines:\n");
        for (nutrient, min, max) in constraint.set_bounds() {
            if let Some(min) = min {
                prompt.push_str(&format!("- At least {}\n", nutrient.describe(min)));
            }
            if let Some(max) = max {
                prompt.push_str(&format!("- No more than {}\n", nutrient.describe(max)));
            }
        }
    }

    if let Some(restrictions) = non_blank(&hints.dietary_restrictions) {
        prompt.push_str(&format!(
            "\nThis recipe must be suitable for the following dietary restrictions: {}\n",
            restrictions
        ));
    }

    if let Some(request) = non_blank(&hints.request) {
        prompt.push_str(&format!("\nThe user described what they want as: {}\n", request));
    }

    prompt.push_str(JSON_INSTRUCTIONS);
    prompt
}

/// Render the generation prompt for exact macro targets.
pub fn render_target_prompt(targets: &MacroTargets) -> String {
    format!(
        "Generate a realistic, unique recipe with approximately {calories} calories, \
         {protein}g protein, {carbs}g carbs and {fat}g fat.\n{json}",
        calories = format_amount(targets.calories),
        protein = format_amount(targets.protein),
        carbs = format_amount(targets.carbs),
        fat = format_amount(targets.fat),
        json = JSON_INSTRUCTIONS
    )
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_bound() {
        let constraint = NutritionConstraint {
            min_protein: Some(30.0),
            max_protein: Some(60.0),
            max_calories: Some(500.0),
            min_carbs: Some(20.0),
            max_fat: Some(15.0),
            ..Default::default()
        };
        let prompt = render_generation_prompt(&constraint, &RecipeHints::default());

        assert!(prompt.contains("- At least 30g protein\n"));
        assert!(prompt.contains("- No more than 60g protein\n"));
        assert!(prompt.contains("- No more than 500 calories\n"));
        assert!(prompt.contains("- At least 20g carbs\n"));
        assert!(prompt.contains("- No more than 15g fat\n"));
        assert!(!prompt.contains("At least 0"));
    }

    #[test]
    fn test_render_includes_hints() {
        let hints = RecipeHints {
            title: Some("Shakshuka".to_string()),
            ingredients: Some("eggs, tomatoes".to_string()),
            dietary_restrictions: Some("vegetarian".to_string()),
            request: Some("something warm for breakfast".to_string()),
        };
        let prompt = render_generation_prompt(&NutritionConstraint::default(), &hints);

        assert!(prompt.contains("using or inspired by \"Shakshuka\""));
        assert!(prompt.contains("includes ingredients such as: eggs, tomatoes"));
        assert!(prompt.contains("dietary restrictions: vegetarian"));
        assert!(prompt.contains("something warm for breakfast"));
        assert!(!prompt.contains("nutritional guidelines"));
    }

    #[test]
    fn test_render_ignores_blank_hints() {
        let hints = RecipeHints {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let prompt = render_generation_prompt(&NutritionConstraint::default(), &hints);
        assert!(!prompt.contains("inspired by"));
    }

    #[test]
    fn test_render_always_asks_for_json_fields() {
        let prompt = render_generation_prompt(&NutritionConstraint::default(), &RecipeHints::default());
        assert!(prompt.contains("Return only a JSON object"));
        for field in ["title", "ingredients", "instructions", "calories", "protein", "carbs", "fat"] {
            assert!(prompt.contains(&format!("- {}", field)), "missing {}", field);
        }
    }

    #[test]
    fn test_render_target_prompt() {
        let prompt = render_target_prompt(&MacroTargets {
            calories: 600.0,
            protein: 40.0,
            carbs: 55.5,
            fat: 20.0,
        });
        assert!(prompt.contains("approximately 600 calories, 40g protein, 55.5g carbs and 20g fat"));
        assert!(prompt.contains("Return only a JSON object"));
    }
}
