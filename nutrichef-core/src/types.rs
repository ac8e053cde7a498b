use serde::{Deserialize, Serialize};

/// The content of a recipe, independent of storage identity.
///
/// Missing fields deserialize to empty text or 0 so downstream arithmetic
/// never has to deal with absent numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeContent {
    #[serde(default)]
    pub title: String,
    /// Comma-delimited list, optionally with quantities ("2 eggs, 1 cup rice").
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub calories: f64,
    /// Grams of protein.
    #[serde(default)]
    pub protein: f64,
    /// Grams of carbohydrate.
    #[serde(default)]
    pub carbs: f64,
    /// Grams of fat.
    #[serde(default)]
    pub fat: f64,
}

/// Exact macro targets for the macro-targeted generation flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MacroTargets {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Free-text hints that shape a generation prompt alongside the numeric bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeHints {
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub dietary_restrictions: Option<String>,
    /// The user's own words, for the free-text flow.
    pub request: Option<String>,
}

impl RecipeHints {
    /// True when no hint carries non-blank text.
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.ingredients,
            &self.dietary_restrictions,
            &self.request,
        ]
        .iter()
        .all(|hint| hint.as_deref().map(str::trim).unwrap_or("").is_empty())
    }
}
