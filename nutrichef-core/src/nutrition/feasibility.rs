//! Atwater energy-equivalence checks.
//!
//! Protein and carbohydrate yield about 4 kcal per gram and fat about 9.
//! `check_pre` rejects constraint sets that cannot be met before any provider
//! call is made; `check_post` rejects generated recipes whose reported calories
//! are below what their own macros imply.

use thiserror::Error;

use super::{Nutrient, NutritionConstraint};
use crate::amounts::format_amount;
use crate::types::RecipeContent;

pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeasibilityError {
    /// The requested bounds contradict each other.
    #[error("{0}")]
    TooStrict(String),

    /// The provider reported calories its own macros cannot add up to.
    #[error("{0}")]
    Inconsistent(String),
}

/// Energy in kcal implied by the given macro grams.
pub fn atwater_calories(protein: f64, carbs: f64, fat: f64) -> f64 {
    protein * PROTEIN_KCAL_PER_GRAM + carbs * CARBS_KCAL_PER_GRAM + fat * FAT_KCAL_PER_GRAM
}

/// Reject constraint sets that no recipe could satisfy.
pub fn check_pre(constraint: &NutritionConstraint) -> Result<(), FeasibilityError> {
    for nutrient in Nutrient::ALL {
        if let (Some(min), Some(max)) = constraint.bounds(nutrient) {
            if min > max {
                return Err(FeasibilityError::TooStrict(format!(
                    "Constraints are too strict: the minimum of {} is greater than the maximum of {}.",
                    nutrient.describe(min),
                    nutrient.describe(max)
                )));
            }
        }
    }

    let Some(max_calories) = constraint.max_calories else {
        return Ok(());
    };

    let min_protein = constraint.min_protein.unwrap_or(0.0);
    let min_carbs = constraint.min_carbs.unwrap_or(0.0);
    let min_fat = constraint.min_fat.unwrap_or(0.0);
    let estimated_min_calories = atwater_calories(min_protein, min_carbs, min_fat);

    if estimated_min_calories > max_calories {
        let minimums: Vec<String> = [
            (Nutrient::Protein, min_protein),
            (Nutrient::Carbs, min_carbs),
            (Nutrient::Fat, min_fat),
        ]
        .into_iter()
        .filter(|(_, grams)| *grams > 0.0)
        .map(|(n, grams)| n.describe(grams))
        .collect();

        return Err(FeasibilityError::TooStrict(format!(
            "Constraints are too strict: at least {} already add up to about {} calories, \
             which exceeds the maximum of {}.",
            join_list(&minimums),
            format_amount(estimated_min_calories),
            Nutrient::Calories.describe(max_calories)
        )));
    }

    Ok(())
}

/// Reject a generated recipe that under-reports calories relative to its macros.
///
/// Only applies when the caller asked for a calorie ceiling.
pub fn check_post(recipe: &RecipeContent, max_calories: Option<f64>) -> Result<(), FeasibilityError> {
    if max_calories.is_none() {
        return Ok(());
    }

    let calculated = atwater_calories(recipe.protein, recipe.carbs, recipe.fat);
    if recipe.calories < calculated {
        return Err(FeasibilityError::Inconsistent(format!(
            "Generated recipe is inconsistent: it reports {} but {}, {} and {} add up to about {} calories.",
            Nutrient::Calories.describe(recipe.calories),
            Nutrient::Protein.describe(recipe.protein),
            Nutrient::Carbs.describe(recipe.carbs),
            Nutrient::Fat.describe(recipe.fat),
            format_amount(calculated)
        )));
    }

    Ok(())
}

fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
