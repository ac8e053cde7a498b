pub mod ai;
pub mod amounts;
pub mod constraints;
pub mod generate;
pub mod ingredient_parser;
pub mod nutrition;
pub mod pipeline;
pub mod shopping;
pub mod types;

pub use constraints::{ExtractError, StructuredFilter};
pub use generate::GenerationError;
pub use nutrition::{check_post, check_pre, FeasibilityError, Nutrient, NutritionConstraint};
pub use pipeline::{
    generate_from_filter, generate_from_prompt, generate_from_targets, GenerationOutcome,
    GenerationSettings, PipelineError,
};
pub use shopping::{build_shopping_list, ShoppingError, ShoppingItem, ShoppingList};
pub use types::{MacroTargets, RecipeContent, RecipeHints};
