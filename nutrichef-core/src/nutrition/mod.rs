//! Nutrition constraints and the Atwater feasibility checks applied to them.

mod constraint;
pub mod feasibility;

pub use constraint::{Nutrient, NutritionConstraint};
pub use feasibility::{atwater_calories, check_post, check_pre, FeasibilityError};
