//! AI prompt templates.

pub mod extract_constraints;
pub mod generate_recipe;

pub use extract_constraints::{
    render_extract_constraints_system_prompt, render_extract_constraints_user_prompt,
};
pub use generate_recipe::{render_generation_prompt, render_target_prompt};
