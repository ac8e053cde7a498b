use std::sync::Arc;

use nutrichef_core::ai::AiClient;
use nutrichef_core::GenerationSettings;

use crate::store::RecipeStore;

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

pub struct AppContext {
    pub store: Arc<dyn RecipeStore>,
    pub ai: Box<dyn AiClient>,
    pub generation: GenerationSettings,
    pub shopping_search_url: String,
}
