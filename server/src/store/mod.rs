//! Recipe, favorite and preference persistence.

#[cfg(test)]
mod memory;
mod pg;

#[cfg(test)]
pub use memory::MemoryStore;
pub use pg::PgStore;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::Recipe;
use nutrichef_core::RecipeContent;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found")]
    NotFound,

    #[error("recipe {0} does not exist")]
    InvalidReference(i32),

    #[error("a recipe with this title and instructions already exists")]
    Duplicate,

    #[error("database connection failed: {0}")]
    Pool(String),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Page request for recipe listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// 1-based.
    pub page: i64,
    pub limit: i64,
    /// Case-insensitive substring of the ingredient text.
    pub ingredients: Option<String>,
    pub random: bool,
}

impl ListQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<Recipe>,
    /// Matching rows across all pages.
    pub total: i64,
}

/// Result of an insert that tolerates duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Insertion {
    pub recipe: Recipe,
    /// False when an identical recipe was already stored.
    pub created: bool,
}

pub trait RecipeStore: Send + Sync {
    fn find_duplicate(&self, title: &str, instructions: &str) -> Result<Option<Recipe>, StoreError>;

    /// Fails with `Duplicate` when the title/instructions pair is taken.
    fn insert(&self, content: &RecipeContent) -> Result<Recipe, StoreError>;

    /// Insert, or return the stored recipe with the same title and instructions.
    fn insert_or_existing(&self, content: &RecipeContent) -> Result<Insertion, StoreError>;

    fn list_paged(&self, query: &ListQuery) -> Result<Page, StoreError>;

    fn random(&self) -> Result<Option<Recipe>, StoreError>;

    fn get(&self, id: i32) -> Result<Recipe, StoreError>;

    fn update(&self, id: i32, content: &RecipeContent) -> Result<Recipe, StoreError>;

    fn delete(&self, id: i32) -> Result<(), StoreError>;

    /// Marking a favorite twice is not an error.
    fn add_favorite(&self, recipe_id: i32) -> Result<(), StoreError>;

    /// Returns whether a favorite was removed.
    fn remove_favorite(&self, recipe_id: i32) -> Result<bool, StoreError>;

    fn is_favorite(&self, recipe_id: i32) -> Result<bool, StoreError>;

    /// Favorited recipes, oldest favorite first.
    fn list_favorites(&self) -> Result<Vec<Recipe>, StoreError>;

    fn save_preferences(
        &self,
        user_id: &str,
        preferences: &serde_json::Value,
    ) -> Result<(), StoreError>;
}

/// Identity of a recipe for deduplication: SHA-256 over title and instructions.
pub fn content_hash(title: &str, instructions: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    // A separator keeps ("ab", "c") and ("a", "bc") apart.
    hasher.update([0u8]);
    hasher.update(instructions.as_bytes());
    hex::encode(hasher.finalize())
}

/// Escape `LIKE` wildcards so user text matches literally.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable_hex() {
        let hash = content_hash("Soup", "Boil water.");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, content_hash("Soup", "Boil water."));
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_hash_separates_fields() {
        assert_ne!(content_hash("ab", "c"), content_hash("a", "bc"));
        assert_ne!(content_hash("Soup", "Boil."), content_hash("Soup", "Simmer."));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_pure\\"), "100\\%\\_pure\\\\");
        assert_eq!(escape_like("rice"), "rice");
    }

    #[test]
    fn test_offset() {
        let query = ListQuery {
            page: 3,
            limit: 10,
            ingredients: None,
            random: false,
        };
        assert_eq!(query.offset(), 20);
    }
}
