//! In-process store for handler tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rand::seq::{IndexedRandom, SliceRandom};

use super::{content_hash, Insertion, ListQuery, Page, RecipeStore, StoreError};
use crate::models::Recipe;
use nutrichef_core::RecipeContent;

#[derive(Default)]
struct Inner {
    recipes: Vec<(String, Recipe)>,
    next_id: i32,
    /// Recipe ids, in the order they were favorited.
    favorites: Vec<i32>,
    preferences: HashMap<String, serde_json::Value>,
}

impl Inner {
    fn position(&self, id: i32) -> Option<usize> {
        self.recipes.iter().position(|(_, r)| r.id == id)
    }

    fn by_hash(&self, hash: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|(h, _)| h == hash)
            .map(|(_, r)| r)
    }

    fn push(&mut self, content: &RecipeContent, hash: String) -> Recipe {
        self.next_id += 1;
        let recipe = Recipe {
            id: self.next_id,
            title: content.title.clone(),
            ingredients: content.ingredients.clone(),
            instructions: content.instructions.clone(),
            calories: content.calories,
            protein: content.protein,
            carbs: content.carbs,
            fat: content.fat,
            created_at: Utc::now(),
        };
        self.recipes.push((hash, recipe.clone()));
        recipe
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn recipe_count(&self) -> usize {
        self.lock().recipes.len()
    }

    pub fn preferences(&self, user_id: &str) -> Option<serde_json::Value> {
        self.lock().preferences.get(user_id).cloned()
    }
}

impl RecipeStore for MemoryStore {
    fn find_duplicate(&self, title: &str, instructions: &str) -> Result<Option<Recipe>, StoreError> {
        Ok(self.lock().by_hash(&content_hash(title, instructions)).cloned())
    }

    fn insert(&self, content: &RecipeContent) -> Result<Recipe, StoreError> {
        let hash = content_hash(&content.title, &content.instructions);
        let mut inner = self.lock();
        if inner.by_hash(&hash).is_some() {
            return Err(StoreError::Duplicate);
        }
        Ok(inner.push(content, hash))
    }

    fn insert_or_existing(&self, content: &RecipeContent) -> Result<Insertion, StoreError> {
        let hash = content_hash(&content.title, &content.instructions);
        let mut inner = self.lock();
        if let Some(existing) = inner.by_hash(&hash) {
            return Ok(Insertion {
                recipe: existing.clone(),
                created: false,
            });
        }
        Ok(Insertion {
            recipe: inner.push(content, hash),
            created: true,
        })
    }

    fn list_paged(&self, query: &ListQuery) -> Result<Page, StoreError> {
        let inner = self.lock();
        let needle = query
            .ingredients
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matching: Vec<Recipe> = inner
            .recipes
            .iter()
            .map(|(_, r)| r)
            .filter(|r| match &needle {
                Some(needle) => r.ingredients.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();

        if query.random {
            matching.shuffle(&mut rand::rng());
        }

        let total = matching.len() as i64;
        let rows = matching
            .into_iter()
            .skip(query.offset().max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect();

        Ok(Page { rows, total })
    }

    fn random(&self) -> Result<Option<Recipe>, StoreError> {
        let inner = self.lock();
        let recipes: Vec<&Recipe> = inner.recipes.iter().map(|(_, r)| r).collect();
        Ok(recipes.choose(&mut rand::rng()).map(|r| (*r).clone()))
    }

    fn get(&self, id: i32) -> Result<Recipe, StoreError> {
        let inner = self.lock();
        let index = inner.position(id).ok_or(StoreError::NotFound)?;
        Ok(inner.recipes[index].1.clone())
    }

    fn update(&self, id: i32, content: &RecipeContent) -> Result<Recipe, StoreError> {
        let hash = content_hash(&content.title, &content.instructions);
        let mut inner = self.lock();
        let index = inner.position(id).ok_or(StoreError::NotFound)?;

        if inner.by_hash(&hash).is_some_and(|other| other.id != id) {
            return Err(StoreError::Duplicate);
        }

        let (stored_hash, recipe) = &mut inner.recipes[index];
        *stored_hash = hash;
        recipe.title = content.title.clone();
        recipe.ingredients = content.ingredients.clone();
        recipe.instructions = content.instructions.clone();
        recipe.calories = content.calories;
        recipe.protein = content.protein;
        recipe.carbs = content.carbs;
        recipe.fat = content.fat;
        Ok(recipe.clone())
    }

    fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let index = inner.position(id).ok_or(StoreError::NotFound)?;
        inner.recipes.remove(index);
        inner.favorites.retain(|f| *f != id);
        Ok(())
    }

    fn add_favorite(&self, recipe_id: i32) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.position(recipe_id).is_none() {
            return Err(StoreError::InvalidReference(recipe_id));
        }
        if !inner.favorites.contains(&recipe_id) {
            inner.favorites.push(recipe_id);
        }
        Ok(())
    }

    fn remove_favorite(&self, recipe_id: i32) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        let before = inner.favorites.len();
        inner.favorites.retain(|f| *f != recipe_id);
        Ok(inner.favorites.len() != before)
    }

    fn is_favorite(&self, recipe_id: i32) -> Result<bool, StoreError> {
        Ok(self.lock().favorites.contains(&recipe_id))
    }

    fn list_favorites(&self) -> Result<Vec<Recipe>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .favorites
            .iter()
            .filter_map(|id| inner.position(*id).map(|i| inner.recipes[i].1.clone()))
            .collect())
    }

    fn save_preferences(
        &self,
        user_id: &str,
        preferences: &serde_json::Value,
    ) -> Result<(), StoreError> {
        self.lock()
            .preferences
            .insert(user_id.to_string(), preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> RecipeContent {
        RecipeContent {
            title: title.to_string(),
            ingredients: "1 cup rice".to_string(),
            instructions: "Cook.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_or_existing_dedups() {
        let store = MemoryStore::new();
        let first = store.insert_or_existing(&content("Rice")).unwrap();
        let second = store.insert_or_existing(&content("Rice")).unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.recipe.id, second.recipe.id);
        assert_eq!(store.recipe_count(), 1);
    }

    #[test]
    fn test_update_collision_is_duplicate() {
        let store = MemoryStore::new();
        store.insert(&content("Rice")).unwrap();
        let beans = store.insert(&content("Beans")).unwrap();

        assert!(matches!(
            store.update(beans.id, &content("Rice")),
            Err(StoreError::Duplicate)
        ));
        assert!(store.update(beans.id, &content("Beans")).is_ok());
    }

    #[test]
    fn test_delete_cascades_to_favorites() {
        let store = MemoryStore::new();
        let rice = store.insert(&content("Rice")).unwrap();
        store.add_favorite(rice.id).unwrap();
        store.delete(rice.id).unwrap();
        assert!(!store.is_favorite(rice.id).unwrap());
    }
}
