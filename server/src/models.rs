use chrono::{DateTime, Utc};
use diesel::prelude::*;
use nutrichef_core::RecipeContent;
use serde::Serialize;
use utoipa::ToSchema;

/// A stored recipe.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    /// Comma-delimited, optionally with quantities.
    pub ingredients: String,
    pub instructions: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub content_hash: &'a str,
}

impl<'a> NewRecipe<'a> {
    pub fn new(content: &'a RecipeContent, content_hash: &'a str) -> Self {
        Self {
            title: &content.title,
            ingredients: &content.ingredients,
            instructions: &content.instructions,
            calories: content.calories,
            protein: content.protein,
            carbs: content.carbs,
            fat: content.fat,
            content_hash,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    pub recipe_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_preferences)]
pub struct NewUserPreferences<'a> {
    pub user_id: &'a str,
    pub preferences: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
