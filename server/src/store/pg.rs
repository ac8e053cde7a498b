use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;

use super::{
    content_hash, escape_like, Insertion, ListQuery, Page, RecipeStore, StoreError,
};
use crate::db::DbPool;
use crate::models::{NewFavorite, NewRecipe, NewUserPreferences, Recipe};
use crate::raw_sql::random_order;
use crate::schema::{favorites, recipes, user_preferences};
use nutrichef_core::RecipeContent;

type PgConn = PooledConnection<ConnectionManager<PgConnection>>;

/// PostgreSQL store backed by an r2d2 pool.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PgConn, StoreError> {
        self.pool.get().map_err(|e| {
            tracing::error!("Failed to get database connection: {}", e);
            StoreError::Pool(e.to_string())
        })
    }
}

fn filtered_recipes(ingredients: Option<&str>) -> recipes::BoxedQuery<'static, Pg> {
    let mut query = recipes::table.into_boxed();
    if let Some(needle) = ingredients.map(str::trim).filter(|s| !s.is_empty()) {
        query = query.filter(recipes::ingredients.ilike(format!("%{}%", escape_like(needle))));
    }
    query
}

fn is_unique_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

impl RecipeStore for PgStore {
    fn find_duplicate(&self, title: &str, instructions: &str) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.conn()?;
        let hash = content_hash(title, instructions);

        let recipe = recipes::table
            .filter(recipes::content_hash.eq(&hash))
            .select(Recipe::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(recipe)
    }

    fn insert(&self, content: &RecipeContent) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let hash = content_hash(&content.title, &content.instructions);

        diesel::insert_into(recipes::table)
            .values(&NewRecipe::new(content, &hash))
            .returning(Recipe::as_returning())
            .get_result(&mut conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate
                } else {
                    e.into()
                }
            })
    }

    fn insert_or_existing(&self, content: &RecipeContent) -> Result<Insertion, StoreError> {
        let mut conn = self.conn()?;
        let hash = content_hash(&content.title, &content.instructions);

        conn.transaction::<_, StoreError, _>(|conn| {
            let inserted: Option<Recipe> = diesel::insert_into(recipes::table)
                .values(&NewRecipe::new(content, &hash))
                .on_conflict(recipes::content_hash)
                .do_nothing()
                .returning(Recipe::as_returning())
                .get_result(conn)
                .optional()?;

            if let Some(recipe) = inserted {
                return Ok(Insertion {
                    recipe,
                    created: true,
                });
            }

            let recipe = recipes::table
                .filter(recipes::content_hash.eq(&hash))
                .select(Recipe::as_select())
                .first(conn)?;
            Ok(Insertion {
                recipe,
                created: false,
            })
        })
    }

    fn list_paged(&self, query: &ListQuery) -> Result<Page, StoreError> {
        let mut conn = self.conn()?;
        let ingredients = query.ingredients.as_deref();

        let total: i64 = filtered_recipes(ingredients).count().get_result(&mut conn)?;

        let mut rows_query = filtered_recipes(ingredients);
        rows_query = if query.random {
            rows_query.order(random_order())
        } else {
            rows_query.order(recipes::id.asc())
        };

        let rows = rows_query
            .select(Recipe::as_select())
            .limit(query.limit)
            .offset(query.offset())
            .load(&mut conn)?;

        Ok(Page { rows, total })
    }

    fn random(&self) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let recipe = recipes::table
            .order(random_order())
            .select(Recipe::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(recipe)
    }

    fn get(&self, id: i32) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;

        recipes::table
            .find(id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn update(&self, id: i32, content: &RecipeContent) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let hash = content_hash(&content.title, &content.instructions);

        let updated = diesel::update(recipes::table.find(id))
            .set(&NewRecipe::new(content, &hash))
            .returning(Recipe::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate
                } else {
                    StoreError::from(e)
                }
            })?;

        updated.ok_or(StoreError::NotFound)
    }

    fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn add_favorite(&self, recipe_id: i32) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        diesel::insert_into(favorites::table)
            .values(&NewFavorite { recipe_id })
            .on_conflict(favorites::recipe_id)
            .do_nothing()
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    StoreError::InvalidReference(recipe_id)
                }
                e => e.into(),
            })?;
        Ok(())
    }

    fn remove_favorite(&self, recipe_id: i32) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;

        let removed = diesel::delete(favorites::table.find(recipe_id)).execute(&mut conn)?;
        Ok(removed > 0)
    }

    fn is_favorite(&self, recipe_id: i32) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(favorites::table.find(recipe_id)))
            .get_result(&mut conn)?;
        Ok(exists)
    }

    fn list_favorites(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let rows = favorites::table
            .inner_join(recipes::table)
            .order((favorites::created_at.asc(), favorites::recipe_id.asc()))
            .select(Recipe::as_select())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn save_preferences(
        &self,
        user_id: &str,
        preferences: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        diesel::insert_into(user_preferences::table)
            .values(&NewUserPreferences {
                user_id,
                preferences,
                updated_at: Utc::now(),
            })
            .on_conflict(user_preferences::user_id)
            .do_update()
            .set((
                user_preferences::preferences.eq(excluded(user_preferences::preferences)),
                user_preferences::updated_at.eq(excluded(user_preferences::updated_at)),
            ))
            .execute(&mut conn)?;
        Ok(())
    }
}
