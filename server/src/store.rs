//! PostgreSQL implementation of the recipe store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use stovetop_core::{PersistedRecipe, RecipeStore, StoreError, StoredRecipe};
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{ingredients_to_json, NewGeneratedRecipe};
use crate::schema::generated_recipes;

/// Saves generated recipes through the Diesel connection pool.
///
/// Diesel is synchronous, so each save runs on the blocking thread pool.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn save(&self, recipe: PersistedRecipe) -> Result<StoredRecipe, StoreError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || insert_recipe(&pool, recipe))
            .await
            .map_err(|e| StoreError::Unavailable(format!("Storage task failed: {}", e)))?
    }
}

fn insert_recipe(pool: &DbPool, recipe: PersistedRecipe) -> Result<StoredRecipe, StoreError> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    let instructions: Vec<Option<String>> =
        recipe.instructions.iter().cloned().map(Some).collect();
    let user_input: Vec<Option<String>> = recipe.user_input.iter().cloned().map(Some).collect();

    let new_recipe = NewGeneratedRecipe {
        title: &recipe.title,
        description: &recipe.description,
        ingredients: ingredients_to_json(&recipe.ingredients),
        instructions: &instructions,
        user_input: &user_input,
        search_words: &recipe.search_words,
    };

    let _span = tracing::info_span!("db.query", table = "generated_recipes").entered();
    let (id, created_at, updated_at): (Uuid, DateTime<Utc>, DateTime<Utc>) =
        diesel::insert_into(generated_recipes::table)
            .values(&new_recipe)
            .returning((
                generated_recipes::id,
                generated_recipes::created_at,
                generated_recipes::updated_at,
            ))
            .get_result(&mut conn)
            .map_err(|e| StoreError::Query(e.to_string()))?;

    Ok(StoredRecipe {
        id,
        recipe,
        created_at,
        updated_at,
    })
}
