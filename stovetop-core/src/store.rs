//! Persistence seam for generated recipes.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::{PersistedRecipe, StoredRecipe};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage query failed: {0}")]
    Query(String),
}

/// Destination for generated recipes. The store assigns identity and
/// timestamps; records are never modified afterwards.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn save(&self, recipe: PersistedRecipe) -> Result<StoredRecipe, StoreError>;
}

/// Process-local store, used by the CLI and tests.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<Vec<StoredRecipe>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all saved recipes, oldest first.
    pub async fn recipes(&self) -> Vec<StoredRecipe> {
        self.recipes.read().await.clone()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn save(&self, recipe: PersistedRecipe) -> Result<StoredRecipe, StoreError> {
        let now = Utc::now();
        let stored = StoredRecipe {
            id: Uuid::new_v4(),
            recipe,
            created_at: now,
            updated_at: now,
        };
        self.recipes.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ingredients;

    fn recipe(title: &str) -> PersistedRecipe {
        PersistedRecipe {
            title: title.to_string(),
            description: "d".to_string(),
            ingredients: [("Rice", "150g")].into_iter().collect::<Ingredients>(),
            instructions: vec!["Boil.".to_string()],
            user_input: vec!["Rice".to_string()],
            search_words: "rice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_identity() {
        let store = InMemoryRecipeStore::new();
        let a = store.save(recipe("A")).await.unwrap();
        let b = store.save(recipe("B")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.recipe, recipe("A"));

        let saved = store.recipes().await;
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].recipe.title, "A");
        assert_eq!(saved[1].recipe.title, "B");
    }
}
