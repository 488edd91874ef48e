use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use stovetop_core::Ingredients;

/// One ingredient as stored in the `ingredients` JSONB column.
///
/// JSONB does not keep object key order, so the mapping is stored as an
/// array of pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIngredient {
    pub name: String,
    pub quantity: String,
}

pub fn ingredients_to_json(ingredients: &Ingredients) -> serde_json::Value {
    let pairs: Vec<StoredIngredient> = ingredients
        .iter()
        .map(|(name, quantity)| StoredIngredient {
            name: name.to_string(),
            quantity: quantity.to_string(),
        })
        .collect();
    serde_json::json!(pairs)
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::generated_recipes)]
pub struct NewGeneratedRecipe<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: serde_json::Value,
    pub instructions: &'a [Option<String>],
    pub user_input: &'a [Option<String>],
    pub search_words: &'a str,
}
