use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Inbound request: free-text ingredients plus dietary flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Comma-separated ingredients, e.g. "beef, potato".
    pub prompt: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
}

/// Ingredient name to quantity text, in the order the model listed them.
///
/// A JSON object whose values are all strings; `serde_json`'s
/// `preserve_order` keeps key order on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Ingredients(Map<String, Value>);

impl Ingredients {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// A repeated name replaces the earlier quantity in place.
    pub fn insert(&mut self, name: impl Into<String>, quantity: impl Into<String>) {
        self.0.insert(name.into(), Value::String(quantity.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(name, quantity)| Some((name.as_str(), quantity.as_str()?)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for Ingredients {
    type Error = String;

    fn try_from(entries: Map<String, Value>) -> Result<Self, Self::Error> {
        if let Some((name, _)) = entries.iter().find(|(_, quantity)| !quantity.is_string()) {
            return Err(format!("quantity for {:?} is not a string", name));
        }
        Ok(Self(entries))
    }
}

impl<N: Into<String>, Q: Into<String>> FromIterator<(N, Q)> for Ingredients {
    fn from_iter<I: IntoIterator<Item = (N, Q)>>(iter: I) -> Self {
        let mut ingredients = Ingredients::new();
        for (name, quantity) in iter {
            ingredients.insert(name, quantity);
        }
        ingredients
    }
}

/// Recipe fields parsed and checked from the model's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Ingredients,
    pub instructions: Vec<String>,
}

/// Record handed to the store: the draft plus search metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecipe {
    pub title: String,
    pub description: String,
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = std::collections::HashMap<String, String>)
    )]
    pub ingredients: Ingredients,
    pub instructions: Vec<String>,
    /// Normalized ingredient list from the user's prompt.
    pub user_input: Vec<String>,
    /// The raw prompt text.
    pub search_words: String,
}

impl PersistedRecipe {
    /// Combine a validated draft with the normalized and raw user input.
    pub fn assemble(draft: RecipeDraft, user_input: Vec<String>, search_words: &str) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            user_input,
            search_words: search_words.to_string(),
        }
    }
}

/// A recipe as returned by the store, with identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StoredRecipe {
    pub id: Uuid,
    #[serde(flatten)]
    pub recipe: PersistedRecipe,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            title: "Camp Stove Stew".to_string(),
            description: "A hearty one-pan stew.".to_string(),
            ingredients: [("Beef", "300g"), ("Potato", "2 medium")]
                .into_iter()
                .collect(),
            instructions: vec!["Brown the beef.".to_string(), "Add potato.".to_string()],
        }
    }

    #[test]
    fn test_generation_request_camel_case_and_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"prompt": "beef", "isVegetarian": true}"#).unwrap();
        assert_eq!(request.prompt, "beef");
        assert!(request.is_vegetarian);
        assert!(!request.is_gluten_free);
    }

    #[test]
    fn test_ingredients_keep_insertion_order() {
        let ingredients: Ingredients = [("Onion", "1"), ("Butter", "20g"), ("Apple", "2")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&ingredients).unwrap();
        assert_eq!(json, r#"{"Onion":"1","Butter":"20g","Apple":"2"}"#);

        let parsed: Ingredients = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = parsed.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Onion", "Butter", "Apple"]);
    }

    #[test]
    fn test_ingredients_duplicate_replaces_in_place() {
        let mut ingredients = Ingredients::new();
        ingredients.insert("Salt", "a pinch");
        ingredients.insert("Oil", "1 tbsp");
        ingredients.insert("Salt", "to taste");
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients.get("Salt"), Some("to taste"));
        assert_eq!(ingredients.iter().next(), Some(("Salt", "to taste")));
    }

    #[test]
    fn test_ingredients_reject_non_string_quantity() {
        let err = serde_json::from_str::<Ingredients>(r#"{"Eggs": 2, "Milk": "200ml"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains(r#"quantity for "Eggs" is not a string"#), "{}", err);
    }

    #[test]
    fn test_assemble_is_field_composition() {
        let recipe = PersistedRecipe::assemble(
            draft(),
            vec!["Beef".to_string(), "Potato".to_string()],
            "beef, potato",
        );
        assert_eq!(recipe.title, "Camp Stove Stew");
        assert_eq!(recipe.ingredients, draft().ingredients);
        assert_eq!(recipe.instructions, draft().instructions);
        assert_eq!(recipe.user_input, vec!["Beef", "Potato"]);
        assert_eq!(recipe.search_words, "beef, potato");
    }

    #[test]
    fn test_stored_recipe_wire_shape() {
        let stored = StoredRecipe {
            id: Uuid::new_v4(),
            recipe: PersistedRecipe::assemble(draft(), vec!["Beef".to_string()], "beef"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["title"], "Camp Stove Stew");
        assert_eq!(value["userInput"][0], "Beef");
        assert_eq!(value["searchWords"], "beef");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("recipe").is_none());
    }
}
