//! Recipe generation prompt: a fixed system instruction, the user's
//! ingredients and dietary flags, and a one-shot example of the output shape.

use crate::ai::ChatMessage;
use crate::types::GenerationRequest;

/// Prompt name for logs.
pub const RECIPE_PROMPT_NAME: &str = "generate_recipe";

/// Marker the model is told to emit when it cannot build a recipe from the
/// given ingredients. Validation checks for this exact text.
pub const REFUSAL_SENTINEL: &str = "Sorry I don't understand";

/// One-shot example of the JSON shape the model must answer with.
pub const RECIPE_EXAMPLE_JSON: &str = r#"{
    "title": "[Your Title Here]",
    "description": "[Your Description Here]",
    "ingredients": {
      "Ingredient1": "[amount1]",
      "Ingredient2": "[amount2]",
      "Ingredient3": "[amount3]",
      "...": "..."
    },
    "instructions": [
      "[Step 1]",
      "[Step 2]",
      "[Step 3]",
      "..."
    ]
}"#;

/// Render the system prompt.
pub fn render_recipe_system_prompt() -> String {
    format!(
        "You are a helpful assistant designed to output JSON. You will be creating a recipe based on 1-3 main ingredients the user will give you. \
The user can also choose whether the recipe should be vegetarian and/or gluten-free. \
You can add as many ingredients as needed to make a flavourful dish. \
The recipe must be cooked on a portable camping stove with a single heat source and no temperature control, using only one frying pan or one saucepan. \
Generate a recipe for a dish that serves 2 people. \
If an ingredient needs a weight or amount, include it. Use grams and millilitres. Use British English. \
Important: if the user provides inappropriate or non-existing ingredients, respond with an array containing only the string: [{sentinel}]",
        sentinel = REFUSAL_SENTINEL
    )
}

/// Render the user message: the raw ingredient text followed by one line per
/// selected dietary flag.
pub fn render_recipe_user_prompt(request: &GenerationRequest) -> String {
    let mut prompt = request.prompt.clone();
    if request.is_vegetarian {
        prompt.push_str("\nVegetarian");
    }
    if request.is_gluten_free {
        prompt.push_str("\nGluten-free");
    }
    prompt
}

/// The three messages sent for one recipe generation, in their fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessages {
    pub system: ChatMessage,
    pub user: ChatMessage,
    pub assistant_example: ChatMessage,
}

impl PromptMessages {
    /// Messages in send order: system, user, assistant example.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![self.system, self.user, self.assistant_example]
    }
}

/// Build the prompt for a generation request.
pub fn build_recipe_prompt(request: &GenerationRequest) -> PromptMessages {
    PromptMessages {
        system: ChatMessage::system(render_recipe_system_prompt()),
        user: ChatMessage::user(render_recipe_user_prompt(request)),
        assistant_example: ChatMessage::assistant(RECIPE_EXAMPLE_JSON),
    }
}
