//! Validation of raw model output into a `RecipeDraft`.

use serde_json::{Map, Value};

use crate::ai::prompts::REFUSAL_SENTINEL;
use crate::ai::RawGeneration;
use crate::error::{GenerateError, OutputError};
use crate::types::{Ingredients, RecipeDraft};

/// Turn raw model output into a checked draft.
///
/// The refusal sentinel is prose rather than JSON, so it is checked first and
/// parsing is never attempted when it is present. Every field must be present
/// with its exact type; nothing is coerced or defaulted.
pub fn validate_generation(raw: &RawGeneration) -> Result<RecipeDraft, GenerateError> {
    if raw.as_str().contains(REFUSAL_SENTINEL) {
        return Err(GenerateError::Refused);
    }
    Ok(parse_draft(raw.as_str())?)
}

fn parse_draft(text: &str) -> Result<RecipeDraft, OutputError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| OutputError::InvalidJson(e.to_string()))?;
    let object = value.as_object().ok_or(OutputError::NotAnObject)?;

    Ok(RecipeDraft {
        title: required_text(object, "title")?,
        description: required_text(object, "description")?,
        ingredients: required_ingredients(object)?,
        instructions: required_instructions(object)?,
    })
}

fn required<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, OutputError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(OutputError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> OutputError {
    OutputError::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn required_text(object: &Map<String, Value>, field: &'static str) -> Result<String, OutputError> {
    let text = required(object, field)?
        .as_str()
        .ok_or_else(|| invalid(field, "expected a string"))?;
    if text.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(text.to_string())
}

fn required_ingredients(object: &Map<String, Value>) -> Result<Ingredients, OutputError> {
    const FIELD: &str = "ingredients";

    let entries = required(object, FIELD)?
        .as_object()
        .ok_or_else(|| invalid(FIELD, "expected an object of name to quantity"))?;
    if entries.is_empty() {
        return Err(invalid(FIELD, "must not be empty"));
    }

    Ingredients::try_from(entries.clone()).map_err(|reason| invalid(FIELD, reason))
}

fn required_instructions(object: &Map<String, Value>) -> Result<Vec<String>, OutputError> {
    const FIELD: &str = "instructions";

    let steps = required(object, FIELD)?
        .as_array()
        .ok_or_else(|| invalid(FIELD, "expected an array of steps"))?;
    if steps.is_empty() {
        return Err(invalid(FIELD, "must not be empty"));
    }

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            step.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(FIELD, format!("step {} is not a string", i + 1)))
        })
        .collect()
}
