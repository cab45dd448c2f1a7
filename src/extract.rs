//! Recovers a recipe from language model output.
//!
//! The model is asked for bare JSON but may wrap it in prose or code fences.
//! The span from the first `{` to the last `}` is decoded as-is; this is not a
//! balanced-bracket scan, so text holding several objects, or braces inside
//! string values, can select the wrong span.

use crate::error::GenerationError;
use crate::model::Recipe;
use serde_json::Value;

/// The outermost `{ ... }` span of `text`, or all of `text` when there is none
pub fn json_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if close > open => &text[open..=close],
        _ => text,
    }
}

/// Decode the outermost JSON span of `text` without any further interpretation
pub fn extract_json(text: &str) -> Result<Value, GenerationError> {
    serde_json::from_str(json_span(text))
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))
}

/// Extract and validate a recipe from model output.
///
/// Fails with [`GenerationError::MalformedResponse`] when nothing decodes, when
/// the decoded value is not a recipe object, or when it has no title.
pub fn extract_recipe(text: &str) -> Result<Recipe, GenerationError> {
    let value = extract_json(text)?;
    if !value.is_object() {
        return Err(GenerationError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let recipe: Recipe = serde_json::from_value(value)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    if !recipe.is_valid() {
        return Err(GenerationError::MalformedResponse(
            "recipe has no title".to_string(),
        ));
    }

    Ok(recipe)
}
