// ABOUTME: Turns model output text into a flat title/ingredients/steps recipe
// ABOUTME: Strips markdown fences and resolves Spanish/English field aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Normalizer
//!
//! Models answer with loosely structured JSON: the ingredient list may be a
//! string, a list of strings, or a list of `{cantidad, nombre, tipo}` objects,
//! and keys may be Spanish or English. Everything is flattened to three
//! strings. Field names are resolved through [`RecipeField::aliases`].

use serde_json::{Map, Value};

use super::GenerationError;
use crate::models::GeneratedRecipe;

/// Title used when the model omits one
pub const PLACEHOLDER_TITLE: &str = "Generated recipe";

/// Canonical fields read from a model response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    /// Recipe title
    Title,
    /// Top-level ingredient list
    Ingredients,
    /// Top-level step list
    Steps,
    /// Quantity of an ingredient object
    Quantity,
    /// Name of an ingredient object
    Name,
    /// Kind or preparation of an ingredient object
    Kind,
    /// Text of a step object
    StepText,
}

impl RecipeField {
    /// Keys accepted for this field, in lookup order
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Title => &["title", "titulo"],
            Self::Ingredients => &["ingredients"],
            Self::Steps => &["steps"],
            Self::Quantity => &["cantidad", "quantity"],
            Self::Name => &["nombre", "name"],
            Self::Kind => &["tipo", "type"],
            Self::StepText => &["paso", "step"],
        }
    }

    /// First alias holding a non-empty value
    fn lookup(self, object: &Map<String, Value>) -> Option<&Value> {
        self.aliases()
            .iter()
            .filter_map(|alias| object.get(*alias))
            .find(|value| is_present(value))
    }
}

/// Remove a surrounding ```` ```json ```` or ```` ``` ```` block, if any
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    let body = body.strip_prefix('\n').unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body)
}

/// Parse already fence-free JSON text into a flat recipe
///
/// # Errors
///
/// Returns [`GenerationError::MalformedResponse`] if the text is not JSON
pub fn normalize(raw: &str) -> Result<GeneratedRecipe, GenerationError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let Value::Object(object) = value else {
        return Ok(GeneratedRecipe {
            title: PLACEHOLDER_TITLE.to_owned(),
            ..GeneratedRecipe::default()
        });
    };

    Ok(GeneratedRecipe {
        title: RecipeField::Title
            .lookup(&object)
            .map_or_else(|| PLACEHOLDER_TITLE.to_owned(), render_scalar),
        ingredients: render_list(RecipeField::Ingredients.lookup(&object), render_ingredient),
        steps: render_list(RecipeField::Steps.lookup(&object), render_step),
    })
}

/// Fence-strip then normalize, the full treatment applied to model output
///
/// # Errors
///
/// Returns [`GenerationError::MalformedResponse`] if the unfenced text is not JSON
pub fn normalize_model_output(text: &str) -> Result<GeneratedRecipe, GenerationError> {
    normalize(strip_code_fences(text))
}

/// `null`, `false`, `0` and `""` count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render_list(value: Option<&Value>, render_item: fn(usize, &Value) -> String) -> String {
    match value {
        None => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| render_item(index, item))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => render_scalar(other),
    }
}

fn render_ingredient(_index: usize, item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        Value::Object(object) => {
            let part = |field: RecipeField| {
                field
                    .lookup(object)
                    .map(render_scalar)
                    .unwrap_or_default()
            };
            format!(
                "{} {} {}",
                part(RecipeField::Quantity),
                part(RecipeField::Name),
                part(RecipeField::Kind)
            )
            .trim()
            .to_owned()
        }
        _ => String::new(),
    }
}

fn render_step(index: usize, item: &Value) -> String {
    let text = match item {
        Value::String(text) => text.clone(),
        Value::Object(object) => RecipeField::StepText
            .lookup(object)
            .map_or_else(|| item.to_string(), render_scalar),
        other => render_scalar(other),
    };
    format!("{}. {text}", index + 1)
}
