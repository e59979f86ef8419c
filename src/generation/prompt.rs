// ABOUTME: Builds the recipe prompt sent to Gemini
// ABOUTME: Spanish instructions asking for a three-field JSON answer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON shape the model is asked to answer with
const RESPONSE_SHAPE: &str = r#"{
  "title": "Título de la receta",
  "ingredients": "Lista de ingredientes con cantidades",
  "steps": "Pasos detallados para preparar la receta, numerados y separados por saltos de línea"
}"#;

/// Role framing put in front of every prompt
const CHEF_FRAMING: &str = "Eres un chef experto que genera recetas de cocina.";

/// Closing instruction appended to every prompt
const JSON_ONLY_INSTRUCTION: &str =
    "Responde SOLO con un JSON válido, sin texto adicional antes o después.";

/// Build the user prompt for a set of ingredients and an optional style
///
/// Ingredients and style are embedded verbatim. A blank style is omitted.
#[must_use]
pub fn build_recipe_prompt(ingredients: &str, style: Option<&str>) -> String {
    let style_line = style
        .filter(|style| !style.trim().is_empty())
        .map(|style| format!("Estilo culinario: {style}."))
        .unwrap_or_default();

    format!(
        "Genera una receta de cocina con los siguientes ingredientes: {ingredients}. {style_line}\n\n\
         Por favor, devuelve la respuesta en formato JSON con la siguiente estructura:\n\
         {RESPONSE_SHAPE}"
    )
}

/// Wrap a prompt with the chef framing and the JSON-only instruction
#[must_use]
pub fn frame_prompt(prompt: &str) -> String {
    format!("{CHEF_FRAMING} {prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_inputs_verbatim() {
        let prompt = build_recipe_prompt("tomate, queso, albahaca", Some("italiana"));
        assert!(prompt.contains("tomate, queso, albahaca"));
        assert!(prompt.contains("Estilo culinario: italiana."));
        assert!(prompt.contains("\"steps\""));
    }

    #[test]
    fn test_blank_style_is_omitted() {
        assert!(!build_recipe_prompt("arroz", Some("  ")).contains("Estilo culinario"));
        assert!(!build_recipe_prompt("arroz", None).contains("Estilo culinario"));
    }

    #[test]
    fn test_framing_wraps_prompt() {
        let framed = frame_prompt("Genera algo");
        assert!(framed.starts_with("Eres un chef experto"));
        assert!(framed.contains("Genera algo"));
        assert!(framed.ends_with("sin texto adicional antes o después."));
    }
}
