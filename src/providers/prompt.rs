/// The recipe generation prompt.
///
/// Loaded from `prompt.txt` at compile time. `{{INGREDIENTS}}` is replaced
/// with the user's ingredient text exactly as typed.
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

const INGREDIENTS_PLACEHOLDER: &str = "{{INGREDIENTS}}";

/// Build the single user message sent to the language model.
pub fn build_recipe_prompt(ingredients: &str) -> String {
    RECIPE_PROMPT_TEMPLATE.replacen(INGREDIENTS_PLACEHOLDER, ingredients, 1)
}
