use recipe_finder::extract::{extract_json, extract_recipe, json_span};
use recipe_finder::{CookTime, GenerationError, Recipe};
use serde_json::json;

#[test]
fn test_recipe_inside_code_fence() {
    let content = "Here you go:\n```json\n{\"title\":\"Pancakes\",\"ingredients_needed\":[\"egg\",\"flour\"],\"steps\":[\"Mix\",\"Cook\"],\"time_minutes\":\"15\",\"difficulty\":\"easy\",\"description\":\"Fluffy pancakes\"}\n```\nEnjoy!";

    let recipe = extract_recipe(content).unwrap();
    assert_eq!(recipe.title, "Pancakes");
    assert_eq!(recipe.ingredients_needed.len(), 2);
    assert_eq!(recipe.ingredients_needed, vec!["egg", "flour"]);
    assert_eq!(recipe.steps, vec!["Mix", "Cook"]);
    assert_eq!(recipe.time_minutes, Some(CookTime::Text("15".to_string())));
    assert_eq!(recipe.difficulty, "easy");
    assert_eq!(recipe.description, "Fluffy pancakes");
}

#[test]
fn test_structured_ingredients_are_kept_as_decoded() {
    let recipe = extract_recipe(
        r#"{"title":"Omelette","ingredients_needed":[{"name":"egg","quantity":"2"},3],"steps":["Whisk"]}"#,
    )
    .unwrap();

    assert_eq!(recipe.title, "Omelette");
    assert_eq!(
        recipe.ingredients_needed,
        vec![json!({"name": "egg", "quantity": "2"}), json!(3)]
    );
    assert_eq!(recipe.steps, vec!["Whisk"]);
}

#[test]
fn test_refusal_is_malformed() {
    let result = extract_recipe("Sorry, I cannot help with that.");
    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
}

#[test]
fn test_serialized_recipe_extracts_back() {
    let recipe: Recipe = serde_json::from_str(
        r#"{"title":"Omelette","ingredients_needed":["3 eggs","butter"],"steps":["Whisk","Fry"],"time_minutes":10,"difficulty":"Easy","description":"Quick"}"#,
    )
    .unwrap();

    let text = format!("Sure!\n{}\nEnjoy.", serde_json::to_string(&recipe).unwrap());
    assert_eq!(extract_recipe(&text).unwrap(), recipe);
}

#[test]
fn test_numeric_time_is_kept() {
    let recipe = extract_recipe(r#"{"title":"Rice","time_minutes":25}"#).unwrap();
    assert_eq!(recipe.time_minutes.unwrap().to_string(), "25");
    assert!(recipe.steps.is_empty());
}

#[test]
fn test_missing_title_is_rejected() {
    let result = extract_recipe(r#"{"ingredients_needed":["salt"],"steps":["Season"]}"#);
    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
}

#[test]
fn test_non_object_json_is_rejected() {
    assert!(extract_json("[1, 2, 3]").is_ok());
    assert!(matches!(
        extract_recipe("[1, 2, 3]"),
        Err(GenerationError::MalformedResponse(_))
    ));
}

#[test]
fn test_span_is_outermost_braces() {
    // Two objects select everything between the first and last brace
    let text = r#"{"title":"A"} and {"title":"B"}"#;
    assert_eq!(json_span(text), text);
    assert!(extract_recipe(text).is_err());

    assert_eq!(json_span("no braces here"), "no braces here");
    assert_eq!(json_span("} backwards {"), "} backwards {");
}
