use mockito::{Matcher, Server};
use recipe_finder::analytics::{aggregate, count_this_week};
use recipe_finder::model::YoutubeLink;
use recipe_finder::{
    AnalyticsOutcome, AuthApi, BackendClient, Generation, MemoryTokenStore, ProfileUpdate, Recipe,
    RecipeLibrary, RecipeRepository, RepositoryError, Session, VideoResult,
};
use serde_json::json;
use std::sync::Arc;

const SAVED_RECIPE: &str = r#"{
    "_id": "r1",
    "title": "Pancakes",
    "description": "Fluffy",
    "ingredients": ["2 eggs"],
    "instructions": ["Mix", "Fry"],
    "cookTime": "20",
    "servings": "",
    "youtubeLinks": [{"title": "Easy Pancakes", "url": "https://www.youtube.com/watch?v=abc", "thumbnail": "t.jpg"}],
    "isFavorite": false,
    "createdAt": "2024-03-01T12:00:00Z"
}"#;

#[tokio::test]
async fn test_sign_in_returns_grant() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/signin")
        .match_body(Matcher::Json(json!({
            "email": "cook@example.com",
            "password": "secret"
        })))
        .with_status(200)
        .with_body(r#"{"token": "tok", "user": {"_id": "u1", "email": "cook@example.com", "fullName": "Sam"}}"#)
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());
    let grant = backend.sign_in("cook@example.com", "secret").await.unwrap();
    assert_eq!(grant.token, "tok");
    assert_eq!(grant.user.email, "cook@example.com");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_backend_message_and_fallback() {
    let mut server = Server::new_async().await;
    let _signup = server
        .mock("POST", "/api/auth/signup")
        .with_status(400)
        .with_body(r#"{"message": "User already exists"}"#)
        .create_async()
        .await;
    let _signin = server
        .mock("POST", "/api/auth/signin")
        .with_status(500)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());

    let err = backend
        .sign_up("cook@example.com", "secret", "Sam")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
    assert!(matches!(err, RepositoryError::Api { status: 400, .. }));

    let err = backend.sign_in("cook@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Signin failed");
}

#[tokio::test]
async fn test_update_profile_sends_only_set_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/auth/profile")
        .match_header("authorization", "Bearer tok")
        .match_body(Matcher::Json(json!({"fullName": "Sam Cook"})))
        .with_status(200)
        .with_body(r#"{"user": {"_id": "u1", "email": "cook@example.com", "fullName": "Sam Cook"}}"#)
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());
    let update = ProfileUpdate {
        full_name: Some("Sam Cook".to_string()),
        email: None,
    };
    let user = backend.update_profile("tok", &update).await.unwrap();
    assert_eq!(user.display_name(), "Sam Cook");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_saved_recipes_and_stats() {
    let mut server = Server::new_async().await;
    let _saved = server
        .mock("GET", "/api/recipes/saved")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(format!(r#"{{"recipes": [{}]}}"#, SAVED_RECIPE))
        .create_async()
        .await;
    let _stats = server
        .mock("GET", "/api/recipes/stats")
        .with_status(200)
        .with_body(r#"{"stats": {"generationsCount": 8, "recipesCount": 2}}"#)
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());

    let recipes = backend.saved_recipes("tok").await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, "r1");
    assert_eq!(recipes[0].instructions, vec!["Mix", "Fry"]);
    assert_eq!(recipes[0].youtube_links[0].title, "Easy Pancakes");

    let stats = backend.dashboard_stats("tok").await.unwrap();
    assert_eq!(stats.generations_count, 8);
    assert_eq!(stats.recipes_count, 2);
}

#[tokio::test]
async fn test_analytics_feed_aggregation() {
    let mut server = Server::new_async().await;
    let _analytics = server
        .mock("GET", "/api/recipes/analytics")
        .with_status(200)
        .with_body(
            r#"{"analytics": [
                {"ingredientsInput": "egg, milk", "recipeTitle": "Pancakes", "generatedAt": "2024-03-14T08:00:00Z"},
                {"ingredientsInput": "egg, rice", "recipeTitle": "Fried rice", "generatedAt": "2024-02-01T08:00:00Z"}
            ]}"#,
        )
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());
    let records = backend.analytics("tok").await.unwrap();

    let summary = aggregate(&records);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.favorite, "egg");
    assert_eq!(summary.average_per_day, 0);

    let now = "2024-03-15T00:00:00Z".parse().unwrap();
    assert_eq!(count_this_week(&records, now), 1);
}

#[tokio::test]
async fn test_missing_analytics_list_is_empty() {
    let mut server = Server::new_async().await;
    let _analytics = server
        .mock("GET", "/api/recipes/analytics")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());
    assert!(backend.analytics("tok").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_library_save_favorite_delete() {
    let mut server = Server::new_async().await;
    let _profile = server
        .mock("GET", "/api/auth/profile")
        .with_status(200)
        .with_body(r#"{"user": {"_id": "u1", "email": "cook@example.com"}}"#)
        .create_async()
        .await;
    let save = server
        .mock("POST", "/api/recipes/save")
        .match_header("authorization", "Bearer tok")
        .match_body(Matcher::PartialJson(json!({
            "title": "Pancakes",
            "ingredients": ["2 eggs"],
            "instructions": ["Mix", "Fry"],
            "cookTime": "20",
            "servings": "",
            "youtubeLinks": [{
                "title": "Easy Pancakes",
                "url": "https://www.youtube.com/watch?v=abc",
                "thumbnail": "t.jpg"
            }]
        })))
        .with_status(201)
        .with_body(format!(r#"{{"recipe": {}}}"#, SAVED_RECIPE))
        .create_async()
        .await;
    let favorite = server
        .mock("PATCH", "/api/recipes/r1/favorite")
        .with_status(200)
        .with_body(format!(
            r#"{{"recipe": {}}}"#,
            SAVED_RECIPE.replace(r#""isFavorite": false"#, r#""isFavorite": true"#)
        ))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/recipes/r1")
        .with_status(200)
        .with_body(r#"{"message": "Recipe deleted"}"#)
        .create_async()
        .await;

    let backend = BackendClient::with_base_url(server.url());
    let session = Session::hydrate(Arc::new(MemoryTokenStore::with_token("tok")), &backend)
        .await
        .unwrap();

    let generation = Generation {
        recipe: serde_json::from_str::<Recipe>(
            r#"{"title":"Pancakes","ingredients_needed":["2 eggs"],"steps":["Mix","Fry"],"time_minutes":"20"}"#,
        )
        .unwrap(),
        videos: Ok(vec![VideoResult {
            id: "abc".to_string(),
            title: "Easy Pancakes".to_string(),
            thumbnail: "t.jpg".to_string(),
            channel_title: "Home Cook".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
        }]),
        analytics: AnalyticsOutcome::Skipped,
    };

    let mut library = RecipeLibrary::default();
    let saved = library.save(&backend, &session, &generation).await.unwrap();
    assert_eq!(
        saved.youtube_links,
        vec![YoutubeLink {
            title: "Easy Pancakes".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            thumbnail: "t.jpg".to_string(),
        }]
    );
    assert_eq!(library.favorites().count(), 0);

    library.toggle_favorite(&backend, &session, "r1").await.unwrap();
    assert_eq!(library.recipes().len(), 1);
    assert_eq!(library.favorites().count(), 1);

    library.delete(&backend, &session, "r1").await.unwrap();
    assert!(library.recipes().is_empty());

    save.assert_async().await;
    favorite.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_library_requires_sign_in() {
    let backend = BackendClient::with_base_url("http://127.0.0.1:9".to_string());
    let result = RecipeLibrary::load(&backend, &Session::anonymous()).await;
    assert!(matches!(result, Err(RepositoryError::NotAuthenticated)));
}
