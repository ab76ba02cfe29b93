//! HTTP REST API routes

mod character_routes;
mod error;
mod minigame_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use error::ApiError;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character routes
        .route(
            "/api/accounts/{account_id}/character",
            post(character_routes::get_or_create_character),
        )
        .route("/api/characters/{id}", get(character_routes::get_character))
        .route(
            "/api/characters/{id}/items",
            get(character_routes::list_items),
        )
        // Minigame routes
        .route(
            "/api/characters/{id}/minigames",
            get(minigame_routes::list_minigames),
        )
        .route(
            "/api/characters/{id}/minigames/play",
            post(minigame_routes::play_minigame),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::ports::outbound::CharacterRepositoryPort;
    use crate::domain::entities::Character;
    use crate::domain::value_objects::{AccountId, Catalog};
    use crate::infrastructure::config::{AppConfig, StoreConfig};
    use crate::infrastructure::persistence::{InMemoryCharacterRepository, Stores};

    fn test_app() -> (Router, InMemoryCharacterRepository) {
        let characters = InMemoryCharacterRepository::new();
        let config = AppConfig {
            server_port: 0,
            request_timeout_secs: 5,
            store: StoreConfig {
                backend: "memory".to_string(),
                sqlite_path: String::new(),
            },
            play_max_attempts: 3,
            catalog_path: None,
        };
        let stores = Stores {
            characters: Arc::new(characters.clone()),
            inventory: Arc::new(characters.inventory()),
        };
        let state = AppState::from_parts(config, Catalog::default(), stores);
        (create_routes().with_state(Arc::new(state)), characters)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_register_then_fetch_character() {
        let (app, _) = test_app();
        let account = AccountId::new();

        let (status, created) = send(
            &app,
            "POST",
            &format!("/api/accounts/{account}/character"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["level"], 1);
        assert_eq!(created["gold"], 0);
        assert_eq!(created["hp"], 100);

        let id = created["id"].as_str().unwrap().to_string();
        let (status, fetched) = send(&app, "GET", &format!("/api/characters/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["account_id"], account.to_string());
    }

    #[tokio::test]
    async fn test_play_success_shape() {
        let (app, characters) = test_app();
        let character = Character::new(AccountId::new())
            .with_level(10)
            .with_gold(200)
            .with_fatigue(20);
        characters.create(&character).await.unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/characters/{}/minigames/play", character.id),
            Some(json!({ "game_type": "arcade" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["new_fatigue"], 5);
        let gold = body["rewards"]["gold"].as_u64().unwrap();
        assert!((300..=800).contains(&gold));
        assert_eq!(body["new_gold"].as_u64().unwrap(), gold);
        assert_eq!(body["rewards"]["exp"], 0);
        assert_eq!(body["rewards"]["items"], json!([]));
    }

    #[tokio::test]
    async fn test_play_validation_errors() {
        let (app, characters) = test_app();
        let character = Character::new(AccountId::new()).with_level(3).with_gold(50);
        characters.create(&character).await.unwrap();
        let uri = format!("/api/characters/{}/minigames/play", character.id);

        let (status, body) = send(&app, "POST", &uri, Some(json!({ "game_type": "capsule" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INSUFFICIENT_LEVEL");
        assert!(body["error"].as_str().unwrap().contains("required level 5"));

        let (status, body) = send(&app, "POST", &uri, Some(json!({ "game_type": "lottery" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "UNKNOWN_MINIGAME");

        let stored = characters.load(character.id).await.unwrap().unwrap();
        assert_eq!(stored, character);
    }

    #[tokio::test]
    async fn test_insufficient_gold_is_bad_request() {
        let (app, characters) = test_app();
        let character = Character::new(AccountId::new()).with_level(30).with_gold(10);
        characters.create(&character).await.unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/characters/{}/minigames/play", character.id),
            Some(json!({ "game_type": "phone" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INSUFFICIENT_GOLD");
    }

    #[tokio::test]
    async fn test_missing_character_is_not_found() {
        let (app, _) = test_app();
        let ghost = crate::domain::value_objects::CharacterId::new();

        let (status, body) = send(&app, "GET", &format!("/api/characters/{ghost}/minigames"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "CHARACTER_NOT_FOUND");

        let (status, _) = send(&app, "GET", "/api/characters/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_minigames_reports_gates_and_counts() {
        let (app, characters) = test_app();
        let mut character = Character::new(AccountId::new())
            .with_level(15)
            .with_gold(777)
            .with_fatigue(42);
        character
            .minigame_play_counts
            .insert(crate::domain::value_objects::MinigameKind::Pets, 2);
        characters.create(&character).await.unwrap();

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/characters/{}/minigames", character.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gold"], 777);
        assert_eq!(body["fatigue"], 42);

        let catalog = body["catalog"].as_array().unwrap();
        assert_eq!(catalog.len(), 5);
        let unlocked: Vec<&str> = catalog
            .iter()
            .filter(|e| e["unlocked"] == true)
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(unlocked, vec!["capsule", "arcade", "pets"]);
        let pets = catalog.iter().find(|e| e["id"] == "pets").unwrap();
        assert_eq!(pets["play_count"], 2);
        assert_eq!(pets["cost"], 300);
    }

    #[tokio::test]
    async fn test_malformed_play_body_is_json_bad_request() {
        let (app, characters) = test_app();
        let character = Character::new(AccountId::new()).with_level(10).with_gold(500);
        characters.create(&character).await.unwrap();
        let uri = format!("/api/characters/{}/minigames/play", character.id);

        for body in [json!({}), json!({ "game_type": 5 })] {
            let (status, response) = send(&app, "POST", &uri, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["code"], "BAD_REQUEST");
            assert!(response["error"].as_str().is_some_and(|e| !e.is_empty()));
        }

        let stored = characters.load(character.id).await.unwrap().unwrap();
        assert_eq!(stored, character);
    }

    #[tokio::test]
    async fn test_played_items_show_up_in_item_listing() {
        let (app, characters) = test_app();
        let character = Character::new(AccountId::new()).with_level(8).with_gold(100);
        characters.create(&character).await.unwrap();

        let (status, played) = send(
            &app,
            "POST",
            &format!("/api/characters/{}/minigames/play", character.id),
            Some(json!({ "game_type": "capsule" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, listed) = send(
            &app,
            "GET",
            &format!("/api/characters/{}/items", character.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["items"], played["rewards"]["items"]);
        assert_eq!(listed["items"][0]["level"], 3);
    }
}
