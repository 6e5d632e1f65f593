use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use warp::Filter;

use crate::session_manager::SessionManager;

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

#[derive(serde::Serialize)]
struct CategoriesResponse {
    categories: Vec<String>,
}

pub mod config;
pub mod session_manager;
pub mod websocket;

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
const MAX_LEADERBOARD_LIMIT: usize = 100;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
    static_directory: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let session_manager_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(session_manager_filter.clone())
        .map(|ws: warp::ws::Ws, session_manager| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, session_manager))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let categories = warp::path("categories")
        .and(warp::get())
        .and(session_manager_filter.clone())
        .map(|session_manager: Arc<SessionManager>| {
            warp::reply::json(&CategoriesResponse {
                categories: session_manager.catalog().category_names(),
            })
        });

    let leaderboard = warp::path("leaderboard")
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(session_manager_filter.clone())
        .and_then(handle_leaderboard_request);

    // The game page and its assets
    let static_files = warp::get().and(warp::fs::dir(static_directory));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    websocket
        .or(health)
        .or(categories)
        .or(leaderboard)
        .or(static_files)
        .with(cors)
        .with(warp::log("hangman"))
}

async fn handle_leaderboard_request(
    query: LeaderboardQuery,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT);

    // Unreadable storage already shows up as an empty list
    let entries = session_manager.leaderboard().top_scores(limit).await;
    Ok(warp::reply::json(&entries))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use hangman_core::WordCatalog;
    use hangman_persistence::LeaderboardRepository;
    use hangman_types::{ClientMessage, LeaderboardEntry, ServerMessage};

    fn missing_static_directory() -> PathBuf {
        std::env::temp_dir().join(format!("hangman-no-static-{}", uuid::Uuid::new_v4()))
    }

    fn create_test_manager() -> Arc<SessionManager> {
        Arc::new(SessionManager::new(
            Arc::new(WordCatalog::builtin()),
            Arc::new(LeaderboardRepository::in_memory()),
        ))
    }

    fn create_test_app() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        create_routes(create_test_manager(), missing_static_directory())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "OK");
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let app = create_test_app();

        let response = warp::test::request()
            .method("GET")
            .path("/categories")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            body["categories"],
            serde_json::json!(["Animals", "Fruits", "Countries", "Sport", "Cities"])
        );
    }

    #[tokio::test]
    async fn test_leaderboard_endpoint_limit() {
        let session_manager = create_test_manager();
        for score in [400, 1200, 90, 650] {
            session_manager.leaderboard().record_score(score).await.unwrap();
        }
        let app = create_routes(session_manager, missing_static_directory());

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard?limit=2")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].entry.score, 1200);
        assert_eq!(entries[1].entry.score, 650);

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard")
            .reply(&app)
            .await;
        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_leaderboard_endpoint() {
        let app = create_test_app();

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "[]");
    }

    #[tokio::test]
    async fn test_static_files_are_served() {
        let static_directory = missing_static_directory();
        std::fs::create_dir_all(&static_directory).unwrap();
        std::fs::write(static_directory.join("index.html"), "<h1>Hangman</h1>").unwrap();
        let app = create_routes(create_test_manager(), static_directory.clone());

        let response = warp::test::request()
            .method("GET")
            .path("/index.html")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "<h1>Hangman</h1>");

        std::fs::remove_dir_all(&static_directory).unwrap();
    }

    #[tokio::test]
    async fn test_websocket_connection_upgrade() {
        let app = create_test_app();

        let mut ws = warp::test::ws()
            .path("/ws")
            .handshake(app)
            .await
            .expect("WebSocket handshake should succeed");

        let list_json = serde_json::to_string(&ClientMessage::ListCategories).unwrap();
        ws.send_text(list_json).await;

        let msg = ws.recv().await.expect("Should receive categories");
        let server_msg: ServerMessage = serde_json::from_str(msg.to_str().unwrap()).unwrap();
        match server_msg {
            ServerMessage::Categories { categories } => assert_eq!(categories.len(), 5),
            other => panic!("Expected categories, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_endpoints_cors() {
        let app = create_test_app();

        let response = warp::test::request()
            .method("OPTIONS")
            .path("/health")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "GET")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_invalid_routes() {
        let app = create_test_app();

        let response = warp::test::request()
            .method("GET")
            .path("/invalid")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 404);
    }
}
