//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Rendered dashboard with initial outputs embedded
//!
//! ## Dashboard
//! - `GET /api/v1/layout` - Layout tree
//! - `GET /api/v1/dependencies` - Output bindings and control options
//! - `POST /api/v1/update` - Input-change round-trip
//! - `GET /api/v1/dataset` - Dataset summary and load statistics
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Stateful dashboard session
//!
//! # Example
//!
//! ```rust,ignore
//! use gamedash::api::{serve, AppState};
//! use gamedash::config::ServerConfig;
//! use gamedash::reactive::Runtime;
//! use gamedash::recompute::YearBounds;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dataset = Arc::new(gamedash::dataset::load("data/games.csv".as_ref())?);
//!     let runtime = Arc::new(Runtime::new(dataset, YearBounds::default()));
//!
//!     serve(AppState::new(runtime, ServerConfig::default())).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/layout", get(routes::layout::get_layout))
        .route("/dependencies", get(routes::layout::get_dependencies))
        .route("/update", post(routes::update::update_outputs))
        .route("/dataset", get(routes::dataset::get_dataset));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::dashboard))
        .route("/ws", get(websocket_handler))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

/// Start the HTTP server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::dataset::DatasetLoader;
    use crate::reactive::Runtime;
    use crate::recompute::YearBounds;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    const GAMES: &str = "Name,Platform,Year_of_Release,Genre,Publisher,Critic_Score,User_Score,Rating
Quest,PS2,2001,RPG,Pub,80,7.5,E
Blast,Xbox,2005,Action,Pub,90,8.0,T
Oldie,PS1,1999,RPG,Pub,95,9.0,E
Pending,PS2,2003,RPG,Pub,70,tbd,E";

    fn create_test_app() -> Router {
        let dataset = DatasetLoader::new().load_str(GAMES).unwrap();
        let runtime = Arc::new(Runtime::new(Arc::new(dataset), YearBounds::Exclusive));
        build_router(AppState::new(runtime, ServerConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_update(app: Router, body: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/update")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn count_of(body: &Value) -> Option<u64> {
        body["outputs"]
            .as_array()?
            .iter()
            .find(|o| o["output"] == "selected_games")
            .and_then(|o| o["value"]["value"].as_u64())
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 2);
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let response = get(create_test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Game Industry History"));
        assert!(html.contains("initial-outputs"));
    }

    #[tokio::test]
    async fn test_layout() {
        let response = get(create_test_app(), "/api/v1/layout").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["type"], "page");
        assert_eq!(body["title"], "Game Industry History");
    }

    #[tokio::test]
    async fn test_dependencies() {
        let response = get(create_test_app(), "/api/v1/dependencies").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["bindings"].as_array().unwrap().len(), 3);
        assert_eq!(body["year_bounds"], "exclusive");

        let year = &body["controls"][0];
        assert_eq!(year["id"], "year_selector");
        assert_eq!(year["initial"], serde_json::json!([1999, 2005]));

        let genres = &body["controls"][1];
        assert_eq!(genres["options"], serde_json::json!(["RPG", "Action"]));
    }

    #[tokio::test]
    async fn test_dependencies_report_configured_bounds() {
        let dataset = DatasetLoader::new().load_str(GAMES).unwrap();
        let runtime = Arc::new(Runtime::new(Arc::new(dataset), YearBounds::Inclusive));
        let app = build_router(AppState::new(runtime, ServerConfig::default()));

        let body = json_body(get(app, "/api/v1/dependencies").await).await;
        assert_eq!(body["year_bounds"], "inclusive");
    }

    #[tokio::test]
    async fn test_dataset_summary() {
        let response = get(create_test_app(), "/api/v1/dataset").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["records"], 2);
        assert_eq!(body["stats"]["rows_read"], 4);
        assert_eq!(body["stats"]["dropped_unknown_score"], 1);
        assert_eq!(body["stats"]["dropped_before_min_year"], 1);
    }

    #[tokio::test]
    async fn test_update_full_state() {
        let response = post_update(
            create_test_app(),
            r#"{"inputs": {
                "year_selector": [2000, 2010],
                "genre_dropdown": ["RPG", "Action"],
                "rating_dropdown": ["E", "T"]
            }}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["outputs"].as_array().unwrap().len(), 3);
        assert_eq!(count_of(&body), Some(2));
    }

    #[tokio::test]
    async fn test_update_no_match() {
        let response = post_update(
            create_test_app(),
            r#"{"changed": "rating_dropdown", "inputs": {
                "year_selector": [2000, 2010],
                "rating_dropdown": ["M"]
            }}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(count_of(&body), Some(0));
        for output in body["outputs"].as_array().unwrap() {
            if output["value"]["kind"] == "figure" {
                assert!(output["value"]["value"]["data"]["values"]
                    .as_array()
                    .unwrap()
                    .is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_update_reversed_range() {
        let response = post_update(
            create_test_app(),
            r#"{"changed": "year_selector", "inputs": {"year_selector": [2010, 2000]}}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_CONTROL_VALUE");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_update_mismatched_kind() {
        let response = post_update(
            create_test_app(),
            r#"{"changed": "genre_dropdown", "inputs": {"genre_dropdown": [2000, 2010]}}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_invalid_json() {
        let response = post_update(create_test_app(), "not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get(create_test_app(), "/api/v1/metrics").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
