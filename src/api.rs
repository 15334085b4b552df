//! REST API Server for the financial query responder
//!
//! Exposes the responder via HTTP endpoints

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::responder::QueryResponder;

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatResponse {
    pub response: String,
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub responder: QueryResponder,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let store = state.responder.store();

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "data": {
            "available": store.is_available(),
            "records": store.len(),
            "source": store.source(),
        }
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    let request_id = uuid::Uuid::new_v4();
    info!(%request_id, chars = req.message.chars().count(), "Received chat message");

    let response = state.responder.respond(&req.message);
    debug!(%request_id, response_chars = response.chars().count(), "Responded");

    (StatusCode::OK, Json(ChatResponse { response }))
}

/// =============================
/// Router
/// =============================

pub fn create_router(responder: QueryResponder) -> Router {
    let state = ApiState { responder };

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    responder: QueryResponder,
    addr: SocketAddr,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(responder);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API Server listening on http://{}", addr);
    info!("Local: http://127.0.0.1:{}", addr.port());

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, Metric, Record};
    use crate::responder::{HELP_MESSAGE, UNAVAILABLE_MESSAGE};
    use crate::store::DataStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router_with(store: DataStore) -> Router {
        create_router(QueryResponder::new(Arc::new(store)))
    }

    fn sample_store() -> DataStore {
        DataStore::from_records(vec![
            Record::new(Company::Microsoft, Metric::TotalRevenue, "2024", 245122.0),
            Record::new(Company::Tesla, Metric::TotalRevenue, "2024", 97690.0),
        ])
    }

    async fn post_chat(router: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_chat_returns_response_field() {
        let (status, json) = post_chat(
            router_with(sample_store()),
            r#"{"message": "What is Microsoft's revenue?"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["response"],
            "Microsoft's total revenue in 2024 is $245,122 million."
        );
    }

    #[tokio::test]
    async fn test_chat_missing_message_gets_help() {
        let (status, json) = post_chat(router_with(sample_store()), "{}").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], HELP_MESSAGE);
    }

    #[tokio::test]
    async fn test_chat_unavailable_data() {
        let (status, json) = post_chat(
            router_with(DataStore::unavailable()),
            r#"{"message": "what is the revenue"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_chat_rejects_invalid_json() {
        let (status, _) = post_chat(router_with(sample_store()), "not json").await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_health_reports_store() {
        let response = router_with(sample_store())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["data"]["available"], true);
        assert_eq!(json["data"]["records"], 2);
        assert_eq!(json["data"]["source"]["records"], 2);
        assert!(json["data"]["source"]["path"].is_null());
        assert!(json["data"]["source"]["fingerprint"].is_null());
    }

    #[tokio::test]
    async fn test_health_reports_unavailable_store() {
        let response = router_with(DataStore::unavailable())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["data"]["available"], false);
        assert_eq!(json["data"]["records"], 0);
        assert!(json["data"]["source"].is_null());
    }
}
