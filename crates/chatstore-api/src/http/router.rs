//! Axum router configuration with middleware.
//!
//! `/health` is a regular route; every other path falls through to the chat
//! dispatcher. Middleware (outermost first): CORS, request tracing, panic
//! recovery.

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{Level, Span};
use uuid::Uuid;

use chatstore_core::chat::operations::ChatOperations;

use crate::http::error::{error_response, INTERNAL_ERROR_MESSAGE};
use crate::http::handlers::{self, HttpState};

/// Build the complete router around a set of chat operations.
pub fn build_router<O: ChatOperations>(ops: Arc<O>, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/health", get(health_check))
        .fallback(handlers::dispatch::<O>)
        .with_state(HttpState {
            ops,
            max_body_bytes,
        })
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace)
        .layer(cors)
}

/// One span per request, tagged with a fresh time-ordered id.
fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %Uuid::now_v7(),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::http::Method;
    use chatstore_types::chat::{Chat, ChatWithMessages, Message};
    use chatstore_types::error::ChatError;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    /// Records calls and answers from a fixed script.
    #[derive(Default)]
    struct MockOperations {
        calls: Mutex<Vec<String>>,
        fail_store: bool,
        panic_on_create: bool,
    }

    impl MockOperations {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn chat(id: i64, title: &str) -> Chat {
            Chat {
                id,
                title: title.to_string(),
                created_at: Utc::now(),
            }
        }
    }

    impl ChatOperations for MockOperations {
        async fn create_chat(&self, title: &str) -> Result<Chat, ChatError> {
            if self.panic_on_create {
                panic!("boom");
            }
            self.record(format!("create_chat:{title}"));
            if self.fail_store {
                return Err(ChatError::Store("database is locked".into()));
            }
            let title = title.trim();
            if title.is_empty() {
                return Err(ChatError::Validation("title length must be 1..200".into()));
            }
            Ok(Self::chat(1, title))
        }

        async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, ChatError> {
            self.record(format!("create_message:{chat_id}:{text}"));
            if chat_id != 1 {
                return Err(ChatError::NotFound);
            }
            Ok(Message {
                id: 10,
                chat_id,
                text: text.trim().to_string(),
                created_at: Utc::now(),
            })
        }

        async fn get_chat_with_messages(
            &self,
            chat_id: i64,
            limit: i64,
        ) -> Result<ChatWithMessages, ChatError> {
            self.record(format!("get:{chat_id}:{limit}"));
            if chat_id != 1 {
                return Err(ChatError::NotFound);
            }
            Ok(ChatWithMessages {
                chat: Self::chat(1, "t"),
                messages: Vec::new(),
            })
        }

        async fn delete_chat(&self, chat_id: i64) -> Result<(), ChatError> {
            self.record(format!("delete:{chat_id}"));
            if chat_id != 1 {
                return Err(ChatError::NotFound);
            }
            Ok(())
        }
    }

    async fn send(
        ops: Arc<MockOperations>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Vec<u8>) {
        let app = build_router(ops, 1024);
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Arc::default(), Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_chat_returns_201() {
        let ops = Arc::new(MockOperations::default());
        let (status, body) =
            send(ops.clone(), Method::POST, "/chats/", r#"{"title":"  hi  "}"#).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json(&body)["title"], "hi");
        assert_eq!(ops.calls(), ["create_chat:  hi  "]);
    }

    #[tokio::test]
    async fn test_missing_title_is_validation_error() {
        let (status, body) = send(Arc::default(), Method::POST, "/chats", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json(&body)["error"],
            "validation error: title length must be 1..200"
        );
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_invalid_json() {
        let oversized = format!(r#"{{"title":"{}"}}"#, "x".repeat(2048));
        for body in ["", "not json", r#"{"title":"a","owner":"b"}"#, oversized.as_str()] {
            let ops = Arc::new(MockOperations::default());
            let (status, resp) = send(ops.clone(), Method::POST, "/chats", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json(&resp)["error"], "invalid json");
            assert!(ops.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_create_message_routes_chat_id() {
        let ops = Arc::new(MockOperations::default());
        let (status, body) = send(
            ops.clone(),
            Method::POST,
            "/chats/1/messages",
            r#"{"text":"hello"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json(&body)["chat_id"], 1);

        let (status, body) = send(
            ops.clone(),
            Method::POST,
            "/chats/999999/messages/",
            r#"{"text":"hello"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"], "not found");
    }

    #[tokio::test]
    async fn test_get_chat_passes_limit() {
        let ops = Arc::new(MockOperations::default());
        let (status, body) = send(ops.clone(), Method::GET, "/chats/1?limit=5", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json(&body)["messages"].as_array().unwrap().is_empty());

        send(ops.clone(), Method::GET, "/chats/1", "").await;
        assert_eq!(ops.calls(), ["get:1:5", "get:1:0"]);
    }

    #[tokio::test]
    async fn test_invalid_limit_is_rejected_before_service() {
        let ops = Arc::new(MockOperations::default());
        let (status, body) = send(ops.clone(), Method::GET, "/chats/1?limit=abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "invalid limit");
        assert!(ops.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_chat_returns_204_without_body() {
        let (status, body) = send(Arc::default(), Method::DELETE, "/chats/1", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(Arc::default(), Method::DELETE, "/chats/2", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_paths_are_not_found() {
        for path in [
            "/chats/abc",
            "/chats/0",
            "/chats/-1",
            "/chats/1/other",
            "/chats/1/messages/x",
            "/chats/",
            "/chats7",
            "/chats5/messages",
            "/elsewhere",
        ] {
            let ops = Arc::new(MockOperations::default());
            let (status, body) = send(ops.clone(), Method::GET, path, "").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
            assert_eq!(json(&body)["error"], "not found");
            assert!(ops.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_post_without_segment_boundary_is_not_found() {
        let ops = Arc::new(MockOperations::default());
        let (status, _) = send(ops.clone(), Method::POST, "/chats5/messages", r#"{"text":"hi"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(ops.calls().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_with_empty_body() {
        let (status, body) = send(Arc::default(), Method::PUT, "/chats/1", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body.is_empty());

        let (status, body) = send(Arc::default(), Method::GET, "/chats/1/messages", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_store_error_is_opaque_500() {
        let ops = Arc::new(MockOperations {
            fail_store: true,
            ..Default::default()
        });
        let (status, body) = send(ops, Method::POST, "/chats", r#"{"title":"x"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, br#"{"error":"internal error"}"#);
    }

    #[tokio::test]
    async fn test_panic_is_recovered_as_500() {
        let ops = Arc::new(MockOperations {
            panic_on_create: true,
            ..Default::default()
        });
        let (status, body) = send(ops, Method::POST, "/chats", r#"{"title":"x"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"], "internal error");
    }
}
