//! Handlers for the chat operations.
//!
//! Everything under `/chats` arrives at [`dispatch`], which resolves the
//! path and forwards to the matching operation on the `ChatOperations`
//! capability held in [`HttpState`].

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

use chatstore_core::chat::operations::ChatOperations;
use chatstore_types::chat::{CreateChatRequest, CreateMessageRequest};
use chatstore_types::error::ChatError;

use crate::http::body::{parse_limit, read_json};
use crate::http::dispatch::{resolve, Dispatch};
use crate::http::error::AppError;

/// State shared by the HTTP handlers.
pub struct HttpState<O> {
    pub ops: Arc<O>,
    pub max_body_bytes: usize,
}

// Manual impl: cloning only bumps the Arc, `O` itself need not be Clone.
impl<O> Clone for HttpState<O> {
    fn clone(&self) -> Self {
        Self {
            ops: Arc::clone(&self.ops),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Fallback handler: route the request and run the selected operation.
pub async fn dispatch<O: ChatOperations>(
    State(state): State<HttpState<O>>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();

    match resolve(&parts.method, parts.uri.path()) {
        Dispatch::CreateChat => create_chat(&state, body).await.into_response(),
        Dispatch::GetChat(id) => get_chat(&state, id, &parts.uri).await.into_response(),
        Dispatch::DeleteChat(id) => delete_chat(&state, id).await.into_response(),
        Dispatch::CreateMessage(id) => create_message(&state, id, body).await.into_response(),
        Dispatch::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED.into_response(),
        Dispatch::NotFound => AppError::Chat(ChatError::NotFound).into_response(),
    }
}

/// POST /chats
async fn create_chat<O: ChatOperations>(
    state: &HttpState<O>,
    body: Body,
) -> Result<impl IntoResponse, AppError> {
    let req: CreateChatRequest = read_json(body, state.max_body_bytes).await?;
    let chat = state.ops.create_chat(&req.title).await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

/// POST /chats/{id}/messages
async fn create_message<O: ChatOperations>(
    state: &HttpState<O>,
    chat_id: i64,
    body: Body,
) -> Result<impl IntoResponse, AppError> {
    let req: CreateMessageRequest = read_json(body, state.max_body_bytes).await?;
    let message = state.ops.create_message(chat_id, &req.text).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /chats/{id}?limit=N
async fn get_chat<O: ChatOperations>(
    state: &HttpState<O>,
    chat_id: i64,
    uri: &Uri,
) -> Result<impl IntoResponse, AppError> {
    let limit = parse_limit(uri)?;
    let view = state.ops.get_chat_with_messages(chat_id, limit).await?;
    Ok(Json(view))
}

/// DELETE /chats/{id}
async fn delete_chat<O: ChatOperations>(
    state: &HttpState<O>,
    chat_id: i64,
) -> Result<StatusCode, AppError> {
    state.ops.delete_chat(chat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
