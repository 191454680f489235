//! Request body and query decoding.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::Query;
use axum::http::Uri;
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

const INVALID_JSON: &str = "invalid json";
const INVALID_LIMIT: &str = "invalid limit";

/// Read at most `limit` bytes and decode them as a single JSON value.
///
/// Oversized, empty, and malformed bodies, as well as unknown fields, are all
/// reported as `invalid json`.
pub async fn read_json<T: DeserializeOwned>(body: Body, limit: usize) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to read request body");
        AppError::BadRequest(INVALID_JSON)
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::BadRequest(INVALID_JSON)
    })
}

/// Parse the optional `limit` query parameter. Absent or empty means 0,
/// which the service turns into its default.
pub fn parse_limit(uri: &Uri) -> Result<i64, AppError> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map_err(|_| AppError::BadRequest(INVALID_LIMIT))?;

    match params.get("limit").map(String::as_str) {
        None | Some("") => Ok(0),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(INVALID_LIMIT)),
    }
}
