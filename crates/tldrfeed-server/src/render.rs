//! JSON responses honoring the `indent_json` setting

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

pub fn json<T: Serialize>(
    state: &AppState,
    status: StatusCode,
    value: &T,
) -> Result<Response, ApiError> {
    let body = if state.indent_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
