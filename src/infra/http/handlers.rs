use axum::Json;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use mime_guess::{Mime, mime};
use serde_json::{Map, Value};

use super::HttpState;
use super::error::{ApiError, TextSource};
use super::models::{AsciiQuery, AsciiResponse, FontsResponse, HealthResponse};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// `GET /api/ascii?text=...&font=...`
pub async fn render_query(
    State(state): State<HttpState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<AsciiResponse>, ApiError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            return Err(ApiError::missing_text(TextSource::Query).with_detail(rejection.body_text()));
        }
    };
    let query = AsciiQuery::from_pairs(pairs);
    let Some(text) = query.text else {
        return Err(ApiError::missing_text(TextSource::Query));
    };

    render(&state, TextSource::Query, text, query.font.as_deref()).await
}

/// `POST /api/ascii` with a JSON body `{text, font?}`.
///
/// A body sent without a JSON content type, or an empty JSON body, is
/// treated like an empty object. The top-level value must be an object or
/// an array.
pub async fn render_body(
    State(state): State<HttpState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AsciiResponse>, ApiError> {
    let body = match body {
        Ok(bytes) => parse_body(&headers, &bytes)?,
        Err(rejection) => return Err(bytes_rejection_to_api(rejection)),
    };

    let Some(text) = body.get("text").and_then(Value::as_str) else {
        return Err(ApiError::missing_text(TextSource::Body));
    };
    let font = body.get("font").and_then(Value::as_str);

    render(&state, TextSource::Body, text.to_string(), font).await
}

pub async fn method_not_allowed() -> Response {
    ApiError::method_not_allowed()
}

pub async fn list_fonts(
    State(state): State<HttpState>,
) -> Result<Json<FontsResponse>, ApiError> {
    match state.render.fonts().await {
        Ok(fonts) => Ok(Json(FontsResponse { fonts })),
        Err(err) => Err(ApiError::fonts(&err).with_source("infra::http::handlers::list_fonts")),
    }
}

pub async fn not_found() -> impl IntoResponse {
    ApiError::not_found("infra::http::handlers::not_found")
}

async fn render(
    state: &HttpState,
    source: TextSource,
    text: String,
    font: Option<&str>,
) -> Result<Json<AsciiResponse>, ApiError> {
    let request = state.render.request(text, font);
    match state.render.render(&request).await {
        Ok(ascii) => Ok(Json(AsciiResponse {
            text: request.text,
            font: request.font,
            ascii,
        })),
        Err(err) => Err(ApiError::from_render(source, &err)
            .with_source("infra::http::handlers::render")
            .with_detail(err.to_string())),
    }
}

fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Result<Value, ApiError> {
    if !has_json_content_type(headers) || bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|err| {
        ApiError::invalid_json(err.to_string()).with_source("infra::http::handlers::render_body")
    })?;
    if !(value.is_object() || value.is_array()) {
        return Err(
            ApiError::invalid_json("top-level JSON value must be an object or array")
                .with_source("infra::http::handlers::render_body"),
        );
    }
    Ok(value)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Mime>().ok())
    else {
        return false;
    };

    content_type.type_() == mime::APPLICATION
        && (content_type.subtype() == mime::JSON || content_type.suffix() == Some(mime::JSON))
}

fn bytes_rejection_to_api(rejection: BytesRejection) -> ApiError {
    let detail = rejection.body_text();
    let error = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(detail)
    } else {
        ApiError::invalid_json(detail)
    };
    error.with_source("infra::http::handlers::render_body")
}
