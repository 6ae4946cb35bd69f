use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::backend::{BackendError, BackendFailure, classify_failure};
use crate::application::error::ErrorReport;
use crate::application::render::RenderError;
use crate::domain::text::TextError;

pub mod codes {
    pub const INVALID_TEXT: &str = "invalid_text";
    pub const TOO_MANY_LINES: &str = "too_many_lines";
    pub const LINE_TOO_LONG: &str = "line_too_long";
    pub const INVALID_FONT: &str = "invalid_font";
    pub const FIGLET: &str = "figlet_error";
    pub const FONTS: &str = "fonts_error";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
    pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL: &str = "internal_error";
}

/// Where a request carried its text; decides the wording of missing-text errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Query,
    Body,
}

impl TextSource {
    pub fn missing_text_message(self) -> &'static str {
        match self {
            TextSource::Query => "Query param \"text\" é obrigatório.",
            TextSource::Body => "Body field \"text\" é obrigatório.",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: Option<String>,
    source: &'static str,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
            source: "infra::http",
            detail: None,
        }
    }

    /// Record where the error was raised for the response log.
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = source;
        self
    }

    /// Server-side diagnostic, logged but never sent to the client.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn missing_text(source: TextSource) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_TEXT,
            Some(source.missing_text_message().to_string()),
        )
    }

    pub fn invalid_json(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::INVALID_JSON, None).with_detail(detail)
    }

    pub fn payload_too_large(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, codes::PAYLOAD_TOO_LARGE, None)
            .with_detail(detail)
    }

    pub fn not_found(source: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, None).with_source(source)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL, None).with_detail(detail)
    }

    pub fn fonts(error: &BackendError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::FONTS,
            Some(error.message().to_string()),
        )
    }

    /// Map a pipeline failure to its response.
    ///
    /// Blank text reuses the missing-text wording of the request's source.
    pub fn from_render(source: TextSource, error: &RenderError) -> Self {
        match error {
            RenderError::Text(TextError::TooManyLines { .. }) => Self::new(
                StatusCode::BAD_REQUEST,
                codes::TOO_MANY_LINES,
                Some(error.to_string()),
            ),
            RenderError::Text(TextError::LineTooLong { .. }) => Self::new(
                StatusCode::BAD_REQUEST,
                codes::LINE_TOO_LONG,
                Some(error.to_string()),
            ),
            RenderError::Text(TextError::EmptyText) => {
                Self::missing_text(source).with_detail(error.to_string())
            }
            RenderError::Backend(err) => match classify_failure(err) {
                BackendFailure::InvalidFont => Self::new(
                    StatusCode::BAD_REQUEST,
                    codes::INVALID_FONT,
                    Some(err.message().to_string()),
                ),
                BackendFailure::Backend => Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    codes::FIGLET,
                    Some(err.message().to_string()),
                ),
            },
        }
    }

    /// 405 for `/api/ascii`, advertising the supported methods.
    pub fn method_not_allowed() -> Response {
        let mut response = Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            codes::METHOD_NOT_ALLOWED,
            None,
        )
        .into_response();
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self
            .detail
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| self.code.to_string());
        let body = ApiErrorBody {
            error: self.code,
            message: self.message,
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(self.source, self.status, format!("{}: {detail}", self.code))
            .attach(&mut response);
        response
    }
}
