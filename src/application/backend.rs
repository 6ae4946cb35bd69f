//! Seam between the render pipeline and the glyph-rendering backend.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a glyph backend.
///
/// Only the message is carried across the seam; callers that need to tell
/// failures apart go through [`classify_failure`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Renders single lines of text as block-letter art.
#[async_trait]
pub trait GlyphBackend: Send + Sync {
    /// Render one line (no newlines) with the named font.
    async fn render_line(&self, line: &str, font: &str) -> Result<String, BackendError>;

    /// Names of every font this backend can render with.
    async fn fonts(&self) -> Result<Vec<String>, BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendFailure {
    /// The backend rejected the requested font.
    InvalidFont,
    /// Any other backend failure.
    Backend,
}

/// Translate a backend failure into the category surfaced to clients.
///
/// The backend exposes no structured error kinds, so a failure whose message
/// mentions "font" (case-insensitive) is treated as a rejected font name.
/// This depends on the backend's wording: swapping backends means revisiting
/// this function and nothing else.
pub fn classify_failure(error: &BackendError) -> BackendFailure {
    if error.message().to_lowercase().contains("font") {
        BackendFailure::InvalidFont
    } else {
        BackendFailure::Backend
    }
}
