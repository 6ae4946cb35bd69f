//! Multi-line render orchestration over a [`GlyphBackend`].

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use metrics::{counter, histogram};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    request::{DEFAULT_FONT, RenderRequest},
    text::{self, NormalizedLines, TextError},
};

use super::backend::{BackendError, BackendFailure, GlyphBackend, classify_failure};

/// Separator placed between consecutive rendered segments: one blank line.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct RenderPipelineConfig {
    pub default_font: String,
    /// Upper bound for a single backend call; `None` waits indefinitely.
    pub line_timeout: Option<Duration>,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            default_font: DEFAULT_FONT.to_string(),
            line_timeout: None,
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderPipelineConfig {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            default_font: settings.default_font.clone(),
            line_timeout: settings.line_timeout,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::Text(err) => err.code(),
            RenderError::Backend(err) => match classify_failure(err) {
                BackendFailure::InvalidFont => "invalid_font",
                BackendFailure::Backend => "figlet_error",
            },
        }
    }
}

/// Validates request text and renders it line by line.
pub struct RenderService {
    backend: Arc<dyn GlyphBackend>,
    config: RenderPipelineConfig,
}

impl RenderService {
    pub fn new(backend: Arc<dyn GlyphBackend>, config: RenderPipelineConfig) -> Self {
        Self { backend, config }
    }

    /// Build a request, applying the configured default font.
    pub fn request(&self, text: impl Into<String>, font: Option<&str>) -> RenderRequest {
        RenderRequest::new(text, font, &self.config.default_font)
    }

    /// Normalize and render a full request into one block.
    pub async fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        let started_at = Instant::now();
        let result = match text::normalize(&request.text) {
            Ok(lines) => self
                .render_lines(&lines, &request.font)
                .await
                .map_err(RenderError::from),
            Err(err) => Err(RenderError::from(err)),
        };
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        counter!("asciify_render_total").increment(1);
        histogram!("asciify_render_ms").record(elapsed_ms as f64);

        match &result {
            Ok(block) => debug!(
                target = "application::render",
                font = %request.font,
                elapsed_ms,
                output_bytes = block.len(),
                "Rendered text block"
            ),
            Err(err) => {
                let code = err.code();
                counter!("asciify_render_failed_total", "code" => code).increment(1);
                debug!(
                    target = "application::render",
                    font = %request.font,
                    elapsed_ms,
                    error_code = code,
                    error = %err,
                    "Render request rejected"
                );
            }
        }

        result
    }

    /// Render validated lines in order and join them with a blank line.
    ///
    /// Blank lines become empty segments without reaching the backend. The
    /// first backend failure aborts the whole block.
    pub async fn render_lines(
        &self,
        lines: &NormalizedLines,
        font: &str,
    ) -> Result<String, BackendError> {
        let mut segments = Vec::with_capacity(lines.len());
        for line in lines {
            if text::is_blank(line) {
                segments.push(String::new());
                continue;
            }
            let art = self.render_line(line, font).await?;
            segments.push(art.trim_end().to_string());
        }
        Ok(segments.join(SEGMENT_SEPARATOR))
    }

    pub async fn fonts(&self) -> Result<Vec<String>, BackendError> {
        self.backend.fonts().await
    }

    async fn render_line(&self, line: &str, font: &str) -> Result<String, BackendError> {
        let Some(limit) = self.config.line_timeout else {
            return self.backend.render_line(line, font).await;
        };

        match tokio::time::timeout(limit, self.backend.render_line(line, font)).await {
            Ok(result) => result,
            Err(_) => {
                let limit_ms = limit.as_millis() as u64;
                warn!(
                    target = "application::render",
                    font = %font,
                    limit_ms,
                    "Backend render exceeded the line timeout"
                );
                Err(BackendError::new(format!(
                    "rendering timed out after {limit_ms} ms"
                )))
            }
        }
    }
}
