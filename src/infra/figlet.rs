//! FIGlet rendering backed by the `letrs` crate and its bundled fonts.

use std::time::Instant;

use async_trait::async_trait;
use letrs::font::{Font, FontFile};
use thiserror::Error;
use tokio::task::{self, JoinError};
use tracing::{debug, warn};

use crate::application::backend::{BackendError, GlyphBackend};

#[derive(Debug, Error)]
pub enum LetrsError {
    #[error("Font not found: {0}")]
    FontNotFound(String),
    #[error("renderer task failed: {0}")]
    Task(#[from] JoinError),
}

impl From<LetrsError> for BackendError {
    fn from(error: LetrsError) -> Self {
        BackendError::new(error.to_string())
    }
}

/// Glyph backend over the fonts bundled with `letrs`.
///
/// Font names are the bundled file stems, matched case-insensitively, and are
/// listed with the first letter upper-cased (`standard` is `Standard`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LetrsBackend;

impl LetrsBackend {
    pub fn new() -> Self {
        Self
    }

    /// Look up a bundled font by name.
    pub fn resolve(name: &str) -> Option<FontFile> {
        FontFile::ALL
            .into_iter()
            .find(|file| file.name().eq_ignore_ascii_case(name))
    }

    /// Display names of every bundled font, in catalog order.
    pub fn catalog() -> Vec<String> {
        FontFile::ALL
            .into_iter()
            .map(|file| display_name(file.name()))
            .collect()
    }

    /// Render a line on the current thread.
    pub fn render_blocking(line: &str, font: &str) -> Result<String, LetrsError> {
        let file = Self::resolve(font).ok_or_else(|| LetrsError::FontNotFound(font.to_string()))?;
        Ok(Font::built_in(file).render(line))
    }
}

#[async_trait]
impl GlyphBackend for LetrsBackend {
    async fn render_line(&self, line: &str, font: &str) -> Result<String, BackendError> {
        let Some(file) = Self::resolve(font) else {
            debug!(
                target = "infra::figlet",
                font = %font,
                "Requested font is not bundled"
            );
            return Err(LetrsError::FontNotFound(font.to_string()).into());
        };

        let started_at = Instant::now();
        let owned = line.to_string();
        // Font decoding and smushing are CPU-bound; keep them off the reactor.
        let art = task::spawn_blocking(move || Font::built_in(file).render(&owned))
            .await
            .map_err(|err| {
                warn!(
                    target = "infra::figlet",
                    font = %font,
                    error = %err,
                    "FIGlet render task failed"
                );
                LetrsError::from(err)
            })?;

        debug!(
            target = "infra::figlet",
            font = file.name(),
            chars = line.chars().count(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Rendered line"
        );
        Ok(art)
    }

    async fn fonts(&self) -> Result<Vec<String>, BackendError> {
        Ok(Self::catalog())
    }
}

fn display_name(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_capitalize_the_stem() {
        assert_eq!(display_name("standard"), "Standard");
        assert_eq!(display_name("5x7"), "5x7");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn resolve_ignores_case() {
        assert!(LetrsBackend::resolve("Standard").is_some());
        assert!(LetrsBackend::resolve("SLANT").is_some());
        assert!(LetrsBackend::resolve("big").is_some());
        assert!(LetrsBackend::resolve("Nope").is_none());
        assert!(LetrsBackend::resolve("").is_none());
    }

    #[test]
    fn catalog_lists_preferred_fonts() {
        let catalog = LetrsBackend::catalog();
        for name in ["Standard", "Slant", "Small", "Big"] {
            assert!(catalog.iter().any(|f| f == name), "{name} missing");
        }
    }

    #[test]
    fn unknown_font_message_mentions_font() {
        let err = LetrsBackend::render_blocking("Hi", "Nope").expect_err("unknown font");
        assert_eq!(err.to_string(), "Font not found: Nope");
    }

    #[tokio::test]
    async fn async_render_matches_blocking_render() {
        let backend = LetrsBackend::new();
        let art = backend
            .render_line("Hi", "standard")
            .await
            .expect("rendered");
        let expected = LetrsBackend::render_blocking("Hi", "Standard").expect("rendered");
        assert_eq!(art, expected);
        assert!(art.lines().count() > 1);
    }
}
