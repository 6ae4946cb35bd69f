//! Normalization of raw request text into renderable lines.
//!
//! Clients may send newlines as real control characters, as CRLF/CR pairs, or
//! as the literal two-character sequence `\n` when the text travels through a
//! plain string field. All of them are folded into a single newline before the
//! structural limits are enforced.

use std::slice;

use thiserror::Error;

/// Maximum number of lines accepted in a single request.
pub const MAX_LINES: usize = 10;
/// Maximum line length, counted in UTF-16 code units after right-trimming.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count twice.
pub const MAX_LINE_CHARS: usize = 80;

/// Structural violations detected while normalizing request text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("O texto deve ter no máximo {max} linhas.")]
    TooManyLines { max: usize },
    #[error("Cada linha deve ter no máximo {max} caracteres.")]
    LineTooLong { max: usize },
    #[error("Texto vazio.")]
    EmptyText,
}

impl TextError {
    /// Stable machine-readable identifier of the violation.
    pub fn code(&self) -> &'static str {
        match self {
            TextError::TooManyLines { .. } => "too_many_lines",
            TextError::LineTooLong { .. } => "line_too_long",
            TextError::EmptyText => "empty_text",
        }
    }
}

/// Ordered, right-trimmed lines that satisfy every structural limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLines(Vec<String>);

impl NormalizedLines {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a NormalizedLines {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether a line carries no visible content.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Fold newline variants, split into lines and enforce the structural limits.
///
/// Checks run in a fixed order: line count first (on the untrimmed split),
/// then per-line length after right-trimming, then overall emptiness.
pub fn normalize(raw: &str) -> Result<NormalizedLines, TextError> {
    let text = raw
        .replace("\\n", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() > MAX_LINES {
        return Err(TextError::TooManyLines { max: MAX_LINES });
    }

    let trimmed: Vec<String> = lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect();

    if trimmed
        .iter()
        .any(|line| line.encode_utf16().count() > MAX_LINE_CHARS)
    {
        return Err(TextError::LineTooLong {
            max: MAX_LINE_CHARS,
        });
    }

    if trimmed.iter().all(|line| is_blank(line)) {
        return Err(TextError::EmptyText);
    }

    Ok(NormalizedLines(trimmed))
}
