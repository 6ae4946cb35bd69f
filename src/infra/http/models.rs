use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/ascii`.
///
/// `text` counts only when it appears exactly once; a repeated `font` keeps
/// its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AsciiQuery {
    pub text: Option<String>,
    pub font: Option<String>,
}

impl AsciiQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut texts = Vec::new();
        let mut font = None;
        for (key, value) in pairs {
            match key.as_str() {
                "text" => texts.push(value),
                "font" if font.is_none() => font = Some(value),
                _ => {}
            }
        }
        let text = if texts.len() == 1 { texts.pop() } else { None };
        Self { text, font }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AsciiResponse {
    pub text: String,
    pub font: String,
    pub ascii: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FontsResponse {
    pub fonts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_font_keeps_the_first_value() {
        let query = AsciiQuery::from_pairs(pairs(&[("text", "Hi"), ("font", "a"), ("font", "b")]));
        assert_eq!(query.text.as_deref(), Some("Hi"));
        assert_eq!(query.font.as_deref(), Some("a"));
    }

    #[test]
    fn repeated_text_is_not_a_string() {
        let query = AsciiQuery::from_pairs(pairs(&[("text", "a"), ("text", "b")]));
        assert_eq!(query.text, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let query = AsciiQuery::from_pairs(pairs(&[("size", "9"), ("text", "")]));
        assert_eq!(query.text.as_deref(), Some(""));
        assert_eq!(query.font, None);
    }
}
