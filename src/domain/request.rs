/// Font used when a request does not name one.
pub const DEFAULT_FONT: &str = "Standard";

/// A single render request as received at the boundary.
///
/// `font` is never empty: an absent or empty font name is replaced by the
/// caller-supplied default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub text: String,
    pub font: String,
}

impl RenderRequest {
    pub fn new(text: impl Into<String>, font: Option<&str>, default_font: &str) -> Self {
        let font = font
            .filter(|name| !name.is_empty())
            .unwrap_or(default_font)
            .to_string();
        Self {
            text: text.into(),
            font,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_font_falls_back_to_default() {
        let request = RenderRequest::new("Hi", None, DEFAULT_FONT);
        assert_eq!(request.font, "Standard");
    }

    #[test]
    fn empty_font_falls_back_to_default() {
        let request = RenderRequest::new("Hi", Some(""), "Slant");
        assert_eq!(request.font, "Slant");
    }

    #[test]
    fn named_font_is_passed_through_untouched() {
        let request = RenderRequest::new("Hi", Some("  big "), DEFAULT_FONT);
        assert_eq!(request.font, "  big ");
        assert_eq!(request.text, "Hi");
    }
}
