//! Formatters that ignore the class table.

use super::Formatter;
use crate::error::HighlightError;
use crate::token::Token;

/// Wraps every fragment in a span named after its token type, e.g.
/// `<span class="{Name.Other}">fmt</span>`. The text is not escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugFormatter;

impl Formatter for DebugFormatter {
    fn format(&self, token: &Token, text: &str) -> Result<String, HighlightError> {
        Ok(format!(r#"<span class="{}">{}</span>"#, token, text))
    }
}

/// Returns each fragment unchanged; highlighting with it reproduces the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, _token: &Token, text: &str) -> Result<String, HighlightError> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_uses_token_string() {
        let out = DebugFormatter.format(&Token::from_path("Name.Other"), "<fmt>").unwrap();
        assert_eq!(out, r#"<span class="{Name.Other}"><fmt></span>"#);
    }

    #[test]
    fn raw_is_identity() {
        let out = RawFormatter.format(&Token::from_path("Text"), " \n").unwrap();
        assert_eq!(out, " \n");
    }
}
