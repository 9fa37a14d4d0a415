//! Turn decoded tokens into output text.
//!
//! A [`Formatter`] maps one `(token, text)` pair to a string. The HTML
//! formatter looks token types up in a [`ClassMap`]; the debug and raw
//! formatters ignore it. Adding an output format means adding one more
//! `Formatter` impl.

mod classes;
mod html;
mod plain;

pub use classes::ClassMap;
pub use html::HtmlFormatter;
pub use plain::{DebugFormatter, RawFormatter};

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::HighlightError;
use crate::token::Token;

/// Formats a single decoded token. Implementations are pure: the same input
/// always gives the same output.
pub trait Formatter {
    fn format(&self, token: &Token, text: &str) -> Result<String, HighlightError>;
}

impl<F: Formatter + ?Sized> Formatter for &F {
    fn format(&self, token: &Token, text: &str) -> Result<String, HighlightError> {
        (**self).format(token, text)
    }
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&self, token: &Token, text: &str) -> Result<String, HighlightError> {
        (**self).format(token, text)
    }
}

impl<F: Formatter + ?Sized> Formatter for Arc<F> {
    fn format(&self, token: &Token, text: &str) -> Result<String, HighlightError> {
        (**self).format(token, text)
    }
}

/// Output format selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Html,
    Debug,
    Raw,
}

impl FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(FormatKind::Html),
            "debug" => Ok(FormatKind::Debug),
            "raw" => Ok(FormatKind::Raw),
            other => Err(format!("unknown format: {} (expected html, debug or raw)", other)),
        }
    }
}

/// Escape the five HTML-sensitive characters. Quotes use numeric entities.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_all_five() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&#34;x&#34;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn escape_borrows_clean_text() {
        assert!(matches!(escape_html("官話 plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn format_kind_parses() {
        assert_eq!("debug".parse::<FormatKind>(), Ok(FormatKind::Debug));
        assert!("xml".parse::<FormatKind>().is_err());
    }

    #[test]
    fn shared_formatter_through_arc() {
        let shared: Arc<dyn Formatter + Send + Sync> = Arc::new(HtmlFormatter::new());
        let token = Token::from_path("Punctuation");
        assert_eq!(shared.format(&token, ";").unwrap(), r#"<span class="p">;</span>"#);
    }
}
