use super::classes::ClassMap;
use super::{Formatter, escape_html};
use crate::error::HighlightError;
use crate::token::Token;

/// Wraps classified fragments in `<span class="...">`.
///
/// Classes are collected from the least to the most specific key that has a
/// mapping, so `Literal.String.Double` renders as `class="l ls lsd"`.
/// Fragments with no class at all are emitted as given.
#[derive(Debug, Clone)]
pub struct HtmlFormatter {
    classes: ClassMap,
    prefix: String,
    strict: bool,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlFormatter {
    /// Formatter over the default class table, no prefix, permissive.
    #[must_use]
    pub fn new() -> Self {
        HtmlFormatter {
            classes: ClassMap::default_classes().clone(),
            prefix: String::new(),
            strict: false,
        }
    }

    #[must_use]
    pub fn with_classes(mut self, classes: ClassMap) -> Self {
        self.classes = classes;
        self
    }

    /// Prefix prepended to the class attribute, e.g. `hl-`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Fail on token types the class table does not cover.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn class_list(&self, token: &Token) -> Result<String, HighlightError> {
        let mut list = String::new();
        for key in token.lookup_keys() {
            match self.classes.get(&key) {
                Some(class) => {
                    if !list.is_empty() {
                        list.push(' ');
                    }
                    list.push_str(class);
                }
                None if self.strict => return Err(HighlightError::UnknownTokenType { key }),
                None => {}
            }
        }
        Ok(list)
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, token: &Token, text: &str) -> Result<String, HighlightError> {
        let list = self.class_list(token)?;
        if list.is_empty() {
            return Ok(text.to_string());
        }
        Ok(format!(
            r#"<span class="{}{}">{}</span>"#,
            self.prefix,
            list,
            escape_html(text)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(f: &HtmlFormatter, path: &str, text: &str) -> Result<String, HighlightError> {
        f.format(&Token::from_path(path), text)
    }

    #[test]
    fn classes_accumulate_by_specificity() {
        let f = HtmlFormatter::new();
        assert_eq!(
            fmt(&f, "Literal.String.Double", "\"hi\"").unwrap(),
            r#"<span class="l ls lsd">&#34;hi&#34;</span>"#
        );
        assert_eq!(fmt(&f, "Name.Other", "fmt").unwrap(), r#"<span class="n no">fmt</span>"#);
    }

    #[test]
    fn partial_match_has_no_duplicates() {
        let f = HtmlFormatter::new();
        assert_eq!(fmt(&f, "Name.Builtin", "len").unwrap(), r#"<span class="n">len</span>"#);
        let only_sub = HtmlFormatter::new().with_classes([("Name.Builtin", "nb")].into_iter().collect());
        assert_eq!(fmt(&only_sub, "Name.Builtin", "len").unwrap(), r#"<span class="nb">len</span>"#);
    }

    #[test]
    fn unmatched_fragment_passes_through() {
        let f = HtmlFormatter::new().with_classes(ClassMap::new());
        assert_eq!(fmt(&f, "Punctuation", "<&>").unwrap(), "<&>");
    }

    #[test]
    fn prefix_applies_once() {
        let f = HtmlFormatter::new().with_prefix("hl-");
        assert_eq!(
            fmt(&f, "Keyword.Type", "int").unwrap(),
            r#"<span class="hl-k kt">int</span>"#
        );
    }

    #[test]
    fn strict_rejects_unmapped_key() {
        let f = HtmlFormatter::new().strict(true);
        match fmt(&f, "Name.Builtin", "len") {
            Err(HighlightError::UnknownTokenType { key }) => assert_eq!(key, "Name.Builtin"),
            other => panic!("expected unknown token type, got {:?}", other),
        }
        match fmt(&f, "Generic", "x") {
            Err(HighlightError::UnknownTokenType { key }) => assert_eq!(key, "Generic"),
            other => panic!("expected unknown token type, got {:?}", other),
        }
    }

    #[test]
    fn strict_ignores_absent_levels() {
        let f = HtmlFormatter::new().strict(true);
        assert_eq!(fmt(&f, "Text", "\n").unwrap(), "<span class=\"t\">\n</span>");
        assert_eq!(fmt(&f, "Keyword", "new").unwrap(), r#"<span class="k">new</span>"#);
        assert_eq!(fmt(&f, "Text.Whitespace", " ").unwrap(), r#"<span class="t tw"> </span>"#);
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let f = HtmlFormatter::new();
        assert_eq!(
            fmt(&f, "Comment.Single", "// 官話 <b>").unwrap(),
            r#"<span class="c cs">// 官話 &lt;b&gt;</span>"#
        );
    }

    #[test]
    fn formatting_is_repeatable() {
        let f = HtmlFormatter::new().with_prefix("x");
        let token = Token::from_path("Literal.String.Single");
        assert_eq!(f.format(&token, "'a'").unwrap(), f.format(&token, "'a'").unwrap());
    }
}
