//! Token type → CSS class mapping.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Default mapping, keyed by canonical token key.
const DEFAULT_CLASSES: &[(&str, &str)] = &[
    ("Comment", "c"),
    ("Comment.Preproc", "cp"),
    ("Comment.Single", "cs"),
    ("Keyword", "k"),
    ("Keyword.Constant", "kc"),
    ("Keyword.Type", "kt"),
    ("Literal", "l"),
    ("Literal.Number", "ln"),
    ("Literal.Number.Integer", "lni"),
    ("Literal.String", "ls"),
    ("Literal.String.Double", "lsd"),
    ("Literal.String.Single", "lss"),
    ("Name", "n"),
    ("Name.Class", "nc"),
    ("Name.Entity", "ne"),
    ("Name.Function", "nf"),
    ("Name.Other", "no"),
    ("Name.Namespace", "nn"),
    ("Name.Variable", "nv"),
    ("Operator", "o"),
    ("Punctuation", "p"),
    ("Text", "t"),
    ("Text.Whitespace", "tw"),
];

static DEFAULT: LazyLock<ClassMap> = LazyLock::new(|| DEFAULT_CLASSES.iter().copied().collect());

/// Maps canonical token keys (`Name`, `Name.Other`, ...) to short class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    classes: FxHashMap<String, String>,
}

impl ClassMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table, shared and never mutated.
    #[must_use]
    pub fn default_classes() -> &'static ClassMap {
        &DEFAULT
    }

    pub fn insert(&mut self, key: impl Into<String>, class: impl Into<String>) -> Option<String> {
        self.classes.insert(key.into(), class.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.classes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ClassMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ClassMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
