use std::fmt;

/// Hierarchical token classification: `Type`, optional `Subtype`, optional
/// `Detail`. An absent level is the empty string, and a finer level is only
/// ever set when the coarser one is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: String,
    pub subtype: String,
    pub detail: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: &str, subtype: &str, detail: &str) -> Self {
        let mut levels = [kind, subtype, detail].into_iter();
        Self::from_levels(&mut levels)
    }

    /// Build from a dotted path with the protocol prefix already removed,
    /// e.g. `Literal.String.Double`. Segments past the third are ignored,
    /// as is everything after an empty segment.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::from_levels(&mut path.split('.'))
    }

    fn from_levels<'a>(levels: &mut dyn Iterator<Item = &'a str>) -> Self {
        let mut next = || levels.next().filter(|s| !s.is_empty()).map(str::to_string);
        let kind = next().unwrap_or_default();
        let subtype = if kind.is_empty() { String::new() } else { next().unwrap_or_default() };
        let detail = if subtype.is_empty() { String::new() } else { next().unwrap_or_default() };
        Token { kind, subtype, detail }
    }

    /// Canonical key: present levels joined with `.`.
    #[must_use]
    pub fn key(&self) -> String {
        let mut key = self.kind.clone();
        for level in [&self.subtype, &self.detail] {
            if level.is_empty() {
                break;
            }
            key.push('.');
            key.push_str(level);
        }
        key
    }

    /// Increasingly specific keys, one per present level.
    #[must_use]
    pub fn lookup_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(3);
        let mut key = self.kind.clone();
        keys.push(key.clone());
        for level in [&self.subtype, &self.detail] {
            if level.is_empty() {
                break;
            }
            key.push('.');
            key.push_str(level);
            keys.push(key.clone());
        }
        keys
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.key())
    }
}
