use std::fmt;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Opaque documentation target. Only the document-vs-anchor boundary is
/// interpreted, so the original string round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub document: String,
    pub anchor: Option<String>,
}

impl Locator {
    /// Split on the first '#'. Everything after it (including further '#'
    /// characters) is the anchor.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('#') {
            Some((doc, anchor)) => Locator {
                document: doc.to_string(),
                anchor: Some(anchor.to_string()),
            },
            None => Locator {
                document: raw.to_string(),
                anchor: None,
            },
        }
    }

    /// A locator with no dereferenceable document is structurally invalid.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(a) => write!(f, "{}#{}", self.document, a),
            None => write!(f, "{}", self.document),
        }
    }
}

/// One located mention of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub label: String,
    pub locator: Locator,
    pub scope: Option<String>,
}

/// A documented symbol: case-sensitive key plus its references in
/// declaration/overload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub references: Vec<Reference>,
}

/// Flat wire record as it appears in the dataset, before grouping by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub label: String,
    pub locator: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Entry carries no references at all.
    NoReferences,
    /// Reference at the given position has an empty document part.
    EmptyLocator { reference: usize },
}

/// Load-time rejection of a structurally invalid entry. The only failure the
/// index itself can produce; lookups are total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntryError {
    pub entry: usize,
    pub key: String,
    pub kind: MalformedKind,
}

impl fmt::Display for MalformedEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MalformedKind::NoReferences => write!(
                f,
                "malformed entry {} ('{}'): no references",
                self.entry, self.key
            ),
            MalformedKind::EmptyLocator { reference } => write!(
                f,
                "malformed entry {} ('{}'): reference {} has an empty locator",
                self.entry, self.key, reference
            ),
        }
    }
}

impl std::error::Error for MalformedEntryError {}

/// Derive the owning scope from a display label. Fully qualified labels like
/// "AstroLib::Orbit::setOrbit()" drop the trailing `::key` segment; generators
/// also emit the owner alone as the label (key "setDay", label
/// "AstroLib::JulianDate"), in which case the whole label is the scope. A label
/// that is just the key itself has no scope.
pub fn owning_scope(label: &str, key: &str) -> Option<String> {
    let unqualified = match label.find('(') {
        Some(idx) => &label[..idx],
        None => label,
    };
    if let Some(prefix) = unqualified.strip_suffix(key) {
        if let Some(scope) = prefix.strip_suffix("::") {
            return Some(scope.to_string()).filter(|s| !s.is_empty());
        }
        if prefix.is_empty() {
            return None;
        }
    }
    Some(unqualified.to_string()).filter(|s| !s.is_empty())
}
