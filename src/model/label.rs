use std::fmt;

use serde::Serialize;

/// A population or superpopulation code after dictionary lookup.
///
/// Variant order is the sort order: every resolved description sorts before
/// every unresolved code, so gaps collect at the end of the hierarchy instead
/// of hiding between real groups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Label {
    Resolved { description: String },
    Missing { code: String },
}

impl Label {
    pub fn resolved(description: impl Into<String>) -> Self {
        Label::Resolved {
            description: description.into(),
        }
    }

    pub fn missing(code: impl Into<String>) -> Self {
        Label::Missing { code: code.into() }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Label::Missing { .. })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Resolved { description } => f.write_str(description),
            Label::Missing { code } => write!(f, "<missing: {code}>"),
        }
    }
}

/// (superpopulation, population); field order is the hierarchy sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub superpopulation: Label,
    pub population: Label,
}

impl GroupKey {
    pub fn new(superpopulation: Label, population: Label) -> Self {
        Self {
            superpopulation,
            population,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.superpopulation, self.population)
    }
}
