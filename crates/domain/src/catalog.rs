//! Substation categories: the closed set of type labels a registry accepts.

use std::fmt;

use serde::Serialize;

use crate::error::CatalogError;

/// Labels accepted when no other catalog is configured.
pub const DEFAULT_TYPE_LABELS: [&str; 3] = ["Embedded", "Freestanding", "Pole-mounted"];

/// Sentinel filter value meaning "any type".
pub const ALL_TYPES: &str = "all";

/// A substation category label.
///
/// Values are only minted by [`TypeCatalog::resolve`] or when reading rows
/// back from storage, so a label seen by the rest of the engine has already
/// passed catalog validation once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubstationType(String);

impl SubstationType {
    /// Rehydrate a label that was validated before it was persisted.
    #[must_use]
    pub fn from_stored(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubstationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of allowed type labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCatalog {
    labels: Vec<String>,
}

impl TypeCatalog {
    /// Build a catalog from configured labels.
    ///
    /// Labels are trimmed; matching against the catalog is exact
    /// (case-sensitive) after trimming the candidate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the list is empty, contains a blank
    /// label, contains duplicates or uses the reserved `all` filter value.
    pub fn new<I, S>(labels: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(CatalogError::BlankLabel);
            }
            if label == ALL_TYPES {
                return Err(CatalogError::ReservedLabel(label.to_owned()));
            }
            if out.iter().any(|known| known == label) {
                return Err(CatalogError::DuplicateLabel(label.to_owned()));
            }
            out.push(label.to_owned());
        }
        if out.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { labels: out })
    }

    /// Look up a submitted label, trimming it first.
    #[must_use]
    pub fn resolve(&self, candidate: &str) -> Option<SubstationType> {
        let candidate = candidate.trim();
        self.labels
            .iter()
            .find(|label| label.as_str() == candidate)
            .map(|label| SubstationType(label.clone()))
    }

    /// Iterate over the configured labels in configuration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self {
            labels: DEFAULT_TYPE_LABELS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}
