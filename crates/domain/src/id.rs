//! Typed identifier for stored substations.

use std::fmt;

use serde::Serialize;

/// Unique identifier of a [`Substation`](crate::substation::Substation).
///
/// Assigned by the store on insert and strictly increasing, so ordering by id
/// is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SubstationId(i64);

impl SubstationId {
    /// Wrap a store-assigned value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the inner value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubstationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
