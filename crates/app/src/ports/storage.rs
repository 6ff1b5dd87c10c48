//! Storage port: the registry store behind the substation service.

use std::future::Future;

use substations_domain::error::RegistryError;
use substations_domain::listing::SubstationFilter;
use substations_domain::substation::{NewSubstation, Substation};

/// Persistent collection of substations.
///
/// Implementations must:
/// - assign ids atomically, so concurrent inserts never share an id, and
///   strictly increasing, so newer records sort first;
/// - order [`page`](Self::page) results by id descending, which makes the
///   order total and repeated identical calls return identical slices when
///   nothing was written in between.
///
/// [`count`](Self::count) and [`page`](Self::page) are independent reads.
/// Callers combining them must tolerate a write landing in between.
pub trait SubstationRepository {
    /// Persist a validated record and return it with its assigned id.
    fn insert(
        &self,
        substation: NewSubstation,
    ) -> impl Future<Output = Result<Substation, RegistryError>> + Send;

    /// Number of records matching `filter`.
    fn count(
        &self,
        filter: &SubstationFilter,
    ) -> impl Future<Output = Result<u64, RegistryError>> + Send;

    /// Records matching `filter`, newest first, sliced to
    /// `[offset, offset + limit)`. An offset past the end yields an empty list.
    fn page(
        &self,
        filter: &SubstationFilter,
        limit: u32,
        offset: u64,
    ) -> impl Future<Output = Result<Vec<Substation>, RegistryError>> + Send;
}

impl<T: SubstationRepository + Send + Sync> SubstationRepository for std::sync::Arc<T> {
    fn insert(
        &self,
        substation: NewSubstation,
    ) -> impl Future<Output = Result<Substation, RegistryError>> + Send {
        (**self).insert(substation)
    }

    fn count(
        &self,
        filter: &SubstationFilter,
    ) -> impl Future<Output = Result<u64, RegistryError>> + Send {
        (**self).count(filter)
    }

    fn page(
        &self,
        filter: &SubstationFilter,
        limit: u32,
        offset: u64,
    ) -> impl Future<Output = Result<Vec<Substation>, RegistryError>> + Send {
        (**self).page(filter, limit, offset)
    }
}
