//! Listing plans: turning a raw search/filter/page request into a bounded,
//! store-agnostic query.
//!
//! The plan carries a [`SubstationFilter`] (the filter descriptor) and a
//! `limit`/`offset` window. Stores apply the filter, order by id descending
//! and slice the window; they never see the raw request.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::catalog::{ALL_TYPES, SubstationType, TypeCatalog};
use crate::error::ValidationError;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Listing knobs injected by the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPolicy {
    page_size: NonZeroU32,
    types: TypeCatalog,
}

impl ListingPolicy {
    #[must_use]
    pub fn new(page_size: NonZeroU32, types: TypeCatalog) -> Self {
        Self { page_size, types }
    }

    #[must_use]
    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    #[must_use]
    pub fn types(&self) -> &TypeCatalog {
        &self.types
    }
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, TypeCatalog::default())
    }
}

/// A listing request exactly as the client sent it.
///
/// Immutable and passed by value on every call; the engine keeps no
/// "current page" or "current filter" between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub page: Option<String>,
}

impl PageRequest {
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }
}

/// Lower-case form used for case-insensitive address matching.
///
/// Stores that precompute a folded address column must use this exact
/// function so both sides of the comparison agree.
#[must_use]
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// A literal, case-folded substring to look for in addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` when the trimmed input is empty.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| Self(fold(raw)))
    }

    /// The folded term. Contains user text verbatim: escape before embedding
    /// in any pattern language.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn matches(&self, address: &str) -> bool {
        fold(address).contains(&self.0)
    }
}

/// Filter descriptor handed to the store. Present constraints are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstationFilter {
    pub search: Option<SearchTerm>,
    pub kind: Option<SubstationType>,
}

impl SubstationFilter {
    /// Evaluate the filter against a record's address and type.
    #[must_use]
    pub fn matches(&self, address: &str, kind: &SubstationType) -> bool {
        self.search.as_ref().is_none_or(|term| term.matches(address))
            && self.kind.as_ref().is_none_or(|wanted| wanted == kind)
    }
}

/// A validated, bounded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPlan {
    pub filter: SubstationFilter,
    /// 1-based page number after normalization.
    pub page: u64,
    pub limit: u32,
    pub offset: u64,
}

impl ListingPlan {
    /// Normalize and validate a raw request.
    ///
    /// A missing, non-numeric or non-positive page becomes page 1; fractional
    /// pages are truncated. Empty search means no search constraint; empty
    /// or `all` type means no type constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTypeFilter`] when the type filter is
    /// not `all` and not in the policy's catalog.
    pub fn build(request: &PageRequest, policy: &ListingPolicy) -> Result<Self, ValidationError> {
        let search = request.search.as_deref().and_then(SearchTerm::parse);

        let kind = match request.kind.as_deref().map(str::trim) {
            None | Some("" | ALL_TYPES) => None,
            Some(label) => Some(
                policy
                    .types()
                    .resolve(label)
                    .ok_or(ValidationError::InvalidTypeFilter)?,
            ),
        };

        let page = effective_page(request.page.as_deref());
        let limit = policy.page_size().get();
        let offset = (page - 1).saturating_mul(u64::from(limit));

        Ok(Self {
            filter: SubstationFilter { search, kind },
            page,
            limit,
            offset,
        })
    }
}

fn effective_page(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return 1;
    };
    if let Ok(page) = raw.parse::<i64>() {
        return u64::try_from(page).unwrap_or(0).max(1);
    }
    match raw.parse::<f64>() {
        Ok(page) if page.is_finite() => saturating_page(page),
        _ => 1,
    }
}

// Float-to-int casts saturate; anything below 1 clamps to page 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturating_page(page: f64) -> u64 {
    (page.trunc() as u64).max(1)
}

/// Number of pages needed for `total` rows. Never zero.
#[must_use]
pub fn total_pages(total: u64, page_size: NonZeroU32) -> u64 {
    if total == 0 {
        1
    } else {
        total.div_ceil(u64::from(page_size.get()))
    }
}

/// One page of results plus the totals needed to paginate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page_size: NonZeroU32) -> Self {
        Self {
            total,
            total_pages: total_pages(total, page_size),
            items,
        }
    }
}
