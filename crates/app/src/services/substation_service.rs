//! Substation service: registering substations and listing them page by page.

use substations_domain::derivation::SubstationReport;
use substations_domain::error::RegistryError;
use substations_domain::listing::{ListingPlan, ListingPolicy, Page, PageRequest};
use substations_domain::substation::SubstationDraft;
use substations_domain::time::today;

use crate::ports::SubstationRepository;

/// Application service for the substation registry.
///
/// Holds no mutable state: every call receives its full input and the store
/// owns all persistent state, so one instance can serve concurrent requests.
pub struct SubstationService<R> {
    repo: R,
    policy: ListingPolicy,
}

impl<R: SubstationRepository> SubstationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R, policy: ListingPolicy) -> Self {
        Self { repo, policy }
    }

    /// Validate a draft, persist it, and return it with derived figures.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] with the first failing rule, or
    /// [`RegistryError::Storage`] if the insert fails.
    pub async fn create_substation(
        &self,
        draft: SubstationDraft,
    ) -> Result<SubstationReport, RegistryError> {
        let substation = draft.validate(self.policy.types())?;
        let created = self.repo.insert(substation).await?;
        tracing::info!(id = %created.id, kind = %created.kind, "substation registered");
        Ok(SubstationReport::new(created, today()))
    }

    /// Return one page of substations matching the request, newest first.
    ///
    /// `total` and `items` come from two separate store reads. A concurrent
    /// insert between them can make `total`/`total_pages` disagree with the
    /// returned items by that insert; the next call observes a consistent
    /// state again.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] for an unknown type filter, or
    /// [`RegistryError::Storage`] if either read fails.
    pub async fn list_substations(
        &self,
        request: &PageRequest,
    ) -> Result<Page<SubstationReport>, RegistryError> {
        let plan = ListingPlan::build(request, &self.policy)?;
        let total = self.repo.count(&plan.filter).await?;
        let rows = self
            .repo
            .page(&plan.filter, plan.limit, plan.offset)
            .await?;
        tracing::debug!(page = plan.page, total, returned = rows.len(), "listed substations");

        let today = today();
        let items = rows
            .into_iter()
            .map(|row| SubstationReport::new(row, today))
            .collect();
        Ok(Page::new(items, total, self.policy.page_size()))
    }
}
