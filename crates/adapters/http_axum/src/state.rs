//! Shared application state for axum handlers.

use std::sync::Arc;

use substations_app::ports::SubstationRepository;
use substations_app::services::substation_service::SubstationService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Registration and listing service.
    pub substation_service: Arc<SubstationService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            substation_service: Arc::clone(&self.substation_service),
        }
    }
}

impl<R> AppState<R>
where
    R: SubstationRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(substation_service: SubstationService<R>) -> Self {
        Self {
            substation_service: Arc::new(substation_service),
        }
    }
}
