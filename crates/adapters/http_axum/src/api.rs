//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod substations;

use axum::Router;
use axum::routing::get;

use substations_app::ports::SubstationRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: SubstationRepository + Send + Sync + 'static,
{
    Router::new().route(
        "/substations",
        get(substations::list::<R>).post(substations::create::<R>),
    )
}
