//! # substations-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/api/substations` (`GET` lists a page,
//!   `POST` registers a substation)
//! - Serve the static browser client from a configured directory
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses with a
//!   `{ "message": … }` body on failure
//!
//! ## Dependency rule
//! Depends on `substations-app` (for port traits and services) and
//! `substations-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
