//! # substations-domain
//!
//! Pure domain model for the substation registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, dates
//! - Define **Substations** and the validator that admits new ones
//! - Define the **type catalog** (the closed set of category labels)
//! - Compute **derived figures** (estimated load, repair status) on egress
//! - Build **listing plans** (search, type filter, page window) for stores
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod catalog;
pub mod derivation;
pub mod listing;
pub mod substation;
