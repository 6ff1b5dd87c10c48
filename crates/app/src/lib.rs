//! # substations-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SubstationRepository`: insert, count, and page through substations
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SubstationService`: register a substation, list a filtered page
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `substations-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
