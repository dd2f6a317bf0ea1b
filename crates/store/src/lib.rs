//! # Console Store
//!
//! The record store behind the console. It owns every client, caller, lead,
//! integration, health report and activity entry, and is the only place
//! those records are mutated.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Infrastructure:** Depends on `core-types` and `events` only.
//!   The rest of the application talks to it through the `CrmStore` trait, so
//!   a persistent backend can replace `InMemoryStore` without touching callers.
//! - **Consistent Counters:** Writes keep the denormalised counters
//!   (`Client::total_callers`, `Caller::leads_assigned`) in step with the
//!   relations they summarise.
//! - **Seeded, Not Persisted:** The store is filled from a JSON `SeedFeed`,
//!   either the one compiled into the binary or a file supplied at runtime.
//!
//! ## Public API
//!
//! - `CrmStore`: the read/write contract.
//! - `InMemoryStore`: the map-backed implementation.
//! - `SeedFeed`: the input feed and its record types.
//! - `CallerUpdate`: the editable fields of a caller.
//! - `StoreError`: the specific error type for this crate.

pub mod error;
pub mod repository;
pub mod seed;

pub use error::StoreError;
pub use repository::{CallerUpdate, CrmStore, InMemoryStore};
pub use seed::SeedFeed;
