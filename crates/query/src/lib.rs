//! # Console Query Engine
//!
//! Filtering and aggregation over the console's entity collections. Every list
//! view (clients, companies, callers, leads, integrations, activity) is a query
//! from this crate applied to a snapshot of the store, followed by one of the
//! stat reductions for its summary cards.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It depends only on `core-types`
//!   and `events` and has no knowledge of where the records come from.
//! - **Stateless Calculation:** Queries and stats are recomputed from their
//!   inputs on every call. Filtering is stable (input order is preserved),
//!   filters combine with logical AND, and an empty result is a valid answer.
//!   Every stat over an empty collection is zero.
//!
//! ## Public API
//!
//! - `Filter`, `SearchTerm`: the building blocks every query is made of.
//! - `Query`: the trait all entity queries implement.
//! - `ClientQuery`, `CallerQuery`, `LeadQuery`, `IntegrationQuery`, `ActivityQuery`.
//! - `ClientStats`, `CompanyOverview`, `CallerStats`, `LeadStats`,
//!   `IntegrationStats`, `HealthSummary`, `ActivityStats`.
//! - `RenewalWindow`, `is_payment_pending`, `ClientFlags`: the billing and
//!   renewal predicates behind the dashboard's alert badges.

pub mod activity;
pub mod callers;
pub mod clients;
pub mod filter;
pub mod health;
pub mod integrations;
pub mod leads;
pub mod predicates;

pub use activity::{ActivityQuery, ActivityStats};
pub use callers::{CallerQuery, CallerStats, assignable_callers, is_below_target};
pub use clients::{ClientQuery, ClientStats, CompanyOverview, pending_payments};
pub use filter::{Filter, Query, SearchTerm};
pub use health::HealthSummary;
pub use integrations::{IntegrationQuery, IntegrationStats};
pub use leads::{LeadQuery, LeadStats};
pub use predicates::{
    ClientFlags, DEFAULT_RENEWAL_WINDOW_DAYS, RenewalWindow, days_until, is_payment_pending,
    is_renewal_soon,
};
