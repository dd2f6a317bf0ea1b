//! # Console Core Types
//!
//! The shared vocabulary of the agency console: the entities an agency tracks
//! for each managed CRM and the closed sets of values their fields take.
//!
//! This is a Layer 0 crate. It has no knowledge of storage, configuration or
//! presentation; every other crate in the workspace depends on it.

pub mod enums;
pub mod error;
pub mod ids;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{
    CallerStatus, ClientStatus, HealthLevel, IntegrationStatus, InvoiceStatus,
    LeadSource, LeadStatus, PaymentStatus, PlanType, Priority, ServiceType,
};
pub use error::CoreError;
pub use ids::{CallerId, ClientId, IntegrationId, LeadId};
pub use structs::{Caller, Client, ClientHealth, HealthMetric, Integration, Lead};
