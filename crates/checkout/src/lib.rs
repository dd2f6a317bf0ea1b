//! # Console Checkout
//!
//! Builds payment requests for client invoices and hands them to a payment
//! gateway.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Infrastructure:** Depends on `core-types` and `configuration`.
//!   It never touches the store; recording a successful payment is the
//!   engine's job.
//! - **Swappable Gateway:** The engine talks to the `PaymentGateway` trait.
//!   `SimulatedGateway` stands in for the hosted checkout.
//!
//! ## Public API
//!
//! - `CheckoutRequest`: the options for one checkout, amounts in minor units.
//! - `PaymentGateway`, `PaymentOutcome`: the gateway contract.
//! - `SimulatedGateway`: a delay-then-resolve gateway.
//! - `CheckoutError`: the specific error type for this crate.

use async_trait::async_trait;

pub mod error;
pub mod request;
pub mod simulated;

pub use configuration::SimulatedBehaviour;
pub use error::CheckoutError;
pub use request::{CheckoutRequest, MINOR_UNITS_PER_MAJOR, Prefill, to_minor_units};
pub use simulated::SimulatedGateway;

/// How a checkout ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded { payment_id: String },
    /// The customer closed the checkout without paying.
    Dismissed,
}

/// The interface to a hosted payment checkout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Runs one checkout to completion.
    async fn collect(&self, request: &CheckoutRequest) -> Result<PaymentOutcome, CheckoutError>;
}
