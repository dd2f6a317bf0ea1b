//! # Console Engine
//!
//! The action layer of the agency console. It validates operator input,
//! applies changes to the store, runs checkouts and produces the page
//! snapshots the front end renders.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Orchestration:** Wires the `store`, `query` and `checkout`
//!   crates together. It holds no business rules of its own beyond form
//!   validation; filtering and aggregation stay in `query`, and
//!   persistence rules stay in `store`.
//! - **Async, Single Writer:** The store sits behind a `tokio::sync::RwLock`.
//!   Actions await the simulated round trip before taking the write lock, so
//!   reads are never blocked by a pending submission.
//! - **Notify on Settle:** Every action, successful or not, broadcasts exactly
//!   one `Notification` to subscribers.
//!
//! ## Public API
//!
//! - `ConsoleEngine`: the action service and its read views.
//! - `forms`: the validated input forms for each action.
//! - `views`: owned page snapshots (`ClientView`, `Dashboard`, ...).
//! - `EngineError`: the specific error type for this crate.

pub mod console;
pub mod error;
pub mod forms;
pub mod views;

pub use console::{ActionOutcome, ConsoleEngine, PaymentReceipt};
pub use error::EngineError;
pub use forms::{AssignLeadForm, EditCallerForm, FieldError, NewCallerForm, NewClientForm, PaymentForm};
pub use views::{
    ActivityView, Alert, CallerRow, CallerView, ClientRow, ClientView, CompanyView, Dashboard,
    HealthRow, HealthView, IntegrationRow, IntegrationView, LeadRow, LeadView, PendingPayment,
};
