use crate::error::StoreError;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{
    CallerStatus, ClientStatus, HealthMetric, IntegrationStatus, InvoiceStatus, LeadSource,
    LeadStatus, PaymentStatus, PlanType, Priority, ServiceType,
};
use events::ActivityKind;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// The feed shipped with the binary.
const BUILTIN_SEED: &str = include_str!("../data/seed.json");

/// The static input feed the store is populated from.
///
/// Records refer to each other by short seed keys (e.g. `"techstart"`); the
/// store swaps those for generated identifiers on load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedFeed {
    pub clients: Vec<SeedClient>,
    pub callers: Vec<SeedCaller>,
    pub leads: Vec<SeedLead>,
    pub integrations: Vec<SeedIntegration>,
    pub health: Vec<SeedHealth>,
    pub activity: Vec<SeedActivity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedClient {
    pub key: String,
    pub client_name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub status: ClientStatus,
    pub service_type: ServiceType,
    pub plan_type: PlanType,
    pub priority: Priority,
    pub payment_status: PaymentStatus,
    pub renewal_date: NaiveDate,
    pub total_bill_amount: Decimal,
    pub amount_paid: Decimal,
    pub last_invoice_status: InvoiceStatus,
    #[serde(default)]
    pub last_payment_amount: Decimal,
    #[serde(default)]
    pub last_payment_date: Option<NaiveDate>,
    pub total_leads: u32,
    #[serde(default)]
    pub calls_today: u32,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCaller {
    pub key: String,
    pub client: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CallerStatus,
    pub leads_assigned: u32,
    pub calls_today: u32,
    #[serde(default)]
    pub daily_target: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedLead {
    pub client: String,
    #[serde(default)]
    pub caller: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: LeadSource,
    pub status: LeadStatus,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

fn default_priority() -> Priority {
    Priority::Medium
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedIntegration {
    pub client: String,
    pub name: String,
    pub enabled: bool,
    pub status: IntegrationStatus,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedHealth {
    pub client: String,
    pub uptime_pct: Decimal,
    pub last_sync: DateTime<Utc>,
    pub metrics: Vec<HealthMetric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedActivity {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub action: String,
    pub actor: String,
    /// `None` for system-wide entries.
    #[serde(default)]
    pub client: Option<String>,
    pub details: String,
}

impl SeedFeed {
    /// The demo feed compiled into the binary.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_json(BUILTIN_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::SeedIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
