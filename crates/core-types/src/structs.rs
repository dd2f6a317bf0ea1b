use crate::enums::{
    CallerStatus, ClientStatus, HealthLevel, IntegrationStatus, InvoiceStatus, LeadSource,
    LeadStatus, PaymentStatus, PlanType, Priority, ServiceType,
};
use crate::ids::{CallerId, ClientId, IntegrationId, LeadId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An agency customer whose CRM is managed through the console.
///
/// The dashboard uses "client" and "company" for the same record; list views
/// over clients and company overview cards both read from this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
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

    // Billing
    pub total_bill_amount: Decimal,
    pub amount_paid: Decimal,
    pub last_invoice_status: InvoiceStatus,
    pub last_payment_amount: Decimal,
    pub last_payment_date: Option<NaiveDate>,

    // Activity counters
    pub total_leads: u32,
    pub total_callers: u32,
    pub calls_today: u32,
    pub last_activity: DateTime<Utc>,
}

impl Client {
    /// Outstanding billed amount not yet paid, floored at zero.
    pub fn pending_amount(&self) -> Decimal {
        (self.total_bill_amount - self.amount_paid).max(Decimal::ZERO)
    }

    /// The name shown in tables and notifications.
    pub fn display_name(&self) -> &str {
        &self.client_name
    }
}

/// A staff member working leads for exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: CallerId,
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CallerStatus,
    pub leads_assigned: u32,
    pub calls_today: u32,
    pub daily_target: Option<u32>,
}

impl Caller {
    pub fn is_active(&self) -> bool {
        self.status == CallerStatus::Active
    }
}

/// A prospective customer record tracked through the lead pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub priority: Priority,
    pub assigned_caller: Option<CallerId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A lead intake channel configured for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: IntegrationId,
    pub client_id: ClientId,
    pub name: String,
    pub enabled: bool,
    pub status: IntegrationStatus,
    pub last_sync: Option<DateTime<Utc>>,
}

/// One monitored signal of a client CRM (lead flow, caller activity, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub label: String,
    pub level: HealthLevel,
    /// Score on a 0-100 scale.
    pub value: u8,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientHealth {
    pub client_id: ClientId,
    pub uptime_pct: Decimal,
    pub last_sync: DateTime<Utc>,
    pub metrics: Vec<HealthMetric>,
}

impl ClientHealth {
    /// The most severe level among the metrics; a client with no metrics is healthy.
    pub fn overall(&self) -> HealthLevel {
        self.metrics
            .iter()
            .map(|m| m.level)
            .max()
            .unwrap_or(HealthLevel::Healthy)
    }
}
