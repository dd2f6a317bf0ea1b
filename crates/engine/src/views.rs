//! Owned snapshots of the console's pages, computed by the query engine over
//! the store while the read lock is held.

use chrono::NaiveDate;
use core_types::{Caller, Client, ClientHealth, HealthLevel, Integration, Lead};
use events::{ActivityEntry, ActivityKind};
use query::{
    ActivityStats, CallerStats, ClientFlags, ClientStats, CompanyOverview, HealthSummary,
    IntegrationStats, LeadStats,
};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct ClientRow {
    pub client: Client,
    pub flags: ClientFlags,
    pub days_to_renewal: i64,
}

#[derive(Debug, Clone)]
pub struct ClientView {
    pub today: NaiveDate,
    pub rows: Vec<ClientRow>,
    pub stats: ClientStats,
}

#[derive(Debug, Clone)]
pub struct PendingPayment {
    pub client: Client,
    pub pending_amount: Decimal,
}

/// The company overview page: billing totals, the filtered company list and
/// who among them still owes money.
#[derive(Debug, Clone)]
pub struct CompanyView {
    pub overview: CompanyOverview,
    pub companies: Vec<Client>,
    pub pending: Vec<PendingPayment>,
}

#[derive(Debug, Clone)]
pub struct CallerRow {
    pub caller: Caller,
    pub client_name: String,
    pub below_target: bool,
}

#[derive(Debug, Clone)]
pub struct CallerView {
    pub rows: Vec<CallerRow>,
    pub stats: CallerStats,
}

#[derive(Debug, Clone)]
pub struct LeadRow {
    pub lead: Lead,
    pub client_name: String,
    pub caller_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LeadView {
    pub rows: Vec<LeadRow>,
    pub stats: LeadStats,
}

#[derive(Debug, Clone)]
pub struct IntegrationRow {
    pub integration: Integration,
    pub client_name: String,
}

#[derive(Debug, Clone)]
pub struct IntegrationView {
    pub rows: Vec<IntegrationRow>,
    pub stats: IntegrationStats,
}

#[derive(Debug, Clone)]
pub struct HealthRow {
    pub report: ClientHealth,
    pub client_name: String,
    pub overall: HealthLevel,
}

#[derive(Debug, Clone)]
pub struct HealthView {
    pub rows: Vec<HealthRow>,
    pub summary: HealthSummary,
}

#[derive(Debug, Clone)]
pub struct ActivityView {
    pub entries: Vec<ActivityEntry>,
    pub stats: ActivityStats,
}

/// An operational alert raised on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: ActivityKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub overview: CompanyOverview,
    pub clients: ClientStats,
    pub callers: CallerStats,
    pub leads: LeadStats,
    pub integrations: IntegrationStats,
    pub health: HealthSummary,
    /// Clients renewing within the configured window, soonest first.
    pub renewals: Vec<ClientRow>,
    pub alerts: Vec<Alert>,
    pub recent_activity: Vec<ActivityEntry>,
}
