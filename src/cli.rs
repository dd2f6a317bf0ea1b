use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use core_types::{
    CallerStatus, ClientStatus, IntegrationStatus, LeadSource, LeadStatus, PaymentStatus, PlanType,
    Priority, ServiceType,
};
use events::ActivityKind;
use query::Filter;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Operations console for an agency running CRM instances for its clients.
///
/// Every invocation starts from the seed feed; changes made by one command
/// are not visible to the next.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON seed feed to load instead of the configured or built-in one.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// The date renewal windows are measured from (YYYY-MM-DD). Defaults to today in UTC.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Overview cards, upcoming renewals, alerts and recent activity.
    Dashboard(DashboardArgs),
    /// List clients with the client manager's filters.
    Clients(ClientsArgs),
    /// Company billing overview and pending payments.
    Companies(CompaniesArgs),
    /// List callers.
    Callers(CallersArgs),
    /// List leads.
    Leads(LeadsArgs),
    /// Onboard a new client.
    AddClient(AddClientArgs),
    /// Add a caller to a client's team.
    AddCaller(AddCallerArgs),
    /// Change a caller's details or status.
    EditCaller(EditCallerArgs),
    /// Remove a caller. Their open leads go back to the queue.
    DeleteCaller(DeleteCallerArgs),
    /// Assign one or more leads to a caller.
    AssignLead(AssignLeadArgs),
    /// Move a lead to another pipeline stage.
    LeadStatus(LeadStatusArgs),
    /// Collect a payment from a client through the checkout.
    Pay(PayArgs),
    /// List integrations.
    Integrations(IntegrationsArgs),
    /// Enable or disable one of a client's integrations.
    ToggleIntegration(ToggleIntegrationArgs),
    /// Per-client health reports.
    Health,
    /// The activity log, newest first.
    Activity(ActivityArgs),
}

#[derive(Args)]
pub struct DashboardArgs {
    /// Print the overview cards as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

/// Parses a renewal month selector: `all` or a calendar month 1-12.
fn parse_month(s: &str) -> Result<Filter<u32>, String> {
    match s.parse::<Filter<u32>>() {
        Ok(Filter::Only(month)) if !(1..=12).contains(&month) => {
            Err(format!("month must be between 1 and 12, got {month}"))
        }
        Ok(filter) => Ok(filter),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Args)]
pub struct ClientsArgs {
    /// Matches client or business name, case-insensitively.
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub status: Filter<ClientStatus>,
    #[arg(long, default_value = "all")]
    pub payment: Filter<PaymentStatus>,
    #[arg(long, default_value = "all")]
    pub service: Filter<ServiceType>,
    #[arg(long, default_value = "all")]
    pub plan: Filter<PlanType>,
    #[arg(long, default_value = "all")]
    pub priority: Filter<Priority>,
    /// Month of the renewal date, 1-12.
    #[arg(long, default_value = "all", value_parser = parse_month)]
    pub renewal_month: Filter<u32>,
}

#[derive(Args)]
pub struct CompaniesArgs {
    /// Matches client or business name, case-insensitively.
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub status: Filter<ClientStatus>,
}

#[derive(Args)]
pub struct CallersArgs {
    /// Client name or identifier.
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub status: Filter<CallerStatus>,
}

#[derive(Args)]
pub struct LeadsArgs {
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub status: Filter<LeadStatus>,
    #[arg(long, default_value = "all")]
    pub source: Filter<LeadSource>,
    /// Only leads assigned to this caller.
    #[arg(long)]
    pub caller: Option<String>,
}

#[derive(Args)]
pub struct AddClientArgs {
    #[arg(long)]
    pub client_name: String,
    #[arg(long)]
    pub business_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "new-lead")]
    pub status: ClientStatus,
    #[arg(long, default_value = "website")]
    pub service: ServiceType,
    #[arg(long, default_value = "basic")]
    pub plan: PlanType,
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
    #[arg(long, default_value = "pending")]
    pub payment: PaymentStatus,
    /// YYYY-MM-DD.
    #[arg(long)]
    pub renewal_date: Option<NaiveDate>,
    /// Total bill in major currency units.
    #[arg(long, default_value = "0")]
    pub bill: Decimal,
}

#[derive(Args)]
pub struct AddCallerArgs {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "active")]
    pub status: CallerStatus,
    #[arg(long)]
    pub daily_target: Option<String>,
}

#[derive(Args)]
pub struct EditCallerArgs {
    /// Caller name, email or identifier.
    #[arg(long)]
    pub caller: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<CallerStatus>,
    /// An empty value clears the target.
    #[arg(long)]
    pub daily_target: Option<String>,
}

#[derive(Args)]
pub struct DeleteCallerArgs {
    #[arg(long)]
    pub caller: String,
}

#[derive(Args)]
pub struct AssignLeadArgs {
    /// Lead name, email or identifier. Repeat to assign several leads at once.
    #[arg(long = "lead", required = true)]
    pub leads: Vec<String>,
    #[arg(long)]
    pub caller: String,
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct LeadStatusArgs {
    #[arg(long)]
    pub lead: String,
    #[arg(long)]
    pub status: LeadStatus,
}

#[derive(Args)]
pub struct PayArgs {
    #[arg(long)]
    pub client: String,
    /// Amount in major currency units, e.g. 12500.50.
    #[arg(long)]
    pub amount: Decimal,
    /// Print the checkout options instead of opening the checkout.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct IntegrationsArgs {
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long, default_value = "all")]
    pub status: Filter<IntegrationStatus>,
    /// `true`, `false` or `all`.
    #[arg(long, default_value = "all")]
    pub enabled: Filter<bool>,
}

#[derive(Args)]
pub struct ToggleIntegrationArgs {
    #[arg(long)]
    pub client: String,
    /// Integration name, e.g. "Meta Ads".
    #[arg(long)]
    pub name: String,
}

#[derive(Args)]
pub struct ActivityArgs {
    #[arg(long, default_value = "all")]
    pub kind: Filter<ActivityKind>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long, default_value = "")]
    pub search: String,
    /// Show at most this many entries.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print entries as JSON lines.
    #[arg(long)]
    pub json: bool,
}
