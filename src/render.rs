//! Table rendering for the console's views.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use configuration::Agency;
use core_types::{CallerStatus, HealthLevel, IntegrationStatus, PaymentStatus};
use engine::{
    ActivityView, CallerView, ClientView, CompanyView, Dashboard, HealthView, IntegrationView,
    LeadView,
};
use events::{ActivityEntry, ActivityKind, Notification};
use rust_decimal::Decimal;

fn table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(amount: Decimal) -> String {
    format!("₹{}", amount.round_dp(2))
}

fn kind_cell(kind: ActivityKind) -> Cell {
    let color = match kind {
        ActivityKind::Info => Color::Blue,
        ActivityKind::Success => Color::Green,
        ActivityKind::Warning => Color::Yellow,
        ActivityKind::Error => Color::Red,
    };
    Cell::new(kind).fg(color)
}

fn level_cell(level: HealthLevel) -> Cell {
    let color = match level {
        HealthLevel::Healthy => Color::Green,
        HealthLevel::Warning => Color::Yellow,
        HealthLevel::Critical => Color::Red,
    };
    Cell::new(level.label()).fg(color)
}

fn payment_cell(status: PaymentStatus) -> Cell {
    let color = match status {
        PaymentStatus::Paid => Color::Green,
        PaymentStatus::Partial => Color::Yellow,
        PaymentStatus::Pending => Color::Red,
    };
    Cell::new(status.label()).fg(color)
}

/// A two-column table of stat cards.
fn cards(rows: Vec<(&str, String)>) -> Table {
    let mut table = table(["Metric", "Value"]);
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    table
}

pub fn notification(notification: &Notification) {
    let marker = if notification.is_failure() { "✗" } else { "✓" };
    println!("{marker} {}: {}", notification.title, notification.description);
}

pub fn dashboard(view: &Dashboard, agency: &Agency) {
    println!("{} · {}", agency.name, view.today);

    println!(
        "{}",
        cards(vec![
            ("Total companies", view.overview.total_companies.to_string()),
            ("Active companies", view.overview.active_companies.to_string()),
            ("Payment pending", view.overview.payment_pending.to_string()),
            ("Outstanding", money(view.overview.total_outstanding)),
            ("Total leads", view.clients.total_leads.to_string()),
            ("Active callers", format!("{}/{}", view.callers.active, view.callers.total)),
            ("Calls today", view.callers.calls_today.to_string()),
            (
                "Integrations in error",
                format!("{}/{}", view.integrations.errored, view.integrations.total),
            ),
            (
                "Health",
                format!(
                    "{} healthy, {} warning, {} critical",
                    view.health.healthy, view.health.warning, view.health.critical
                ),
            ),
        ])
    );

    if !view.renewals.is_empty() {
        let mut renewals = table(["Company", "Renewal", "In", "Pending"]);
        for row in &view.renewals {
            renewals.add_row(vec![
                Cell::new(&row.client.business_name),
                Cell::new(row.client.renewal_date),
                Cell::new(format!("{} days", row.days_to_renewal)),
                Cell::new(money(row.client.pending_amount())),
            ]);
        }
        println!("Upcoming renewals\n{renewals}");
    }

    if !view.alerts.is_empty() {
        let mut alerts = table(["Level", "Alert"]);
        for alert in &view.alerts {
            alerts.add_row(vec![kind_cell(alert.kind), Cell::new(&alert.message)]);
        }
        println!("Alerts\n{alerts}");
    }

    if !view.recent_activity.is_empty() {
        println!("Recent activity\n{}", activity_table(&view.recent_activity));
    }
}

pub fn clients(view: &ClientView) {
    let mut table = table([
        "ID", "Client", "Business", "Status", "Service", "Plan", "Priority", "Payment", "Renewal",
        "Pending", "Leads", "Callers", "Flags",
    ]);
    for row in &view.rows {
        let client = &row.client;
        let flags = row.flags.labels().join(", ");
        table.add_row(vec![
            Cell::new(client.id.short()),
            Cell::new(&client.client_name),
            Cell::new(&client.business_name),
            Cell::new(client.status.label()),
            Cell::new(client.service_type.label()),
            Cell::new(client.plan_type.label()),
            Cell::new(client.priority.label()),
            payment_cell(client.payment_status),
            Cell::new(client.renewal_date),
            Cell::new(money(client.pending_amount())),
            Cell::new(client.total_leads),
            Cell::new(client.total_callers),
            Cell::new(flags).fg(Color::Yellow),
        ]);
    }
    println!("{table}");

    let stats = &view.stats;
    println!(
        "{}",
        cards(vec![
            ("Clients", stats.total.to_string()),
            ("Live", stats.live.to_string()),
            ("Payment pending", stats.payment_pending.to_string()),
            ("Renewing soon", stats.renewal_soon.to_string()),
            ("Leads", stats.total_leads.to_string()),
            ("Callers", stats.total_callers.to_string()),
            ("Calls today", stats.calls_today.to_string()),
        ])
    );
}

pub fn companies(view: &CompanyView) {
    let overview = &view.overview;
    println!(
        "{}",
        cards(vec![
            ("Total companies", overview.total_companies.to_string()),
            ("Active companies", overview.active_companies.to_string()),
            ("Payment pending", overview.payment_pending.to_string()),
            ("Billed", money(overview.total_billed)),
            ("Collected", money(overview.total_collected)),
            ("Outstanding", money(overview.total_outstanding)),
        ])
    );

    let mut list = table(["Company", "Client", "Status", "Callers", "Leads", "Calls today"]);
    for client in &view.companies {
        list.add_row(vec![
            Cell::new(&client.business_name),
            Cell::new(&client.client_name),
            Cell::new(client.status.label()),
            Cell::new(client.total_callers),
            Cell::new(client.total_leads),
            Cell::new(client.calls_today),
        ]);
    }
    println!("Companies\n{list}");

    let mut table = table(["Company", "Billed", "Paid", "Pending", "Invoice", "Last payment"]);
    for row in &view.pending {
        let client = &row.client;
        let last_payment = match client.last_payment_date {
            Some(date) => format!("{} on {}", money(client.last_payment_amount), date),
            None => "never".to_string(),
        };
        table.add_row(vec![
            Cell::new(&client.business_name),
            Cell::new(money(client.total_bill_amount)),
            Cell::new(money(client.amount_paid)),
            Cell::new(money(row.pending_amount)).fg(Color::Red),
            Cell::new(client.last_invoice_status.label()),
            Cell::new(last_payment),
        ]);
    }
    println!("Pending payments\n{table}");
}

pub fn callers(view: &CallerView) {
    let mut table = table([
        "ID", "Name", "Email", "Phone", "Client", "Status", "Leads", "Calls today", "Target",
    ]);
    for row in &view.rows {
        let caller = &row.caller;
        let status = match caller.status {
            CallerStatus::Active => Cell::new(caller.status.label()).fg(Color::Green),
            CallerStatus::Disabled => Cell::new(caller.status.label()).fg(Color::DarkGrey),
        };
        let calls = Cell::new(caller.calls_today);
        let calls = if row.below_target { calls.fg(Color::Yellow) } else { calls };
        table.add_row(vec![
            Cell::new(caller.id.short()),
            Cell::new(&caller.name),
            Cell::new(&caller.email),
            Cell::new(&caller.phone),
            Cell::new(&row.client_name),
            status,
            Cell::new(caller.leads_assigned),
            calls,
            Cell::new(caller.daily_target.map_or("-".to_string(), |t| t.to_string())),
        ]);
    }
    println!("{table}");
    println!(
        "{} callers, {} active, {} leads assigned, {} calls today, {} below target",
        view.stats.total,
        view.stats.active,
        view.stats.leads_assigned,
        view.stats.calls_today,
        view.stats.below_target
    );
}

pub fn leads(view: &LeadView) {
    let mut table = table([
        "ID", "Name", "Email", "Phone", "Client", "Source", "Status", "Priority", "Caller", "Created",
    ]);
    for row in &view.rows {
        let lead = &row.lead;
        table.add_row(vec![
            Cell::new(lead.id.short()),
            Cell::new(&lead.name),
            Cell::new(&lead.email),
            Cell::new(&lead.phone),
            Cell::new(&row.client_name),
            Cell::new(lead.source.label()),
            Cell::new(lead.status.label()),
            Cell::new(lead.priority.label()),
            Cell::new(row.caller_name.as_deref().unwrap_or("unassigned")),
            Cell::new(lead.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");

    let summary: Vec<String> = view
        .stats
        .by_status
        .iter()
        .map(|(status, count)| format!("{count} {}", status.label().to_lowercase()))
        .collect();
    println!("{} leads: {}", view.stats.total, summary.join(", "));
}

pub fn integrations(view: &IntegrationView) {
    let mut table = table(["ID", "Client", "Integration", "Enabled", "Status", "Last sync"]);
    for row in &view.rows {
        let integration = &row.integration;
        let status = match integration.status {
            IntegrationStatus::Connected => Color::Green,
            IntegrationStatus::Disconnected => Color::DarkGrey,
            IntegrationStatus::Error => Color::Red,
        };
        table.add_row(vec![
            Cell::new(integration.id.short()),
            Cell::new(&row.client_name),
            Cell::new(&integration.name),
            Cell::new(if integration.enabled { "yes" } else { "no" }),
            Cell::new(integration.status.label()).fg(status),
            Cell::new(
                integration
                    .last_sync
                    .map_or("never".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
            ),
        ]);
    }
    println!("{table}");
    println!(
        "{} integrations, {} enabled, {} connected, {} in error",
        view.stats.total, view.stats.enabled, view.stats.connected, view.stats.errored
    );
}

pub fn health(view: &HealthView) {
    let mut table = table(["Client", "Overall", "Uptime", "Last sync", "Metrics"]);
    for row in &view.rows {
        let metrics: Vec<String> = row
            .report
            .metrics
            .iter()
            .map(|m| format!("{} {}% ({})", m.label, m.value, m.level))
            .collect();
        table.add_row(vec![
            Cell::new(&row.client_name),
            level_cell(row.overall),
            Cell::new(format!("{}%", row.report.uptime_pct)),
            Cell::new(row.report.last_sync.format("%Y-%m-%d %H:%M")),
            Cell::new(metrics.join("\n")),
        ]);
    }
    println!("{table}");

    let uptime = view
        .summary
        .average_uptime_pct
        .map_or("n/a".to_string(), |u| format!("{u}%"));
    println!(
        "{} healthy, {} warning, {} critical, average uptime {}",
        view.summary.healthy, view.summary.warning, view.summary.critical, uptime
    );
}

fn activity_table(entries: &[ActivityEntry]) -> Table {
    let mut table = table(["Time", "Kind", "Action", "Actor", "Details"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M")),
            kind_cell(entry.kind),
            Cell::new(&entry.action),
            Cell::new(&entry.actor),
            Cell::new(&entry.details),
        ]);
    }
    table
}

pub fn activity(view: &ActivityView, limit: Option<usize>) {
    let shown = limit.map_or(view.entries.len(), |l| l.min(view.entries.len()));
    println!("{}", activity_table(&view.entries[..shown]));

    let counts: Vec<String> = view
        .stats
        .by_kind
        .iter()
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect();
    println!("{} entries: {}", view.stats.total, counts.join(", "));
}
