//! Scenario tests for the client table: filter row + summary cards together.

use chrono::{Duration, NaiveDate, Utc};
use core_types::{
    Client, ClientId, ClientStatus, InvoiceStatus, PaymentStatus, PlanType, Priority, ServiceType,
};
use query::{ClientFlags, ClientQuery, ClientStats, Filter, Query, RenewalWindow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn company(name: &str, status: ClientStatus, renewal_in_days: i64) -> Client {
    Client {
        id: ClientId::new(),
        client_name: name.to_string(),
        business_name: format!("{name} Holdings"),
        email: "billing@example.com".to_string(),
        phone: "+91 98000 00000".to_string(),
        status,
        service_type: ServiceType::Combo,
        plan_type: PlanType::Pro,
        priority: Priority::High,
        payment_status: PaymentStatus::Paid,
        renewal_date: today() + Duration::days(renewal_in_days),
        total_bill_amount: dec!(30000),
        amount_paid: dec!(30000),
        last_invoice_status: InvoiceStatus::Paid,
        last_payment_amount: dec!(30000),
        last_payment_date: Some(today() - Duration::days(30)),
        total_leads: 100,
        total_callers: 4,
        calls_today: 60,
        last_activity: Utc::now(),
    }
}

/// Scenario: three companies, the operator picks "Live" in the status selector.
#[test]
fn live_status_filter_shows_exactly_one_row() {
    let companies = vec![
        company("TechStart Inc.", ClientStatus::Live, 40),
        company("GrowthLabs", ClientStatus::Maintenance, 40),
        company("Nova Digital", ClientStatus::PaymentPending, 40),
    ];

    let query = ClientQuery {
        status: "live".parse().unwrap(),
        ..ClientQuery::default()
    };
    let rows = query.apply(&companies);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_name, "TechStart Inc.");

    let window = RenewalWindow::standard(today());
    let cards = ClientStats::calculate(rows.iter().copied(), &window);
    assert_eq!(cards.total, 1);
    assert_eq!(cards.live, 1);
    assert_eq!(cards.total_leads, 100);
}

/// Switching every selector back to "all" restores the full table.
#[test]
fn all_selectors_restore_full_table() {
    let companies = vec![
        company("TechStart Inc.", ClientStatus::Live, 1),
        company("GrowthLabs", ClientStatus::Suspended, 9),
    ];

    let query = ClientQuery {
        status: "all".parse().unwrap(),
        payment_status: "all".parse().unwrap(),
        service_type: "all".parse().unwrap(),
        plan_type: Filter::All,
        priority: Filter::All,
        renewal_month: Filter::All,
        search: "".into(),
    };
    assert_eq!(query.apply(&companies).len(), companies.len());
}

/// The renewal badge and the payment badge are raised independently.
#[test]
fn badges_for_overdue_company_renewing_this_week() {
    let window = RenewalWindow::standard(today());

    let mut overdue = company("Spark Ventures", ClientStatus::PaymentPending, 7);
    overdue.total_bill_amount = dec!(45000);
    overdue.amount_paid = dec!(15000);
    overdue.last_invoice_status = InvoiceStatus::Partial;
    overdue.payment_status = PaymentStatus::Partial;

    let flags = ClientFlags::evaluate(&overdue, &window);
    assert!(flags.payment_pending);
    assert!(flags.renewal_soon);
    assert_eq!(overdue.pending_amount(), dec!(30000));

    let next_week = company("Quantum Corp", ClientStatus::Live, 8);
    let flags = ClientFlags::evaluate(&next_week, &window);
    assert!(!flags.renewal_soon);
    assert!(!flags.payment_pending);
    assert_eq!(next_week.pending_amount(), Decimal::ZERO);
}
