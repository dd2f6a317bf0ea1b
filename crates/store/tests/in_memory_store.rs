//! Behavioural tests for `InMemoryStore` loaded from the built-in feed.

use chrono::NaiveDate;
use core_types::{
    CallerStatus, ClientId, InvoiceStatus, LeadStatus, PaymentStatus, Priority,
};
use rust_decimal_macros::dec;
use store::{CallerUpdate, CrmStore, InMemoryStore, SeedFeed, StoreError};

fn seeded() -> InMemoryStore {
    InMemoryStore::from_seed(SeedFeed::builtin().unwrap()).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

#[test]
fn builtin_seed_resolves_every_reference() {
    let store = seeded();
    assert_eq!(store.clients().len(), 6);
    assert_eq!(store.callers().len(), 8);
    assert_eq!(store.leads().len(), 8);
    assert_eq!(store.integrations().len(), 8);

    let techstart = store.find_client("techstart inc.").unwrap();
    assert_eq!(techstart.total_callers, 3);
    assert_eq!(store.callers_for(techstart.id).len(), 3);
    assert_eq!(store.integrations_for(techstart.id).len(), 4);

    // Insertion order survives the hash maps.
    let names: Vec<_> = store.clients().iter().map(|c| c.client_name.as_str()).collect();
    assert_eq!(names[0], "TechStart Inc.");
    assert_eq!(names[5], "Bloom Wellness");
}

#[test]
fn activity_is_listed_newest_first() {
    let store = seeded();
    let activity = store.activity();
    assert_eq!(activity.len(), 8);
    assert!(activity.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn lookups_accept_names_and_identifiers() {
    let store = seeded();
    let nova = store.find_client("Nova Digital Media").unwrap();
    assert_eq!(store.find_client(&nova.id.to_string()).unwrap().id, nova.id);

    let emily = store.find_caller("EMILY.DAVIS@novadigital.co").unwrap();
    assert_eq!(emily.name, "Emily Davis");

    assert!(matches!(
        store.find_client("Nobody Ltd"),
        Err(StoreError::NotFound { kind: "client", .. })
    ));
    assert!(matches!(
        store.client(ClientId::new()),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn duplicate_names_are_ambiguous() {
    let json = r#"{
        "clients": [
            { "key": "a", "client_name": "Acme", "business_name": "Acme One", "email": "a@acme.io",
              "phone": "+91 90000 00001", "status": "live", "service_type": "website", "plan_type": "basic",
              "priority": "low", "payment_status": "paid", "renewal_date": "2026-12-01",
              "total_bill_amount": "1000", "amount_paid": "1000", "last_invoice_status": "paid",
              "total_leads": 0, "last_activity": "2026-10-17T09:00:00Z" },
            { "key": "b", "client_name": "Acme", "business_name": "Acme Two", "email": "b@acme.io",
              "phone": "+91 90000 00002", "status": "live", "service_type": "website", "plan_type": "basic",
              "priority": "low", "payment_status": "paid", "renewal_date": "2026-12-01",
              "total_bill_amount": "1000", "amount_paid": "1000", "last_invoice_status": "paid",
              "total_leads": 0, "last_activity": "2026-10-17T09:00:00Z" }
        ]
    }"#;
    let store = InMemoryStore::from_seed(SeedFeed::from_json(json).unwrap()).unwrap();
    assert!(matches!(store.find_client("acme"), Err(StoreError::Ambiguous { .. })));
    assert!(store.find_client("Acme Two").is_ok());
}

#[test]
fn seed_with_unknown_client_key_is_rejected() {
    let json = r#"{ "callers": [ { "key": "x", "client": "ghost", "name": "X", "email": "x@y.io",
        "phone": "+91 90000 00000", "status": "active", "leads_assigned": 0, "calls_today": 0 } ] }"#;
    let err = InMemoryStore::from_seed(SeedFeed::from_json(json).unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::DanglingReference { kind: "caller", .. }));
}

#[test]
fn assigning_a_lead_moves_it_to_the_assigned_stage() {
    let mut store = seeded();
    let lead_id = store.find_lead("Rohan Gupta").unwrap().id;
    let sarah = store.find_caller("Sarah Lee").unwrap();
    let (sarah_id, before) = (sarah.id, sarah.leads_assigned);

    let lead = store
        .assign_lead(lead_id, sarah_id, Priority::High, Some("Call after 5pm".to_string()))
        .unwrap();
    assert_eq!(lead.status, LeadStatus::Assigned);
    assert_eq!(lead.assigned_caller, Some(sarah_id));
    assert_eq!(lead.priority, Priority::High);
    assert_eq!(lead.notes.as_deref(), Some("Call after 5pm"));
    assert_eq!(store.caller(sarah_id).unwrap().leads_assigned, before + 1);
}

#[test]
fn reassignment_moves_the_counter_between_callers() {
    let mut store = seeded();
    let lead_id = store.find_lead("Neha Sharma").unwrap().id;
    let john_id = store.find_caller("John Smith").unwrap().id;
    let sarah_id = store.find_caller("Sarah Lee").unwrap().id;

    store.assign_lead(lead_id, sarah_id, Priority::Medium, None).unwrap();
    assert_eq!(store.caller(john_id).unwrap().leads_assigned, 44);
    assert_eq!(store.caller(sarah_id).unwrap().leads_assigned, 39);
}

#[test]
fn disabled_or_foreign_callers_cannot_take_a_lead() {
    let mut store = seeded();
    let lead_id = store.find_lead("Rohan Gupta").unwrap().id;
    let mike_id = store.find_caller("Mike Chen").unwrap().id;
    let emily_id = store.find_caller("Emily Davis").unwrap().id;

    let err = store.assign_lead(lead_id, mike_id, Priority::Low, None).unwrap_err();
    assert!(matches!(err, StoreError::CallerNotEligible { .. }));
    let err = store.assign_lead(lead_id, emily_id, Priority::Low, None).unwrap_err();
    assert!(matches!(err, StoreError::CallerNotEligible { .. }));

    assert_eq!(store.lead(lead_id).unwrap().status, LeadStatus::New);
}

#[test]
fn removing_a_caller_releases_their_leads() {
    let mut store = seeded();
    let john_id = store.find_caller("John Smith").unwrap().id;
    let lead_id = store.find_lead("Neha Sharma").unwrap().id;
    let client_id = store.caller(john_id).unwrap().client_id;

    let removed = store.remove_caller(john_id).unwrap();
    assert_eq!(removed.name, "John Smith");

    let lead = store.lead(lead_id).unwrap();
    assert_eq!(lead.assigned_caller, None);
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(store.client(client_id).unwrap().total_callers, 2);
    assert!(store.find_caller("John Smith").is_err());
    assert!(matches!(store.remove_caller(john_id), Err(StoreError::NotFound { .. })));
}

#[test]
fn caller_edits_replace_the_editable_fields() {
    let mut store = seeded();
    let id = store.find_caller("Priya Patel").unwrap().id;
    let updated = store
        .update_caller(
            id,
            CallerUpdate {
                name: "Priya Shah".to_string(),
                email: "priya.shah@growthlabs.in".to_string(),
                phone: "+91 98111 22233".to_string(),
                status: CallerStatus::Disabled,
                daily_target: Some(20),
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Priya Shah");
    assert!(!updated.is_active());
    assert_eq!(updated.leads_assigned, 28);
}

#[test]
fn partial_then_full_payment_settles_the_invoice() {
    let mut store = seeded();
    let id = store.find_client("GrowthLabs").unwrap().id;

    let client = store.record_payment(id, dec!(5000), today()).unwrap();
    assert_eq!(client.amount_paid, dec!(30000));
    assert_eq!(client.pending_amount(), dec!(10000));
    assert_eq!(client.payment_status, PaymentStatus::Partial);
    assert_eq!(client.last_invoice_status, InvoiceStatus::Partial);

    let client = store.record_payment(id, dec!(10000), today()).unwrap();
    assert_eq!(client.pending_amount(), dec!(0));
    assert_eq!(client.payment_status, PaymentStatus::Paid);
    assert_eq!(client.last_invoice_status, InvoiceStatus::Paid);
    assert_eq!(client.last_payment_amount, dec!(10000));
    assert_eq!(client.last_payment_date, Some(today()));
}

#[test]
fn overpayment_clamps_the_pending_amount() {
    let mut store = seeded();
    let id = store.find_client("Nova Digital").unwrap().id;
    let client = store.record_payment(id, dec!(50000), today()).unwrap();
    assert_eq!(client.pending_amount(), dec!(0));
    assert_eq!(client.payment_status, PaymentStatus::Paid);
}

#[test]
fn non_positive_payments_are_rejected() {
    let mut store = seeded();
    let id = store.find_client("Nova Digital").unwrap().id;
    assert!(matches!(
        store.record_payment(id, dec!(0), today()),
        Err(StoreError::InvalidAmount(_))
    ));
    assert!(store.record_payment(id, dec!(-10), today()).is_err());
    assert_eq!(store.client(id).unwrap().amount_paid, dec!(0));
}

#[test]
fn integrations_can_be_toggled() {
    let mut store = seeded();
    let id = store
        .integrations()
        .into_iter()
        .find(|i| i.name == "Google Forms")
        .unwrap()
        .id;
    assert!(store.set_integration_enabled(id, true).unwrap().enabled);
    assert!(!store.set_integration_enabled(id, false).unwrap().enabled);
}

#[test]
fn toggling_twice_restores_the_flag() {
    let mut store = seeded();
    let id = store
        .integrations()
        .into_iter()
        .find(|i| i.name == "Google Forms")
        .unwrap()
        .id;
    assert!(store.toggle_integration(id).unwrap().enabled);
    assert!(!store.toggle_integration(id).unwrap().enabled);
}

#[test]
fn unowned_lead_cannot_be_marked_assigned() {
    let mut store = seeded();
    let rohan = store.find_lead("Rohan Gupta").unwrap().id;

    let err = store.set_lead_status(rohan, LeadStatus::Assigned).unwrap_err();
    assert!(matches!(err, StoreError::NoCallerAssigned(ref name) if name == "Rohan Gupta"));

    let lead = store.lead(rohan).unwrap();
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.assigned_caller, None);
}

#[test]
fn returning_a_lead_to_new_releases_its_caller() {
    let mut store = seeded();
    let neha = store.find_lead("Neha Sharma").unwrap().id;
    let john = store.find_caller("John Smith").unwrap().id;

    let lead = store.set_lead_status(neha, LeadStatus::New).unwrap();
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.assigned_caller, None);
    assert_eq!(store.caller(john).unwrap().leads_assigned, 44);

    // Already released; a second move to new does not touch the counter again.
    store.set_lead_status(neha, LeadStatus::New).unwrap();
    assert_eq!(store.caller(john).unwrap().leads_assigned, 44);
}

#[test]
fn later_stages_keep_the_owner() {
    let mut store = seeded();
    let neha = store.find_lead("Neha Sharma").unwrap().id;
    let john = store.find_caller("John Smith").unwrap().id;

    let lead = store.set_lead_status(neha, LeadStatus::FollowUp).unwrap();
    assert_eq!(lead.assigned_caller, Some(john));
    let lead = store.set_lead_status(neha, LeadStatus::Assigned).unwrap();
    assert_eq!(lead.status, LeadStatus::Assigned);
    assert_eq!(store.caller(john).unwrap().leads_assigned, 45);
}
