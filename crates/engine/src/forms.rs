//! Input forms for the console's write actions and the rules they are
//! checked against before anything reaches the store.
//!
//! Every form collects all of its field errors in one pass so the operator
//! sees every problem at once.

use crate::error::EngineError;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{
    Caller, CallerId, CallerStatus, Client, ClientId, ClientStatus, InvoiceStatus, PaymentStatus,
    PlanType, Priority, ServiceType,
};
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::LazyLock;
use store::CallerUpdate;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("Invalid email regex")
});

const NAME_LEN: (usize, usize) = (2, 100);
const EMAIL_MAX: usize = 255;
const PHONE_LEN: (usize, usize) = (10, 20);
const NOTES_MAX: usize = 500;

/// A single rejected field and the message shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulates field errors across a chain of checks.
#[derive(Debug, Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn new() -> Self {
        Self::default()
    }

    fn check(mut self, field: &'static str, ok: bool, message: impl Into<String>) -> Self {
        if !ok {
            self.errors.push(FieldError { field, message: message.into() });
        }
        self
    }

    /// Trimmed length, counted in characters.
    fn length(self, field: &'static str, label: &str, value: &str, (min, max): (usize, usize)) -> Self {
        let len = value.trim().chars().count();
        if len < min {
            self.check(field, false, format!("{label} must be at least {min} characters"))
        } else {
            self.check(field, len <= max, format!("{label} must be less than {max} characters"))
        }
    }

    fn email(self, field: &'static str, value: &str) -> Self {
        let value = value.trim();
        if !EMAIL_REGEX.is_match(value) {
            self.check(field, false, "Please enter a valid email address")
        } else {
            self.check(
                field,
                value.chars().count() <= EMAIL_MAX,
                format!("Email must be less than {EMAIL_MAX} characters"),
            )
        }
    }

    fn phone(self, field: &'static str, value: &str) -> Self {
        let len = value.trim().chars().count();
        if len < PHONE_LEN.0 {
            self.check(field, false, format!("Phone number must be at least {} digits", PHONE_LEN.0))
        } else {
            self.check(
                field,
                len <= PHONE_LEN.1,
                format!("Phone number must be less than {} characters", PHONE_LEN.1),
            )
        }
    }

    fn daily_target(self, field: &'static str, value: Option<&str>) -> Self {
        let ok = parse_daily_target(value).is_ok();
        self.check(field, ok, "Daily call target must be a positive whole number")
    }

    fn finish(self) -> Result<(), EngineError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(self.errors))
        }
    }
}

/// A blank target means "no target".
fn parse_daily_target(value: Option<&str>) -> Result<Option<u32>, ()> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => match raw.parse::<u32>() {
            Ok(target) if target > 0 => Ok(Some(target)),
            _ => Err(()),
        },
    }
}

#[derive(Debug, Clone)]
pub struct NewClientForm {
    pub client_name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub status: ClientStatus,
    pub service_type: ServiceType,
    pub plan_type: PlanType,
    pub priority: Priority,
    pub payment_status: PaymentStatus,
    pub renewal_date: Option<NaiveDate>,
    pub total_bill_amount: Decimal,
}

impl NewClientForm {
    pub fn validate(&self) -> Result<(), EngineError> {
        Validator::new()
            .length("client_name", "Client name", &self.client_name, NAME_LEN)
            .length("business_name", "Business name", &self.business_name, NAME_LEN)
            .email("email", &self.email)
            .phone("phone", &self.phone)
            .check("renewal_date", self.renewal_date.is_some(), "Renewal date is required")
            .check(
                "total_bill_amount",
                !self.total_bill_amount.is_sign_negative(),
                "Bill amount cannot be negative",
            )
            .finish()
    }

    /// Validates the form and builds the new client record.
    pub fn into_client(self, now: DateTime<Utc>) -> Result<Client, EngineError> {
        self.validate()?;
        let renewal_date = self.renewal_date.unwrap_or_else(|| now.date_naive());
        let last_invoice_status = if self.total_bill_amount.is_zero() {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Unpaid
        };

        Ok(Client {
            id: ClientId::new(),
            client_name: self.client_name.trim().to_string(),
            business_name: self.business_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            status: self.status,
            service_type: self.service_type,
            plan_type: self.plan_type,
            priority: self.priority,
            payment_status: self.payment_status,
            renewal_date,
            total_bill_amount: self.total_bill_amount,
            amount_paid: Decimal::ZERO,
            last_invoice_status,
            last_payment_amount: Decimal::ZERO,
            last_payment_date: None,
            total_leads: 0,
            total_callers: 0,
            calls_today: 0,
            last_activity: now,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewCallerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub client: Option<ClientId>,
    pub status: CallerStatus,
    /// Free text, as typed. Blank means no target.
    pub daily_target: Option<String>,
}

impl NewCallerForm {
    pub fn validate(&self) -> Result<(), EngineError> {
        Validator::new()
            .length("name", "Name", &self.name, NAME_LEN)
            .email("email", &self.email)
            .phone("phone", &self.phone)
            .check("client", self.client.is_some(), "Please select a client")
            .daily_target("daily_target", self.daily_target.as_deref())
            .finish()
    }

    pub fn into_caller(self) -> Result<Caller, EngineError> {
        self.validate()?;
        let client_id = self.client.ok_or_else(|| {
            EngineError::Validation(vec![FieldError {
                field: "client",
                message: "Please select a client".to_string(),
            }])
        })?;

        Ok(Caller {
            id: CallerId::new(),
            client_id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            status: self.status,
            leads_assigned: 0,
            calls_today: 0,
            daily_target: parse_daily_target(self.daily_target.as_deref()).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct EditCallerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CallerStatus,
    pub daily_target: Option<String>,
}

impl EditCallerForm {
    /// Prefills the form from the caller being edited.
    pub fn from_caller(caller: &Caller) -> Self {
        Self {
            name: caller.name.clone(),
            email: caller.email.clone(),
            phone: caller.phone.clone(),
            status: caller.status,
            daily_target: caller.daily_target.map(|t| t.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        Validator::new()
            .length("name", "Name", &self.name, NAME_LEN)
            .email("email", &self.email)
            .phone("phone", &self.phone)
            .daily_target("daily_target", self.daily_target.as_deref())
            .finish()
    }

    pub fn into_update(self) -> Result<CallerUpdate, EngineError> {
        self.validate()?;
        Ok(CallerUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            status: self.status,
            daily_target: parse_daily_target(self.daily_target.as_deref()).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AssignLeadForm {
    pub caller: Option<CallerId>,
    pub priority: Priority,
    pub notes: Option<String>,
}

impl AssignLeadForm {
    pub fn validate(&self) -> Result<CallerId, EngineError> {
        let notes_len = self.notes.as_deref().map_or(0, |n| n.chars().count());
        Validator::new()
            .check("caller", self.caller.is_some(), "Please select a caller")
            .check(
                "notes",
                notes_len <= NOTES_MAX,
                format!("Notes must be less than {NOTES_MAX} characters"),
            )
            .finish()?;
        self.caller.ok_or_else(|| EngineError::Validation(Vec::new()))
    }

    /// Notes with surrounding whitespace removed; blank notes become `None`.
    pub fn cleaned_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentForm {
    pub amount: Decimal,
}

impl PaymentForm {
    pub fn validate(&self) -> Result<(), EngineError> {
        Validator::new()
            .check("amount", self.amount > Decimal::ZERO, "Amount must be greater than 0")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn client_form() -> NewClientForm {
        NewClientForm {
            client_name: "  Orbit Labs ".to_string(),
            business_name: "Orbit Labs Pvt Ltd".to_string(),
            email: "hello@orbitlabs.in".to_string(),
            phone: "+91 98450 12345".to_string(),
            status: ClientStatus::NewLead,
            service_type: ServiceType::Combo,
            plan_type: PlanType::Standard,
            priority: Priority::Medium,
            payment_status: PaymentStatus::Pending,
            renewal_date: NaiveDate::from_ymd_opt(2027, 1, 1),
            total_bill_amount: dec!(24000),
        }
    }

    fn caller_form() -> NewCallerForm {
        NewCallerForm {
            name: "Kavya Menon".to_string(),
            email: "kavya@orbitlabs.in".to_string(),
            phone: "9845012345".to_string(),
            client: Some(ClientId::new()),
            status: CallerStatus::Active,
            daily_target: Some("40".to_string()),
        }
    }

    fn messages(err: EngineError) -> Vec<String> {
        err.field_errors().iter().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn valid_client_form_builds_a_trimmed_record() {
        let client = client_form().into_client(Utc::now()).unwrap();
        assert_eq!(client.client_name, "Orbit Labs");
        assert_eq!(client.total_callers, 0);
        assert_eq!(client.last_invoice_status, InvoiceStatus::Unpaid);
        assert_eq!(client.pending_amount(), dec!(24000));
    }

    #[test]
    fn client_form_reports_every_bad_field() {
        let form = NewClientForm {
            client_name: " A ".to_string(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
            renewal_date: None,
            ..client_form()
        };
        assert_eq!(
            messages(form.validate().unwrap_err()),
            vec![
                "Client name must be at least 2 characters",
                "Please enter a valid email address",
                "Phone number must be at least 10 digits",
                "Renewal date is required",
            ]
        );
    }

    #[test]
    fn length_limits_are_inclusive() {
        let at_limit = NewClientForm { business_name: "b".repeat(100), ..client_form() };
        assert!(at_limit.validate().is_ok());

        let over = NewClientForm { business_name: "b".repeat(101), ..client_form() };
        assert_eq!(
            messages(over.validate().unwrap_err()),
            vec!["Business name must be less than 100 characters"]
        );

        let long_phone = NewClientForm { phone: "9".repeat(21), ..client_form() };
        assert_eq!(
            messages(long_phone.validate().unwrap_err()),
            vec!["Phone number must be less than 20 characters"]
        );
    }

    #[test]
    fn caller_form_requires_a_client_and_positive_target() {
        let form = NewCallerForm {
            client: None,
            daily_target: Some("-3".to_string()),
            ..caller_form()
        };
        let err = form.validate().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["client", "daily_target"]);

        let zero = NewCallerForm { daily_target: Some("0".to_string()), ..caller_form() };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn blank_daily_target_means_none() {
        let caller = NewCallerForm { daily_target: Some("  ".to_string()), ..caller_form() }
            .into_caller()
            .unwrap();
        assert_eq!(caller.daily_target, None);

        let caller = caller_form().into_caller().unwrap();
        assert_eq!(caller.daily_target, Some(40));
        assert_eq!(caller.leads_assigned, 0);
    }

    #[test]
    fn edit_form_round_trips_an_existing_caller() {
        let caller = caller_form().into_caller().unwrap();
        let update = EditCallerForm::from_caller(&caller).into_update().unwrap();
        assert_eq!(update.name, caller.name);
        assert_eq!(update.daily_target, Some(40));
    }

    #[test]
    fn assignment_needs_a_caller_and_short_notes() {
        let form = AssignLeadForm { caller: None, priority: Priority::High, notes: Some("x".repeat(501)) };
        assert_eq!(
            messages(form.validate().unwrap_err()),
            vec!["Please select a caller", "Notes must be less than 500 characters"]
        );

        let caller = CallerId::new();
        let form = AssignLeadForm { caller: Some(caller), priority: Priority::Low, notes: Some("  ".to_string()) };
        assert_eq!(form.validate().unwrap(), caller);
        assert_eq!(form.cleaned_notes(), None);
    }

    #[test]
    fn payment_amount_must_be_positive() {
        assert!(PaymentForm { amount: dec!(0.01) }.validate().is_ok());
        assert_eq!(
            messages(PaymentForm { amount: dec!(0) }.validate().unwrap_err()),
            vec!["Amount must be greater than 0"]
        );
    }

    #[test]
    fn validation_error_message_lists_fields() {
        let err = PaymentForm { amount: dec!(-5) }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please correct the form: amount: Amount must be greater than 0");
    }
}
