use chrono::NaiveDate;
use core_types::{Client, InvoiceStatus};
use serde::Serialize;

/// The standard "renewal soon" horizon, in days, inclusive.
pub const DEFAULT_RENEWAL_WINDOW_DAYS: i64 = 7;

/// Whole calendar days from `today` until `date`; negative once `date` has passed.
///
/// Both sides are calendar dates, so there is no partial-day remainder to
/// round. Callers derive `today` from UTC.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// An inclusive window of `days` calendar days starting at `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalWindow {
    pub today: NaiveDate,
    pub days: i64,
}

impl RenewalWindow {
    pub fn new(today: NaiveDate, days: i64) -> Self {
        Self { today, days }
    }

    pub fn standard(today: NaiveDate) -> Self {
        Self::new(today, DEFAULT_RENEWAL_WINDOW_DAYS)
    }

    /// True iff `0 <= days_until(date) <= days`. Both ends qualify.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (0..=self.days).contains(&days_until(date, self.today))
    }
}

/// Renewal-soon against the standard seven-day window.
pub fn is_renewal_soon(renewal_date: NaiveDate, today: NaiveDate) -> bool {
    RenewalWindow::standard(today).contains(renewal_date)
}

/// A company is payment-pending when it has been billed more than it has
/// paid, or when its last invoice is unpaid or only partially paid.
///
/// The conditions are independent; any one is sufficient.
pub fn is_payment_pending(client: &Client) -> bool {
    client.total_bill_amount > client.amount_paid
        || matches!(
            client.last_invoice_status,
            InvoiceStatus::Unpaid | InvoiceStatus::Partial
        )
}

/// Alert conditions for one client, reported independently of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClientFlags {
    pub payment_pending: bool,
    pub renewal_soon: bool,
}

impl ClientFlags {
    pub fn evaluate(client: &Client, window: &RenewalWindow) -> Self {
        Self {
            payment_pending: is_payment_pending(client),
            renewal_soon: window.contains(client.renewal_date),
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.payment_pending || self.renewal_soon
    }

    /// Short labels for every raised flag, in a fixed order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.payment_pending {
            labels.push("Payment pending");
        }
        if self.renewal_soon {
            labels.push("Renewal soon");
        }
        labels
    }
}
