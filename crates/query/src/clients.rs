use crate::filter::{Filter, Query, SearchTerm};
use crate::predicates::{RenewalWindow, is_payment_pending};
use chrono::Datelike;
use core_types::{Client, ClientStatus, PaymentStatus, PlanType, Priority, ServiceType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// The client list view's search box and filter row.
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    /// Matched against the client name and the business name.
    pub search: SearchTerm,
    pub status: Filter<ClientStatus>,
    pub payment_status: Filter<PaymentStatus>,
    pub service_type: Filter<ServiceType>,
    pub plan_type: Filter<PlanType>,
    pub priority: Filter<Priority>,
    /// Calendar month of the renewal date, 1 = January.
    pub renewal_month: Filter<u32>,
}

impl ClientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = SearchTerm::new(term);
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.status = Filter::Only(status);
        self
    }

    pub fn payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Filter::Only(status);
        self
    }

    pub fn service_type(mut self, service: ServiceType) -> Self {
        self.service_type = Filter::Only(service);
        self
    }

    pub fn renewal_month(mut self, month: u32) -> Self {
        self.renewal_month = Filter::Only(month);
        self
    }
}

impl Query<Client> for ClientQuery {
    fn matches(&self, client: &Client) -> bool {
        self.search
            .matches_any(&[client.client_name.as_str(), client.business_name.as_str()])
            && self.status.matches(&client.status)
            && self.payment_status.matches(&client.payment_status)
            && self.service_type.matches(&client.service_type)
            && self.plan_type.matches(&client.plan_type)
            && self.priority.matches(&client.priority)
            && self.renewal_month.matches(&client.renewal_date.month())
    }
}

/// Summary cards for a list of clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub total: usize,
    pub by_status: BTreeMap<ClientStatus, usize>,
    pub by_payment_status: BTreeMap<PaymentStatus, usize>,
    pub live: usize,
    /// Clients whose payment status is `pending`.
    pub payment_pending: usize,
    pub renewal_soon: usize,
    pub total_leads: u64,
    pub total_callers: u64,
    pub calls_today: u64,
}

impl ClientStats {
    /// Single-pass reduction over `clients`.
    pub fn calculate<'a, I>(clients: I, window: &RenewalWindow) -> Self
    where
        I: IntoIterator<Item = &'a Client>,
    {
        let mut stats = Self::default();

        for client in clients {
            stats.total += 1;
            *stats.by_status.entry(client.status).or_default() += 1;
            *stats.by_payment_status.entry(client.payment_status).or_default() += 1;

            if client.status == ClientStatus::Live {
                stats.live += 1;
            }
            if client.payment_status == PaymentStatus::Pending {
                stats.payment_pending += 1;
            }
            if window.contains(client.renewal_date) {
                stats.renewal_soon += 1;
            }

            stats.total_leads += u64::from(client.total_leads);
            stats.total_callers += u64::from(client.total_callers);
            stats.calls_today += u64::from(client.calls_today);
        }

        stats
    }

    pub fn count_with_status(&self, status: ClientStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn count_with_payment_status(&self, status: PaymentStatus) -> usize {
        self.by_payment_status.get(&status).copied().unwrap_or(0)
    }

    /// Clients in any status other than live.
    pub fn inactive(&self) -> usize {
        self.total - self.live
    }
}

/// The billing overview cards at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyOverview {
    pub total_companies: usize,
    pub active_companies: usize,
    /// Companies matching the payment-pending classification.
    pub payment_pending: usize,
    pub total_billed: Decimal,
    pub total_collected: Decimal,
    pub total_outstanding: Decimal,
}

impl CompanyOverview {
    pub fn calculate<'a, I>(companies: I) -> Self
    where
        I: IntoIterator<Item = &'a Client>,
    {
        let mut overview = Self::default();

        for company in companies {
            overview.total_companies += 1;
            if company.status == ClientStatus::Live {
                overview.active_companies += 1;
            }
            if is_payment_pending(company) {
                overview.payment_pending += 1;
            }
            overview.total_billed += company.total_bill_amount;
            overview.total_collected += company.amount_paid;
            overview.total_outstanding += company.pending_amount();
        }

        overview
    }
}

/// The rows of the "pending payments" table, in input order.
pub fn pending_payments<'a, I>(companies: I) -> Vec<&'a Client>
where
    I: IntoIterator<Item = &'a Client>,
{
    companies.into_iter().filter(|c| is_payment_pending(c)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use core_types::{ClientId, InvoiceStatus};
    use rust_decimal_macros::dec;

    pub(crate) fn sample_client(name: &str) -> Client {
        Client {
            id: ClientId::new(),
            client_name: name.to_string(),
            business_name: format!("{name} Pvt Ltd"),
            email: "hello@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            status: ClientStatus::Live,
            service_type: ServiceType::Website,
            plan_type: PlanType::Standard,
            priority: Priority::Medium,
            payment_status: PaymentStatus::Paid,
            renewal_date: NaiveDate::from_ymd_opt(2027, 3, 15).unwrap(),
            total_bill_amount: dec!(50000),
            amount_paid: dec!(50000),
            last_invoice_status: InvoiceStatus::Paid,
            last_payment_amount: dec!(25000),
            last_payment_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            total_leads: 10,
            total_callers: 2,
            calls_today: 5,
            last_activity: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn roster() -> Vec<Client> {
        let mut techstart = sample_client("TechStart Inc.");
        techstart.business_name = "TechStart Solutions".to_string();

        let mut growth = sample_client("GrowthLabs");
        growth.status = ClientStatus::Maintenance;
        growth.service_type = ServiceType::SocialMedia;
        growth.payment_status = PaymentStatus::Partial;
        growth.renewal_date = today() + Duration::days(7);

        let mut nova = sample_client("Nova Digital");
        nova.status = ClientStatus::PaymentPending;
        nova.payment_status = PaymentStatus::Pending;
        nova.service_type = ServiceType::Ads;
        nova.renewal_date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        nova.amount_paid = dec!(20000);

        vec![techstart, growth, nova]
    }

    #[test]
    fn default_query_is_identity() {
        let clients = roster();
        let result = ClientQuery::new().apply(&clients);
        assert_eq!(result.len(), clients.len());
        for (got, expected) in result.iter().zip(&clients) {
            assert_eq!(got.id, expected.id, "order must be preserved");
        }
    }

    #[test]
    fn status_filter_is_sound_and_complete() {
        let clients = roster();
        for status in ClientStatus::ALL {
            let result = ClientQuery::new().status(*status).apply(&clients);
            assert!(result.iter().all(|c| c.status == *status));
            let expected = clients.iter().filter(|c| c.status == *status).count();
            assert_eq!(result.len(), expected);
        }
    }

    #[test]
    fn search_matches_client_or_business_name() {
        let clients = roster();
        let by_client = ClientQuery::new().search("growth").apply(&clients);
        assert_eq!(by_client.len(), 1);
        assert_eq!(by_client[0].client_name, "GrowthLabs");

        let by_business = ClientQuery::new().search("SOLUTIONS").apply(&clients);
        assert_eq!(by_business.len(), 1);
        assert_eq!(by_business[0].client_name, "TechStart Inc.");

        assert!(ClientQuery::new().search("acme").apply(&clients).is_empty());
    }

    #[test]
    fn filters_combine_with_and() {
        let clients = roster();
        let query = ClientQuery::new()
            .search("nova")
            .payment_status(PaymentStatus::Pending)
            .service_type(ServiceType::Ads);
        assert_eq!(query.apply(&clients).len(), 1);

        let query = query.status(ClientStatus::Live);
        assert!(query.apply(&clients).is_empty());
    }

    #[test]
    fn renewal_month_filter_uses_calendar_month() {
        let clients = roster();
        let october = ClientQuery::new().renewal_month(10).apply(&clients);
        let names: Vec<_> = october.iter().map(|c| c.client_name.as_str()).collect();
        assert_eq!(names, vec!["GrowthLabs", "Nova Digital"]);

        let march = ClientQuery::new().renewal_month(3).apply(&clients);
        assert_eq!(march.len(), 1);
    }

    #[test]
    fn stats_count_status_payment_and_renewals() {
        let clients = roster();
        let stats = ClientStats::calculate(&clients, &RenewalWindow::standard(today()));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.live, 1);
        assert_eq!(stats.inactive(), 2);
        assert_eq!(stats.payment_pending, 1);
        assert_eq!(stats.renewal_soon, 2);
        assert_eq!(stats.count_with_status(ClientStatus::Maintenance), 1);
        assert_eq!(stats.count_with_status(ClientStatus::Suspended), 0);
        assert_eq!(stats.count_with_payment_status(PaymentStatus::Partial), 1);
        assert_eq!(stats.total_leads, 30);
        assert_eq!(stats.total_callers, 6);
        assert_eq!(stats.calls_today, 15);
    }

    #[test]
    fn stats_over_nothing_are_zero() {
        let empty: Vec<Client> = Vec::new();
        let stats = ClientStats::calculate(&empty, &RenewalWindow::standard(today()));
        assert_eq!(stats, ClientStats::default());
        assert_eq!(stats.total_leads, 0);
        assert_eq!(stats.count_with_status(ClientStatus::Live), 0);

        let overview = CompanyOverview::calculate(&empty);
        assert_eq!(overview.total_outstanding, Decimal::ZERO);
        assert_eq!(overview.payment_pending, 0);
    }

    #[test]
    fn overview_uses_billing_classification() {
        let clients = roster();
        let overview = CompanyOverview::calculate(&clients);
        assert_eq!(overview.total_companies, 3);
        assert_eq!(overview.active_companies, 1);
        assert_eq!(overview.payment_pending, 1);
        assert_eq!(overview.total_billed, dec!(150000));
        assert_eq!(overview.total_collected, dec!(120000));
        assert_eq!(overview.total_outstanding, dec!(30000));

        let pending = pending_payments(&clients);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].client_name, "Nova Digital");
    }

    #[test]
    fn overpaid_company_contributes_no_outstanding() {
        let mut client = sample_client("Spark Ventures");
        client.total_bill_amount = dec!(1000);
        client.amount_paid = dec!(1200);
        let overview = CompanyOverview::calculate([&client]);
        assert_eq!(overview.total_outstanding, Decimal::ZERO);
        assert_eq!(overview.payment_pending, 0);
    }
}
