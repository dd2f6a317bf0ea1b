use crate::error::EngineError;
use crate::forms::{AssignLeadForm, EditCallerForm, NewCallerForm, NewClientForm, PaymentForm};
use crate::views::{
    ActivityView, Alert, CallerRow, CallerView, ClientRow, ClientView, CompanyView, Dashboard,
    HealthRow, HealthView, IntegrationRow, IntegrationView, LeadRow, LeadView, PendingPayment,
};
use checkout::{CheckoutRequest, PaymentGateway, PaymentOutcome};
use chrono::{NaiveDate, Utc};
use configuration::Config;
use core_types::{Caller, CallerId, Client, ClientId, Integration, IntegrationId, Lead, LeadId, LeadStatus};
use events::{ActivityEntry, ActivityKind, Notification};
use query::{
    ActivityQuery, ActivityStats, CallerQuery, CallerStats, ClientFlags, ClientQuery, ClientStats,
    CompanyOverview, HealthSummary, IntegrationQuery, IntegrationStats, LeadQuery, LeadStats, Query,
    RenewalWindow, days_until, is_below_target, pending_payments,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use store::CrmStore;
use tokio::sync::{RwLock, broadcast};

const NOTIFICATION_CAPACITY: usize = 32;
const RECENT_ACTIVITY: usize = 5;

/// What a successful action hands back: the record it produced and the
/// notification that was broadcast for it.
#[derive(Debug, Clone)]
pub struct ActionOutcome<T> {
    pub record: T,
    pub notification: Notification,
}

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub amount: Decimal,
    pub client: Client,
}

/// The console's action service.
///
/// Every write action validates its input, waits out the simulated round
/// trip, applies the change under the store's write lock, appends to the
/// activity log and broadcasts a notification. Reads take a snapshot under
/// the read lock and run the query engine over it.
pub struct ConsoleEngine<S: CrmStore> {
    store: Arc<RwLock<S>>,
    config: Config,
    gateway: Arc<dyn PaymentGateway>,
    notifications: broadcast::Sender<Notification>,
}

impl<S: CrmStore> ConsoleEngine<S> {
    pub fn new(store: S, config: Config, gateway: Arc<dyn PaymentGateway>) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(store)),
            config,
            gateway,
            notifications,
        }
    }

    /// A receiver for every notification broadcast from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    pub fn store(&self) -> Arc<RwLock<S>> {
        Arc::clone(&self.store)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn renewal_window(&self, today: NaiveDate) -> RenewalWindow {
        RenewalWindow::new(today, self.config.dashboard.renewal_window_days)
    }

    async fn simulate_round_trip(&self) {
        let delay = Duration::from_millis(self.config.dashboard.submit_delay_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn activity(
        &self,
        kind: ActivityKind,
        action: &str,
        client_id: Option<ClientId>,
        details: String,
    ) -> ActivityEntry {
        ActivityEntry::new(kind, action, self.config.dashboard.actor.as_str(), client_id, details)
    }

    fn broadcast(&self, notification: &Notification) {
        // No subscribers is not an error.
        let _ = self.notifications.send(notification.clone());
    }

    /// Turns the result of an action into its outcome, broadcasting the
    /// matching notification either way.
    async fn conclude<T>(
        &self,
        result: Result<(T, Notification), EngineError>,
        failure: &str,
    ) -> Result<ActionOutcome<T>, EngineError> {
        match result {
            Ok((record, notification)) => {
                self.broadcast(&notification);
                Ok(ActionOutcome { record, notification })
            }
            Err(err) => {
                let description = match &err {
                    EngineError::Validation(_) | EngineError::PaymentCancelled(_) => err.to_string(),
                    _ => format!("{failure} Please try again."),
                };
                if !matches!(err, EngineError::Validation(_)) {
                    tracing::warn!(error = %err, "{}", failure);
                    let entry = self.activity(ActivityKind::Error, "Action Failed", None, err.to_string());
                    self.store.write().await.push_activity(entry);
                }
                self.broadcast(&Notification::failure("Error", description));
                Err(err)
            }
        }
    }

    // ==========================================================================
    // Actions
    // ==========================================================================

    pub async fn add_client(&self, form: NewClientForm) -> Result<ActionOutcome<Client>, EngineError> {
        let result = self.try_add_client(form).await;
        self.conclude(result, "Failed to add client.").await
    }

    async fn try_add_client(&self, form: NewClientForm) -> Result<(Client, Notification), EngineError> {
        let client = form.into_client(Utc::now())?;
        self.simulate_round_trip().await;

        let mut store = self.store.write().await;
        let id = store.insert_client(client);
        let client = store.client(id)?.clone();
        store.push_activity(self.activity(
            ActivityKind::Success,
            "Client Onboarded",
            Some(id),
            format!("{} joined on the {} plan", client.business_name, client.plan_type),
        ));
        tracing::info!(client_id = %id, "Client added.");

        let notification = Notification::success(
            "Client Added",
            format!("{} has been added successfully.", client.business_name),
        );
        Ok((client, notification))
    }

    pub async fn add_caller(&self, form: NewCallerForm) -> Result<ActionOutcome<Caller>, EngineError> {
        let result = self.try_add_caller(form).await;
        self.conclude(result, "Failed to add caller.").await
    }

    async fn try_add_caller(&self, form: NewCallerForm) -> Result<(Caller, Notification), EngineError> {
        let caller = form.into_caller()?;
        self.simulate_round_trip().await;

        let mut store = self.store.write().await;
        let id = store.insert_caller(caller)?;
        let caller = store.caller(id)?.clone();
        let client_name = store.client(caller.client_id)?.client_name.clone();
        store.push_activity(self.activity(
            ActivityKind::Info,
            "Caller Added",
            Some(caller.client_id),
            format!("{} added to the {} calling team", caller.name, client_name),
        ));
        tracing::info!(caller_id = %id, "Caller added.");

        let notification = Notification::success(
            "Caller Added",
            format!("{} has been added and assigned successfully.", caller.name),
        );
        Ok((caller, notification))
    }

    pub async fn edit_caller(
        &self,
        id: CallerId,
        form: EditCallerForm,
    ) -> Result<ActionOutcome<Caller>, EngineError> {
        let result = self.try_edit_caller(id, form).await;
        self.conclude(result, "Failed to update caller.").await
    }

    async fn try_edit_caller(
        &self,
        id: CallerId,
        form: EditCallerForm,
    ) -> Result<(Caller, Notification), EngineError> {
        let update = form.into_update()?;
        self.simulate_round_trip().await;

        let mut store = self.store.write().await;
        let caller = store.update_caller(id, update)?.clone();
        store.push_activity(self.activity(
            ActivityKind::Info,
            "Caller Updated",
            Some(caller.client_id),
            format!("{} is now {}", caller.name, caller.status),
        ));

        let notification = Notification::success(
            "Caller Updated",
            format!("{} has been updated successfully.", caller.name),
        );
        Ok((caller, notification))
    }

    pub async fn delete_caller(&self, id: CallerId) -> Result<ActionOutcome<Caller>, EngineError> {
        let result = self.try_delete_caller(id).await;
        self.conclude(result, "Failed to delete caller.").await
    }

    async fn try_delete_caller(&self, id: CallerId) -> Result<(Caller, Notification), EngineError> {
        self.store.read().await.caller(id)?;
        self.simulate_round_trip().await;

        let mut store = self.store.write().await;
        let caller = store.remove_caller(id)?;
        store.push_activity(self.activity(
            ActivityKind::Warning,
            "Caller Removed",
            Some(caller.client_id),
            format!("{} was removed; their open leads returned to the queue", caller.name),
        ));
        tracing::info!(caller_id = %id, "Caller deleted.");

        let notification =
            Notification::success("Caller Removed", format!("{} has been removed.", caller.name));
        Ok((caller, notification))
    }

    pub async fn assign_lead(
        &self,
        lead_id: LeadId,
        form: AssignLeadForm,
    ) -> Result<ActionOutcome<Lead>, EngineError> {
        let result = self.try_assign_lead(lead_id, form).await;
        self.conclude(result, "Failed to assign lead.").await
    }

    async fn try_assign_lead(
        &self,
        lead_id: LeadId,
        form: AssignLeadForm,
    ) -> Result<(Lead, Notification), EngineError> {
        let caller_id = form.validate()?;
        self.simulate_round_trip().await;

        let mut store = self.store.write().await;
        let lead = store
            .assign_lead(lead_id, caller_id, form.priority, form.cleaned_notes())?
            .clone();
        let caller_name = store.caller(caller_id)?.name.clone();
        store.push_activity(self.activity(
            ActivityKind::Info,
            "Lead Assigned",
            Some(lead.client_id),
            format!("{} assigned to {} ({} priority)", lead.name, caller_name, lead.priority),
        ));

        let notification = Notification::success(
            "Lead Assigned",
            format!("{} has been assigned to {}.", lead.name, caller_name),
        );
        Ok((lead, notification))
    }

    pub async fn update_lead_status(
        &self,
        lead_id: LeadId,
        status: LeadStatus,
    ) -> Result<ActionOutcome<Lead>, EngineError> {
        let result = self.try_update_lead_status(lead_id, status).await;
        self.conclude(result, "Failed to update lead.").await
    }

    async fn try_update_lead_status(
        &self,
        lead_id: LeadId,
        status: LeadStatus,
    ) -> Result<(Lead, Notification), EngineError> {
        self.store.read().await.lead(lead_id)?;
        self.simulate_round_trip().await;

        let mut store = self.store.write().await;
        let lead = store.set_lead_status(lead_id, status)?.clone();
        store.push_activity(self.activity(
            ActivityKind::Info,
            "Lead Updated",
            Some(lead.client_id),
            format!("{} moved to {}", lead.name, lead.status),
        ));

        let notification = Notification::success(
            "Lead Updated",
            format!("{} is now {}.", lead.name, lead.status),
        );
        Ok((lead, notification))
    }

    /// Runs a checkout for `client_id` and records the payment once the
    /// gateway confirms it.
    pub async fn collect_payment(
        &self,
        client_id: ClientId,
        form: PaymentForm,
        today: NaiveDate,
    ) -> Result<ActionOutcome<PaymentReceipt>, EngineError> {
        let result = self.try_collect_payment(client_id, form, today).await;
        self.conclude(result, "Payment could not be completed.").await
    }

    async fn try_collect_payment(
        &self,
        client_id: ClientId,
        form: PaymentForm,
        today: NaiveDate,
    ) -> Result<(PaymentReceipt, Notification), EngineError> {
        form.validate()?;
        let (request, company) = {
            let store = self.store.read().await;
            let client = store.client(client_id)?;
            (
                CheckoutRequest::new(&self.config.checkout, form.amount, client)?,
                client.business_name.clone(),
            )
        };

        // The store lock is not held while the gateway is open.
        let payment_id = match self.gateway.collect(&request).await? {
            PaymentOutcome::Succeeded { payment_id } => payment_id,
            PaymentOutcome::Dismissed => return Err(EngineError::PaymentCancelled(company)),
        };

        let mut store = self.store.write().await;
        let client = store.record_payment(client_id, form.amount, today)?.clone();
        store.push_activity(self.activity(
            ActivityKind::Success,
            "Payment Received",
            Some(client_id),
            format!(
                "{} {} received ({}); {} outstanding",
                request.currency,
                form.amount,
                payment_id,
                client.pending_amount()
            ),
        ));

        let notification = Notification::success(
            "Payment Successful",
            format!("{} {} received from {}.", request.currency, form.amount, company),
        );
        let receipt = PaymentReceipt { payment_id, amount: form.amount, client };
        Ok((receipt, notification))
    }

    pub async fn toggle_integration(
        &self,
        id: IntegrationId,
    ) -> Result<ActionOutcome<Integration>, EngineError> {
        let result = self.try_toggle_integration(id).await;
        self.conclude(result, "Failed to update integration.").await
    }

    async fn try_toggle_integration(
        &self,
        id: IntegrationId,
    ) -> Result<(Integration, Notification), EngineError> {
        self.store.read().await.integration(id)?;
        self.simulate_round_trip().await;

        // The flip is decided under the write lock so concurrent toggles compose.
        let mut store = self.store.write().await;
        let integration = store.toggle_integration(id)?.clone();
        let client_name = store.client(integration.client_id)?.client_name.clone();
        let state = if integration.enabled { "enabled" } else { "disabled" };
        store.push_activity(self.activity(
            ActivityKind::Info,
            "Integration Updated",
            Some(integration.client_id),
            format!("{} {} for {}", integration.name, state, client_name),
        ));

        let title = if integration.enabled { "Integration Enabled" } else { "Integration Disabled" };
        let notification = Notification::success(
            title,
            format!("{} for {} is now {}.", integration.name, client_name, state),
        );
        Ok((integration, notification))
    }

    // ==========================================================================
    // Views
    // ==========================================================================

    pub async fn client_view(&self, query: &ClientQuery, today: NaiveDate) -> ClientView {
        let window = self.renewal_window(today);
        let store = self.store.read().await;
        let matched = query.apply(store.clients());
        let stats = ClientStats::calculate(matched.iter().copied(), &window);
        let rows = matched
            .into_iter()
            .map(|client| client_row(client, &window))
            .collect();
        ClientView { today, rows, stats }
    }

    /// The company overview. Totals cover every company; the company list
    /// and the pending payments follow `query`.
    pub async fn company_view(&self, query: &ClientQuery) -> CompanyView {
        let store = self.store.read().await;
        let clients = store.clients();
        let overview = CompanyOverview::calculate(clients.iter().copied());
        let matched = query.apply(clients);
        CompanyView {
            overview,
            pending: pending_payments(matched.iter().copied())
                .into_iter()
                .map(|client| PendingPayment {
                    pending_amount: client.pending_amount(),
                    client: client.clone(),
                })
                .collect(),
            companies: matched.into_iter().cloned().collect(),
        }
    }

    pub async fn caller_view(&self, query: &CallerQuery) -> CallerView {
        let store = self.store.read().await;
        let names = client_names(&*store);
        let matched = query.apply(store.callers());
        CallerView {
            stats: CallerStats::calculate(matched.iter().copied()),
            rows: matched
                .into_iter()
                .map(|caller| CallerRow {
                    client_name: names.get(&caller.client_id).cloned().unwrap_or_default(),
                    below_target: is_below_target(caller),
                    caller: caller.clone(),
                })
                .collect(),
        }
    }

    pub async fn lead_view(&self, query: &LeadQuery) -> LeadView {
        let store = self.store.read().await;
        let names = client_names(&*store);
        let matched = query.apply(store.leads());
        LeadView {
            stats: LeadStats::calculate(matched.iter().copied()),
            rows: matched
                .into_iter()
                .map(|lead| LeadRow {
                    client_name: names.get(&lead.client_id).cloned().unwrap_or_default(),
                    caller_name: lead
                        .assigned_caller
                        .and_then(|id| store.caller(id).ok())
                        .map(|caller| caller.name.clone()),
                    lead: lead.clone(),
                })
                .collect(),
        }
    }

    /// The active callers a lead can be handed to.
    pub async fn assignable_callers(&self, lead_id: LeadId) -> Result<Vec<Caller>, EngineError> {
        let store = self.store.read().await;
        let client_id = store.lead(lead_id)?.client_id;
        Ok(query::assignable_callers(store.callers(), client_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn integration_view(&self, query: &IntegrationQuery) -> IntegrationView {
        let store = self.store.read().await;
        let names = client_names(&*store);
        let matched = query.apply(store.integrations());
        IntegrationView {
            stats: IntegrationStats::calculate(matched.iter().copied()),
            rows: matched
                .into_iter()
                .map(|integration| IntegrationRow {
                    client_name: names.get(&integration.client_id).cloned().unwrap_or_default(),
                    integration: integration.clone(),
                })
                .collect(),
        }
    }

    pub async fn health_view(&self) -> HealthView {
        let store = self.store.read().await;
        let names = client_names(&*store);
        let reports = store.health();
        HealthView {
            summary: HealthSummary::calculate(reports.iter().copied()),
            rows: reports
                .into_iter()
                .map(|report| HealthRow {
                    client_name: names.get(&report.client_id).cloned().unwrap_or_default(),
                    overall: report.overall(),
                    report: report.clone(),
                })
                .collect(),
        }
    }

    pub async fn activity_view(&self, query: &ActivityQuery) -> ActivityView {
        let store = self.store.read().await;
        let matched = query.apply(store.activity());
        ActivityView {
            stats: ActivityStats::calculate(matched.iter().copied()),
            entries: matched.into_iter().cloned().collect(),
        }
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let window = self.renewal_window(today);
        let store = self.store.read().await;
        let clients = store.clients();

        let mut renewals: Vec<ClientRow> = clients
            .iter()
            .filter(|client| window.contains(client.renewal_date))
            .map(|client| client_row(client, &window))
            .collect();
        renewals.sort_by_key(|row| row.days_to_renewal);

        Dashboard {
            today,
            overview: CompanyOverview::calculate(clients.iter().copied()),
            clients: ClientStats::calculate(clients.iter().copied(), &window),
            callers: CallerStats::calculate(store.callers()),
            leads: LeadStats::calculate(store.leads()),
            integrations: IntegrationStats::calculate(store.integrations()),
            health: HealthSummary::calculate(store.health()),
            renewals,
            alerts: self.alerts(&*store),
            recent_activity: store
                .activity()
                .into_iter()
                .take(RECENT_ACTIVITY)
                .cloned()
                .collect(),
        }
    }

    /// Operational alerts, gated by the `[alerts]` configuration.
    fn alerts(&self, store: &S) -> Vec<Alert> {
        let settings = &self.config.alerts;
        let names = client_names(store);
        let client_name = |id: &ClientId| names.get(id).cloned().unwrap_or_default();
        let mut alerts = Vec::new();

        if settings.integration_failures {
            let failing = IntegrationQuery {
                status: query::Filter::Only(core_types::IntegrationStatus::Error),
                enabled: query::Filter::Only(true),
                ..IntegrationQuery::default()
            };
            for integration in failing.apply(store.integrations()) {
                alerts.push(Alert {
                    kind: ActivityKind::Error,
                    message: format!(
                        "{} for {} is failing to sync",
                        integration.name,
                        client_name(&integration.client_id)
                    ),
                });
            }
        }

        if settings.low_caller_activity {
            for caller in store.callers().into_iter().filter(|c| is_below_target(c)) {
                alerts.push(Alert {
                    kind: ActivityKind::Warning,
                    message: format!(
                        "{} ({}) is at {}/{} calls today",
                        caller.name,
                        client_name(&caller.client_id),
                        caller.calls_today,
                        caller.daily_target.unwrap_or_default()
                    ),
                });
            }
        }

        if settings.lead_flow {
            let waiting = LeadQuery {
                status: query::Filter::Only(LeadStatus::New),
                ..LeadQuery::default()
            };
            let mut per_client: Vec<(ClientId, usize)> = Vec::new();
            for lead in waiting.apply(store.leads()) {
                match per_client.iter_mut().find(|(id, _)| *id == lead.client_id) {
                    Some((_, count)) => *count += 1,
                    None => per_client.push((lead.client_id, 1)),
                }
            }
            for (client_id, count) in per_client {
                alerts.push(Alert {
                    kind: ActivityKind::Info,
                    message: format!(
                        "{} new lead{} awaiting assignment for {}",
                        count,
                        if count == 1 { "" } else { "s" },
                        client_name(&client_id)
                    ),
                });
            }
        }

        if settings.daily_summary {
            let callers = CallerStats::calculate(store.callers());
            alerts.push(Alert {
                kind: ActivityKind::Info,
                message: format!(
                    "Daily summary: {} calls made by {} active callers",
                    callers.calls_today, callers.active
                ),
            });
        }

        alerts
    }
}

fn client_row(client: &Client, window: &RenewalWindow) -> ClientRow {
    ClientRow {
        flags: ClientFlags::evaluate(client, window),
        days_to_renewal: days_until(client.renewal_date, window.today),
        client: client.clone(),
    }
}

fn client_names<S: CrmStore + ?Sized>(store: &S) -> HashMap<ClientId, String> {
    store
        .clients()
        .into_iter()
        .map(|client| (client.id, client.client_name.clone()))
        .collect()
}
