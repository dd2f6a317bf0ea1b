use crate::error::StoreError;
use crate::seed::SeedFeed;
use chrono::NaiveDate;
use core_types::{
    Caller, CallerId, CallerStatus, Client, ClientHealth, ClientId, Integration, IntegrationId,
    InvoiceStatus, Lead, LeadId, LeadStatus, PaymentStatus, Priority,
};
use events::ActivityEntry;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The editable fields of a caller, as submitted by the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CallerStatus,
    pub daily_target: Option<u32>,
}

/// Read and write access to the console's records.
///
/// List reads return records in insertion order, except `activity`, which is
/// newest first. Writes keep the denormalised counters on `Client` and
/// `Caller` consistent with the relations they summarise.
pub trait CrmStore: Send + Sync {
    fn clients(&self) -> Vec<&Client>;
    fn client(&self, id: ClientId) -> Result<&Client, StoreError>;
    /// Resolves a client by identifier or by case-insensitive client/business name.
    fn find_client(&self, needle: &str) -> Result<&Client, StoreError>;

    fn callers(&self) -> Vec<&Caller>;
    fn callers_for(&self, client_id: ClientId) -> Vec<&Caller>;
    fn caller(&self, id: CallerId) -> Result<&Caller, StoreError>;
    /// Resolves a caller by identifier, name or email.
    fn find_caller(&self, needle: &str) -> Result<&Caller, StoreError>;

    fn leads(&self) -> Vec<&Lead>;
    fn lead(&self, id: LeadId) -> Result<&Lead, StoreError>;
    /// Resolves a lead by identifier, name or email.
    fn find_lead(&self, needle: &str) -> Result<&Lead, StoreError>;

    fn integrations(&self) -> Vec<&Integration>;
    fn integrations_for(&self, client_id: ClientId) -> Vec<&Integration>;
    fn integration(&self, id: IntegrationId) -> Result<&Integration, StoreError>;

    fn health(&self) -> Vec<&ClientHealth>;
    fn activity(&self) -> Vec<&ActivityEntry>;

    fn insert_client(&mut self, client: Client) -> ClientId;
    fn insert_caller(&mut self, caller: Caller) -> Result<CallerId, StoreError>;
    fn insert_lead(&mut self, lead: Lead) -> Result<LeadId, StoreError>;
    fn update_caller(&mut self, id: CallerId, update: CallerUpdate) -> Result<&Caller, StoreError>;
    /// Deletes a caller. Their open leads return to the `new` stage unassigned.
    fn remove_caller(&mut self, id: CallerId) -> Result<Caller, StoreError>;
    fn assign_lead(
        &mut self,
        lead_id: LeadId,
        caller_id: CallerId,
        priority: Priority,
        notes: Option<String>,
    ) -> Result<&Lead, StoreError>;
    /// Moves a lead to another stage. `assigned` needs a caller already on the
    /// lead; `new` releases the lead from its caller.
    fn set_lead_status(&mut self, lead_id: LeadId, status: LeadStatus) -> Result<&Lead, StoreError>;
    fn record_payment(
        &mut self,
        client_id: ClientId,
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<&Client, StoreError>;
    fn set_integration_enabled(
        &mut self,
        id: IntegrationId,
        enabled: bool,
    ) -> Result<&Integration, StoreError>;
    /// Flips the enabled flag and returns the integration as it now stands.
    fn toggle_integration(&mut self, id: IntegrationId) -> Result<&Integration, StoreError>;
    fn push_activity(&mut self, entry: ActivityEntry);
}

/// A `CrmStore` held entirely in process memory.
///
/// Each entity lives in a map keyed by its identifier, with a parallel vector
/// recording insertion order for stable list views.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    clients: HashMap<ClientId, Client>,
    client_order: Vec<ClientId>,
    callers: HashMap<CallerId, Caller>,
    caller_order: Vec<CallerId>,
    leads: HashMap<LeadId, Lead>,
    lead_order: Vec<LeadId>,
    integrations: HashMap<IntegrationId, Integration>,
    integration_order: Vec<IntegrationId>,
    health: Vec<ClientHealth>,
    /// Oldest first; reversed on read.
    activity: Vec<ActivityEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a seed feed, resolving seed keys to identifiers.
    ///
    /// Every reference in the feed must resolve; client caller counts are
    /// derived from the seeded callers.
    pub fn from_seed(feed: SeedFeed) -> Result<Self, StoreError> {
        let mut store = Self::new();
        let mut client_keys: HashMap<String, ClientId> = HashMap::new();
        let mut caller_keys: HashMap<String, CallerId> = HashMap::new();

        for seed in feed.clients {
            let id = ClientId::new();
            if client_keys.insert(seed.key.clone(), id).is_some() {
                return Err(StoreError::DuplicateKey { kind: "client", key: seed.key });
            }
            store.insert_client(Client {
                id,
                client_name: seed.client_name,
                business_name: seed.business_name,
                email: seed.email,
                phone: seed.phone,
                status: seed.status,
                service_type: seed.service_type,
                plan_type: seed.plan_type,
                priority: seed.priority,
                payment_status: seed.payment_status,
                renewal_date: seed.renewal_date,
                total_bill_amount: seed.total_bill_amount,
                amount_paid: seed.amount_paid,
                last_invoice_status: seed.last_invoice_status,
                last_payment_amount: seed.last_payment_amount,
                last_payment_date: seed.last_payment_date,
                total_leads: seed.total_leads,
                total_callers: 0,
                calls_today: seed.calls_today,
                last_activity: seed.last_activity,
            });
        }

        let resolve_client = |kind: &'static str, key: &str| {
            client_keys
                .get(key)
                .copied()
                .ok_or_else(|| StoreError::DanglingReference { kind, key: key.to_string() })
        };

        for seed in feed.callers {
            let client_id = resolve_client("caller", &seed.client)?;
            let id = CallerId::new();
            if caller_keys.insert(seed.key.clone(), id).is_some() {
                return Err(StoreError::DuplicateKey { kind: "caller", key: seed.key });
            }
            store.insert_caller(Caller {
                id,
                client_id,
                name: seed.name,
                email: seed.email,
                phone: seed.phone,
                status: seed.status,
                leads_assigned: seed.leads_assigned,
                calls_today: seed.calls_today,
                daily_target: seed.daily_target,
            })?;
        }

        for seed in feed.leads {
            let client_id = resolve_client("lead", &seed.client)?;
            let assigned_caller = match &seed.caller {
                Some(key) => Some(caller_keys.get(key).copied().ok_or_else(|| {
                    StoreError::DanglingReference { kind: "lead", key: key.clone() }
                })?),
                None => None,
            };
            store.insert_lead(Lead {
                id: LeadId::new(),
                client_id,
                name: seed.name,
                email: seed.email,
                phone: seed.phone,
                source: seed.source,
                status: seed.status,
                priority: seed.priority,
                assigned_caller,
                notes: None,
                created_at: seed.created_at,
            })?;
        }

        for seed in feed.integrations {
            let client_id = resolve_client("integration", &seed.client)?;
            let id = IntegrationId::new();
            store.integration_order.push(id);
            store.integrations.insert(
                id,
                Integration {
                    id,
                    client_id,
                    name: seed.name,
                    enabled: seed.enabled,
                    status: seed.status,
                    last_sync: seed.last_sync,
                },
            );
        }

        for seed in feed.health {
            let client_id = resolve_client("health report", &seed.client)?;
            store.health.push(ClientHealth {
                client_id,
                uptime_pct: seed.uptime_pct,
                last_sync: seed.last_sync,
                metrics: seed.metrics,
            });
        }

        let mut activity = feed.activity;
        activity.sort_by_key(|entry| entry.timestamp);
        for seed in activity {
            let client_id = match &seed.client {
                Some(key) => Some(resolve_client("activity entry", key)?),
                None => None,
            };
            store.push_activity(ActivityEntry {
                timestamp: seed.timestamp,
                kind: seed.kind,
                action: seed.action,
                actor: seed.actor,
                client_id,
                details: seed.details,
            });
        }

        tracing::info!(
            clients = store.client_order.len(),
            callers = store.caller_order.len(),
            leads = store.lead_order.len(),
            integrations = store.integration_order.len(),
            "Seed feed loaded."
        );
        Ok(store)
    }

    fn client_mut(&mut self, id: ClientId) -> Result<&mut Client, StoreError> {
        self.clients
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    fn caller_mut(&mut self, id: CallerId) -> Result<&mut Caller, StoreError> {
        self.callers
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("caller", id))
    }

    fn lead_mut(&mut self, id: LeadId) -> Result<&mut Lead, StoreError> {
        self.leads
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("lead", id))
    }
}

/// Picks the single record matching `needle`, either by identifier or by any
/// of the names `names` yields for it.
fn resolve_one<'a, T, Id>(
    kind: &'static str,
    needle: &str,
    records: Vec<&'a T>,
    id_of: impl Fn(&T) -> Id,
    names: impl Fn(&T) -> Vec<&str>,
) -> Result<&'a T, StoreError>
where
    Id: std::str::FromStr + PartialEq,
{
    let needle = needle.trim();
    if let Ok(id) = needle.parse::<Id>() {
        if let Some(record) = records.iter().copied().find(|r| id_of(r) == id) {
            return Ok(record);
        }
    }

    let mut matches = records
        .into_iter()
        .filter(|r| names(r).iter().any(|name| name.eq_ignore_ascii_case(needle)));
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record),
        (Some(_), Some(_)) => Err(StoreError::Ambiguous { kind, needle: needle.to_string() }),
        (None, _) => Err(StoreError::not_found(kind, needle)),
    }
}

fn ordered<'a, K, V>(order: &[K], map: &'a HashMap<K, V>) -> Vec<&'a V>
where
    K: std::hash::Hash + Eq,
{
    order.iter().filter_map(|id| map.get(id)).collect()
}

impl CrmStore for InMemoryStore {
    fn clients(&self) -> Vec<&Client> {
        ordered(&self.client_order, &self.clients)
    }

    fn client(&self, id: ClientId) -> Result<&Client, StoreError> {
        self.clients
            .get(&id)
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    fn find_client(&self, needle: &str) -> Result<&Client, StoreError> {
        resolve_one("client", needle, self.clients(), |c| c.id, |c| {
            vec![c.client_name.as_str(), c.business_name.as_str()]
        })
    }

    fn callers(&self) -> Vec<&Caller> {
        ordered(&self.caller_order, &self.callers)
    }

    fn callers_for(&self, client_id: ClientId) -> Vec<&Caller> {
        self.callers()
            .into_iter()
            .filter(|c| c.client_id == client_id)
            .collect()
    }

    fn caller(&self, id: CallerId) -> Result<&Caller, StoreError> {
        self.callers
            .get(&id)
            .ok_or_else(|| StoreError::not_found("caller", id))
    }

    fn find_caller(&self, needle: &str) -> Result<&Caller, StoreError> {
        resolve_one("caller", needle, self.callers(), |c| c.id, |c| {
            vec![c.name.as_str(), c.email.as_str()]
        })
    }

    fn leads(&self) -> Vec<&Lead> {
        ordered(&self.lead_order, &self.leads)
    }

    fn lead(&self, id: LeadId) -> Result<&Lead, StoreError> {
        self.leads
            .get(&id)
            .ok_or_else(|| StoreError::not_found("lead", id))
    }

    fn find_lead(&self, needle: &str) -> Result<&Lead, StoreError> {
        resolve_one("lead", needle, self.leads(), |l| l.id, |l| {
            vec![l.name.as_str(), l.email.as_str()]
        })
    }

    fn integrations(&self) -> Vec<&Integration> {
        ordered(&self.integration_order, &self.integrations)
    }

    fn integrations_for(&self, client_id: ClientId) -> Vec<&Integration> {
        self.integrations()
            .into_iter()
            .filter(|i| i.client_id == client_id)
            .collect()
    }

    fn integration(&self, id: IntegrationId) -> Result<&Integration, StoreError> {
        self.integrations
            .get(&id)
            .ok_or_else(|| StoreError::not_found("integration", id))
    }

    fn health(&self) -> Vec<&ClientHealth> {
        self.health.iter().collect()
    }

    fn activity(&self) -> Vec<&ActivityEntry> {
        self.activity.iter().rev().collect()
    }

    fn insert_client(&mut self, client: Client) -> ClientId {
        let id = client.id;
        if self.clients.insert(id, client).is_none() {
            self.client_order.push(id);
        }
        tracing::debug!(client_id = %id, "Client stored.");
        id
    }

    fn insert_caller(&mut self, caller: Caller) -> Result<CallerId, StoreError> {
        let id = caller.id;
        let client = self.client_mut(caller.client_id)?;
        client.total_callers += 1;

        if let Some(previous) = self.callers.insert(id, caller) {
            // Re-inserting under the same id replaces the record without double counting.
            if let Ok(client) = self.client_mut(previous.client_id) {
                client.total_callers = client.total_callers.saturating_sub(1);
            }
        } else {
            self.caller_order.push(id);
        }
        tracing::debug!(caller_id = %id, "Caller stored.");
        Ok(id)
    }

    fn insert_lead(&mut self, lead: Lead) -> Result<LeadId, StoreError> {
        self.client(lead.client_id)?;
        if let Some(caller_id) = lead.assigned_caller {
            let caller = self.caller(caller_id)?;
            if caller.client_id != lead.client_id {
                return Err(StoreError::CallerNotEligible {
                    caller: caller.name.clone(),
                    reason: "the caller works for a different client".to_string(),
                });
            }
        }

        let id = lead.id;
        if self.leads.insert(id, lead).is_none() {
            self.lead_order.push(id);
        }
        Ok(id)
    }

    fn update_caller(&mut self, id: CallerId, update: CallerUpdate) -> Result<&Caller, StoreError> {
        let caller = self.caller_mut(id)?;
        caller.name = update.name;
        caller.email = update.email;
        caller.phone = update.phone;
        caller.status = update.status;
        caller.daily_target = update.daily_target;
        Ok(caller)
    }

    fn remove_caller(&mut self, id: CallerId) -> Result<Caller, StoreError> {
        let caller = self
            .callers
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("caller", id))?;
        self.caller_order.retain(|c| *c != id);

        let mut released = 0usize;
        for lead in self.leads.values_mut() {
            if lead.assigned_caller == Some(id) {
                lead.assigned_caller = None;
                if lead.status == LeadStatus::Assigned {
                    lead.status = LeadStatus::New;
                }
                released += 1;
            }
        }

        if let Ok(client) = self.client_mut(caller.client_id) {
            client.total_callers = client.total_callers.saturating_sub(1);
        }
        tracing::debug!(caller_id = %id, released, "Caller removed.");
        Ok(caller)
    }

    fn assign_lead(
        &mut self,
        lead_id: LeadId,
        caller_id: CallerId,
        priority: Priority,
        notes: Option<String>,
    ) -> Result<&Lead, StoreError> {
        let lead = self.lead(lead_id)?;
        let previous = lead.assigned_caller;
        let caller = self.caller(caller_id)?;

        if caller.client_id != lead.client_id {
            return Err(StoreError::CallerNotEligible {
                caller: caller.name.clone(),
                reason: "the caller works for a different client".to_string(),
            });
        }
        if !caller.is_active() {
            return Err(StoreError::CallerNotEligible {
                caller: caller.name.clone(),
                reason: "the caller is disabled".to_string(),
            });
        }

        if previous != Some(caller_id) {
            if let Some(previous) = previous.and_then(|id| self.callers.get_mut(&id)) {
                previous.leads_assigned = previous.leads_assigned.saturating_sub(1);
            }
            self.caller_mut(caller_id)?.leads_assigned += 1;
        }

        let lead = self.lead_mut(lead_id)?;
        lead.assigned_caller = Some(caller_id);
        lead.status = LeadStatus::Assigned;
        lead.priority = priority;
        lead.notes = notes;
        Ok(lead)
    }

    fn set_lead_status(&mut self, lead_id: LeadId, status: LeadStatus) -> Result<&Lead, StoreError> {
        let lead = self.lead(lead_id)?;
        let owner = lead.assigned_caller;
        if status == LeadStatus::Assigned && owner.is_none() {
            return Err(StoreError::NoCallerAssigned(lead.name.clone()));
        }

        if status == LeadStatus::New {
            if let Some(caller) = owner.and_then(|id| self.callers.get_mut(&id)) {
                caller.leads_assigned = caller.leads_assigned.saturating_sub(1);
            }
        }

        let lead = self.lead_mut(lead_id)?;
        if status == LeadStatus::New {
            lead.assigned_caller = None;
        }
        lead.status = status;
        Ok(lead)
    }

    fn record_payment(
        &mut self,
        client_id: ClientId,
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<&Client, StoreError> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::InvalidAmount(amount));
        }

        let client = self.client_mut(client_id)?;
        client.amount_paid += amount;
        client.last_payment_amount = amount;
        client.last_payment_date = Some(today);

        let settled = client.pending_amount().is_zero();
        client.payment_status = PaymentStatus::after_payment(settled);
        client.last_invoice_status = InvoiceStatus::after_payment(settled);

        tracing::info!(
            client_id = %client_id,
            %amount,
            pending = %client.pending_amount(),
            "Payment recorded."
        );
        Ok(client)
    }

    fn set_integration_enabled(
        &mut self,
        id: IntegrationId,
        enabled: bool,
    ) -> Result<&Integration, StoreError> {
        let integration = self
            .integrations
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("integration", id))?;
        integration.enabled = enabled;
        Ok(integration)
    }

    fn toggle_integration(&mut self, id: IntegrationId) -> Result<&Integration, StoreError> {
        let enabled = self.integration(id)?.enabled;
        self.set_integration_enabled(id, !enabled)
    }

    fn push_activity(&mut self, entry: ActivityEntry) {
        self.activity.push(entry);
    }
}
