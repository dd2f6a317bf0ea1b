use crate::filter::{Filter, Query, SearchTerm};
use core_types::{CallerId, ClientId, Lead, LeadSource, LeadStatus};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub client: Filter<ClientId>,
    /// Matched against the lead's name, email and phone.
    pub search: SearchTerm,
    pub status: Filter<LeadStatus>,
    pub source: Filter<LeadSource>,
    pub assigned_caller: Filter<CallerId>,
}

impl Query<Lead> for LeadQuery {
    fn matches(&self, lead: &Lead) -> bool {
        let assigned_ok = match (&self.assigned_caller, &lead.assigned_caller) {
            (Filter::All, _) => true,
            (Filter::Only(expected), Some(actual)) => expected == actual,
            (Filter::Only(_), None) => false,
        };

        assigned_ok
            && self.client.matches(&lead.client_id)
            && self.status.matches(&lead.status)
            && self.source.matches(&lead.source)
            && self.search.matches_any(&[
                lead.name.as_str(),
                lead.email.as_str(),
                lead.phone.as_str(),
            ])
    }
}

/// Pipeline counts for the lead control center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub by_status: BTreeMap<LeadStatus, usize>,
    pub by_source: BTreeMap<LeadSource, usize>,
    pub unassigned: usize,
}

impl LeadStats {
    pub fn calculate<'a, I>(leads: I) -> Self
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut stats = Self::default();
        for lead in leads {
            stats.total += 1;
            *stats.by_status.entry(lead.status).or_default() += 1;
            *stats.by_source.entry(lead.source).or_default() += 1;
            if lead.assigned_caller.is_none() {
                stats.unassigned += 1;
            }
        }
        stats
    }

    pub fn count(&self, status: LeadStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
