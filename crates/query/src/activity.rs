use crate::filter::{Filter, Query, SearchTerm};
use core_types::ClientId;
use events::{ActivityEntry, ActivityKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// The reports page's log filters.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub kind: Filter<ActivityKind>,
    /// Entries without a client (system-wide actions) only match `All`.
    pub client: Filter<ClientId>,
    /// Matched against the action and the details.
    pub search: SearchTerm,
}

impl Query<ActivityEntry> for ActivityQuery {
    fn matches(&self, entry: &ActivityEntry) -> bool {
        let client_ok = match (&self.client, &entry.client_id) {
            (Filter::All, _) => true,
            (Filter::Only(expected), Some(actual)) => expected == actual,
            (Filter::Only(_), None) => false,
        };

        client_ok
            && self.kind.matches(&entry.kind)
            && self
                .search
                .matches_any(&[entry.action.as_str(), entry.details.as_str()])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    pub total: usize,
    pub by_kind: BTreeMap<ActivityKind, usize>,
}

impl ActivityStats {
    pub fn calculate<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ActivityEntry>,
    {
        let mut stats = Self::default();
        for entry in entries {
            stats.total += 1;
            *stats.by_kind.entry(entry.kind).or_default() += 1;
        }
        stats
    }

    pub fn count(&self, kind: ActivityKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_kind_client_and_text() {
        let nova = ClientId::new();
        let log = vec![
            ActivityEntry::new(ActivityKind::Success, "Integration Connected", "System", Some(nova), "Meta Ads integration connected successfully"),
            ActivityEntry::new(ActivityKind::Error, "Webhook Failed", "System", Some(nova), "Webhook connection timed out"),
            ActivityEntry::new(ActivityKind::Info, "Report Generated", "Admin", None, "Weekly performance report generated"),
        ];

        let errors = ActivityQuery {
            kind: Filter::Only(ActivityKind::Error),
            ..ActivityQuery::default()
        };
        assert_eq!(errors.apply(&log).len(), 1);

        let for_nova = ActivityQuery {
            client: Filter::Only(nova),
            ..ActivityQuery::default()
        };
        assert_eq!(for_nova.apply(&log).len(), 2);

        let webhook = ActivityQuery {
            search: SearchTerm::new("webhook"),
            ..ActivityQuery::default()
        };
        assert_eq!(webhook.apply(&log).len(), 1);

        let stats = ActivityStats::calculate(&log);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count(ActivityKind::Success), 1);
        assert_eq!(stats.count(ActivityKind::Warning), 0);
    }
}
