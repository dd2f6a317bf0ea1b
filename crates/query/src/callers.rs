use crate::filter::{Filter, Query, SearchTerm};
use core_types::{Caller, CallerStatus, ClientId};
use serde::Serialize;

/// The caller list of one company, or of every company when `client` is `All`.
#[derive(Debug, Clone, Default)]
pub struct CallerQuery {
    pub client: Filter<ClientId>,
    /// Matched against the caller's name and email.
    pub search: SearchTerm,
    pub status: Filter<CallerStatus>,
}

impl CallerQuery {
    pub fn for_client(client_id: ClientId) -> Self {
        Self {
            client: Filter::Only(client_id),
            ..Self::default()
        }
    }
}

impl Query<Caller> for CallerQuery {
    fn matches(&self, caller: &Caller) -> bool {
        self.client.matches(&caller.client_id)
            && self
                .search
                .matches_any(&[caller.name.as_str(), caller.email.as_str()])
            && self.status.matches(&caller.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallerStats {
    pub total: usize,
    pub active: usize,
    pub leads_assigned: u64,
    pub calls_today: u64,
    /// Active callers with a daily target they have not reached yet.
    pub below_target: usize,
}

impl CallerStats {
    pub fn calculate<'a, I>(callers: I) -> Self
    where
        I: IntoIterator<Item = &'a Caller>,
    {
        callers.into_iter().fold(Self::default(), |mut stats, caller| {
            stats.total += 1;
            if caller.is_active() {
                stats.active += 1;
            }
            if is_below_target(caller) {
                stats.below_target += 1;
            }
            stats.leads_assigned += u64::from(caller.leads_assigned);
            stats.calls_today += u64::from(caller.calls_today);
            stats
        })
    }
}

/// Callers a lead of `client_id` may be assigned to: the client's active callers.
pub fn assignable_callers<'a, I>(callers: I, client_id: ClientId) -> Vec<&'a Caller>
where
    I: IntoIterator<Item = &'a Caller>,
{
    CallerQuery {
        status: Filter::Only(CallerStatus::Active),
        ..CallerQuery::for_client(client_id)
    }
    .apply(callers)
}

/// An active caller who has made fewer calls today than their daily target.
/// Callers without a target are never below it.
pub fn is_below_target(caller: &Caller) -> bool {
    caller.is_active()
        && caller
            .daily_target
            .is_some_and(|target| caller.calls_today < target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CallerId;

    fn caller(client_id: ClientId, name: &str, status: CallerStatus) -> Caller {
        Caller {
            id: CallerId::new(),
            client_id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+91 90000 00000".to_string(),
            status,
            leads_assigned: 12,
            calls_today: 20,
            daily_target: Some(40),
        }
    }

    #[test]
    fn scopes_to_one_client() {
        let techstart = ClientId::new();
        let nova = ClientId::new();
        let callers = vec![
            caller(techstart, "John Smith", CallerStatus::Active),
            caller(nova, "Priya Patel", CallerStatus::Active),
            caller(techstart, "Amit Kumar", CallerStatus::Disabled),
        ];

        let result = CallerQuery::for_client(techstart).apply(&callers);
        let names: Vec<_> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["John Smith", "Amit Kumar"]);
    }

    #[test]
    fn search_covers_name_and_email() {
        let client = ClientId::new();
        let mut callers = vec![
            caller(client, "John Smith", CallerStatus::Active),
            caller(client, "Sarah Lee", CallerStatus::Active),
        ];
        callers[1].email = "s.lee@callteam.in".to_string();

        let query = CallerQuery {
            search: SearchTerm::new("callteam"),
            ..CallerQuery::default()
        };
        let result = query.apply(&callers);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Sarah Lee");
    }

    #[test]
    fn only_active_callers_of_the_client_are_assignable() {
        let client = ClientId::new();
        let other = ClientId::new();
        let callers = vec![
            caller(client, "John Smith", CallerStatus::Active),
            caller(client, "Amit Kumar", CallerStatus::Disabled),
            caller(other, "Priya Patel", CallerStatus::Active),
        ];

        let eligible = assignable_callers(&callers, client);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].name, "John Smith");
    }

    #[test]
    fn stats_sum_leads_and_calls() {
        let client = ClientId::new();
        let mut callers = vec![
            caller(client, "John Smith", CallerStatus::Active),
            caller(client, "Amit Kumar", CallerStatus::Disabled),
        ];
        callers[0].calls_today = 45;

        let stats = CallerStats::calculate(&callers);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.leads_assigned, 24);
        assert_eq!(stats.calls_today, 65);
        assert_eq!(stats.below_target, 0);

        assert_eq!(CallerStats::calculate(&Vec::<Caller>::new()), CallerStats::default());
    }

    #[test]
    fn below_target_requires_an_active_caller_with_a_target() {
        let client = ClientId::new();
        let mut c = caller(client, "John Smith", CallerStatus::Active);
        assert!(is_below_target(&c));

        c.daily_target = None;
        assert!(!is_below_target(&c));

        c.daily_target = Some(10);
        c.status = CallerStatus::Disabled;
        c.calls_today = 0;
        assert!(!is_below_target(&c));
    }
}
