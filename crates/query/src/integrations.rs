use crate::filter::{Filter, Query};
use core_types::{ClientId, Integration, IntegrationStatus};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct IntegrationQuery {
    pub client: Filter<ClientId>,
    pub status: Filter<IntegrationStatus>,
    pub enabled: Filter<bool>,
}

impl Query<Integration> for IntegrationQuery {
    fn matches(&self, integration: &Integration) -> bool {
        self.client.matches(&integration.client_id)
            && self.status.matches(&integration.status)
            && self.enabled.matches(&integration.enabled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrationStats {
    pub total: usize,
    pub enabled: usize,
    pub connected: usize,
    pub disconnected: usize,
    pub errored: usize,
}

impl IntegrationStats {
    pub fn calculate<'a, I>(integrations: I) -> Self
    where
        I: IntoIterator<Item = &'a Integration>,
    {
        let mut stats = Self::default();
        for integration in integrations {
            stats.total += 1;
            if integration.enabled {
                stats.enabled += 1;
            }
            match integration.status {
                IntegrationStatus::Connected => stats.connected += 1,
                IntegrationStatus::Disconnected => stats.disconnected += 1,
                IntegrationStatus::Error => stats.errored += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::IntegrationId;

    fn integration(client_id: ClientId, name: &str, enabled: bool, status: IntegrationStatus) -> Integration {
        Integration {
            id: IntegrationId::new(),
            client_id,
            name: name.to_string(),
            enabled,
            status,
            last_sync: None,
        }
    }

    #[test]
    fn filters_and_counts() {
        let client = ClientId::new();
        let integrations = vec![
            integration(client, "Meta Ads", true, IntegrationStatus::Connected),
            integration(client, "Google Forms", false, IntegrationStatus::Disconnected),
            integration(client, "Custom Webhooks", true, IntegrationStatus::Error),
            integration(ClientId::new(), "WhatsApp API", true, IntegrationStatus::Connected),
        ];

        let query = IntegrationQuery {
            client: Filter::Only(client),
            enabled: Filter::Only(true),
            ..IntegrationQuery::default()
        };
        let result = query.apply(&integrations);
        assert_eq!(result.len(), 2);

        let stats = IntegrationStats::calculate(result);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.enabled, 2);
        assert_eq!(stats.connected, 1);
        assert_eq!(stats.errored, 1);
        assert_eq!(stats.disconnected, 0);
    }
}
