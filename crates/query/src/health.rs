use core_types::{ClientHealth, HealthLevel};
use rust_decimal::Decimal;
use serde::Serialize;

/// The system overview cards of the health monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    /// Mean uptime across clients; `None` when there are no clients.
    pub average_uptime_pct: Option<Decimal>,
}

impl HealthSummary {
    pub fn calculate<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a ClientHealth>,
    {
        let mut summary = Self::default();
        let mut uptime_sum = Decimal::ZERO;
        let mut count = 0u32;

        for report in reports {
            match report.overall() {
                HealthLevel::Healthy => summary.healthy += 1,
                HealthLevel::Warning => summary.warning += 1,
                HealthLevel::Critical => summary.critical += 1,
            }
            uptime_sum += report.uptime_pct;
            count += 1;
        }

        if count > 0 {
            summary.average_uptime_pct = Some((uptime_sum / Decimal::from(count)).round_dp(2));
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.healthy + self.warning + self.critical
    }
}
