use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; omitted sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agency: Agency,
    pub dashboard: Dashboard,
    pub checkout: Checkout,
    pub alerts: Alerts,
    pub logging: Logging,
}

/// Details of the agency operating the console.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Agency {
    pub name: String,
    pub contact_email: String,
    pub support_email: String,
    pub website: String,
}

/// Parameters for list views and simulated form submissions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    /// Inclusive number of days ahead in which a renewal counts as "soon".
    pub renewal_window_days: i64,
    /// Artificial delay applied before a form submission settles, in milliseconds.
    pub submit_delay_ms: u64,
    /// The name recorded as the actor of operator-initiated activity.
    pub actor: String,
    /// Path of the JSON seed feed. When unset, the built-in feed is used.
    pub seed_path: Option<PathBuf>,
}

/// Settings for the hosted checkout used to collect payments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Checkout {
    /// Publishable key passed to the checkout script.
    pub key_id: String,
    /// The name shown on the checkout sheet.
    pub merchant_name: String,
    /// ISO 4217 currency code. Amounts are sent in the currency's minor unit.
    pub currency: String,
    pub theme_color: String,
    /// Simulated gateway round trip, in milliseconds.
    pub processing_delay_ms: u64,
    /// How the simulated gateway ends every checkout.
    pub behaviour: SimulatedBehaviour,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedBehaviour {
    #[default]
    Succeed,
    /// The customer closes the checkout sheet without paying.
    Dismiss,
    Decline,
}

/// Which operational alerts the dashboard surfaces.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Alerts {
    pub lead_flow: bool,
    pub integration_failures: bool,
    pub low_caller_activity: bool,
    pub daily_summary: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// An `EnvFilter` directive, e.g. `info` or `store=debug,info`.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These let a user omit any section of `config.toml` and still get a working console.

impl Default for Agency {
    fn default() -> Self {
        Self {
            name: "D-Code Studio".to_string(),
            contact_email: "admin@dcode.studio".to_string(),
            support_email: "support@dcode.studio".to_string(),
            website: "https://dcode.studio".to_string(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            renewal_window_days: 7,
            submit_delay_ms: 500,
            actor: "Admin".to_string(),
            seed_path: None,
        }
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            merchant_name: "DCode Nexus Control".to_string(),
            currency: "INR".to_string(),
            theme_color: "#a78bfa".to_string(),
            processing_delay_ms: 2000,
            behaviour: SimulatedBehaviour::Succeed,
        }
    }
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            lead_flow: true,
            integration_failures: true,
            low_caller_activity: true,
            daily_summary: false,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "agency-console.log".to_string(),
        }
    }
}
