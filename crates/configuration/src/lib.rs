use crate::error::ConfigError;
use std::io::ErrorKind;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Agency, Alerts, Checkout, Config, Dashboard, Logging, SimulatedBehaviour};

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, then the TOML file at
/// `path` (skipped if it does not exist), then `CONSOLE__*` environment
/// variables, e.g. `CONSOLE__DASHBOARD__SUBMIT_DELAY_MS=0`. A `.env` file in
/// the working directory is read first so it can supply those variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_env_file(Path::new(".env"))?;

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("CONSOLE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// Exports the variables in a `.env` file. A missing file is the normal case;
/// a file that cannot be read or parsed is an error.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::EnvFile {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

/// Rejects settings that would make the console behave nonsensically.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.dashboard.renewal_window_days < 0 {
        return Err(ConfigError::ValidationError(
            "dashboard.renewal_window_days must not be negative".to_string(),
        ));
    }
    let currency = &config.checkout.currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::ValidationError(format!(
            "checkout.currency must be a three-letter ISO code, got '{currency}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.dashboard.renewal_window_days, 7);
        assert_eq!(config.dashboard.submit_delay_ms, 500);
        assert_eq!(config.checkout.currency, "INR");
        assert!(config.alerts.integration_failures);
    }

    #[test]
    fn file_overrides_individual_fields() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[dashboard]\nrenewal_window_days = 14\n\n[checkout]\nmerchant_name = \"Acme\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.dashboard.renewal_window_days, 14);
        // Untouched fields in a partially specified section keep their defaults.
        assert_eq!(config.dashboard.actor, "Admin");
        assert_eq!(config.checkout.merchant_name, "Acme");
        assert_eq!(config.checkout.currency, "INR");
        assert_eq!(config.checkout.behaviour, SimulatedBehaviour::Succeed);
    }

    #[test]
    fn reads_the_simulated_checkout_behaviour() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[checkout]\nbehaviour = \"dismiss\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.checkout.behaviour, SimulatedBehaviour::Dismiss);
    }

    #[test]
    fn missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(&dir.path().join(".env")).is_ok());
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CONSOLE_TEST_UNTERMINATED=\"no closing quote").unwrap();

        let err = load_env_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }

    #[test]
    fn rejects_bad_currency() {
        let mut config = Config::default();
        config.checkout.currency = "rupee".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_negative_window() {
        let mut config = Config::default();
        config.dashboard.renewal_window_days = -1;
        assert!(validate(&config).is_err());
    }
}
