use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No {kind} matches '{id}'.")]
    NotFound { kind: &'static str, id: String },

    #[error("More than one {kind} matches '{needle}'; use the identifier instead.")]
    Ambiguous { kind: &'static str, needle: String },

    #[error("Seed {kind} refers to unknown key '{key}'.")]
    DanglingReference { kind: &'static str, key: String },

    #[error("Seed contains the {kind} key '{key}' more than once.")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("Caller '{caller}' cannot take this lead: {reason}")]
    CallerNotEligible { caller: String, reason: String },

    #[error("Lead '{0}' has no caller; assign one to move it to the assigned stage.")]
    NoCallerAssigned(String),

    #[error("Payment amount must be greater than zero, got {0}.")]
    InvalidAmount(Decimal),

    #[error("Failed to read seed file {path}: {source}")]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during seed deserialization: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
