use chrono::{DateTime, Utc};
use core_types::ClientId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ActivityKind {
    pub const ALL: &'static [ActivityKind] = &[
        ActivityKind::Info,
        ActivityKind::Success,
        ActivityKind::Warning,
        ActivityKind::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Info => "info",
            ActivityKind::Success => "success",
            ActivityKind::Warning => "warning",
            ActivityKind::Error => "error",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = core_types::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                core_types::CoreError::InvalidInput("activity kind".to_string(), s.to_string())
            })
    }
}

/// A single line of the audit trail shown on the reports page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub action: String,
    /// Who performed the action, e.g. "Admin" or "System".
    pub actor: String,
    /// `None` for actions spanning every client.
    pub client_id: Option<ClientId>,
    pub details: String,
}

impl ActivityEntry {
    pub fn new(
        kind: ActivityKind,
        action: impl Into<String>,
        actor: impl Into<String>,
        client_id: Option<ClientId>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            action: action.into(),
            actor: actor.into(),
            client_id,
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// The toast shown to the operator once an action has settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_kind_parses_and_serializes_lowercase() {
        assert_eq!("Warning".parse::<ActivityKind>(), Ok(ActivityKind::Warning));
        assert_eq!(serde_json::to_string(&ActivityKind::Success).unwrap(), "\"success\"");
    }

    #[test]
    fn failure_notifications_are_destructive() {
        let n = Notification::failure("Error", "Failed to add caller. Please try again.");
        assert!(n.is_failure());
        assert!(!Notification::success("Saved", "").is_failure());
    }
}
