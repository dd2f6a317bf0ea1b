use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of values with a stable kebab-case wire name and a
/// human-readable label, plus the `FromStr`/`Display` pair built on them.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stable kebab-case name used in seed files and on the command line.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| CoreError::InvalidInput($kind.to_string(), s.to_string()))
            }
        }
    };
}

wire_enum! {
    /// Where a client sits in the agency's delivery lifecycle.
    ClientStatus, "client status" {
        NewLead => ("new-lead", "New Lead"),
        DealClosed => ("deal-closed", "Deal Closed"),
        WebsiteDevelopment => ("website-development", "Website in Development"),
        Live => ("live", "Live"),
        Maintenance => ("maintenance", "Maintenance"),
        PaymentPending => ("payment-pending", "Payment Pending"),
        Suspended => ("suspended", "Suspended"),
    }
}

wire_enum! {
    ServiceType, "service type" {
        Website => ("website", "Website"),
        SocialMedia => ("social-media", "Social Media"),
        Ads => ("ads", "Ads"),
        Combo => ("combo", "Combo"),
    }
}

wire_enum! {
    PlanType, "plan type" {
        Basic => ("basic", "Basic"),
        Standard => ("standard", "Standard"),
        Pro => ("pro", "Pro"),
        Custom => ("custom", "Custom"),
    }
}

wire_enum! {
    Priority, "priority" {
        High => ("high", "High"),
        Medium => ("medium", "Medium"),
        Low => ("low", "Low"),
    }
}

wire_enum! {
    /// The client-facing payment standing shown in list views.
    PaymentStatus, "payment status" {
        Paid => ("paid", "Paid"),
        Partial => ("partial", "Partial"),
        Pending => ("pending", "Pending"),
    }
}

wire_enum! {
    /// Settlement state of the most recent invoice.
    InvoiceStatus, "invoice status" {
        Paid => ("paid", "Paid"),
        Partial => ("partial", "Partial"),
        Unpaid => ("unpaid", "Unpaid"),
    }
}

wire_enum! {
    CallerStatus, "caller status" {
        Active => ("active", "Active"),
        Disabled => ("disabled", "Disabled"),
    }
}

wire_enum! {
    /// The lead pipeline: new → assigned → follow-up → closed.
    LeadStatus, "lead status" {
        New => ("new", "New"),
        Assigned => ("assigned", "Assigned"),
        FollowUp => ("follow-up", "Follow-up"),
        Closed => ("closed", "Closed"),
    }
}

wire_enum! {
    LeadSource, "lead source" {
        MetaAds => ("meta-ads", "Meta Ads"),
        Website => ("website", "Website Forms"),
        GoogleForms => ("google-forms", "Google Forms"),
        Whatsapp => ("whatsapp", "WhatsApp"),
        Webhook => ("webhook", "Custom Webhook"),
        Manual => ("manual", "Manual Entry"),
    }
}

wire_enum! {
    IntegrationStatus, "integration status" {
        Connected => ("connected", "Connected"),
        Disconnected => ("disconnected", "Disconnected"),
        Error => ("error", "Error"),
    }
}

wire_enum! {
    /// Ordered from best to worst so `max` yields the most severe level.
    HealthLevel, "health level" {
        Healthy => ("healthy", "Healthy"),
        Warning => ("warning", "Warning"),
        Critical => ("critical", "Critical"),
    }
}

impl PaymentStatus {
    /// The payment standing implied by an outstanding balance after a payment.
    pub fn after_payment(pending_is_zero: bool) -> Self {
        if pending_is_zero {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }
}

impl InvoiceStatus {
    pub fn after_payment(pending_is_zero: bool) -> Self {
        if pending_is_zero {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Partial
        }
    }
}
