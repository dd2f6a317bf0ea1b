//! # Console Events
//!
//! The records the console emits as a side effect of user actions: entries in
//! the activity log and the notifications shown once an action settles.
//!
//! As a Layer 0 crate, it depends only on `core-types`.

pub mod messages;

pub use messages::{ActivityEntry, ActivityKind, Notification, NotificationVariant};
