//! Payload model for Discord webhook notifications.
//!
//! Provides immutable value objects for a notification, its embeds, and
//! embed fields, together with the platform limit constants the delivery
//! layer validates against. Construction normalizes data Discord would
//! reject (empty field values); limit enforcement is deferred to send time
//! so the same model works across differently configured clients.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod limits;
pub mod models;

pub use models::{Embed, EmbedField, Notification};
