//! Webhook delivery client with validation and rate-limit aware retry.
//!
//! This crate sends [`tannoy_core::Notification`] payloads to a Discord
//! webhook endpoint. Every delivery follows the same lifecycle:
//!
//! 1. **Validate** - the payload is checked against Discord's published
//!    limits before any network I/O
//! 2. **Dispatch** - log-only and bypass targets short-circuit without
//!    touching the network
//! 3. **Deliver** - the payload is serialized and POSTed to the webhook URL
//! 4. **Retry** - a 429 response is retried exactly once after honoring the
//!    server-provided `retry_after` delay
//!
//! Any other failure, transport-level or HTTP, propagates to the caller
//! unchanged so callers can layer their own retry or circuit-breaking
//! policy on top.
//!
//! # Example
//!
//! ```no_run
//! use tannoy_core::Notification;
//! use tannoy_delivery::{DeliveryTarget, WebhookClient};
//!
//! # async fn example() -> tannoy_delivery::Result<()> {
//! let target = DeliveryTarget::webhook("https://discord.com/api/webhooks/1/abc");
//! let client = WebhookClient::with_defaults(target)?;
//!
//! client.notify(&Notification::new().content("deploy finished")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The client owns one underlying HTTP connection pool; dropping it
//! releases the pool deterministically.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod validation;

// Re-export main public API
pub use client::{ClientConfig, DeliveryOutcome, DeliveryResponse, DeliveryTarget, WebhookClient};
pub use error::{DeliveryError, Result, ValidationError};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Number of extra delivery attempts allowed after a rate-limit response.
pub const RATE_LIMIT_RETRIES: u32 = 1;
