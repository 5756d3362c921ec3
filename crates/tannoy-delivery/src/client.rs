//! HTTP client for webhook notification delivery.
//!
//! Handles target dispatch (live webhook, log-only, bypass), request
//! construction, response categorization, and the single rate-limit retry.
//! Every delivery attempt runs inside a tracing span carrying a fresh
//! delivery id and the attempt number.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tannoy_core::Notification;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::{
    error::{DeliveryError, Result},
    validation, RATE_LIMIT_RETRIES,
};

/// Wait applied to a 429 response that carries no usable retry guidance.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Largest response body kept verbatim before truncation kicks in.
const MAX_RESPONSE_BODY_SIZE: usize = 64 * 1024;

/// Size of the retained prefix for oversized response bodies.
const MAX_RETAINED_BODY_SIZE: usize = 1024;

/// Configuration for the webhook delivery client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Whether to ask the server to return the created message
    /// (`?wait=true`). When false the server replies `204 No Content`.
    pub wait_for_message: bool,
    /// Username applied when the payload does not set one.
    pub default_username: Option<String>,
    /// Avatar URL applied when the payload does not set one.
    pub default_avatar_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECONDS),
            user_agent: "Tannoy-Webhook-Client/0.1".to_string(),
            wait_for_message: true,
            default_username: None,
            default_avatar_url: None,
        }
    }
}

/// Where notifications are sent.
///
/// The two non-network variants support local development (`LogOnly`) and
/// test suites (`Bypass`); both count as successful deliveries by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// POST payloads to this webhook URL.
    Webhook(String),
    /// Discard payloads silently. Zero network calls, zero log records.
    Bypass,
    /// Log the serialized payload instead of sending it.
    LogOnly,
}

impl DeliveryTarget {
    /// Creates a webhook target from a URL.
    pub fn webhook(url: impl Into<String>) -> Self {
        Self::Webhook(url.into())
    }

    /// Maps the loose string contract of webhook configuration files:
    /// absent means log-only, the literal `"bypass"` disables delivery,
    /// and anything else is a webhook URL.
    pub fn from_option(target: Option<&str>) -> Self {
        match target {
            None => Self::LogOnly,
            Some("bypass") => Self::Bypass,
            Some(url) => Self::Webhook(url.to_string()),
        }
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Webhook(url) => write!(f, "webhook {url}"),
            Self::Bypass => write!(f, "bypass"),
            Self::LogOnly => write!(f, "log-only"),
        }
    }
}

/// Response from a successful webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body (truncated when oversized).
    pub body: String,
    /// Total duration of the request, including the retry wait if any.
    pub duration: Duration,
    /// Whether the request was successful (2xx status).
    pub is_success: bool,
}

/// Outcome of a `notify` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The payload reached the webhook endpoint.
    Delivered(DeliveryResponse),
    /// Log-only target: the payload was logged, nothing was sent.
    LoggedOnly,
    /// Bypass target: the payload was discarded.
    Bypassed,
}

impl DeliveryOutcome {
    /// Returns true when the payload actually went over the wire.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// Returns the HTTP response for delivered outcomes.
    pub fn response(&self) -> Option<&DeliveryResponse> {
        match self {
            Self::Delivered(response) => Some(response),
            _ => None,
        }
    }
}

/// Webhook notification client.
///
/// Owns one underlying HTTP connection pool for its lifetime; dropping the
/// client releases the pool. The client holds no per-call state, so `&self`
/// methods can be shared across tasks.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    target: DeliveryTarget,
    config: ClientConfig,
}

impl WebhookClient {
    /// Creates a new client for the given target.
    ///
    /// Performs no network I/O; the webhook URL is not contacted until
    /// [`notify`](Self::notify) is called.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConfigurationError` if the HTTP transport
    /// cannot be built with the provided settings.
    pub fn new(target: DeliveryTarget, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                DeliveryError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { http, target, config })
    }

    /// Creates a new client with default configuration.
    pub fn with_defaults(target: DeliveryTarget) -> Result<Self> {
        Self::new(target, ClientConfig::default())
    }

    /// The target this client delivers to.
    pub fn target(&self) -> &DeliveryTarget {
        &self.target
    }

    /// Validates and delivers a notification.
    ///
    /// Validation runs against Discord's published limits before any
    /// network I/O, so an over-limit payload never results in a partial
    /// send. A 429 response is retried exactly once after honoring the
    /// server-provided `retry_after`; every other failure propagates
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `Validation` when the payload violates a platform limit
    /// - `RateLimited` when both the first attempt and the single retry hit
    ///   a 429
    /// - `ClientError`/`ServerError` for any other non-2xx response
    /// - `NetworkError`/`Timeout` for transport failures, never retried
    pub async fn notify(&self, notification: &Notification) -> Result<DeliveryOutcome> {
        validation::validate(notification)?;

        let payload = self.apply_defaults(notification);

        match &self.target {
            DeliveryTarget::LogOnly => {
                let serialized = serde_json::to_string(&payload).map_err(|e| {
                    DeliveryError::internal(format!("failed to serialize payload: {e}"))
                })?;
                tracing::info!(payload = %serialized, "log-only target, skipping delivery");
                Ok(DeliveryOutcome::LoggedOnly)
            },
            DeliveryTarget::Bypass => Ok(DeliveryOutcome::Bypassed),
            DeliveryTarget::Webhook(url) => self.deliver(url, &payload).await,
        }
    }

    /// Delivers a payload with the single bounded rate-limit retry.
    async fn deliver(&self, url: &str, payload: &Notification) -> Result<DeliveryOutcome> {
        let delivery_id = Uuid::new_v4();
        let mut attempt = 1;

        loop {
            match self.send_once(url, payload, delivery_id, attempt).await {
                Ok(response) => return Ok(DeliveryOutcome::Delivered(response)),
                Err(error) if error.is_retryable() && attempt <= RATE_LIMIT_RETRIES => {
                    let delay = error.retry_after().unwrap_or(DEFAULT_RETRY_AFTER);
                    tracing::warn!(
                        delivery_id = %delivery_id,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, waiting before the retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                },
                Err(error) => return Err(error),
            }
        }
    }

    /// Issues one POST and categorizes the response.
    async fn send_once(
        &self,
        url: &str,
        payload: &Notification,
        delivery_id: Uuid,
        attempt: u32,
    ) -> Result<DeliveryResponse> {
        let start_time = std::time::Instant::now();

        let span = info_span!("webhook_delivery", delivery_id = %delivery_id, attempt);

        async move {
            tracing::debug!("starting webhook delivery");

            let wait = if self.config.wait_for_message { "true" } else { "false" };

            let response = match self
                .http
                .post(url)
                .query(&[("wait", wait)])
                .json(payload)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    let duration = start_time.elapsed();
                    tracing::warn!(duration_ms = duration.as_millis() as u64, "request failed: {e}");

                    if e.is_timeout() {
                        return Err(DeliveryError::timeout(self.config.timeout.as_secs()));
                    }
                    if e.is_connect() {
                        return Err(DeliveryError::network(format!("connection failed: {e}")));
                    }
                    return Err(DeliveryError::network(e.to_string()));
                },
            };

            let status = response.status();
            let retry_after_header = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let body = match response.bytes().await {
                Ok(bytes) => truncate_body(&bytes),
                Err(e) => {
                    tracing::warn!("failed to read response body: {e}");
                    format!("[failed to read response body: {e}]")
                },
            };

            let duration = start_time.elapsed();
            tracing::debug!(
                status = status.as_u16(),
                duration_ms = duration.as_millis() as u64,
                "received response"
            );

            if status.is_success() {
                tracing::info!("webhook delivered successfully");
                return Ok(DeliveryResponse {
                    status_code: status.as_u16(),
                    body,
                    duration,
                    is_success: true,
                });
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after = extract_retry_after(&body, retry_after_header.as_deref())
                    .unwrap_or(DEFAULT_RETRY_AFTER);
                tracing::warn!(
                    retry_after_ms = retry_after.as_millis() as u64,
                    "rate limited by endpoint"
                );
                return Err(DeliveryError::rate_limited(retry_after, body));
            }

            tracing::warn!(status = status.as_u16(), "error response from endpoint");
            if status.is_client_error() {
                Err(DeliveryError::client_error(status.as_u16(), body))
            } else {
                Err(DeliveryError::server_error(status.as_u16(), body))
            }
        }
        .instrument(span)
        .await
    }

    /// Fills configured defaults into a copy of the payload.
    ///
    /// Payload-level values always win; defaults only cover attributes the
    /// payload leaves unset.
    fn apply_defaults(&self, notification: &Notification) -> Notification {
        let mut payload = notification.clone();
        if payload.username.is_none() {
            payload.username = self.config.default_username.clone();
        }
        if payload.avatar_url.is_none() {
            payload.avatar_url = self.config.default_avatar_url.clone();
        }
        payload
    }
}

/// Truncates oversized response bodies, keeping a readable prefix.
fn truncate_body(bytes: &[u8]) -> String {
    if bytes.len() > MAX_RESPONSE_BODY_SIZE {
        let suffix = "... (truncated)";
        let max_content = MAX_RETAINED_BODY_SIZE - suffix.len();
        let prefix = String::from_utf8_lossy(&bytes[..max_content]);
        format!("{prefix}{suffix}")
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Extracts the rate-limit wait from a 429 response.
///
/// Prefers the fractional `retry_after` seconds in the JSON body (the
/// shape Discord actually sends), then the `Retry-After` header in seconds
/// format, then HTTP-date format. Returns `None` if nothing usable is
/// present.
fn extract_retry_after(body: &str, header: Option<&str>) -> Option<Duration> {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(seconds) = parsed.get("retry_after").and_then(serde_json::Value::as_f64) {
            if seconds.is_finite() && seconds >= 0.0 {
                return Some(Duration::from_secs_f64(seconds));
            }
        }
    }

    let header = header?;

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    if let Ok(date_time) = chrono::DateTime::parse_from_rfc2822(header) {
        let now = chrono::Utc::now();
        let retry_time = date_time.with_timezone(&chrono::Utc);

        if retry_time > now {
            let delta = retry_time.signed_duration_since(now);
            if let Ok(std_delta) = delta.to_std() {
                return Some(std_delta);
            }
        }
        return Some(Duration::ZERO);
    }

    None
}
