//! Error types for webhook delivery operations.
//!
//! Defines the error conditions a delivery can hit: payload validation
//! failures, network-level failures, HTTP error responses, and rate limits.
//! Errors carry enough context (status, body, violated constraint) for
//! callers to implement their own policy on top; only the rate-limit case
//! is ever retried by this crate, and only once.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Error types for webhook delivery operations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Payload violates a platform limit. Raised before any network I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network-level connectivity failure (DNS, refused connection).
    #[error("network connection failed: {message}")]
    NetworkError {
        /// Error message describing the network failure
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// HTTP response indicated client error (4xx other than 429).
    #[error("client error: HTTP {status_code}")]
    ClientError {
        /// HTTP status code (4xx)
        status_code: u16,
        /// Response body content
        body: String,
    },

    /// HTTP response indicated server error (5xx).
    #[error("server error: HTTP {status_code}")]
    ServerError {
        /// HTTP status code (5xx)
        status_code: u16,
        /// Response body content
        body: String,
    },

    /// Rate limit exceeded with retry guidance.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited {
        /// Server-mandated wait before the next attempt
        retry_after: Duration,
        /// Response body content
        body: String,
    },

    /// Invalid client configuration.
    #[error("invalid client configuration: {message}")]
    ConfigurationError {
        /// Configuration error message
        message: String,
    },

    /// Unexpected internal error.
    #[error("internal delivery error: {message}")]
    InternalError {
        /// Internal error message
        message: String,
    },
}

impl DeliveryError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a client error from an HTTP response.
    pub fn client_error(status_code: u16, body: impl Into<String>) -> Self {
        Self::ClientError { status_code, body: body.into() }
    }

    /// Creates a server error from an HTTP response.
    pub fn server_error(status_code: u16, body: impl Into<String>) -> Self {
        Self::ServerError { status_code, body: body.into() }
    }

    /// Creates a rate limit error with retry guidance.
    pub fn rate_limited(retry_after: Duration, body: impl Into<String>) -> Self {
        Self::RateLimited { retry_after, body: body.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError { message: message.into() }
    }

    /// Returns the HTTP status code for response-derived errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ClientError { status_code, .. } | Self::ServerError { status_code, .. } => {
                Some(*status_code)
            },
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Determines if this error is recovered automatically by the client.
    ///
    /// Only rate limits are: the client retries a 429 exactly once. Every
    /// other failure surfaces to the caller on the first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns the server-mandated wait for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Payload constraint violations, named per limit.
///
/// Each variant corresponds to one of Discord's published payload limits
/// (see [`tannoy_core::limits`]) and carries the offending position and
/// measurement so callers can fix the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Neither content nor embeds are present.
    #[error("notification has no content and no embeds")]
    EmptyNotification,

    /// Top-level content exceeds the platform maximum.
    #[error("content length {length} exceeds maximum of {max}")]
    ContentTooLong {
        /// Measured content length in characters
        length: usize,
        /// Platform maximum
        max: usize,
    },

    /// Username override exceeds the platform maximum.
    #[error("username length {length} exceeds maximum of {max}")]
    UsernameTooLong {
        /// Measured username length in characters
        length: usize,
        /// Platform maximum
        max: usize,
    },

    /// Too many embeds on one notification.
    #[error("embed count {count} exceeds maximum of {max}")]
    TooManyEmbeds {
        /// Number of embeds present
        count: usize,
        /// Platform maximum
        max: usize,
    },

    /// Embed title exceeds the platform maximum.
    #[error("embed {embed} title length {length} exceeds maximum of {max}")]
    TitleTooLong {
        /// Index of the offending embed
        embed: usize,
        /// Measured title length in characters
        length: usize,
        /// Platform maximum
        max: usize,
    },

    /// Embed description exceeds the platform maximum.
    #[error("embed {embed} description length {length} exceeds maximum of {max}")]
    DescriptionTooLong {
        /// Index of the offending embed
        embed: usize,
        /// Measured description length in characters
        length: usize,
        /// Platform maximum
        max: usize,
    },

    /// Embed color is outside the 24-bit RGB range.
    #[error("embed {embed} color {color:#08x} exceeds maximum of {max:#08x}")]
    ColorOutOfRange {
        /// Index of the offending embed
        embed: usize,
        /// Provided color value
        color: u32,
        /// Largest valid color
        max: u32,
    },

    /// Too many fields on one embed.
    #[error("embed {embed} field count {count} exceeds maximum of {max}")]
    TooManyFields {
        /// Index of the offending embed
        embed: usize,
        /// Number of fields present
        count: usize,
        /// Platform maximum
        max: usize,
    },

    /// A field name exceeds the platform maximum.
    #[error("embed {embed} field {field} name length {length} exceeds maximum of {max}")]
    FieldNameTooLong {
        /// Index of the offending embed
        embed: usize,
        /// Index of the offending field
        field: usize,
        /// Measured name length in characters
        length: usize,
        /// Platform maximum
        max: usize,
    },

    /// A field value exceeds the platform maximum.
    #[error("embed {embed} field {field} value length {length} exceeds maximum of {max}")]
    FieldValueTooLong {
        /// Index of the offending embed
        embed: usize,
        /// Index of the offending field
        field: usize,
        /// Measured value length in characters
        length: usize,
        /// Platform maximum
        max: usize,
    },

    /// Combined embed text exceeds the platform maximum.
    #[error("embed {embed} total text length {length} exceeds maximum of {max}")]
    EmbedTooLarge {
        /// Index of the offending embed
        embed: usize,
        /// Combined title, description, and field text length
        length: usize,
        /// Platform maximum
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rate_limits_are_retryable() {
        assert!(DeliveryError::rate_limited(Duration::from_secs(1), "").is_retryable());

        assert!(!DeliveryError::network("connection refused").is_retryable());
        assert!(!DeliveryError::timeout(30).is_retryable());
        assert!(!DeliveryError::client_error(400, "bad request").is_retryable());
        assert!(!DeliveryError::server_error(500, "oops").is_retryable());
        assert!(!DeliveryError::configuration("bad timeout").is_retryable());
        assert!(!DeliveryError::from(ValidationError::EmptyNotification).is_retryable());
    }

    #[test]
    fn rate_limit_retry_after_extracted() {
        let error = DeliveryError::rate_limited(Duration::from_millis(500), "slow down");
        assert_eq!(error.retry_after(), Some(Duration::from_millis(500)));
        assert_eq!(error.status_code(), Some(429));

        assert_eq!(DeliveryError::timeout(30).retry_after(), None);
    }

    #[test]
    fn status_codes_surface_for_http_errors() {
        assert_eq!(DeliveryError::client_error(404, "not found").status_code(), Some(404));
        assert_eq!(DeliveryError::server_error(502, "bad gateway").status_code(), Some(502));
        assert_eq!(DeliveryError::network("refused").status_code(), None);
    }

    #[test]
    fn validation_errors_name_the_constraint() {
        let error = ValidationError::FieldValueTooLong { embed: 2, field: 4, length: 2000, max: 1024 };
        assert_eq!(
            error.to_string(),
            "embed 2 field 4 value length 2000 exceeds maximum of 1024"
        );

        let error = ValidationError::ColorOutOfRange { embed: 0, color: 0x0100_0000, max: 0xFF_FFFF };
        assert!(error.to_string().contains("color"));
    }
}
