use thiserror::Error;

/// Top-level error type for the `porttoggler-api` crate.
///
/// Only local validation and transport failures are errors. Every HTTP
/// response the Dashboard sends back, including 4xx and 5xx, is reported
/// as an [`Outcome`](crate::Outcome) instead.
#[derive(Debug, Error)]
pub enum Error {
    // ── Validation ──────────────────────────────────────────────────
    /// A port attribute has the wrong type or a value outside its allowed set.
    #[error("Invalid value for {field}: expected {allowed}")]
    InvalidArgument { field: String, allowed: String },

    /// A port update document named an attribute the API does not accept.
    #[error("Unknown switch port attribute '{field}'")]
    UnknownField { field: String },

    /// The API key cannot be sent as an HTTP header value.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Base URL that cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    InvalidBaseUrl(String),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::UnknownField { .. } | Self::InvalidApiKey { .. }
        )
    }

    /// Returns `true` if the request timed out in the transport.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the transport could not reach the server.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    pub(crate) fn invalid(field: &str, allowed: &str) -> Self {
        Self::InvalidArgument {
            field: field.to_owned(),
            allowed: allowed.to_owned(),
        }
    }
}
