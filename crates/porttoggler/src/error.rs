//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors, plus Dashboard failure outcomes, into
//! user-facing errors with actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use porttoggler_api::FailureKind;
use porttoggler_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the Dashboard API at {url}")]
    #[diagnostic(
        code(porttoggler::connection_failed),
        help(
            "Check network access to the Dashboard API.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: porttoggler_api::Error,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(porttoggler::tls_error),
        help("Check ca_cert in your config, or use --insecure (-k) to skip verification.")
    )]
    Tls { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(porttoggler::timeout),
        help("Increase the timeout with --timeout or check Dashboard responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("No API key configured")]
    #[diagnostic(
        code(porttoggler::no_credentials),
        help(
            "Pass --api-key (-A), set MERAKI_DASHBOARD_API_KEY,\n\
             or add api_key = '...' to {path}"
        )
    )]
    NoCredentials { path: String },

    #[error("Invalid API key: {message}")]
    #[diagnostic(
        code(porttoggler::invalid_api_key),
        help("Copy the key from Dashboard again; it must not contain spaces or control characters.")
    )]
    InvalidApiKey { message: String },

    // ── Dashboard ────────────────────────────────────────────────────
    #[error("Dashboard rejected the request for {port} (HTTP {status})")]
    #[diagnostic(code(porttoggler::request_failed))]
    RequestFailed {
        port: String,
        status: u16,
        kind: FailureKind,
        #[help]
        detail: Option<String>,
    },

    #[error("No data returned for {port}")]
    #[diagnostic(
        code(porttoggler::no_data),
        help(
            "Check the following:\n\
             - Is the API key generated on dashboard?\n\
             - Are there typos in switch SN or other attributes?\n\
             - Does API key have access to the switch org (org admins) or network (network admins)?"
        )
    )]
    NoData {
        port: String,
        kind: Option<FailureKind>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(porttoggler::validation),
        help("Check the attribute names and values in the port update file.")
    )]
    Validation(porttoggler_api::Error),

    #[error("Invalid JSON in {path}: {source}")]
    #[diagnostic(code(porttoggler::json), help("The file must hold a single JSON object."))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Config file not found: {path}")]
    #[diagnostic(
        code(porttoggler::no_config),
        help("Create it with one line: api_key = '123456789'")
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(porttoggler::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Aborted")]
    #[diagnostic(code(porttoggler::aborted))]
    Aborted,

    #[error("Could not read confirmation: {0}")]
    #[diagnostic(
        code(porttoggler::prompt),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Prompt(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(porttoggler_api::Error),

    #[error("Could not render output: {0}")]
    Render(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => Self::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::NoCredentials { path } => Self::NoCredentials {
                path: path.display().to_string(),
            },
            other @ ConfigError::Figment(_) => Self::Config(other),
        }
    }
}

impl From<porttoggler_api::Error> for CliError {
    fn from(err: porttoggler_api::Error) -> Self {
        match err {
            porttoggler_api::Error::InvalidApiKey { message } => Self::InvalidApiKey { message },
            porttoggler_api::Error::Tls(message) => Self::Tls { message },
            other if other.is_validation() => Self::Validation(other),
            other => Self::Api(other),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NoCredentials { .. } | Self::InvalidApiKey { .. } => exit_code::AUTH,
            Self::RequestFailed { kind, .. } | Self::NoData { kind: Some(kind), .. } => {
                failure_exit_code(*kind)
            }
            Self::Validation(_) | Self::Json { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

fn failure_exit_code(kind: FailureKind) -> i32 {
    match kind {
        FailureKind::Unauthorized => exit_code::AUTH,
        FailureKind::NotFound => exit_code::NOT_FOUND,
        _ => exit_code::GENERAL,
    }
}
