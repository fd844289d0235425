//! Resolve effective settings from flags layered over the config crate.
//!
//! Priority: CLI flags > `PORTTOGGLER_*` env > config file > defaults.

use secrecy::SecretString;
use tracing::debug;

use porttoggler_api::{TlsMode, TransportConfig};
use porttoggler_config::{Config, load_config, resolve_api_key, transport_config};

use crate::cli::Cli;
use crate::error::CliError;

/// Everything a command needs to talk to the Dashboard.
#[derive(Debug)]
pub struct Settings {
    pub api_key: SecretString,
    pub base_url: String,
    pub transport: TransportConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let mut config = load_config(cli.config.as_deref())?;
        debug!(source = %config.source.display(), "loaded config");
        apply_overrides(cli, &mut config);

        Ok(Self {
            api_key: resolve_api_key(cli.api_key.as_deref(), &config)?,
            base_url: config.base_url.clone(),
            transport: transport_config(&config),
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.transport.timeout.as_secs()
    }
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(ref url) = cli.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(secs) = cli.timeout {
        config.timeout = secs;
    }
    if cli.insecure {
        config.insecure = true;
    }
}

/// `true` when TLS verification is off, for a one-time warning.
pub fn is_insecure(transport: &TransportConfig) -> bool {
    matches!(transport.tls, TlsMode::DangerAcceptInvalid)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let base = ["porttoggler", "--serialnumber", "Q2XX", "--switchport", "1", "--action", "status"];
        Cli::try_parse_from(base.iter().chain(args)).unwrap()
    }

    #[test]
    fn flags_override_config_values() {
        let cli = parse(&["--base-url", "http://localhost:9/api/v0", "--timeout", "3", "-k"]);
        let mut config = Config::default();
        apply_overrides(&cli, &mut config);

        assert_eq!(config.base_url, "http://localhost:9/api/v0");
        let transport = transport_config(&config);
        assert_eq!(transport.timeout, Duration::from_secs(3));
        assert!(is_insecure(&transport));
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let cli = parse(&[]);
        let mut config = Config {
            timeout: 12,
            ..Config::default()
        };
        apply_overrides(&cli, &mut config);

        assert_eq!(config.timeout, 12);
        assert!(!config.insecure);
        assert_eq!(config.base_url, porttoggler_api::DEFAULT_BASE_URL);
    }
}
