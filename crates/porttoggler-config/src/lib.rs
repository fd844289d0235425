//! Configuration for porttoggler.
//!
//! A small TOML file (the same `api_key = '...'` line older releases read)
//! merged with `PORTTOGGLER_*` environment variables, plus API key
//! resolution. The CLI layers its own flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use porttoggler_api::{DEFAULT_BASE_URL, TlsMode, TransportConfig};

/// Prefix for environment overrides, e.g. `PORTTOGGLER_API_KEY`.
pub const ENV_PREFIX: &str = "PORTTOGGLER_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("no API key configured (looked in flags, environment and {})", path.display())]
    NoCredentials { path: PathBuf },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Everything porttoggler reads from file and environment.
#[derive(Deserialize)]
pub struct Config {
    /// Dashboard API key (plaintext -- prefer the environment).
    #[serde(default, deserialize_with = "key_text")]
    pub api_key: Option<String>,

    /// Dashboard API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// File the values were read from.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            source: config_path(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("insecure", &self.insecure)
            .field("ca_cert", &self.ca_cert)
            .field("source", &self.source)
            .finish()
    }
}

/// Keys are opaque text, but an all-digit key written without quotes
/// arrives as a number.
fn key_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(Option::<RawKey>::deserialize(de)?.map(|raw| match raw {
        RawKey::Text(text) => text,
        RawKey::Unsigned(n) => n.to_string(),
        RawKey::Signed(n) => n.to_string(),
    }))
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "porttoggler", "porttoggler").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("porttoggler");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `explicit` (which must exist) or the default path
/// (which may not), then apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Some(path) => path.to_path_buf(),
        None => config_path(),
    };

    // Env values are parsed into numbers where they look like one; the key
    // is taken verbatim instead.
    let mut figment = Figment::new()
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["api_key"]));
    if let Ok(key) = std::env::var(format!("{ENV_PREFIX}API_KEY")) {
        figment = figment.merge(Serialized::default("api_key", key));
    }

    let mut config: Config = figment.extract()?;
    config.source = path;
    Ok(config)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Pick the API key: command-line value first, then file/environment.
///
/// Empty strings count as unset.
pub fn resolve_api_key(flag: Option<&str>, config: &Config) -> Result<SecretString, ConfigError> {
    if let Some(key) = flag.filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key.to_owned()));
    }

    if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        path: config.source.clone(),
    })
}

/// Translate the TLS and timeout settings into a [`TransportConfig`].
pub fn transport_config(config: &Config) -> TransportConfig {
    let tls = if config.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = config.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(config.timeout),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_single_quoted_api_key_line() {
        Jail::expect_with(|jail| {
            jail.create_file("api.cfg", "api_key = '123456789'\n")?;
            let config = load_config(Some(Path::new("api.cfg"))).unwrap();

            assert_eq!(config.api_key.as_deref(), Some("123456789"));
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.timeout, 30);
            assert_eq!(config.source, Path::new("api.cfg"));
            Ok(())
        });
    }

    #[test]
    fn unquoted_numeric_key_in_file_is_kept_as_text() {
        Jail::expect_with(|jail| {
            jail.create_file("api.cfg", "api_key = 123456789\n")?;
            let config = load_config(Some(Path::new("api.cfg"))).unwrap();
            assert_eq!(config.api_key.as_deref(), Some("123456789"));
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_env_key_is_taken_verbatim() {
        for raw in ["123456789", "1234e5", "007"] {
            Jail::expect_with(|jail| {
                jail.create_file("api.cfg", "api_key = 'from-file'\n")?;
                jail.set_env("PORTTOGGLER_API_KEY", raw);
                jail.set_env("PORTTOGGLER_TIMEOUT", "5");

                let config = load_config(Some(Path::new("api.cfg"))).unwrap();
                assert_eq!(config.api_key.as_deref(), Some(raw));
                assert_eq!(config.timeout, 5);

                let key = resolve_api_key(None, &config).unwrap();
                assert_eq!(key.expose_secret(), raw);
                Ok(())
            });
        }
    }

    #[test]
    fn reads_transport_settings() {
        let file = write_config(
            "base_url = 'https://n1.meraki.example/api/v0'\ntimeout = 5\ninsecure = true\n",
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://n1.meraki.example/api/v0");

        let transport = transport_config(&config);
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("api.cfg");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { ref path } if path == &missing));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("api_key = \n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn flag_overrides_config_value() {
        let config = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        let key = resolve_api_key(Some("from-flag"), &config).unwrap();
        assert_eq!(key.expose_secret(), "from-flag");

        let key = resolve_api_key(None, &config).unwrap();
        assert_eq!(key.expose_secret(), "from-file");

        let key = resolve_api_key(Some(""), &config).unwrap();
        assert_eq!(key.expose_secret(), "from-file");
    }

    #[test]
    fn missing_key_reports_config_path() {
        let config = Config {
            source: PathBuf::from("/etc/porttoggler.toml"),
            ..Config::default()
        };
        let err = resolve_api_key(None, &config).unwrap_err();
        assert!(err.to_string().contains("/etc/porttoggler.toml"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = Config {
            api_key: Some("super-secret".into()),
            ..Config::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let config = Config {
            ca_cert: Some(PathBuf::from("/tmp/ca.pem")),
            ..Config::default()
        };
        assert!(matches!(
            transport_config(&config).tls,
            TlsMode::CustomCa(ref p) if p == Path::new("/tmp/ca.pem")
        ));
    }
}
