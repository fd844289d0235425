//! Clap derive structures for the `porttoggler` CLI.
//!
//! Deliberately flat: one invocation, one port, one action.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const EXAMPLES: &str = "\
Examples:
  porttoggler --api-key 123456789 --serialnumber A1B2C3D4 --switchport 5 --action disable
  porttoggler -A 123456789 -SN A1B2C3D4 -SP 5 --action status
  porttoggler --config api.cfg --serialnumber A1B2C3D4 --switchport 5 --action enable
  porttoggler -SN A1B2C3D4 -SP 5 --action update --from-file port.json

The config file holds one line: api_key = '123456789'
--api-key always takes precedence over the key in the file.

Disabling an uplink or other active port will cut off whatever is behind it.";

// ── Top-Level CLI ────────────────────────────────────────────────────

/// porttoggler -- enable, disable, or inspect one Meraki switch port
#[derive(Debug, Parser)]
#[command(
    name = "porttoggler",
    version,
    about = "Enable, disable, or inspect a Meraki switch port",
    long_about = "Enable, disable, or inspect a single switch port through the Meraki Dashboard API.\n\n\
        Especially useful for stacking ports, which can only be disabled remotely.",
    after_long_help = EXAMPLES
)]
pub struct Cli {
    /// Dashboard API key
    #[arg(long, short = 'A', env = "MERAKI_DASHBOARD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file to read the API key (and other settings) from
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Serial number of the switch (also -SN)
    #[arg(
        long = "serialnumber",
        visible_alias = "serial-number",
        value_name = "SERIAL",
        required_unless_present = "completions"
    )]
    pub serial_number: Option<String>,

    /// Switch port to act on (also -SP)
    #[arg(
        long = "switchport",
        value_name = "PORT",
        required_unless_present = "completions"
    )]
    pub switchport: Option<String>,

    /// What to do with the port
    #[arg(long, value_enum, required_unless_present = "completions")]
    pub action: Option<Action>,

    /// JSON object of port attributes to apply (with --action update)
    #[arg(long, value_name = "FILE", required_if_eq("action", "update"))]
    pub from_file: Option<PathBuf>,

    /// Skip the confirmation prompt when disabling
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Output format for port details
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Dashboard API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

// ── Enums ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Administratively enable the port
    Enable,
    /// Administratively disable the port (asks first)
    Disable,
    /// Show the port's current configuration
    Status,
    /// Apply the attributes from --from-file
    Update,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// `key = value` lines (default)
    Text,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
