//! Output formatting for the port detail dump.
//!
//! `text` prints one `key = value` line per attribute, sorted by key;
//! the structured formats go through serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::{Map, Value};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// "enabled" / "disabled", green or red when `color` is on.
pub fn state_label(enabled: bool, color: bool) -> String {
    let label = if enabled { "enabled" } else { "disabled" };
    match (color, enabled) {
        (false, _) => label.to_owned(),
        (true, true) => label.green().bold().to_string(),
        (true, false) => label.red().bold().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render the attributes of one port in the chosen format.
pub fn render_port(format: OutputFormat, port: &Map<String, Value>) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(render_key_values(port)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(port).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(port).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::Yaml => serde_yaml::to_string(port)
            .map(|s| s.trim_end().to_owned())
            .map_err(|e| CliError::Render(e.to_string())),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_key_values(port: &Map<String, Value>) -> String {
    port.iter()
        .map(|(key, value)| format!("{key} = {}", display_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strings print bare, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn port() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "number": 5,
            "name": "uplink",
            "enabled": true,
            "vlan": null,
            "tags": "  core  "
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn text_is_key_value_lines() {
        let text = render_port(OutputFormat::Text, &port()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.contains(&"number = 5"));
        assert!(lines.contains(&"name = uplink"));
        assert!(lines.contains(&"enabled = true"));
        assert!(lines.contains(&"vlan = null"));
        assert!(lines.contains(&"tags =   core  "));
    }

    #[test]
    fn json_formats_round_through_serde() {
        let pretty = render_port(OutputFormat::Json, &port()).unwrap();
        assert!(pretty.contains('\n'));
        let compact = render_port(OutputFormat::JsonCompact, &port()).unwrap();
        assert!(!compact.contains('\n'));

        let a: Value = serde_json::from_str(&pretty).unwrap();
        let b: Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn yaml_has_no_trailing_newline() {
        let yaml = render_port(OutputFormat::Yaml, &port()).unwrap();
        assert!(yaml.contains("name: uplink"));
        assert!(!yaml.ends_with('\n'));
    }

    #[test]
    fn state_label_plain_without_color() {
        assert_eq!(state_label(true, false), "enabled");
        assert_eq!(state_label(false, false), "disabled");
        assert!(state_label(false, true).contains("disabled"));
        assert_ne!(state_label(false, true), "disabled");
    }
}
