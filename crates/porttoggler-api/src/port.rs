//! Switch port addressing and the update request body.
//!
//! [`PortUpdate`] is a record of optional attributes. Only attributes that
//! are `Some` reach the wire, so an all-`None` update serializes to `{}`.
//! Typed fields cannot hold an invalid value; [`PortUpdate::from_json`]
//! validates loosely-typed input (e.g. a JSON file) into that record.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;

// ── Port identifier ─────────────────────────────────────────────────

/// A single port on a single switch: `(serial, port number)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortId {
    serial: String,
    number: String,
}

impl PortId {
    pub fn new(serial: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            number: number.into(),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} port {}", self.serial, self.number)
    }
}

// ── Enumerated attributes ───────────────────────────────────────────

const PORT_TYPE_ALLOWED: &str = r#""access" or "trunk""#;
const STP_GUARD_ALLOWED: &str = r#""disabled", "Root guard", "BPDU guard", or "Loop guard""#;

/// Switch port mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Access,
    Trunk,
}

impl FromStr for PortType {
    type Err = Error;

    /// Exact match only; the API rejects `"Access"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(Self::Access),
            "trunk" => Ok(Self::Trunk),
            _ => Err(Error::invalid("type", PORT_TYPE_ALLOWED)),
        }
    }
}

/// Spanning tree guard setting.
///
/// Matched case-insensitively but sent exactly as the caller spelled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StpGuard(String);

impl StpGuard {
    pub const ALLOWED: [&'static str; 4] = ["disabled", "root guard", "bpdu guard", "loop guard"];

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StpGuard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if Self::ALLOWED.contains(&lower.as_str()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(Error::invalid("stpGuard", STP_GUARD_ALLOWED))
        }
    }
}

// ── Update request ──────────────────────────────────────────────────

/// Desired switch port attributes for a `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Sent as one space-padded string, see [`render_tags`].
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_tags"
    )]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<PortType>,

    /// Integer VLAN id, sent as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_vlan: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_vlans: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub poe_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolation: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rstp_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp_guard: Option<StpGuard>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_policy_number: Option<Value>,
}

impl PortUpdate {
    /// Update that only sets the administrative state.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    /// The JSON object sent as the request body.
    pub fn to_payload(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self)?)
    }

    /// Build an update from a loosely-typed JSON object.
    ///
    /// Keys use the API's camelCase names; `portType` is accepted as an
    /// alias for `type`. Any key outside the known attribute set, or any
    /// value of the wrong type, is rejected.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        let Some(fields) = value.as_object() else {
            return Err(Error::invalid("port update", "a JSON object"));
        };

        let mut update = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "name" => update.name = Some(expect_str(key, value)?.to_owned()),
                "tags" => update.tags = Some(expect_tags(value)?),
                "enabled" => update.enabled = Some(expect_bool(key, value)?),
                "type" | "portType" => {
                    let raw = expect_choice("type", value, PORT_TYPE_ALLOWED)?;
                    update.port_type = Some(raw.parse()?);
                }
                "vlan" => update.vlan = Some(expect_vlan(value)?),
                "voiceVlan" => update.voice_vlan = Some(value.clone()),
                "allowedVlans" => update.allowed_vlans = Some(value.clone()),
                "poeEnabled" => update.poe_enabled = Some(expect_bool(key, value)?),
                "isolation" => update.isolation = Some(expect_bool(key, value)?),
                "rstpEnabled" => update.rstp_enabled = Some(expect_bool(key, value)?),
                "stpGuard" => {
                    let raw = expect_choice(key, value, STP_GUARD_ALLOWED)?;
                    update.stp_guard = Some(raw.parse()?);
                }
                "accessPolicyNumber" => update.access_policy_number = Some(value.clone()),
                other => {
                    return Err(Error::UnknownField {
                        field: other.to_owned(),
                    });
                }
            }
        }
        Ok(update)
    }
}

/// Render tags the way the Dashboard stores them: `"  tag1  tag2  "`.
pub fn render_tags(tags: &[String]) -> String {
    let mut rendered = String::from("  ");
    for tag in tags {
        rendered.push_str(tag);
        rendered.push_str("  ");
    }
    rendered
}

#[allow(clippy::ref_option)]
fn serialize_tags<S: Serializer>(tags: &Option<Vec<String>>, ser: S) -> Result<S::Ok, S::Error> {
    match tags {
        Some(tags) => ser.serialize_str(&render_tags(tags)),
        None => ser.serialize_none(),
    }
}

// ── Loose value checks ──────────────────────────────────────────────

fn expect_bool(field: &str, value: &Value) -> Result<bool, Error> {
    value
        .as_bool()
        .ok_or_else(|| Error::invalid(field, "a boolean (true or false)"))
}

fn expect_str<'a>(field: &str, value: &'a Value) -> Result<&'a str, Error> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid(field, "a string"))
}

/// Like [`expect_str`], but a non-string names the allowed values.
fn expect_choice<'a>(field: &str, value: &'a Value, allowed: &str) -> Result<&'a str, Error> {
    value.as_str().ok_or_else(|| Error::invalid(field, allowed))
}

fn expect_tags(value: &Value) -> Result<Vec<String>, Error> {
    let invalid = || Error::invalid("tags", "a list of strings");
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|tag| tag.as_str().map(str::to_owned).ok_or_else(invalid))
        .collect()
}

fn expect_vlan(value: &Value) -> Result<String, Error> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(Error::invalid("vlan", "an integer VLAN id")),
    }
}
