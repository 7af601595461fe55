//! Normalized ExtremeCloud IQ configuration, as handed over by the extractor.
//!
//! The extractor flattens XIQ's API objects (or a JSON export) into the
//! records below. Several key spellings are in circulation; each record reads
//! all of them and prefers the canonical key when more than one is present.
//! Loosely typed numeric fields are kept as raw JSON values and interpreted by
//! the validators during conversion.
//!
//! List elements are read one at a time. An element that does not have the
//! shape of its record lands in [`NormalizedSourceConfig::rejected`] and the
//! rest of the list is still read.

use std::fs;
use std::path::Path;

use edge_schema::{json_type_name, ObjectKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::warnings::record_label;

/// Input that cannot be converted at all.
///
/// Per-record problems never produce this error; they become warnings.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read source file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("source configuration must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("{key} must be a list, found {found}")]
    NotAList {
        key: &'static str,
        found: &'static str,
    },
    #[error("malformed source configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A list element that could not be read as its record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub object: ObjectKind,
    /// The element's `name`, or its list position.
    pub label: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSourceConfig {
    pub ssids: Vec<SsidRecord>,
    pub vlans: Vec<VlanRecord>,
    pub authentication_servers: Vec<AuthServerRecord>,
    pub rate_limiters: Vec<RateLimiterRecord>,
    pub cos_policies: Vec<CosPolicyRecord>,
    pub devices: Vec<DeviceRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl NormalizedSourceConfig {
    /// Build from an already parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, SourceError> {
        let mut doc = match value {
            Value::Object(doc) => doc,
            other => return Err(SourceError::NotAnObject(json_type_name(&other))),
        };
        let mut rejected = Vec::new();
        Ok(Self {
            ssids: take_list(&mut doc, &["ssids"], ObjectKind::Service, &mut rejected)?,
            vlans: take_list(&mut doc, &["vlans"], ObjectKind::Topology, &mut rejected)?,
            authentication_servers: take_list(
                &mut doc,
                &["authentication_servers", "authentication", "radius_servers"],
                ObjectKind::AaaPolicy,
                &mut rejected,
            )?,
            rate_limiters: take_list(
                &mut doc,
                &["rate_limiters"],
                ObjectKind::RateLimiter,
                &mut rejected,
            )?,
            cos_policies: take_list(
                &mut doc,
                &["cos_policies"],
                ObjectKind::CosPolicy,
                &mut rejected,
            )?,
            devices: take_list(&mut doc, &["devices"], ObjectKind::ApConfig, &mut rejected)?,
            rejected,
        })
    }

    pub fn from_slice(json: &[u8]) -> Result<Self, SourceError> {
        let value: Value = serde_json::from_slice(json)?;
        Self::from_value(value)
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let bytes = fs::read(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_slice(&bytes)
    }
}

/// Remove the first non-null list found under `keys` and read its elements.
///
/// Absent and null lists are empty.
fn take_list<T: DeserializeOwned>(
    doc: &mut Map<String, Value>,
    keys: &[&'static str],
    object: ObjectKind,
    rejected: &mut Vec<RejectedRecord>,
) -> Result<Vec<T>, SourceError> {
    let found = keys.iter().find_map(|key| match doc.remove(*key) {
        None | Some(Value::Null) => None,
        Some(raw) => Some((*key, raw)),
    });
    let Some((key, raw)) = found else {
        return Ok(Vec::new());
    };
    let items = match raw {
        Value::Array(items) => items,
        other => {
            return Err(SourceError::NotAList {
                key,
                found: json_type_name(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let label = record_label(item.get("name").and_then(Value::as_str), key, index);
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::debug!(key, index, %err, "unreadable source record");
                rejected.push(RejectedRecord {
                    object,
                    label,
                    error: err.to_string(),
                });
            }
        }
    }
    Ok(records)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "SsidFields")]
pub struct SsidRecord {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub broadcast: Option<bool>,
    pub vlan_id: Option<Value>,
    pub security: Option<SecurityRecord>,
    pub fast_roaming: Option<bool>,
    /// Reference to an XIQ captive portal; only its presence is used.
    pub captive_portal: Option<Value>,
    pub captive_portal_present: Option<bool>,
}

impl SsidRecord {
    pub fn has_captive_portal(&self) -> bool {
        self.captive_portal_present.unwrap_or(false)
            || self.captive_portal.as_ref().is_some_and(|v| !v.is_null())
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct SsidFields {
    name: Option<String>,
    ssid_name: Option<String>,
    enabled: Option<bool>,
    broadcast: Option<bool>,
    broadcast_ssid: Option<bool>,
    vlan_id: Option<Value>,
    vlan: Option<Value>,
    security: Option<SecurityRecord>,
    fast_roaming: Option<bool>,
    captive_portal: Option<Value>,
    captive_portal_present: Option<bool>,
}

impl From<SsidFields> for SsidRecord {
    fn from(f: SsidFields) -> Self {
        Self {
            name: f.name.or(f.ssid_name),
            enabled: f.enabled,
            broadcast: f.broadcast.or(f.broadcast_ssid),
            vlan_id: f.vlan_id.or(f.vlan),
            security: f.security,
            fast_roaming: f.fast_roaming,
            captive_portal: f.captive_portal,
            captive_portal_present: f.captive_portal_present,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "SecurityFields")]
pub struct SecurityRecord {
    pub kind: Option<String>,
    pub psk: Option<String>,
    pub pmf: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct SecurityFields {
    #[serde(rename = "type")]
    kind: Option<String>,
    auth_type: Option<String>,
    psk: Option<String>,
    passphrase: Option<String>,
    pmf: Option<String>,
    management_frame_protection: Option<String>,
}

impl From<SecurityFields> for SecurityRecord {
    fn from(f: SecurityFields) -> Self {
        Self {
            kind: f.kind.or(f.auth_type),
            psk: f.psk.or(f.passphrase),
            pmf: f.pmf.or(f.management_frame_protection),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "VlanFields")]
pub struct VlanRecord {
    pub vlan_id: Option<Value>,
    pub name: Option<String>,
    pub subnet: Option<String>,
    pub gateway: Option<String>,
    pub dhcp_enabled: Option<bool>,
    pub dhcp_start: Option<String>,
    pub dhcp_end: Option<String>,
    pub dns_servers: Vec<String>,
    pub dns_domain: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct VlanFields {
    vlan_id: Option<Value>,
    name: Option<String>,
    subnet: Option<String>,
    gateway: Option<String>,
    dhcp_enabled: Option<bool>,
    dhcp_start: Option<String>,
    dhcp_end: Option<String>,
    #[serde(deserialize_with = "server_list")]
    dns_servers: Option<Vec<String>>,
    #[serde(deserialize_with = "server_list")]
    name_servers: Option<Vec<String>>,
    #[serde(deserialize_with = "server_list")]
    dhcp_dns_servers: Option<Vec<String>>,
    dns_domain: Option<String>,
    domain: Option<String>,
}

impl From<VlanFields> for VlanRecord {
    fn from(f: VlanFields) -> Self {
        Self {
            vlan_id: f.vlan_id,
            name: f.name,
            subnet: f.subnet,
            gateway: f.gateway,
            dhcp_enabled: f.dhcp_enabled,
            dhcp_start: f.dhcp_start,
            dhcp_end: f.dhcp_end,
            dns_servers: f
                .dns_servers
                .or(f.name_servers)
                .or(f.dhcp_dns_servers)
                .unwrap_or_default(),
            dns_domain: f.dns_domain.or(f.domain),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "AuthServerFields")]
pub struct AuthServerRecord {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub auth_port: Option<Value>,
    pub acct_port: Option<Value>,
    pub secret: Option<String>,
    pub timeout: Option<Value>,
    pub retries: Option<Value>,
    pub enabled: Option<bool>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct AuthServerFields {
    name: Option<String>,
    ip: Option<String>,
    address: Option<String>,
    auth_port: Option<Value>,
    port: Option<Value>,
    acct_port: Option<Value>,
    accounting_port: Option<Value>,
    secret: Option<String>,
    shared_secret: Option<String>,
    timeout: Option<Value>,
    retries: Option<Value>,
    enabled: Option<bool>,
}

impl From<AuthServerFields> for AuthServerRecord {
    fn from(f: AuthServerFields) -> Self {
        Self {
            name: f.name,
            ip: f.ip.or(f.address),
            auth_port: f.auth_port.or(f.port),
            acct_port: f.acct_port.or(f.accounting_port),
            secret: f.secret.or(f.shared_secret),
            timeout: f.timeout,
            retries: f.retries,
            enabled: f.enabled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RateLimiterFields")]
pub struct RateLimiterRecord {
    pub name: Option<String>,
    pub bandwidth: Option<Value>,
    pub unit: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RateLimiterFields {
    name: Option<String>,
    bandwidth: Option<Value>,
    rate: Option<Value>,
    cir: Option<Value>,
    unit: Option<String>,
}

impl From<RateLimiterFields> for RateLimiterRecord {
    fn from(f: RateLimiterFields) -> Self {
        Self {
            name: f.name,
            bandwidth: f.bandwidth.or(f.rate).or(f.cir),
            unit: f.unit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CosPolicyFields")]
pub struct CosPolicyRecord {
    pub name: Option<String>,
    pub ingress_limiter_name: Option<String>,
    pub egress_limiter_name: Option<String>,
    pub dscp: Option<Value>,
    pub dot1p: Option<Value>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CosPolicyFields {
    name: Option<String>,
    ingress_limiter_name: Option<String>,
    ingress_rate_limiter: Option<String>,
    upload_limiter: Option<String>,
    egress_limiter_name: Option<String>,
    egress_rate_limiter: Option<String>,
    download_limiter: Option<String>,
    dscp: Option<Value>,
    dot1p: Option<Value>,
    priority: Option<Value>,
}

impl From<CosPolicyFields> for CosPolicyRecord {
    fn from(f: CosPolicyFields) -> Self {
        Self {
            name: f.name,
            ingress_limiter_name: f
                .ingress_limiter_name
                .or(f.ingress_rate_limiter)
                .or(f.upload_limiter),
            egress_limiter_name: f
                .egress_limiter_name
                .or(f.egress_rate_limiter)
                .or(f.download_limiter),
            dscp: f.dscp,
            dot1p: f.dot1p.or(f.priority),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "DeviceFields")]
pub struct DeviceRecord {
    pub serial_number: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DeviceFields {
    serial_number: Option<String>,
    serial: Option<String>,
    name: Option<String>,
    location: Option<String>,
}

impl From<DeviceFields> for DeviceRecord {
    fn from(f: DeviceFields) -> Self {
        Self {
            serial_number: f.serial_number.or(f.serial),
            name: f.name,
            location: f.location,
        }
    }
}

/// DNS servers arrive as a list, a comma/semicolon separated string, or null.
fn server_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let servers = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .collect(),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "dns_servers must be a list or string, found {}",
                json_type_name(&other)
            )))
        }
    };
    Ok(Some(servers))
}
