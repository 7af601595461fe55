//! CSV export of the source inventory, for review before a migration.
//!
//! Keys and shared secrets are never written; only whether one is present.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use serde_json::Value;
use thiserror::Error;

use crate::source::{AuthServerRecord, NormalizedSourceConfig, SsidRecord, VlanRecord};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Csv { path: String, source: csv::Error },
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub fn write_ssids<W: Write>(writer: &mut Writer<W>, ssids: &[SsidRecord]) -> csv::Result<()> {
    writer.write_record([
        "name",
        "enabled",
        "broadcast",
        "vlan_id",
        "security",
        "has_psk",
        "pmf",
        "fast_roaming",
        "captive_portal",
    ])?;
    for ssid in ssids {
        let security = ssid.security.as_ref();
        writer.write_record([
            ssid.name.as_deref().unwrap_or_default(),
            &flag(ssid.enabled),
            &flag(ssid.broadcast),
            &value_text(ssid.vlan_id.as_ref()),
            security.and_then(|s| s.kind.as_deref()).unwrap_or("open"),
            &security
                .and_then(|s| s.psk.as_deref())
                .is_some_and(|k| !k.is_empty())
                .to_string(),
            security.and_then(|s| s.pmf.as_deref()).unwrap_or_default(),
            &flag(ssid.fast_roaming),
            &ssid.has_captive_portal().to_string(),
        ])?;
    }
    Ok(())
}

pub fn write_vlans<W: Write>(writer: &mut Writer<W>, vlans: &[VlanRecord]) -> csv::Result<()> {
    writer.write_record([
        "vlan_id",
        "name",
        "subnet",
        "gateway",
        "dhcp_enabled",
        "dhcp_start",
        "dhcp_end",
        "dns_servers",
        "dns_domain",
    ])?;
    for vlan in vlans {
        writer.write_record([
            value_text(vlan.vlan_id.as_ref()).as_str(),
            vlan.name.as_deref().unwrap_or_default(),
            vlan.subnet.as_deref().unwrap_or_default(),
            vlan.gateway.as_deref().unwrap_or_default(),
            &flag(vlan.dhcp_enabled),
            vlan.dhcp_start.as_deref().unwrap_or_default(),
            vlan.dhcp_end.as_deref().unwrap_or_default(),
            &vlan.dns_servers.join(";"),
            vlan.dns_domain.as_deref().unwrap_or_default(),
        ])?;
    }
    Ok(())
}

pub fn write_radius_servers<W: Write>(
    writer: &mut Writer<W>,
    servers: &[AuthServerRecord],
) -> csv::Result<()> {
    writer.write_record([
        "name",
        "ip",
        "auth_port",
        "acct_port",
        "has_secret",
        "timeout",
        "retries",
        "enabled",
    ])?;
    for server in servers {
        writer.write_record([
            server.name.as_deref().unwrap_or_default(),
            server.ip.as_deref().unwrap_or_default(),
            &value_text(server.auth_port.as_ref()),
            &value_text(server.acct_port.as_ref()),
            &server.secret.is_some().to_string(),
            &value_text(server.timeout.as_ref()),
            &value_text(server.retries.as_ref()),
            &flag(server.enabled),
        ])?;
    }
    Ok(())
}

/// Write one CSV per non-empty list into `dir` and return the written paths.
pub fn export_source(
    source: &NormalizedSourceConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();
    if !source.ssids.is_empty() {
        written.push(write_csv(dir, "ssids.csv", |w| write_ssids(w, &source.ssids))?);
    }
    if !source.vlans.is_empty() {
        written.push(write_csv(dir, "vlans.csv", |w| write_vlans(w, &source.vlans))?);
    }
    if !source.authentication_servers.is_empty() {
        written.push(write_csv(dir, "radius_servers.csv", |w| {
            write_radius_servers(w, &source.authentication_servers)
        })?);
    }
    Ok(written)
}

fn write_csv<F>(dir: &Path, file: &str, fill: F) -> Result<PathBuf, ExportError>
where
    F: FnOnce(&mut Writer<std::fs::File>) -> csv::Result<()>,
{
    let path = dir.join(file);
    let csv_err = |source| ExportError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut writer = Writer::from_path(&path).map_err(csv_err)?;
    fill(&mut writer).map_err(csv_err)?;
    writer.flush().map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "wrote csv");
    Ok(path)
}

fn flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
