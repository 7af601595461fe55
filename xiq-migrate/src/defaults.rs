use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Controller-specific constants applied during a conversion.
///
/// Every field may be omitted from a defaults file; missing fields take the
/// built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConversionDefaults {
    /// Prefix for names derived from the source platform.
    pub source_label: String,
    pub authenticated_role_id: String,
    /// Falls back to `authenticated_role_id` when unset.
    pub unauthenticated_role_id: Option<String>,
    pub fallback_dns_servers: Vec<String>,
    pub features: Vec<String>,
    pub name_max_len: usize,
    pub radius: RadiusDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RadiusDefaults {
    pub auth_port: u16,
    pub acct_port: u16,
    pub timeout: u32,
    pub timeout_min: u32,
    pub timeout_max: u32,
    pub retries: u32,
    pub retries_min: u32,
    pub retries_max: u32,
    pub authentication_protocol: String,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            source_label: "XIQ".to_string(),
            authenticated_role_id: "4459ee6c-2f76-11e7-93ae-92361f002671".to_string(),
            unauthenticated_role_id: None,
            fallback_dns_servers: vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()],
            features: vec!["CENTRALIZED-SITE".to_string()],
            name_max_len: 64,
            radius: RadiusDefaults::default(),
        }
    }
}

impl Default for RadiusDefaults {
    fn default() -> Self {
        Self {
            auth_port: 1812,
            acct_port: 1813,
            timeout: 5,
            timeout_min: 1,
            timeout_max: 60,
            retries: 3,
            retries_min: 0,
            retries_max: 10,
            authentication_protocol: "PAP".to_string(),
        }
    }
}

impl ConversionDefaults {
    pub fn unauthenticated_role(&self) -> &str {
        self.unauthenticated_role_id
            .as_deref()
            .unwrap_or(&self.authenticated_role_id)
    }

    pub fn aaa_policy_name(&self) -> String {
        format!("{}_RADIUS_Policy", self.source_label)
    }

    /// DNS fallback joined the way topologies store DNS servers.
    pub fn fallback_dns(&self) -> String {
        self.fallback_dns_servers.join(",")
    }
}

/// Errors returned when loading a defaults file.
#[derive(Debug, Error)]
pub enum DefaultsLoadError {
    #[error("failed to read defaults file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse defaults file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load conversion defaults from a TOML file.
pub fn load_defaults(path: &Path) -> Result<ConversionDefaults, DefaultsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| DefaultsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_defaults(&raw, path.display().to_string())
}

/// Built-in defaults shipped with the binary.
pub fn embedded_defaults() -> ConversionDefaults {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/defaults/conversion.toml"
    ));
    parse_defaults(embedded, "embedded defaults".to_string()).unwrap_or_default()
}

fn parse_defaults(raw: &str, path: String) -> Result<ConversionDefaults, DefaultsLoadError> {
    toml::from_str(raw).map_err(|source| DefaultsLoadError::Parse { path, source })
}
