use std::fmt;

use edge_schema::ObjectKind;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// The record was left out of the output.
    Skipped,
    /// The record was converted with a field replaced or dropped.
    Adjusted,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningSeverity::Skipped => f.write_str("skipped"),
            WarningSeverity::Adjusted => f.write_str("adjusted"),
        }
    }
}

/// A lossy decision made while converting one source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionWarning {
    pub object: ObjectKind,
    /// Source name of the record, or its list position when unnamed.
    pub name: String,
    pub severity: WarningSeverity,
    pub message: String,
}

/// Why a single source record produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing vlan_id")]
    MissingVlanId,
    #[error("vlan_id {0} is outside 1-4094")]
    VlanOutOfRange(String),
    #[error("duplicate vlan_id {0}; the first occurrence was kept")]
    DuplicateVlan(u16),
    #[error("missing name")]
    MissingName,
    #[error("{0} security has no preshared key; per-user keys cannot be migrated")]
    MissingPsk(String),
    #[error("no topology exists or was created for vlan {0}")]
    NoTopology(String),
    #[error("invalid server address {0:?}")]
    InvalidAddress(String),
    #[error("bandwidth must be positive, got {0}")]
    NonPositiveBandwidth(String),
    #[error("missing serial number")]
    MissingSerial,
    #[error("unreadable record: {0}")]
    Malformed(String),
}

impl SkipReason {
    /// Skips that are expected often enough not to be worth a warning.
    pub fn is_silent(&self) -> bool {
        matches!(self, SkipReason::MissingVlanId)
    }
}

/// Collects warnings for one conversion run and mirrors them to `tracing`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ConversionWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipped(&mut self, object: ObjectKind, name: &str, reason: &SkipReason) {
        if reason.is_silent() {
            tracing::debug!(%object, name, %reason, "skipping record");
            return;
        }
        tracing::warn!(%object, name, %reason, "skipping record");
        self.warnings.push(ConversionWarning {
            object,
            name: name.to_string(),
            severity: WarningSeverity::Skipped,
            message: reason.to_string(),
        });
    }

    pub fn adjusted(&mut self, object: ObjectKind, name: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%object, name, %message, "adjusting record");
        self.warnings.push(ConversionWarning {
            object,
            name: name.to_string(),
            severity: WarningSeverity::Adjusted,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}

/// Label for a record in warnings: its name, or `list[index]` when unnamed.
pub(crate) fn record_label(name: Option<&str>, list: &str, index: usize) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("{list}[{index}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::{record_label, Diagnostics, SkipReason, WarningSeverity};
    use edge_schema::ObjectKind;

    #[test]
    fn silent_skips_are_not_recorded() {
        let mut diag = Diagnostics::new();
        diag.skipped(ObjectKind::Topology, "vlans[0]", &SkipReason::MissingVlanId);
        assert!(diag.is_empty());
    }

    #[test]
    fn skips_and_adjustments_are_recorded_in_order() {
        let mut diag = Diagnostics::new();
        diag.skipped(
            ObjectKind::Service,
            "Guest",
            &SkipReason::MissingPsk("ppsk".to_string()),
        );
        diag.adjusted(ObjectKind::Topology, "Staff", "gateway ignored");
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].severity, WarningSeverity::Skipped);
        assert!(warnings[0].message.contains("ppsk"));
        assert_eq!(warnings[1].severity, WarningSeverity::Adjusted);
        assert_eq!(warnings[1].name, "Staff");
    }

    #[test]
    fn unnamed_records_use_list_position() {
        assert_eq!(record_label(Some("Corp"), "ssids", 2), "Corp");
        assert_eq!(record_label(Some("  "), "ssids", 2), "ssids[2]");
        assert_eq!(record_label(None, "devices", 0), "devices[0]");
    }
}
