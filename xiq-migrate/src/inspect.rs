use std::collections::BTreeMap;

use serde::Serialize;

use crate::source::NormalizedSourceConfig;
use crate::transform::service::SecurityKind;

/// What a source export contains, and how much of it will not survive
/// conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceInventory {
    pub ssids: usize,
    pub vlans: usize,
    pub authentication_servers: usize,
    pub rate_limiters: usize,
    pub cos_policies: usize,
    pub devices: usize,
    /// SSID count per security type.
    pub security: BTreeMap<String, usize>,
    /// PSK/PPSK SSIDs without a key; these are dropped by `convert`.
    pub keyless_psk_ssids: usize,
    pub vlans_without_id: usize,
    pub captive_portal_ssids: usize,
    /// List elements that could not be read at all.
    pub unreadable_records: usize,
}

pub fn inspect(source: &NormalizedSourceConfig) -> SourceInventory {
    let mut inv = SourceInventory {
        ssids: source.ssids.len(),
        vlans: source.vlans.len(),
        authentication_servers: source.authentication_servers.len(),
        rate_limiters: source.rate_limiters.len(),
        cos_policies: source.cos_policies.len(),
        devices: source.devices.len(),
        unreadable_records: source.rejected.len(),
        ..SourceInventory::default()
    };

    for ssid in &source.ssids {
        let security = ssid.security.as_ref();
        let kind = SecurityKind::classify(security.and_then(|s| s.kind.as_deref()));
        let has_key = security
            .and_then(|s| s.psk.as_deref())
            .is_some_and(|k| !k.is_empty());
        if matches!(kind, SecurityKind::Psk | SecurityKind::Ppsk) && !has_key {
            inv.keyless_psk_ssids += 1;
        }
        if ssid.has_captive_portal() {
            inv.captive_portal_ssids += 1;
        }
        *inv.security.entry(kind.as_str().to_ascii_lowercase()).or_default() += 1;
    }

    inv.vlans_without_id = source
        .vlans
        .iter()
        .filter(|v| v.vlan_id.as_ref().map_or(true, serde_json::Value::is_null))
        .count();
    inv
}
