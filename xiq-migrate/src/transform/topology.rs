use edge_schema::{DhcpMode, ObjectKind, Topology};

use crate::defaults::ConversionDefaults;
use crate::ids::IdAllocator;
use crate::source::VlanRecord;
use crate::validate::{parse_int, validate_ip_address, validate_name};
use crate::warnings::{record_label, Diagnostics, SkipReason};

const UNSET_IP: &str = "0.0.0.0";
const VLAN_RANGE: std::ops::RangeInclusive<i64> = 1..=4094;

/// Layer-3 settings derived from a VLAN's subnet and gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layer3 {
    ip_address: String,
    cidr: u8,
    gateway: String,
    present: bool,
}

impl Default for Layer3 {
    fn default() -> Self {
        Self {
            ip_address: UNSET_IP.to_string(),
            cidr: 0,
            gateway: UNSET_IP.to_string(),
            present: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DhcpSettings {
    mode: DhcpMode,
    start: String,
    end: String,
}

/// Converts XIQ VLANs into controller topologies.
///
/// Each accepted VLAN gets its topology id from `ids`, which also enforces
/// first-wins on duplicate VLAN ids within the run.
pub fn convert_topologies(
    vlans: &[VlanRecord],
    ids: &mut IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Vec<Topology> {
    let mut out = Vec::new();
    for (index, vlan) in vlans.iter().enumerate() {
        let label = vlan_label(vlan, index);
        match convert_vlan(vlan, &label, ids, defaults, diag) {
            Ok(topology) => out.push(topology),
            Err(reason) => diag.skipped(ObjectKind::Topology, &label, &reason),
        }
    }
    out
}

fn convert_vlan(
    vlan: &VlanRecord,
    label: &str,
    ids: &mut IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Result<Topology, SkipReason> {
    let vlan_id = resolve_vlan_id(vlan)?;
    let id = ids
        .assign_topology(vlan_id)
        .ok_or(SkipReason::DuplicateVlan(vlan_id))?;

    let name = match vlan.name.as_deref() {
        Some(name) if validate_name(name, 1, defaults.name_max_len) => name.to_string(),
        Some(name) => {
            let fallback = format!("VLAN_{vlan_id}");
            diag.adjusted(
                ObjectKind::Topology,
                label,
                format!("name {name:?} is not valid on the controller; using {fallback}"),
            );
            fallback
        }
        None => format!("VLAN_{vlan_id}"),
    };

    let layer3 = derive_layer3(vlan, label, diag);
    let dhcp = derive_dhcp(vlan, label, diag);
    let dns = derive_dns(vlan, dhcp.mode, label, defaults, diag);

    Ok(Topology {
        id,
        name,
        vlanid: vlan_id,
        tagged: false,
        multicast_filters: Vec::new(),
        multicast_bridging: false,
        mode: "BridgedAtAc".to_string(),
        group: 0,
        members: Vec::new(),
        mtu: 1500,
        enable_mgmt_traffic: false,
        dhcp_servers: String::new(),
        l3_presence: layer3.present,
        ip_address: layer3.ip_address,
        cidr: layer3.cidr,
        gateway: layer3.gateway,
        dhcp_start_ip_range: dhcp.start,
        dhcp_end_ip_range: dhcp.end,
        dhcp_mode: dhcp.mode,
        dhcp_domain: vlan.dns_domain.clone().unwrap_or_default(),
        dhcp_default_lease: 36000,
        dhcp_max_lease: 2_592_000,
        dhcp_dns_servers: dns,
        wins: String::new(),
        port_name: format!("vlan{vlan_id}"),
        vlan_map_to_esa: -1,
        dhcp_exclusions: Vec::new(),
        foreign_ip_address: UNSET_IP.to_string(),
        ap_registration: false,
        fqdn: String::new(),
        isid: 0,
        pool: Vec::new(),
        proxied: "Local".to_string(),
        features: defaults.features.clone(),
    })
}

fn vlan_label(vlan: &VlanRecord, index: usize) -> String {
    match vlan.vlan_id.as_ref().and_then(parse_int) {
        Some(id) => format!("vlan {id}"),
        None => record_label(vlan.name.as_deref(), "vlans", index),
    }
}

fn resolve_vlan_id(vlan: &VlanRecord) -> Result<u16, SkipReason> {
    let raw = match vlan.vlan_id.as_ref() {
        None | Some(serde_json::Value::Null) => return Err(SkipReason::MissingVlanId),
        Some(raw) => raw,
    };
    parse_int(raw)
        .filter(|id| VLAN_RANGE.contains(id))
        .and_then(|id| u16::try_from(id).ok())
        .ok_or_else(|| SkipReason::VlanOutOfRange(raw.to_string()))
}

/// Split `ip/cidr`, requiring a dotted-quad address and a prefix of 0-32.
pub(crate) fn parse_subnet(subnet: &str) -> Result<(String, u8), String> {
    let (ip, prefix) = subnet
        .trim()
        .split_once('/')
        .ok_or_else(|| "missing /prefix".to_string())?;
    if !validate_ip_address(ip) {
        return Err(format!("{ip:?} is not an IPv4 address"));
    }
    let cidr = prefix
        .parse::<u8>()
        .ok()
        .filter(|c| *c <= 32)
        .ok_or_else(|| format!("prefix {prefix:?} is not 0-32"))?;
    Ok((ip.to_string(), cidr))
}

fn derive_layer3(vlan: &VlanRecord, label: &str, diag: &mut Diagnostics) -> Layer3 {
    let Some(subnet) = vlan.subnet.as_deref().filter(|s| !s.trim().is_empty()) else {
        if vlan.gateway.is_some() {
            diag.adjusted(
                ObjectKind::Topology,
                label,
                "gateway ignored because the VLAN has no subnet",
            );
        }
        return Layer3::default();
    };

    let (ip_address, cidr) = match parse_subnet(subnet) {
        Ok(parsed) => parsed,
        Err(reason) => {
            diag.adjusted(
                ObjectKind::Topology,
                label,
                format!("invalid subnet {subnet:?} ({reason}); layer-3 settings left unset"),
            );
            return Layer3::default();
        }
    };

    let gateway = match vlan.gateway.as_deref() {
        Some(gw) if validate_ip_address(gw) => gw.to_string(),
        Some(gw) => {
            diag.adjusted(
                ObjectKind::Topology,
                label,
                format!("invalid gateway {gw:?}; using {UNSET_IP}"),
            );
            UNSET_IP.to_string()
        }
        None => UNSET_IP.to_string(),
    };

    Layer3 {
        ip_address,
        cidr,
        gateway,
        present: true,
    }
}

/// Server mode needs a usable start and end address; otherwise the DHCP flag
/// chooses between relay and none.
fn derive_dhcp(vlan: &VlanRecord, label: &str, diag: &mut Diagnostics) -> DhcpSettings {
    let start = usable_range_bound(vlan.dhcp_start.as_deref(), "dhcp_start", label, diag);
    let end = usable_range_bound(vlan.dhcp_end.as_deref(), "dhcp_end", label, diag);

    if let (Some(start), Some(end)) = (start, end) {
        return DhcpSettings {
            mode: DhcpMode::Server,
            start: start.to_string(),
            end: end.to_string(),
        };
    }

    let mode = if vlan.dhcp_enabled.unwrap_or(false) {
        DhcpMode::Relay
    } else {
        DhcpMode::None
    };
    DhcpSettings {
        mode,
        start: UNSET_IP.to_string(),
        end: UNSET_IP.to_string(),
    }
}

fn usable_range_bound<'a>(
    value: Option<&'a str>,
    field: &str,
    label: &str,
    diag: &mut Diagnostics,
) -> Option<&'a str> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    if value == UNSET_IP {
        return None;
    }
    if !validate_ip_address(value) {
        diag.adjusted(
            ObjectKind::Topology,
            label,
            format!("invalid {field} {value:?} ignored"),
        );
        return None;
    }
    Some(value)
}

/// The fallback pair is only injected for DHCP server mode.
fn derive_dns(
    vlan: &VlanRecord,
    mode: DhcpMode,
    label: &str,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> String {
    let mut servers = Vec::new();
    for server in &vlan.dns_servers {
        if validate_ip_address(server) {
            servers.push(server.as_str());
        } else {
            diag.adjusted(
                ObjectKind::Topology,
                label,
                format!("invalid DNS server {server:?} dropped"),
            );
        }
    }

    if servers.is_empty() && mode == DhcpMode::Server {
        return defaults.fallback_dns();
    }
    servers.join(",")
}
