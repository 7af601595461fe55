use serde::{Deserialize, Serialize};

/// DHCP behaviour of a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhcpMode {
    /// Controller serves leases from `dhcpStartIpRange`..`dhcpEndIpRange`.
    #[serde(rename = "DHCPServer")]
    Server,
    /// Requests are relayed to an upstream server.
    #[serde(rename = "DHCPRelay")]
    Relay,
    #[serde(rename = "DHCPNone")]
    None,
}

/// A VLAN together with its layer-3 and DHCP settings.
///
/// Field names and constant values follow the controller's `TopologyElement`
/// schema; most of the constants are required by the API even though the
/// migration never changes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub id: String,
    pub name: String,
    pub vlanid: u16,
    pub tagged: bool,
    pub multicast_filters: Vec<String>,
    pub multicast_bridging: bool,
    pub mode: String,
    pub group: u32,
    pub members: Vec<String>,
    pub mtu: u32,
    pub enable_mgmt_traffic: bool,
    pub dhcp_servers: String,
    pub l3_presence: bool,
    pub ip_address: String,
    pub cidr: u8,
    pub gateway: String,
    pub dhcp_start_ip_range: String,
    pub dhcp_end_ip_range: String,
    pub dhcp_mode: DhcpMode,
    pub dhcp_domain: String,
    pub dhcp_default_lease: u32,
    pub dhcp_max_lease: u32,
    pub dhcp_dns_servers: String,
    pub wins: String,
    pub port_name: String,
    pub vlan_map_to_esa: i32,
    pub dhcp_exclusions: Vec<String>,
    pub foreign_ip_address: String,
    pub ap_registration: bool,
    pub fqdn: String,
    pub isid: u32,
    pub pool: Vec<String>,
    pub proxied: String,
    pub features: Vec<String>,
}

/// Topology entry as returned by the controller's topology listing.
///
/// Only the identifier and VLAN are needed to link new services to topologies
/// that already exist on the controller; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ExistingTopology {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "vlanid_from_any")]
    pub vlanid: Option<u16>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ExistingTopology {
    /// Returns `(vlanid, id)` when both are usable.
    pub fn vlan_link(&self) -> Option<(u16, &str)> {
        let id = self.id.as_deref().filter(|id| !id.is_empty())?;
        let vlan = self.vlanid.filter(|v| *v != 0)?;
        Some((vlan, id))
    }
}

fn vlanid_from_any<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u16>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::{DhcpMode, ExistingTopology};

    #[test]
    fn dhcp_mode_uses_controller_names() {
        assert_eq!(
            serde_json::to_string(&DhcpMode::Relay).expect("serialize"),
            "\"DHCPRelay\""
        );
        assert_eq!(
            serde_json::to_string(&DhcpMode::None).expect("serialize"),
            "\"DHCPNone\""
        );
    }

    #[test]
    fn existing_topology_accepts_string_vlanid_and_extra_keys() {
        let topo: ExistingTopology = serde_json::from_str(
            r#"{"id":"abc","vlanid":"20","name":"Staff","mode":"BridgedAtAp"}"#,
        )
        .expect("parse");
        assert_eq!(topo.vlan_link(), Some((20, "abc")));
    }

    #[test]
    fn existing_topology_without_id_has_no_link() {
        let topo: ExistingTopology = serde_json::from_str(r#"{"vlanid":20}"#).expect("parse");
        assert_eq!(topo.vlan_link(), None);
    }
}
