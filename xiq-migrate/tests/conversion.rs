use std::collections::HashSet;

use edge_schema::{DhcpMode, ExistingTopology, ObjectKind, PmfMode, Privacy, ServiceStatus};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use xiq_migrate::{Conversion, ConversionDefaults, Converter, WarningSeverity};

fn convert(source: Value) -> Conversion {
    Converter::new(ConversionDefaults::default())
        .convert_value(source, &[])
        .expect("source should be a JSON object")
}

fn convert_with(source: Value, existing: Value) -> Conversion {
    let existing: Vec<ExistingTopology> =
        serde_json::from_value(existing).expect("existing topologies");
    Converter::new(ConversionDefaults::default())
        .convert_value(source, &existing)
        .expect("source should be a JSON object")
}

/// Replace every generated id with a placeholder so two runs can be compared.
fn without_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let is_ref = key == "id"
                    || key == "defaultTopology"
                    || key.ends_with("RateLimiterId");
                if is_ref && child.is_string() {
                    *child = json!("<id>");
                } else {
                    without_ids(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(without_ids),
        _ => {}
    }
}

fn collect_ids(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::String(id) if key == "id" => out.push(id.clone()),
                    other => collect_ids(other, out),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_ids(item, out)),
        _ => {}
    }
}

fn sample() -> Value {
    json!({
        "vlans": [
            {"vlan_id": 10, "subnet": "10.0.10.0/24", "gateway": "10.0.10.1", "dhcp_enabled": true},
            {"vlan_id": 20, "dhcp_start": "10.0.20.10", "dhcp_end": "10.0.20.200"}
        ],
        "ssids": [
            {"name": "Corp", "vlan_id": 10, "security": {"type": "psk", "psk": "hunter2"}},
            {"name": "Staff", "vlan_id": 20, "security": {"type": "enterprise"}}
        ],
        "authentication_servers": [{"ip": "10.0.0.5", "secret": "s"}, {"ip": "10.0.0.6", "secret": "s"}],
        "rate_limiters": [{"name": "up", "bandwidth": 1}],
        "cos_policies": [{"name": "cos", "ingress_limiter_name": "up"}],
        "devices": [{"serial_number": "AP1"}]
    })
}

#[test]
fn separate_runs_differ_only_in_identifiers() {
    let first = convert(sample());
    let second = convert(sample());

    let mut a = serde_json::to_value(&first.config).expect("json");
    let mut b = serde_json::to_value(&second.config).expect("json");

    let mut ids_a = Vec::new();
    collect_ids(&a, &mut ids_a);
    let mut ids_b = Vec::new();
    collect_ids(&b, &mut ids_b);

    let unique_a: HashSet<&String> = ids_a.iter().collect();
    assert_eq!(unique_a.len(), ids_a.len(), "ids repeat within one run");
    assert!(ids_a.iter().all(|id| !ids_b.contains(id)), "ids leaked across runs");

    without_ids(&mut a);
    without_ids(&mut b);
    assert_eq!(a, b);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn vlans_outside_range_produce_no_topology() {
    let out = convert(json!({
        "vlans": [{"vlan_id": 0}, {"vlan_id": 4095}, {"vlan_id": -1}, {"vlan_id": 4094}, {"vlan_id": 1}]
    }));
    let vlans: Vec<u16> = out.config.topologies.iter().map(|t| t.vlanid).collect();
    assert_eq!(vlans, vec![4094, 1]);
    assert_eq!(out.skipped_count(), 3);
}

#[test]
fn duplicate_vlan_keeps_first_record() {
    let out = convert(json!({
        "vlans": [
            {"vlan_id": 20, "name": "First", "subnet": "10.0.20.0/24"},
            {"vlan_id": "20", "name": "Second"}
        ]
    }));
    assert_eq!(out.config.topologies.len(), 1);
    assert_eq!(out.config.topologies[0].name, "First");
    assert!(out.config.topologies[0].l3_presence);
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].object, ObjectKind::Topology);
}

#[test]
fn keyless_psk_and_ppsk_ssids_are_dropped() {
    let out = convert(json!({
        "vlans": [{"vlan_id": 10}],
        "ssids": [
            {"name": "NoKey", "vlan_id": 10, "security": {"type": "psk"}},
            {"name": "EmptyKey", "vlan_id": 10, "security": {"type": "PSK", "psk": ""}},
            {"name": "Private", "vlan_id": 10, "security": {"type": "ppsk"}},
            {"name": "Shared", "vlan_id": 10, "security": {"type": "ppsk", "psk": "k"}}
        ]
    }));
    let names: Vec<&str> = out.config.services.iter().map(|s| s.ssid.as_str()).collect();
    assert_eq!(names, vec!["Shared"]);
    let skipped: Vec<&str> = out
        .warnings
        .iter()
        .filter(|w| w.severity == WarningSeverity::Skipped)
        .map(|w| w.name.as_str())
        .collect();
    assert_eq!(skipped, vec!["NoKey", "EmptyKey", "Private"]);
}

#[test]
fn fallback_dns_only_for_dhcp_server_mode() {
    let out = convert(json!({
        "vlans": [
            {"vlan_id": 10, "dhcp_start": "10.0.10.10", "dhcp_end": "10.0.10.20"},
            {"vlan_id": 20, "dhcp_enabled": true},
            {"vlan_id": 30},
            {"vlan_id": 40, "dhcp_start": "10.0.40.10", "dhcp_end": "10.0.40.20",
             "dns_servers": ["10.0.0.53"]}
        ]
    }));
    let topologies = &out.config.topologies;
    assert_eq!(topologies[0].dhcp_mode, DhcpMode::Server);
    assert_eq!(topologies[0].dhcp_dns_servers, "8.8.8.8,8.8.4.4");
    assert_eq!(topologies[1].dhcp_mode, DhcpMode::Relay);
    assert_eq!(topologies[1].dhcp_dns_servers, "");
    assert_eq!(topologies[2].dhcp_mode, DhcpMode::None);
    assert_eq!(topologies[2].dhcp_dns_servers, "");
    assert_eq!(topologies[3].dhcp_dns_servers, "10.0.0.53");
}

#[test]
fn mbps_bandwidth_is_converted_to_kbps() {
    let out = convert(json!({"rate_limiters": [{"name": "up", "bandwidth": 5, "unit": "mbps"}]}));
    assert_eq!(out.config.rate_limiters[0].cir_kbps, 5000);

    let raw = serde_json::to_value(&out.config).expect("json");
    assert_eq!(raw["rate_limiters"][0]["cirKbps"], 5000);
}

#[test]
fn corp_psk_scenario() {
    let out = convert(json!({
        "vlans": [{"vlan_id": 10, "subnet": "10.0.10.0/24", "gateway": "10.0.10.1", "dhcp_enabled": true}],
        "ssids": [{"name": "Corp", "vlan_id": 10, "security": {"type": "psk", "psk": "hunter2"}}]
    }));

    assert_eq!(out.config.topologies.len(), 1);
    let topology = &out.config.topologies[0];
    assert_eq!(topology.vlanid, 10);
    assert!(topology.l3_presence);
    assert_eq!(topology.ip_address, "10.0.10.0");
    assert_eq!(topology.cidr, 24);
    assert_eq!(topology.gateway, "10.0.10.1");
    assert_eq!(topology.dhcp_mode, DhcpMode::Relay);

    assert_eq!(out.config.services.len(), 1);
    let service = &out.config.services[0];
    assert_eq!(service.ssid, "Corp");
    assert_eq!(service.privacy, Some(Privacy::psk("hunter2", PmfMode::Enabled)));
    assert_eq!(service.default_topology.as_deref(), Some(topology.id.as_str()));
    assert_eq!(service.status, ServiceStatus::Disabled);
    assert!(out.warnings.is_empty());

    let raw = serde_json::to_value(service).expect("json");
    assert_eq!(raw["status"], "disabled");
    assert_eq!(raw["privacy"]["WpaPskElement"]["presharedKey"], "hunter2");
}

#[test]
fn open_network_has_no_privacy_and_is_kept() {
    let out = convert(json!({
        "vlans": [{"vlan_id": 10}],
        "ssids": [{"name": "Lobby", "vlan_id": 10, "security": {"type": "open"}}]
    }));
    assert_eq!(out.config.services.len(), 1);
    assert_eq!(out.config.services[0].privacy, None);

    let raw = serde_json::to_value(&out.config.services[0]).expect("json");
    let object = raw.as_object().expect("service object");
    assert!(!object.contains_key("privacy"));
    assert!(object.contains_key("aaaPolicyId"));
    assert!(object["aaaPolicyId"].is_null());
}

#[test]
fn long_ssid_name_is_truncated() {
    let name = "A".repeat(40);
    let out = convert(json!({
        "vlans": [{"vlan_id": 10}],
        "ssids": [{"name": name, "vlan_id": 10}]
    }));
    let service = &out.config.services[0];
    assert_eq!(service.ssid.chars().count(), 32);
    assert_eq!(service.service_name, name);
}

#[test]
fn empty_input_returns_every_list_empty() {
    let out = convert(json!({}));
    let raw = serde_json::to_value(&out.config).expect("json");
    for list in [
        "services",
        "topologies",
        "aaa_policies",
        "ap_configs",
        "rate_limiters",
        "cos_policies",
    ] {
        assert_eq!(raw[list], json!([]), "{list}");
    }
    assert!(out.warnings.is_empty());
}

#[test]
fn ssid_without_any_topology_is_skipped() {
    let out = convert(json!({
        "ssids": [{"name": "Orphan", "vlan_id": 99, "security": {"type": "open"}}]
    }));
    assert!(out.config.services.is_empty());
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].severity, WarningSeverity::Skipped);
    assert_eq!(out.warnings[0].name, "Orphan");
}

#[test]
fn unknown_vlan_falls_back_to_first_new_topology() {
    let out = convert(json!({
        "vlans": [{"vlan_id": 10}, {"vlan_id": 20}],
        "ssids": [{"name": "Stray", "vlan_id": 99}, {"name": "NoVlan"}]
    }));
    let first = out.config.topologies[0].id.clone();
    for service in &out.config.services {
        assert_eq!(service.default_topology.as_deref(), Some(first.as_str()));
    }
    assert_eq!(out.adjusted_count(), 2);
}

#[test]
fn existing_topology_wins_over_new_one() {
    let out = convert_with(
        json!({
            "vlans": [{"vlan_id": 10}],
            "ssids": [{"name": "Corp", "vlan_id": 10}, {"name": "Staff", "vlan_id": 20}]
        }),
        json!([
            {"id": "existing-10", "vlanid": 10, "name": "Corp"},
            {"id": "existing-20", "vlanid": "20", "name": "Staff"}
        ]),
    );
    let refs: Vec<Option<&str>> = out
        .config
        .services
        .iter()
        .map(|s| s.default_topology.as_deref())
        .collect();
    assert_eq!(refs, vec![Some("existing-10"), Some("existing-20")]);
    assert!(out.warnings.is_empty());
}

#[test]
fn radius_servers_become_one_policy() {
    let out = convert(sample());
    assert_eq!(out.config.aaa_policies.len(), 1);
    assert_eq!(out.config.aaa_policies[0].radius_servers.len(), 2);
    assert_eq!(out.config.aaa_policies[0].policy_name, "XIQ_RADIUS_Policy");
}

#[test]
fn custom_defaults_flow_into_records() {
    let defaults = ConversionDefaults {
        source_label: "Campus".to_string(),
        authenticated_role_id: "role-auth".to_string(),
        unauthenticated_role_id: Some("role-guest".to_string()),
        features: vec![],
        ..ConversionDefaults::default()
    };
    let out = Converter::new(defaults)
        .convert_value(sample(), &[])
        .expect("convert");

    assert_eq!(out.config.aaa_policies[0].policy_name, "Campus_RADIUS_Policy");
    let service = &out.config.services[0];
    assert_eq!(service.authenticated_user_default_role_id.as_deref(), Some("role-auth"));
    assert_eq!(
        service.non_authenticated_user_default_role_id.as_deref(),
        Some("role-guest")
    );
    assert!(out.config.topologies[0].features.is_empty());
}

#[test]
fn non_object_source_is_rejected() {
    for source in [json!([]), json!(null), json!(42)] {
        assert!(Converter::default().convert_value(source, &[]).is_err());
    }
}

#[test]
fn records_with_both_key_spellings_convert() {
    let out = convert(json!({
        "vlans": [{"vlan_id": 10}],
        "ssids": [{"name": "Corp", "ssid_name": "Corp", "vlan_id": 10,
                   "security": {"type": "psk", "psk": "hunter2", "passphrase": "old"}}],
        "cos_policies": [{"name": "Voice", "dscp": 46, "dot1p": 6, "priority": 2}],
        "rate_limiters": [{"name": "up", "bandwidth": 5, "rate": 9, "unit": "mbps"}]
    }));

    assert!(out.warnings.is_empty());
    assert_eq!(out.config.services[0].ssid, "Corp");
    assert_eq!(
        out.config.services[0].privacy,
        Some(Privacy::psk("hunter2", PmfMode::Enabled))
    );
    assert_eq!(out.config.cos_policies[0].dot1p, 6);
    assert_eq!(out.config.rate_limiters[0].cir_kbps, 5000);
}

#[test]
fn wrongly_typed_record_is_skipped_and_siblings_convert() {
    let out = convert(json!({
        "vlans": [
            {"vlan_id": 10},
            {"vlan_id": 20, "dhcp_enabled": "true"},
            {"vlan_id": 30, "name": 30}
        ],
        "ssids": [{"name": "Corp", "vlan_id": 10}]
    }));

    let vlans: Vec<u16> = out.config.topologies.iter().map(|t| t.vlanid).collect();
    assert_eq!(vlans, vec![10]);
    assert_eq!(out.config.services.len(), 1);
    assert_eq!(out.skipped_count(), 2);
    assert!(out
        .warnings
        .iter()
        .all(|w| w.object == ObjectKind::Topology && w.severity == WarningSeverity::Skipped));
}
