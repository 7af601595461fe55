use edge_schema::{AaaPolicy, ObjectKind, RadiusServer};

use crate::defaults::ConversionDefaults;
use crate::ids::IdAllocator;
use crate::source::AuthServerRecord;
use crate::validate::{
    validate_ip_address, validate_name, validate_port, validate_retries, validate_timeout,
};
use crate::warnings::{record_label, Diagnostics, SkipReason};

const SERVER_NAME_MAX_LEN: usize = 64;

/// Folds every authentication server into one aggregate AAA policy.
///
/// No policy is produced when the list is empty or every server is rejected.
pub fn convert_aaa_policies(
    servers: &[AuthServerRecord],
    ids: &mut IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Vec<AaaPolicy> {
    let mut radius_servers = Vec::new();
    for (index, server) in servers.iter().enumerate() {
        let label = record_label(server.name.as_deref(), "authentication_servers", index);
        match convert_server(server, index, &label, ids, defaults, diag) {
            Ok(server) => radius_servers.push(server),
            Err(reason) => diag.skipped(ObjectKind::AaaPolicy, &label, &reason),
        }
    }

    if radius_servers.is_empty() {
        return Vec::new();
    }

    let policy_name = defaults.aaa_policy_name();
    vec![AaaPolicy {
        id: ids.policy_id(&policy_name),
        policy_name,
        radius_servers,
        authentication_protocol: defaults.radius.authentication_protocol.clone(),
        accounting_enabled: false,
        features: defaults.features.clone(),
    }]
}

fn convert_server(
    server: &AuthServerRecord,
    index: usize,
    label: &str,
    ids: &IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Result<RadiusServer, SkipReason> {
    let ip = server.ip.as_deref().map(str::trim).unwrap_or_default();
    if !validate_ip_address(ip) {
        return Err(SkipReason::InvalidAddress(ip.to_string()));
    }

    let fallback_name = format!("RADIUS-{}", index + 1);
    let server_name = match server.name.as_deref() {
        Some(name) if validate_name(name, 1, SERVER_NAME_MAX_LEN) => name.to_string(),
        Some(name) => {
            diag.adjusted(
                ObjectKind::AaaPolicy,
                label,
                format!(
                    "server name {name:?} is not valid on the controller; using {fallback_name}"
                ),
            );
            fallback_name
        }
        None => fallback_name,
    };

    let shared_secret = match server.secret.as_deref() {
        Some(secret) => secret.to_string(),
        None => {
            diag.adjusted(
                ObjectKind::AaaPolicy,
                label,
                "no shared secret; set it on the controller before enabling the policy",
            );
            String::new()
        }
    };

    let radius = &defaults.radius;
    Ok(RadiusServer {
        id: ids.fresh(),
        server_name,
        ip_address: ip.to_string(),
        authentication_port: validate_port(server.auth_port.as_ref(), radius.auth_port),
        accounting_port: validate_port(server.acct_port.as_ref(), radius.acct_port),
        shared_secret,
        timeout: validate_timeout(
            server.timeout.as_ref(),
            radius.timeout_min,
            radius.timeout_max,
            radius.timeout,
        ),
        retries: validate_retries(
            server.retries.as_ref(),
            radius.retries_min,
            radius.retries_max,
            radius.retries,
        ),
        enabled: server.enabled.unwrap_or(true),
    })
}

#[cfg(test)]
mod tests {
    use super::convert_aaa_policies;
    use crate::defaults::ConversionDefaults;
    use crate::ids::IdAllocator;
    use crate::source::AuthServerRecord;
    use crate::warnings::{Diagnostics, WarningSeverity};
    use serde_json::json;

    fn servers(value: serde_json::Value) -> Vec<AuthServerRecord> {
        serde_json::from_value(value).expect("server records")
    }

    #[test]
    fn empty_list_produces_no_policy() {
        let mut ids = IdAllocator::new();
        let mut diag = Diagnostics::new();
        let out = convert_aaa_policies(&[], &mut ids, &ConversionDefaults::default(), &mut diag);
        assert!(out.is_empty());
        assert!(diag.is_empty());
    }

    #[test]
    fn servers_are_aggregated_into_one_policy() {
        let mut ids = IdAllocator::new();
        let mut diag = Diagnostics::new();
        let input = servers(json!([
            {"name": "primary", "ip": "10.0.0.5", "auth_port": 1645, "secret": "s1",
             "timeout": 10, "retries": 2},
            {"ip": "10.0.0.6", "auth_port": "bogus", "secret": "s2", "timeout": 0,
             "retries": 99, "enabled": false}
        ]));
        let out = convert_aaa_policies(&input, &mut ids, &ConversionDefaults::default(), &mut diag);

        assert_eq!(out.len(), 1);
        let policy = &out[0];
        assert_eq!(policy.policy_name, "XIQ_RADIUS_Policy");
        assert_eq!(policy.authentication_protocol, "PAP");
        assert_eq!(ids.lookup_policy("XIQ_RADIUS_Policy"), Some(policy.id.as_str()));

        let first = &policy.radius_servers[0];
        assert_eq!(first.server_name, "primary");
        assert_eq!(first.authentication_port, 1645);
        assert_eq!(first.accounting_port, 1813);
        assert_eq!(first.timeout, 10);
        assert_eq!(first.retries, 2);
        assert!(first.enabled);

        let second = &policy.radius_servers[1];
        assert_eq!(second.server_name, "RADIUS-2");
        assert_eq!(second.authentication_port, 1812);
        assert_eq!(second.shared_secret, "s2");
        assert_eq!(second.timeout, 5);
        assert_eq!(second.retries, 3);
        assert!(!second.enabled);
        assert!(diag.is_empty());
    }

    #[test]
    fn invalid_address_skips_the_server() {
        let mut ids = IdAllocator::new();
        let mut diag = Diagnostics::new();
        let input = servers(json!([
            {"name": "bad", "ip": "radius.example.com", "secret": "x"},
            {"name": "good", "ip": "10.0.0.7"}
        ]));
        let out = convert_aaa_policies(&input, &mut ids, &ConversionDefaults::default(), &mut diag);

        assert_eq!(out[0].radius_servers.len(), 1);
        assert_eq!(out[0].radius_servers[0].shared_secret, "");
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].severity, WarningSeverity::Skipped);
        assert_eq!(warnings[0].name, "bad");
        assert_eq!(warnings[1].severity, WarningSeverity::Adjusted);
    }

    #[test]
    fn all_servers_rejected_yields_no_policy() {
        let mut ids = IdAllocator::new();
        let mut diag = Diagnostics::new();
        let input = servers(json!([{"ip": "300.0.0.1"}, {}]));
        let out = convert_aaa_policies(&input, &mut ids, &ConversionDefaults::default(), &mut diag);
        assert!(out.is_empty());
        assert_eq!(diag.into_warnings().len(), 2);
    }
}
