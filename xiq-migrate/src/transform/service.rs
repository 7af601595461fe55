use std::collections::HashMap;

use edge_schema::{
    DscpMap, ExistingTopology, ObjectKind, PmfMode, Privacy, Service, ServiceStatus, Topology,
};

use crate::defaults::ConversionDefaults;
use crate::ids::IdAllocator;
use crate::source::{SecurityRecord, SsidRecord};
use crate::validate::{parse_int, truncate_chars};
use crate::warnings::{record_label, Diagnostics, SkipReason};

const SSID_MAX_LEN: usize = 32;
const SERVICE_NAME_MAX_LEN: usize = 64;

/// XIQ security types, folded case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityKind {
    Open,
    Psk,
    Ppsk,
    Enterprise,
    Unknown(String),
}

impl SecurityKind {
    pub fn classify(kind: Option<&str>) -> Self {
        let Some(kind) = kind.map(str::trim).filter(|k| !k.is_empty()) else {
            return SecurityKind::Open;
        };
        match kind.to_ascii_lowercase().as_str() {
            "open" | "none" => SecurityKind::Open,
            "psk" | "wpa2-psk" | "wpa-psk" => SecurityKind::Psk,
            "ppsk" => SecurityKind::Ppsk,
            "enterprise" | "802.1x" | "dot1x" => SecurityKind::Enterprise,
            _ => SecurityKind::Unknown(kind.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SecurityKind::Open => "open",
            SecurityKind::Psk => "psk",
            SecurityKind::Ppsk => "ppsk",
            SecurityKind::Enterprise => "enterprise",
            SecurityKind::Unknown(kind) => kind,
        }
    }
}

/// Maps XIQ's PMF setting; anything unrecognised is treated as optional.
pub fn pmf_mode(value: Option<&str>) -> PmfMode {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("disabled") => PmfMode::Disabled,
        Some("required") => PmfMode::Required,
        _ => PmfMode::Enabled,
    }
}

/// Build the privacy element for an SSID.
///
/// `Ok(None)` is an open network. PSK and PPSK without a usable key cannot be
/// represented on the controller and are reported as skips. `aaa_policy`
/// names the policy converted in this run, if any, for the enterprise hint.
pub fn translate_security(
    security: Option<&SecurityRecord>,
    aaa_policy: Option<&str>,
    label: &str,
    diag: &mut Diagnostics,
) -> Result<Option<Privacy>, SkipReason> {
    let Some(security) = security else {
        return Ok(None);
    };
    let kind = SecurityKind::classify(security.kind.as_deref());
    let pmf = pmf_mode(security.pmf.as_deref());

    match kind {
        SecurityKind::Open => Ok(None),
        SecurityKind::Psk | SecurityKind::Ppsk => {
            match security.psk.as_deref().filter(|k| !k.is_empty()) {
                Some(key) => Ok(Some(Privacy::psk(key, pmf))),
                None => Err(SkipReason::MissingPsk(kind.as_str().to_string())),
            }
        }
        SecurityKind::Enterprise => {
            let hint = match aaa_policy {
                Some(policy) => format!("link {policy} on the controller"),
                None => "assign one on the controller".to_string(),
            };
            diag.adjusted(
                ObjectKind::Service,
                label,
                format!("enterprise SSID has no AAA policy linked; {hint}"),
            );
            Ok(Some(Privacy::enterprise(pmf)))
        }
        SecurityKind::Unknown(other) => {
            diag.adjusted(
                ObjectKind::Service,
                label,
                format!("unknown security type {other:?}; converted as an open network"),
            );
            Ok(None)
        }
    }
}

/// Where an SSID's VLAN ended up on the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyMatch<'a> {
    /// Existing or newly created topology for the SSID's own VLAN.
    Direct(&'a str),
    /// The VLAN is unknown; the first topology created in this run is used.
    Fallback(&'a str),
    Unresolved,
}

/// VLAN to topology-id lookup for one run.
///
/// Topologies already on the controller win over ones created by the run,
/// which are looked up in the run's [`IdAllocator`].
#[derive(Debug)]
pub struct TopologyIndex<'a> {
    existing: HashMap<u16, &'a str>,
    ids: &'a IdAllocator,
    first_created: Option<&'a str>,
}

impl<'a> TopologyIndex<'a> {
    pub fn build(
        existing: &'a [ExistingTopology],
        created: &'a [Topology],
        ids: &'a IdAllocator,
    ) -> Self {
        Self {
            existing: existing
                .iter()
                .filter_map(ExistingTopology::vlan_link)
                .collect(),
            ids,
            first_created: created.first().map(|t| t.id.as_str()),
        }
    }

    pub fn resolve(&self, vlan: Option<u16>) -> TopologyMatch<'a> {
        let direct = vlan.and_then(|v| {
            self.existing
                .get(&v)
                .copied()
                .or_else(|| self.ids.topology_for(v))
        });
        if let Some(id) = direct {
            return TopologyMatch::Direct(id);
        }
        match self.first_created {
            Some(id) => TopologyMatch::Fallback(id),
            None => TopologyMatch::Unresolved,
        }
    }
}

/// Converts XIQ SSIDs into controller services.
///
/// Every service is created disabled; enabling them is a deliberate step on
/// the controller after review.
pub fn convert_services(
    ssids: &[SsidRecord],
    topologies: &TopologyIndex<'_>,
    ids: &IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Vec<Service> {
    let mut out = Vec::new();
    for (index, ssid) in ssids.iter().enumerate() {
        let label = record_label(ssid.name.as_deref(), "ssids", index);
        match convert_ssid(ssid, &label, topologies, ids, defaults, diag) {
            Ok(service) => out.push(service),
            Err(reason) => diag.skipped(ObjectKind::Service, &label, &reason),
        }
    }
    out
}

fn convert_ssid(
    ssid: &SsidRecord,
    label: &str,
    topologies: &TopologyIndex<'_>,
    ids: &IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Result<Service, SkipReason> {
    let name = ssid
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(SkipReason::MissingName)?;

    let policy_name = defaults.aaa_policy_name();
    let aaa_policy = ids
        .lookup_policy(&policy_name)
        .map(|_| policy_name.as_str());
    let privacy = translate_security(ssid.security.as_ref(), aaa_policy, label, diag)?;

    let vlan = ssid
        .vlan_id
        .as_ref()
        .and_then(parse_int)
        .and_then(|v| u16::try_from(v).ok());
    let topology_id = match topologies.resolve(vlan) {
        TopologyMatch::Direct(id) => id,
        TopologyMatch::Fallback(id) => {
            let vlan = vlan.map_or_else(|| "none".to_string(), |v| v.to_string());
            diag.adjusted(
                ObjectKind::Service,
                label,
                format!("vlan {vlan} has no topology; using the first converted topology"),
            );
            id
        }
        TopologyMatch::Unresolved => {
            let vlan = vlan.map_or_else(|| "none".to_string(), |v| v.to_string());
            return Err(SkipReason::NoTopology(vlan));
        }
    };

    let ssid_name = truncate_chars(name, SSID_MAX_LEN);
    if ssid_name.len() != name.len() {
        diag.adjusted(
            ObjectKind::Service,
            label,
            format!("SSID truncated to {SSID_MAX_LEN} characters"),
        );
    }

    let enable_captive_portal = ssid.has_captive_portal();
    if enable_captive_portal {
        diag.adjusted(
            ObjectKind::Service,
            label,
            "captive portal settings are not migrated; configure the portal on the controller",
        );
    }

    Ok(Service {
        id: ids.fresh(),
        service_name: truncate_chars(name, SERVICE_NAME_MAX_LEN),
        ssid: ssid_name,
        status: ServiceStatus::Disabled,
        suppress_ssid: !ssid.broadcast.unwrap_or(true),
        privacy,
        proxied: "Local".to_string(),
        shutdown_on_meshpoint_loss: false,
        dot1d_port_number: 101,
        enabled11k_support: ssid.fast_roaming.unwrap_or(false),
        rm11k_beacon_report: false,
        rm11k_quiet_ie: false,
        uapsd_enabled: true,
        admission_control_video: false,
        admission_control_voice: false,
        admission_control_best_effort: false,
        admission_control_background_traffic: false,
        flexible_client_access: false,
        mba_authorization: false,
        accounting_enabled: false,
        client_to_client_communication: true,
        include_hostname: false,
        mbo: false,
        owe_autogen: false,
        owe_companion: None,
        purge_on_disconnect: false,
        enable11mc_support: true,
        beacon_protection: false,
        enable_captive_portal,
        captive_portal_type: None,
        e_guest_portal_id: None,
        e_guest_settings: Vec::new(),
        pre_authenticated_idle_timeout: 300,
        post_authenticated_idle_timeout: 1800,
        session_timeout: 0,
        default_topology: Some(topology_id.to_string()),
        default_cos: None,
        authenticated_user_default_role_id: Some(defaults.authenticated_role_id.clone()),
        non_authenticated_user_default_role_id: Some(defaults.unauthenticated_role().to_string()),
        aaa_policy_id: None,
        roaming_assist_policy: None,
        vendor_specific_attributes: ["apName", "vnsName", "ssid"]
            .map(String::from)
            .to_vec(),
        hotspot_type: "Disabled".to_string(),
        hotspot: None,
        dscp: DscpMap::default(),
    })
}
