use serde::{Deserialize, Serialize};

/// Protected Management Frames setting as the controller names it.
///
/// The controller calls the "optional" PMF mode `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PmfMode {
    Disabled,
    Enabled,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WpaPsk {
    pub mode: String,
    pub pmf_mode: PmfMode,
    pub key_hex_encoded: bool,
    pub preshared_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WpaEnterprise {
    pub mode: String,
    pub pmf_mode: PmfMode,
}

/// Privacy element attached to a service.
///
/// Serialized externally tagged, which matches the controller's
/// `{"WpaPskElement": {...}}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Privacy {
    #[serde(rename = "WpaPskElement")]
    WpaPsk(WpaPsk),
    #[serde(rename = "WpaEnterpriseElement")]
    WpaEnterprise(WpaEnterprise),
}

impl Privacy {
    /// WPA2/WPA3 transition-mode PSK privacy.
    pub fn psk(preshared_key: impl Into<String>, pmf_mode: PmfMode) -> Self {
        Privacy::WpaPsk(WpaPsk {
            mode: "auto".to_string(),
            pmf_mode,
            key_hex_encoded: false,
            preshared_key: preshared_key.into(),
        })
    }

    /// WPA2/WPA3 transition-mode 802.1X privacy.
    pub fn enterprise(pmf_mode: PmfMode) -> Self {
        Privacy::WpaEnterprise(WpaEnterprise {
            mode: "auto".to_string(),
            pmf_mode,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DscpMap {
    pub code_points: Vec<u8>,
}

/// Default DSCP-to-priority table used for newly created services.
pub const DEFAULT_DSCP_CODE_POINTS: [u8; 64] = [
    2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 2, 0, 2, 0, 1, 0, 3, 0, 3, 0, 3, 0, 3, 0, 4, 0, 4, 0, 4, 0,
    4, 0, 5, 0, 5, 0, 5, 0, 5, 0, 0, 0, 0, 0, 6, 0, 6, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0,
];

impl Default for DscpMap {
    fn default() -> Self {
        Self {
            code_points: DEFAULT_DSCP_CODE_POINTS.to_vec(),
        }
    }
}

/// A wireless network (SSID) on the controller.
///
/// `None` in a field marked `skip_serializing_if` is left out of the JSON
/// body entirely. The role, AAA, captive-portal-type and CoS references are
/// always sent, as `null` when unset, because the API rejects a service
/// without those keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub service_name: String,
    pub ssid: String,
    pub status: ServiceStatus,
    pub suppress_ssid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
    pub proxied: String,
    pub shutdown_on_meshpoint_loss: bool,
    pub dot1d_port_number: u32,
    pub enabled11k_support: bool,
    pub rm11k_beacon_report: bool,
    pub rm11k_quiet_ie: bool,
    pub uapsd_enabled: bool,
    pub admission_control_video: bool,
    pub admission_control_voice: bool,
    pub admission_control_best_effort: bool,
    pub admission_control_background_traffic: bool,
    pub flexible_client_access: bool,
    pub mba_authorization: bool,
    pub accounting_enabled: bool,
    pub client_to_client_communication: bool,
    pub include_hostname: bool,
    pub mbo: bool,
    pub owe_autogen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owe_companion: Option<String>,
    pub purge_on_disconnect: bool,
    pub enable11mc_support: bool,
    pub beacon_protection: bool,
    pub enable_captive_portal: bool,
    pub captive_portal_type: Option<String>,
    #[serde(default, rename = "eGuestPortalId", skip_serializing_if = "Option::is_none")]
    pub e_guest_portal_id: Option<String>,
    #[serde(rename = "eGuestSettings")]
    pub e_guest_settings: Vec<String>,
    pub pre_authenticated_idle_timeout: u32,
    pub post_authenticated_idle_timeout: u32,
    pub session_timeout: u32,
    pub default_topology: Option<String>,
    #[serde(rename = "defaultCoS")]
    pub default_cos: Option<String>,
    #[serde(rename = "authenticatedUserDefaultRoleID")]
    pub authenticated_user_default_role_id: Option<String>,
    #[serde(rename = "nonAuthenticatedUserDefaultRoleID")]
    pub non_authenticated_user_default_role_id: Option<String>,
    pub aaa_policy_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roaming_assist_policy: Option<String>,
    pub vendor_specific_attributes: Vec<String>,
    pub hotspot_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<String>,
    pub dscp: DscpMap,
}
