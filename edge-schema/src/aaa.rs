use serde::{Deserialize, Serialize};

/// One RADIUS server inside an AAA policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusServer {
    pub id: String,
    pub server_name: String,
    pub ip_address: String,
    pub authentication_port: u16,
    pub accounting_port: u16,
    pub shared_secret: String,
    pub timeout: u32,
    pub retries: u32,
    pub enabled: bool,
}

/// AAA policy grouping the RADIUS servers used by 802.1X services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AaaPolicy {
    pub id: String,
    pub policy_name: String,
    pub radius_servers: Vec<RadiusServer>,
    pub authentication_protocol: String,
    pub accounting_enabled: bool,
    pub features: Vec<String>,
}
