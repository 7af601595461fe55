use serde::{Deserialize, Serialize};

/// Bandwidth limiter; the controller only accepts kbps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimiter {
    pub id: String,
    pub name: String,
    pub cir_kbps: u64,
    pub features: Vec<String>,
}

/// Class-of-service policy with optional limiter references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosPolicy {
    pub id: String,
    pub name: String,
    pub dscp: u8,
    pub dot1p: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_rate_limiter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress_rate_limiter_id: Option<String>,
    pub features: Vec<String>,
}
