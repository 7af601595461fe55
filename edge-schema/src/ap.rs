use serde::{Deserialize, Serialize};

/// Longest location string the controller stores for an AP.
pub const AP_LOCATION_MAX_LEN: usize = 32;

/// Name/location update for an access point, keyed by serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApConfig {
    pub serial: String,
    pub name: String,
    pub location: String,
}
