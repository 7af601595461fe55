use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aaa::AaaPolicy;
use crate::ap::ApConfig;
use crate::qos::{CosPolicy, RateLimiter};
use crate::service::Service;
use crate::topology::Topology;

/// Kinds of object the controller accepts from a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    RateLimiter,
    CosPolicy,
    Topology,
    AaaPolicy,
    Service,
    ApConfig,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::RateLimiter => "rate_limiter",
            ObjectKind::CosPolicy => "cos_policy",
            ObjectKind::Topology => "topology",
            ObjectKind::AaaPolicy => "aaa_policy",
            ObjectKind::Service => "service",
            ObjectKind::ApConfig => "ap_config",
        }
    }

    /// REST collection path, relative to the management base URL.
    pub fn collection_path(self) -> &'static str {
        match self {
            ObjectKind::RateLimiter => "/v1/ratelimiters",
            ObjectKind::CosPolicy => "/v1/cos",
            ObjectKind::Topology => "/v1/topologies",
            ObjectKind::AaaPolicy => "/v1/aaapolicy",
            ObjectKind::Service => "/v1/services",
            ObjectKind::ApConfig => "/v1/aps",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which objects must be created: anything referenced by id has
/// to exist before the object that references it.
pub const PUBLISH_ORDER: [ObjectKind; 6] = [
    ObjectKind::RateLimiter,
    ObjectKind::CosPolicy,
    ObjectKind::Topology,
    ObjectKind::AaaPolicy,
    ObjectKind::Service,
    ObjectKind::ApConfig,
];

/// One step of a publish run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishStep {
    pub kind: ObjectKind,
    pub path: &'static str,
    pub count: usize,
}

/// Everything produced by one conversion run.
///
/// Every list is always present in the JSON form, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub topologies: Vec<Topology>,
    #[serde(default)]
    pub aaa_policies: Vec<AaaPolicy>,
    #[serde(default)]
    pub ap_configs: Vec<ApConfig>,
    #[serde(default)]
    pub rate_limiters: Vec<RateLimiter>,
    #[serde(default)]
    pub cos_policies: Vec<CosPolicy>,
}

impl TargetConfig {
    pub fn count(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::RateLimiter => self.rate_limiters.len(),
            ObjectKind::CosPolicy => self.cos_policies.len(),
            ObjectKind::Topology => self.topologies.len(),
            ObjectKind::AaaPolicy => self.aaa_policies.len(),
            ObjectKind::Service => self.services.len(),
            ObjectKind::ApConfig => self.ap_configs.len(),
        }
    }

    /// Non-empty object kinds in [`PUBLISH_ORDER`].
    pub fn publish_plan(&self) -> Vec<PublishStep> {
        PUBLISH_ORDER
            .iter()
            .map(|kind| PublishStep {
                kind: *kind,
                path: kind.collection_path(),
                count: self.count(*kind),
            })
            .filter(|step| step.count > 0)
            .collect()
    }
}
