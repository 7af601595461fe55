//! Record types for the Edge Services wireless controller management API.
//!
//! The types serialize to the exact JSON bodies the controller accepts, so a
//! publisher can POST them without further massaging. Reading helpers cover
//! the one controller document a migration consumes (the topology listing)
//! and previously written bundles.

pub mod aaa;
pub mod ap;
pub mod bundle;
pub mod parser;
pub mod qos;
pub mod service;
pub mod topology;
pub mod writer;

pub use aaa::{AaaPolicy, RadiusServer};
pub use ap::{ApConfig, AP_LOCATION_MAX_LEN};
pub use bundle::{ObjectKind, PublishStep, TargetConfig, PUBLISH_ORDER};
pub use parser::{json_type_name, parse_topologies, read_bundle, read_topologies, ReadError};
pub use qos::{CosPolicy, RateLimiter};
pub use service::{
    DscpMap, PmfMode, Privacy, Service, ServiceStatus, WpaEnterprise, WpaPsk,
    DEFAULT_DSCP_CODE_POINTS,
};
pub use topology::{DhcpMode, ExistingTopology, Topology};
pub use writer::{write, write_file, WriteError};
