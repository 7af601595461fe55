//! ExtremeCloud IQ to Edge Services controller configuration migration.
//!
//! Takes the normalized XIQ configuration produced by an extractor and
//! translates it into controller objects ready to be published. Conversion
//! is best effort: a record that cannot be represented is skipped, a field
//! that cannot be carried over is replaced, and every such decision is
//! returned as a [`ConversionWarning`] so the result can be reviewed before
//! anything reaches the controller.
//!
//! # Layout
//!
//! - [`source`]: normalized XIQ records and input loading
//! - [`validate`]: field validators shared by the converters
//! - [`ids`]: run-scoped identifier allocation
//! - [`transform`]: one converter per controller object kind
//! - [`converter`]: runs the converters in dependency order
//! - [`defaults`]: controller-specific constants, loaded from TOML
//! - [`warnings`]: skip reasons and the warning collector
//! - [`conversion_summary`], [`report`], [`inspect`], [`export`]: reporting
//!
//! # Example
//!
//! ```
//! use xiq_migrate::Converter;
//! use serde_json::json;
//!
//! let source = json!({
//!     "vlans": [{"vlan_id": 10, "subnet": "10.0.10.0/24", "dhcp_enabled": true}],
//!     "ssids": [{"name": "Corp", "vlan_id": 10,
//!                "security": {"type": "psk", "psk": "hunter2"}}]
//! });
//! let conversion = Converter::default().convert_value(source, &[]).unwrap();
//! assert_eq!(conversion.config.services.len(), 1);
//! assert!(conversion.warnings.is_empty());
//! ```
//!
//! Record shapes and JSON serialization live in `edge-schema`; this crate
//! holds everything XIQ-specific.

pub mod conversion_summary;
pub mod converter;
pub mod defaults;
pub mod export;
pub mod ids;
pub mod inspect;
pub mod report;
pub mod source;
pub mod transform;
pub mod validate;
pub mod warnings;

pub use converter::{Conversion, Converter};
pub use defaults::ConversionDefaults;
pub use source::{NormalizedSourceConfig, SourceError};
pub use warnings::{ConversionWarning, SkipReason, WarningSeverity};
