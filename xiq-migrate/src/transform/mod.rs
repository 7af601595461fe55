//! Per-object converters from XIQ records to controller records.
//!
//! Each converter returns the records it could build and reports every
//! skipped or adjusted record through [`Diagnostics`](crate::warnings::Diagnostics).

pub mod aaa;
pub mod ap;
pub mod qos;
pub mod service;
pub mod topology;
