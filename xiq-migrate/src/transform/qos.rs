use std::collections::HashMap;

use edge_schema::{CosPolicy, ObjectKind, RateLimiter};

use crate::defaults::ConversionDefaults;
use crate::ids::IdAllocator;
use crate::source::{CosPolicyRecord, RateLimiterRecord};
use crate::validate::{parse_int, parse_number};
use crate::warnings::{record_label, Diagnostics, SkipReason};

/// Converts bandwidth profiles, normalizing every rate to kbps.
pub fn convert_rate_limiters(
    records: &[RateLimiterRecord],
    ids: &IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Vec<RateLimiter> {
    let mut out = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let label = record_label(record.name.as_deref(), "rate_limiters", index);
        match convert_rate_limiter(record, &label, out.len(), ids, defaults, diag) {
            Ok(limiter) => out.push(limiter),
            Err(reason) => diag.skipped(ObjectKind::RateLimiter, &label, &reason),
        }
    }
    out
}

fn convert_rate_limiter(
    record: &RateLimiterRecord,
    label: &str,
    converted: usize,
    ids: &IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Result<RateLimiter, SkipReason> {
    let factor = match record.unit.as_deref().map(|u| u.trim().to_ascii_lowercase()) {
        None => 1.0,
        Some(unit) if unit.is_empty() || unit == "kbps" => 1.0,
        Some(unit) if unit == "mbps" => 1000.0,
        Some(unit) => {
            diag.adjusted(
                ObjectKind::RateLimiter,
                label,
                format!("unknown unit {unit:?}; bandwidth read as kbps"),
            );
            1.0
        }
    };

    let bandwidth = record.bandwidth.as_ref().and_then(parse_number).unwrap_or(0.0);
    let kbps = (bandwidth * factor).trunc();
    if kbps <= 0.0 || kbps > u64::MAX as f64 {
        let raw = record
            .bandwidth
            .as_ref()
            .map_or_else(|| "nothing".to_string(), ToString::to_string);
        return Err(SkipReason::NonPositiveBandwidth(raw));
    }

    Ok(RateLimiter {
        id: ids.fresh(),
        name: source_name(record.name.as_deref(), "RateLimiter", converted),
        cir_kbps: kbps as u64,
        features: defaults.features.clone(),
    })
}

/// Converts class-of-service policies, linking rate limiters by name.
pub fn convert_cos_policies(
    records: &[CosPolicyRecord],
    rate_limiters: &[RateLimiter],
    ids: &IdAllocator,
    defaults: &ConversionDefaults,
    diag: &mut Diagnostics,
) -> Vec<CosPolicy> {
    let limiters: HashMap<&str, &str> = rate_limiters
        .iter()
        .map(|l| (l.name.as_str(), l.id.as_str()))
        .collect();

    let mut out = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let label = record_label(record.name.as_deref(), "cos_policies", index);
        let ingress = resolve_limiter(
            record.ingress_limiter_name.as_deref(),
            "ingress",
            &limiters,
            &label,
            diag,
        );
        let egress = resolve_limiter(
            record.egress_limiter_name.as_deref(),
            "egress",
            &limiters,
            &label,
            diag,
        );

        out.push(CosPolicy {
            id: ids.fresh(),
            name: source_name(record.name.as_deref(), "CoS", index),
            dscp: bounded(record.dscp.as_ref(), 63),
            dot1p: bounded(record.dot1p.as_ref(), 7),
            ingress_rate_limiter_id: ingress,
            egress_rate_limiter_id: egress,
            features: defaults.features.clone(),
        });
    }
    out
}

fn resolve_limiter(
    name: Option<&str>,
    direction: &str,
    limiters: &HashMap<&str, &str>,
    label: &str,
    diag: &mut Diagnostics,
) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty())?;
    match limiters.get(name) {
        Some(id) => Some((*id).to_string()),
        None => {
            diag.adjusted(
                ObjectKind::CosPolicy,
                label,
                format!("{direction} rate limiter {name:?} not found; reference left empty"),
            );
            None
        }
    }
}

/// Values outside `0..=max` become 0.
fn bounded(value: Option<&serde_json::Value>, max: u8) -> u8 {
    value
        .and_then(parse_int)
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| *v <= max)
        .unwrap_or(0)
}

fn source_name(name: Option<&str>, prefix: &str, converted: usize) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("{prefix}-{}", converted + 1),
    }
}
