use edge_schema::ObjectKind;
use serde::Serialize;

use crate::converter::Conversion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub rate_limiters: usize,
    pub cos_policies: usize,
    pub topologies: usize,
    pub aaa_policies: usize,
    pub services: usize,
    pub ap_configs: usize,
    pub skipped: usize,
    pub adjusted: usize,
}

pub fn summarize(conversion: &Conversion) -> ConversionSummary {
    let config = &conversion.config;
    ConversionSummary {
        rate_limiters: config.count(ObjectKind::RateLimiter),
        cos_policies: config.count(ObjectKind::CosPolicy),
        topologies: config.count(ObjectKind::Topology),
        aaa_policies: config.count(ObjectKind::AaaPolicy),
        services: config.count(ObjectKind::Service),
        ap_configs: config.count(ObjectKind::ApConfig),
        skipped: conversion.skipped_count(),
        adjusted: conversion.adjusted_count(),
    }
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "convert_summary rate_limiters={} cos={} topologies={} aaa_policies={} services={} aps={} skipped={} adjusted={}",
        summary.rate_limiters,
        summary.cos_policies,
        summary.topologies,
        summary.aaa_policies,
        summary.services,
        summary.ap_configs,
        summary.skipped,
        summary.adjusted
    )
}

#[cfg(test)]
mod tests {
    use super::{render, summarize};
    use crate::converter::Converter;
    use serde_json::json;

    #[test]
    fn summary_counts_output_and_warnings() {
        let conversion = Converter::default()
            .convert_value(
                json!({
                    "vlans": [{"vlan_id": 10}, {"vlan_id": 10}],
                    "ssids": [{"name": "Corp", "vlan_id": 10}],
                    "rate_limiters": [{"name": "bad", "bandwidth": 0}]
                }),
                &[],
            )
            .expect("convert");
        let summary = summarize(&conversion);
        assert_eq!(summary.topologies, 1);
        assert_eq!(summary.services, 1);
        assert_eq!(summary.rate_limiters, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(
            render(summary),
            "convert_summary rate_limiters=0 cos=0 topologies=1 aaa_policies=0 services=1 aps=0 skipped=2 adjusted=0"
        );
    }
}
