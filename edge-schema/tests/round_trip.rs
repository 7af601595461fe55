use edge_schema::{
    read_bundle, write_file, ApConfig, CosPolicy, RateLimiter, TargetConfig,
};
use pretty_assertions::assert_eq;

#[test]
fn written_bundle_reads_back_unchanged() {
    let config = TargetConfig {
        rate_limiters: vec![RateLimiter {
            id: "rl-1".to_string(),
            name: "Guest-5M".to_string(),
            cir_kbps: 5000,
            features: vec!["CENTRALIZED-SITE".to_string()],
        }],
        cos_policies: vec![CosPolicy {
            id: "cos-1".to_string(),
            name: "Guest".to_string(),
            dscp: 10,
            dot1p: 1,
            ingress_rate_limiter_id: Some("rl-1".to_string()),
            egress_rate_limiter_id: None,
            features: vec!["CENTRALIZED-SITE".to_string()],
        }],
        ap_configs: vec![ApConfig {
            serial: "AP1234".to_string(),
            name: "lobby".to_string(),
            location: "Building A".to_string(),
        }],
        ..TargetConfig::default()
    };

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bundle.json");
    write_file(&config, &path).expect("write bundle");

    let raw = std::fs::read_to_string(&path).expect("read raw");
    assert!(raw.contains("\"cirKbps\": 5000"));
    assert!(raw.contains("\"ingressRateLimiterId\": \"rl-1\""));
    assert!(!raw.contains("egressRateLimiterId"));

    let back = read_bundle(&path).expect("read bundle");
    assert_eq!(back, config);
}
