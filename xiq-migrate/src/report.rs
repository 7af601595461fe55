use colored::Colorize;
use edge_schema::PublishStep;

use crate::inspect::SourceInventory;
use crate::warnings::{ConversionWarning, WarningSeverity};

/// Render conversion warnings for terminal output, one per line.
pub fn render_warnings(warnings: &[ConversionWarning]) -> String {
    let mut out = Vec::new();
    for warning in warnings {
        let tag = match warning.severity {
            WarningSeverity::Skipped => "SKIPPED".red().to_string(),
            WarningSeverity::Adjusted => "ADJUSTED".yellow().to_string(),
        };
        out.push(format!(
            "{tag} {} {:?}: {}",
            warning.object, warning.name, warning.message
        ));
    }
    out.join("\n")
}

/// Render the order in which a publisher should create the bundle's objects.
pub fn render_publish_plan(plan: &[PublishStep]) -> String {
    let mut out = Vec::new();
    out.push("publish_plan".cyan().to_string());
    if plan.is_empty() {
        out.push("- none".to_string());
    }
    for (n, step) in plan.iter().enumerate() {
        out.push(format!(
            "{}. POST {} x{} ({})",
            n + 1,
            step.path,
            step.count,
            step.kind
        ));
    }
    out.join("\n")
}

/// Render a source inventory.
pub fn render_inventory(inv: &SourceInventory) -> String {
    let mut out = Vec::new();
    out.push("source_inventory".to_string());
    out.push(format!("- ssids: {}", inv.ssids));
    out.push(format!("- vlans: {}", inv.vlans));
    out.push(format!(
        "- authentication_servers: {}",
        inv.authentication_servers
    ));
    out.push(format!("- rate_limiters: {}", inv.rate_limiters));
    out.push(format!("- cos_policies: {}", inv.cos_policies));
    out.push(format!("- devices: {}", inv.devices));
    out.push(String::new());
    out.push("ssid_security".to_string());
    if inv.security.is_empty() {
        out.push("- none".to_string());
    }
    for (kind, count) in &inv.security {
        out.push(format!("- {kind}: {count}"));
    }
    out.push(String::new());
    out.push("lossy".to_string());
    let dropped = format!("- ssids without preshared key: {}", inv.keyless_psk_ssids);
    if inv.keyless_psk_ssids > 0 {
        out.push(dropped.red().to_string());
    } else {
        out.push(dropped);
    }
    out.push(format!("- vlans without vlan_id: {}", inv.vlans_without_id));
    out.push(format!(
        "- ssids with captive portal: {}",
        inv.captive_portal_ssids
    ));
    let unreadable = format!("- unreadable records: {}", inv.unreadable_records);
    if inv.unreadable_records > 0 {
        out.push(unreadable.red().to_string());
    } else {
        out.push(unreadable);
    }
    out.join("\n")
}
