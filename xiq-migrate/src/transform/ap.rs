use edge_schema::{ApConfig, ObjectKind, AP_LOCATION_MAX_LEN};

use crate::source::DeviceRecord;
use crate::validate::truncate_chars;
use crate::warnings::{record_label, Diagnostics, SkipReason};

/// Carries device serial, name and location over to AP configs.
pub fn convert_ap_configs(devices: &[DeviceRecord], diag: &mut Diagnostics) -> Vec<ApConfig> {
    let mut out = Vec::new();
    for (index, device) in devices.iter().enumerate() {
        match convert_device(device) {
            Ok(ap) => out.push(ap),
            Err(reason) => {
                let label = record_label(device.name.as_deref(), "devices", index);
                diag.skipped(ObjectKind::ApConfig, &label, &reason);
            }
        }
    }
    out
}

fn convert_device(device: &DeviceRecord) -> Result<ApConfig, SkipReason> {
    let serial = device
        .serial_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SkipReason::MissingSerial)?;

    let name = device
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(serial);

    Ok(ApConfig {
        serial: serial.to_string(),
        name: name.to_string(),
        location: truncate_chars(
            device.location.as_deref().unwrap_or_default(),
            AP_LOCATION_MAX_LEN,
        ),
    })
}
