use std::collections::HashMap;

use serde::Serialize;

use crate::interfaces::joan::JoanDevice;

pub mod grouping;
pub mod report;

pub use grouping::{GroupRule, OTHER_GROUP};
pub use report::{Report, ReportGroup};

/// A device with a battery reading, ready to be checked against the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub uuid: String,
    pub name: String,
    pub battery: u8,
    pub group: String,
}

impl Device {
    pub fn new(uuid: &str, name: &str, battery: u8, rules: &[GroupRule]) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: name.to_string(),
            battery,
            group: grouping::group_label(name, rules).to_string(),
        }
    }
}

/// Display name for a provider record.
///
/// Precedence: operator-supplied name (keyed by lowercase uuid), first room
/// resource, the device's own name, then the uuid itself.
pub fn display_name<'a>(device: &'a JoanDevice, names: &'a HashMap<String, String>) -> &'a str {
    let non_empty = |s: &&str| !s.trim().is_empty();
    names
        .get(&device.uuid.to_lowercase())
        .map(String::as_str)
        .filter(non_empty)
        .or_else(|| {
            device
                .room_resources
                .first()
                .and_then(|r| r.name.as_deref())
                .filter(non_empty)
        })
        .or_else(|| device.name.as_deref().filter(non_empty))
        .unwrap_or(&device.uuid)
}

/// Converts provider records into devices, dropping those without a battery
/// reading. Returns the devices (in provider order) and the number dropped.
pub fn resolve_devices(
    raw: &[JoanDevice],
    names: &HashMap<String, String>,
    rules: &[GroupRule],
) -> (Vec<Device>, usize) {
    let mut skipped = 0;
    let devices = raw
        .iter()
        .filter_map(|d| match d.battery {
            Some(battery) => Some(Device::new(&d.uuid, display_name(d, names), battery, rules)),
            None => {
                log::warn!("Device {} reported no battery level; skipping", d.uuid);
                skipped += 1;
                None
            }
        })
        .collect();
    (devices, skipped)
}
