use serde::Serialize;

use super::grouping::{GroupRule, OTHER_GROUP};
use super::Device;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    pub label: String,
    pub emoji: Option<String>,
    pub devices: Vec<Device>,
}

/// Devices below the battery threshold, grouped for display.
///
/// Groups follow the order of the configured rules with the [`OTHER_GROUP`]
/// bucket last. Groups without low-battery devices are left out. Devices
/// inside a group keep the order they were given in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub threshold: u8,
    pub devices_checked: usize,
    /// Devices left out because they reported no battery level.
    pub skipped: usize,
    pub groups: Vec<ReportGroup>,
}

impl Report {
    pub fn build(devices: &[Device], threshold: u8, rules: &[GroupRule]) -> Self {
        let mut buckets: Vec<ReportGroup> = rules
            .iter()
            .map(|r| ReportGroup {
                label: r.label.clone(),
                emoji: r.emoji.clone(),
                devices: Vec::new(),
            })
            .chain(std::iter::once(ReportGroup {
                label: OTHER_GROUP.to_string(),
                emoji: None,
                devices: Vec::new(),
            }))
            .collect();

        for device in devices.iter().filter(|d| d.battery < threshold) {
            // The group was decided when the device was resolved
            let idx = buckets
                .iter()
                .position(|b| b.label == device.group)
                .unwrap_or(rules.len());
            buckets[idx].devices.push(device.clone());
        }
        buckets.retain(|g| !g.devices.is_empty());

        Self {
            threshold,
            devices_checked: devices.len(),
            skipped: 0,
            groups: buckets,
        }
    }

    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn low_battery_count(&self) -> usize {
        self.groups.iter().map(|g| g.devices.len()).sum()
    }

    /// Slack-formatted text: one section per group, or a healthy notice when
    /// nothing is below the threshold.
    pub fn render(&self) -> String {
        if self.is_healthy() {
            return match (self.devices_checked, self.skipped) {
                (0, 0) => ":white_check_mark: No devices found.".to_string(),
                (0, skipped) => format!(
                    ":warning: None of the {skipped} devices reported a battery level."
                ),
                (checked, 0) => format!(
                    ":white_check_mark: All {checked} devices are at or above {}% battery.",
                    self.threshold
                ),
                (checked, skipped) => format!(
                    ":white_check_mark: All {checked} devices are at or above {}% battery. \
                     {skipped} more reported no battery level.",
                    self.threshold
                ),
            };
        }

        self.groups
            .iter()
            .map(|group| {
                let mut lines = Vec::with_capacity(group.devices.len() + 1);
                let title = format!("*{} devices below {}%* :alert:", group.label, self.threshold);
                lines.push(match &group.emoji {
                    Some(emoji) => format!("{emoji} {title}"),
                    None => title,
                });
                lines.extend(
                    group
                        .devices
                        .iter()
                        .map(|d| format!("- {}: {}%", d.name, d.battery)),
                );
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
