use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::alerts::{self, Report};
use crate::config::Config;
use crate::interfaces::joan::{self, AuthError, FetchError};
use crate::interfaces::{http_agent, slack, slack::DeliveryError};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("device listing failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("alert delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl RunError {
    /// Which stage of the run failed, as reported to the caller.
    pub fn stage(&self) -> &'static str {
        match self {
            RunError::Auth(_) => "auth",
            RunError::Fetch(_) => "fetch",
            RunError::Delivery(_) => "delivery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Send,
    /// Render the report but never post it.
    Skip,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub devices_checked: usize,
    pub devices_below_threshold: usize,
    pub skipped: usize,
    pub delivered: bool,
    pub details: String,
    pub checked_at: String,
}

impl RunOutcome {
    pub fn summary(&self) -> &'static str {
        match (self.devices_below_threshold, self.delivered) {
            (0, true) => "All devices healthy; notice sent",
            (0, false) => "No devices below battery threshold.",
            (_, true) => "Alert sent successfully",
            (_, false) => "Alert rendered but not sent",
        }
    }
}

pub fn run(config: &Config) -> Result<RunOutcome, RunError> {
    run_with(config, Delivery::Send)
}

/// One full battery check: token, device list, report, and (unless skipped
/// or healthy) a single Slack post.
pub fn run_with(config: &Config, delivery: Delivery) -> Result<RunOutcome, RunError> {
    let checked_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let agent = http_agent::build_agent(config.http_timeout);

    let credential = joan::get_token(
        &agent,
        config.token_url.as_str(),
        &config.client_id,
        &config.client_secret,
    )?;
    let raw_devices = joan::fetch_devices(
        &agent,
        config.devices_url.as_str(),
        &credential.access_token,
    )?;

    let (devices, skipped) =
        alerts::resolve_devices(&raw_devices, &config.device_names, &config.groups);
    let report =
        Report::build(&devices, config.threshold, &config.groups).with_skipped(skipped);
    let details = report.render();
    log::info!(
        "{} of {} devices below {}% ({} without a battery reading)",
        report.low_battery_count(),
        report.devices_checked,
        config.threshold,
        skipped
    );
    log::debug!("Report:\n{details}");

    let wants_post = !report.is_healthy() || config.notify_when_healthy;
    let delivered = match delivery {
        Delivery::Send if wants_post => {
            slack::post_message(&agent, config.webhook_url.as_str(), &details)?;
            true
        }
        Delivery::Send => {
            log::info!("No devices below battery threshold; nothing to send");
            false
        }
        Delivery::Skip => {
            log::info!("Delivery skipped");
            false
        }
    };

    Ok(RunOutcome {
        devices_checked: report.devices_checked,
        devices_below_threshold: report.low_battery_count(),
        skipped,
        delivered,
        details,
        checked_at,
    })
}
