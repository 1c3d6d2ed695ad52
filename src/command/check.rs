use anyhow::Result;

use battery_alert::{pipeline, Config, Delivery};

use crate::argsets::CheckArgs;

pub fn check(config: &Config, args: CheckArgs) -> Result<()> {
    let delivery = if args.dry_run {
        Delivery::Skip
    } else {
        Delivery::Send
    };
    let outcome = pipeline::run_with(config, delivery)?;
    log::info!(
        "{} ({} checked, {} below threshold, {} skipped)",
        outcome.summary(),
        outcome.devices_checked,
        outcome.devices_below_threshold,
        outcome.skipped
    );
    println!("{}", outcome.details);
    Ok(())
}
