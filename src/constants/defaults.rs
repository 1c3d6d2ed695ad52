use std::time::Duration;

pub const JOAN_TOKEN_URL: &str = "https://portal.getjoan.com/api/token/";
pub const JOAN_DEVICES_URL: &str = "https://portal.getjoan.com/api/v1.0/devices/";

pub const BATTERY_THRESHOLD: u8 = 20;
// Groups are matched in this order; anything else lands in "Other"
pub const DEVICE_GROUPS: &str = "Israel=:flag-il:,US=:us:";
pub const NOTIFY_WHEN_HEALTHY: bool = false;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const LISTEN_HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8080;

pub const LOG_LEVEL: &str = "INFO";
