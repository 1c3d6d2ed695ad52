pub const JOAN_CLIENT_ID: &str = "JOAN_CLIENT_ID";
pub const JOAN_CLIENT_SECRET: &str = "JOAN_CLIENT_SECRET";
pub const JOAN_TOKEN_URL: &str = "JOAN_TOKEN_URL";
pub const JOAN_DEVICES_URL: &str = "JOAN_DEVICES_URL";
pub const JOAN_DEVICE_NAMES: &str = "JOAN_DEVICE_NAMES";

pub const SLACK_WEBHOOK: &str = "SLACK_WEBHOOK";

pub const BATTERY_THRESHOLD: &str = "BATTERY_THRESHOLD";
pub const DEVICE_GROUPS: &str = "DEVICE_GROUPS";
pub const NOTIFY_WHEN_HEALTHY: &str = "NOTIFY_WHEN_HEALTHY";

pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const PORT: &str = "PORT";

pub const LOG_LEVEL: &str = "LOGGING_LEVEL";
pub const ENV_FILE: &str = "BATTERY_ALERT_ENV_FILE";
