use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::alerts::grouping::{parse_group_rules, GroupRule, GroupRuleError};
use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("{var} is not a valid URL: {source}")]
    Url {
        var: &'static str,
        source: url::ParseError,
    },
    #[error("could not read device names from {}: {source}", .path.display())]
    NamesFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse device names in {}: {source}", .path.display())]
    NamesParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{var} is invalid: {0}", var = envvars::DEVICE_GROUPS)]
    Groups(#[from] GroupRuleError),
}

/// Settings for every run, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: Url,
    pub devices_url: Url,
    pub webhook_url: Url,
    pub threshold: u8,
    pub groups: Vec<GroupRule>,
    /// Display names keyed by lowercase device uuid.
    pub device_names: HashMap<String, String>,
    pub notify_when_healthy: bool,
    pub http_timeout: Duration,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url.as_str())
            .field("devices_url", &self.devices_url.as_str())
            .field("webhook_url", &"<redacted>")
            .field("threshold", &self.threshold)
            .field("groups", &self.groups)
            .field("device_names", &self.device_names.len())
            .field("notify_when_healthy", &self.notify_when_healthy)
            .field("http_timeout", &self.http_timeout)
            .field("port", &self.port)
            .finish()
    }
}

fn optional_var(var: &'static str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    optional_var(var).ok_or(ConfigError::Missing(var))
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional_var(var) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            reason: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}

fn url_var(var: &'static str, default: Option<&str>) -> Result<Url, ConfigError> {
    let raw = match default {
        Some(default) => optional_var(var).unwrap_or_else(|| default.to_string()),
        None => required_var(var)?,
    };
    Url::parse(raw.trim()).map_err(|source| ConfigError::Url { var, source })
}

fn bool_var(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match optional_var(var).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            var,
            reason: format!("{other:?} is not a boolean"),
        }),
    }
}

/// Reads a JSON object mapping device uuid to display name.
pub fn load_device_names(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::NamesFile {
        path: path.to_path_buf(),
        source,
    })?;
    let names: HashMap<String, String> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::NamesParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(names
        .into_iter()
        .map(|(uuid, name)| (uuid.to_lowercase(), name))
        .collect())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let threshold: u8 = parse_var(envvars::BATTERY_THRESHOLD, defaults::BATTERY_THRESHOLD)?;
        if threshold > 100 {
            return Err(ConfigError::Invalid {
                var: envvars::BATTERY_THRESHOLD,
                reason: format!("{threshold} is above 100"),
            });
        }

        let timeout_secs: u64 =
            parse_var(envvars::HTTP_TIMEOUT_SECS, defaults::HTTP_TIMEOUT.as_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: envvars::HTTP_TIMEOUT_SECS,
                reason: "must be at least 1".into(),
            });
        }

        let groups = parse_group_rules(
            &optional_var(envvars::DEVICE_GROUPS)
                .unwrap_or_else(|| defaults::DEVICE_GROUPS.to_string()),
        )?;

        let device_names = match optional_var(envvars::JOAN_DEVICE_NAMES) {
            Some(path) => load_device_names(Path::new(path.trim()))?,
            None => HashMap::new(),
        };

        Ok(Self {
            client_id: required_var(envvars::JOAN_CLIENT_ID)?,
            client_secret: required_var(envvars::JOAN_CLIENT_SECRET)?,
            token_url: url_var(envvars::JOAN_TOKEN_URL, Some(defaults::JOAN_TOKEN_URL))?,
            devices_url: url_var(envvars::JOAN_DEVICES_URL, Some(defaults::JOAN_DEVICES_URL))?,
            webhook_url: url_var(envvars::SLACK_WEBHOOK, None)?,
            threshold,
            groups,
            device_names,
            notify_when_healthy: bool_var(
                envvars::NOTIFY_WHEN_HEALTHY,
                defaults::NOTIFY_WHEN_HEALTHY,
            )?,
            http_timeout: Duration::from_secs(timeout_secs),
            port: parse_var(envvars::PORT, defaults::PORT)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", defaults::LISTEN_HOST, self.port)
    }
}
