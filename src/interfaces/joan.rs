//! Client for the Joan portal API: client-credentials token exchange and the
//! paginated device list.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;
use ureq::Agent;
use url::Url;

use super::http_agent::{read_reply, Reply};

// Guards against a `next` link that never ends
const MAX_DEVICE_PAGES: usize = 100;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("token endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed token response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("token response contained an empty access_token")]
    EmptyToken,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("device list request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("device endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed device list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("device list still had a next page after {0} pages")]
    TooManyPages(usize),
    #[error("invalid device list link {link:?}: {source}")]
    InvalidLink {
        link: String,
        source: url::ParseError,
    },
    #[error("refusing to follow next link {0} outside the device endpoint origin")]
    ForeignLink(String),
}

#[derive(Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomResource {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoanDevice {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub battery: Option<u8>,
    #[serde(
        default,
        rename = "roomResources",
        deserialize_with = "null_as_empty"
    )]
    pub room_resources: Vec<RoomResource>,
}

#[derive(Debug, Deserialize)]
struct DevicePage {
    results: Vec<JoanDevice>,
    #[serde(default)]
    next: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RoomResource>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<RoomResource>>::deserialize(deserializer)?.unwrap_or_default())
}

fn basic_auth(client_id: &str, client_secret: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{client_id}:{client_secret}")))
}

pub fn get_token(
    agent: &Agent,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<Credential, AuthError> {
    log::info!("Requesting access token");
    let reply = read_reply(
        agent
            .post(token_url)
            .header("Authorization", basic_auth(client_id, client_secret))
            .send_form([("grant_type", "client_credentials")])?,
    )?;
    if !reply.is_success() {
        return Err(AuthError::Status {
            status: reply.status,
            body: reply.snippet(),
        });
    }

    let credential: Credential = serde_json::from_str(&reply.body)?;
    if credential.access_token.trim().is_empty() {
        return Err(AuthError::EmptyToken);
    }
    log::info!(
        "Access token received (expires in {})",
        credential
            .expires_in
            .map_or_else(|| "unknown".to_string(), |s| format!("{s}s"))
    );
    Ok(credential)
}

fn fetch_page(agent: &Agent, url: &str, token: &str) -> Result<DevicePage, FetchError> {
    log::debug!("Fetching device page {url}");
    let reply: Reply = read_reply(
        agent
            .get(url)
            .header("Authorization", format!("Bearer {token}"))
            .call()?,
    )?;
    if !reply.is_success() {
        return Err(FetchError::Status {
            status: reply.status,
            body: reply.snippet(),
        });
    }
    Ok(serde_json::from_str(&reply.body)?)
}

/// Resolves a `next` link against the page it came from. The bearer token goes
/// with every page request, so only links on the device endpoint's origin are
/// followed.
fn next_page_url(base: &Url, current: &Url, link: &str) -> Result<Url, FetchError> {
    let url = current.join(link).map_err(|source| FetchError::InvalidLink {
        link: link.to_string(),
        source,
    })?;
    if url.origin() != base.origin() {
        return Err(FetchError::ForeignLink(url.to_string()));
    }
    Ok(url)
}

/// Fetches every device, following `next` links, in provider order.
pub fn fetch_devices(
    agent: &Agent,
    devices_url: &str,
    token: &str,
) -> Result<Vec<JoanDevice>, FetchError> {
    log::info!("Fetching devices list");
    let base = Url::parse(devices_url).map_err(|source| FetchError::InvalidLink {
        link: devices_url.to_string(),
        source,
    })?;
    let mut devices = Vec::new();
    let mut next = Some(base.clone());
    let mut pages = 0;

    while let Some(url) = next {
        if pages == MAX_DEVICE_PAGES {
            return Err(FetchError::TooManyPages(pages));
        }
        let page = fetch_page(agent, url.as_str(), token)?;
        devices.extend(page.results);
        next = match page.next.filter(|n| !n.is_empty()) {
            Some(link) => Some(next_page_url(&base, &url, &link)?),
            None => None,
        };
        pages += 1;
    }

    log::info!("Fetched {} devices in {} page(s)", devices.len(), pages);
    Ok(devices)
}
