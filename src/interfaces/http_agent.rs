use std::time::Duration;

use ureq::http::Response;
use ureq::tls::{TlsConfig, TlsProvider};
use ureq::{Agent, Body};

const ERROR_BODY_SNIPPET_CHARS: usize = 200;

/// Status and body of a completed request, whatever the status code.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Start of the body, for error messages.
    pub fn snippet(&self) -> String {
        let body = self.body.trim();
        match body.char_indices().nth(ERROR_BODY_SNIPPET_CHARS) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        }
    }
}

/// One agent is shared by every request of a run. Non-2xx responses are
/// returned as [`Reply`]s rather than errors so callers can report the body.
pub fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .tls_config(TlsConfig::builder().provider(TlsProvider::NativeTls).build())
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

pub fn read_reply(mut resp: Response<Body>) -> Result<Reply, ureq::Error> {
    let status = resp.status().as_u16();
    let body = resp.body_mut().read_to_string()?;
    Ok(Reply { status, body })
}
