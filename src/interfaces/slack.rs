use serde::Serialize;
use thiserror::Error;
use ureq::Agent;

use super::http_agent::read_reply;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Posts `text` to a Slack incoming webhook.
pub fn post_message(agent: &Agent, webhook_url: &str, text: &str) -> Result<(), DeliveryError> {
    log::info!("Posting alert to Slack");
    let reply = read_reply(agent.post(webhook_url).send_json(&WebhookMessage { text })?)?;
    if !reply.is_success() {
        return Err(DeliveryError::Status {
            status: reply.status,
            body: reply.snippet(),
        });
    }
    log::info!("Slack message sent successfully");
    Ok(())
}
