use serde::Deserialize;
use thiserror::Error;

/// Delivery metadata sent alongside every payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookHeaders {
    pub event: String,
    pub delivery: Option<String>,
    pub hook_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    pub repository: Option<PushRepository>,
}

impl PushEvent {
    /// Paths added by any commit of the push, in commit order.
    pub fn added_files(&self) -> impl Iterator<Item = &str> {
        self.commits
            .iter()
            .flat_map(|commit| commit.added.iter().map(String::as_str))
    }
}

/// Only the paths a commit added; the rest of the commit object is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PushCommit {
    #[serde(default)]
    pub added: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushRepository {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PingEvent {
    pub zen: Option<String>,
    pub hook_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum WebhookEvent {
    Push(PushEvent),
    Ping(PingEvent),
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum ParseWebhookEventError {
    #[error("DeserializePayload: {event}: {source}")]
    DeserializePayload {
        event: String,
        source: serde_json::Error,
    },
}

impl WebhookEvent {
    /// Decodes `body` according to the `X-GitHub-Event` name. Events this
    /// crate has no type for are returned as `Unsupported` without parsing.
    pub fn parse(event: &str, body: &[u8]) -> Result<Self, ParseWebhookEventError> {
        let deserialize_error = |source| ParseWebhookEventError::DeserializePayload {
            event: event.to_string(),
            source,
        };

        match event {
            "push" => serde_json::from_slice(body)
                .map(WebhookEvent::Push)
                .map_err(deserialize_error),
            "ping" => serde_json::from_slice(body)
                .map(WebhookEvent::Ping)
                .map_err(deserialize_error),
            other => Ok(WebhookEvent::Unsupported(other.to_string())),
        }
    }
}
