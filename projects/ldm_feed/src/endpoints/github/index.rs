use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use interfaces_github_webhooks::{
    event::{ParseWebhookEventError, WebhookEvent, WebhookHeaders},
    signature::{verify_signature, VerifySignatureError},
    DELIVERY_HEADER, EVENT_HEADER, HOOK_ID_HEADER, SIGNATURE_256_HEADER,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::ingest::{IngestError, WebhookEventProcessor};

/// Shared secret configured on the GitHub webhook. `None` skips signature checks.
#[derive(Debug, Clone, Default)]
pub struct WebhookSecret(pub Option<String>);

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Missing X-GitHub-Event header")]
    MissingEventHeader,
    #[error("VerifySignature: {source}")]
    VerifySignature {
        #[from]
        source: VerifySignatureError,
    },
    #[error("ParseWebhookEvent: {source}")]
    ParseWebhookEvent {
        #[from]
        source: ParseWebhookEventError,
    },
    #[error("ProcessPushWebhook: {source}")]
    ProcessPushWebhook {
        #[from]
        source: IngestError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::MissingEventHeader => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            HandlerError::VerifySignature { source } => {
                warn!(error = %source, "Rejected webhook delivery");
                (StatusCode::UNAUTHORIZED, source.to_string()).into_response()
            }
            HandlerError::ParseWebhookEvent { source } => (StatusCode::BAD_REQUEST, source.to_string()).into_response(),
            HandlerError::ProcessPushWebhook { source } => {
                error!(error = %source, "Push ingestion failed");
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Axum handler: POST /github
#[utoipa::path(post, path = "/github", tag = "Webhooks", operation_id = "receive_github_webhook",
    params(
        ("X-GitHub-Event" = String, Header, description = "Webhook event name"),
        ("X-Hub-Signature-256" = Option<String>, Header, description = "HMAC-SHA256 of the body, required when a secret is configured")),
    request_body(content = String, description = "GitHub webhook payload", content_type = "application/json"),
    responses(
        (status = 200, description = "Delivery accepted"),
        (status = 400, description = "Missing event header or malformed payload", body = String),
        (status = 401, description = "Missing or invalid signature", body = String),
        (status = 500, description = "Table store failure", body = String)))]
pub async fn handler(
    Extension(processor): Extension<Arc<dyn WebhookEventProcessor>>,
    Extension(secret): Extension<WebhookSecret>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HandlerError> {
    let webhook_headers = WebhookHeaders {
        event: header_value(&headers, EVENT_HEADER).ok_or(HandlerError::MissingEventHeader)?,
        delivery: header_value(&headers, DELIVERY_HEADER),
        hook_id: header_value(&headers, HOOK_ID_HEADER),
    };

    if let Some(secret) = &secret.0 {
        let signature = header_value(&headers, SIGNATURE_256_HEADER);
        verify_signature(secret, &body, signature.as_deref())?;
    }

    match WebhookEvent::parse(&webhook_headers.event, &body)? {
        WebhookEvent::Push(push) => {
            let written = processor.process_push_webhook(&webhook_headers, &push).await?;
            debug!(
                delivery = ?webhook_headers.delivery,
                repository = ?push.repository.as_ref().map(|repository| repository.full_name.as_str()),
                git_ref = %push.git_ref,
                written,
                "Processed push"
            );
        }
        WebhookEvent::Ping(ping) => {
            info!(hook_id = ?webhook_headers.hook_id, zen = ?ping.zen, "Webhook ping");
        }
        WebhookEvent::Unsupported(event) => {
            debug!(%event, delivery = ?webhook_headers.delivery, "Ignoring webhook event");
        }
    }

    Ok(StatusCode::OK)
}
