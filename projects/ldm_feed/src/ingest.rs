//! Push-event ingestion: newly added meeting notes become table records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use interfaces_github_webhooks::event::{PushEvent, WebhookHeaders};
use thiserror::Error;
use tracing::info;

use crate::{
    clock::Clock,
    db::{
        meeting::MEETING_PARTITION,
        store::{MeetingStore, MeetingStoreError},
    },
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CreateTable: {source}")]
    CreateTable {
        source: MeetingStoreError,
    },

    #[error("AppendMeeting {file_name}: {source}")]
    AppendMeeting {
        file_name: String,
        source: MeetingStoreError,
    },
}

/// Receives push events whose delivery has already been authenticated.
#[async_trait]
pub trait WebhookEventProcessor: Send + Sync {
    /// Returns how many records were written.
    async fn process_push_webhook(
        &self,
        headers: &WebhookHeaders,
        event: &PushEvent,
    ) -> Result<usize, IngestError>;
}

/// Prefix a path must start with to count as this year's meeting notes.
pub fn meetings_prefix(year: i32) -> String {
    format!("meetings/{year}")
}

pub struct PushWebhookEventProcessor {
    store: Arc<dyn MeetingStore>,
    clock: Arc<dyn Clock>,
}

impl PushWebhookEventProcessor {
    pub fn new(store: Arc<dyn MeetingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl WebhookEventProcessor for PushWebhookEventProcessor {
    async fn process_push_webhook(
        &self,
        headers: &WebhookHeaders,
        event: &PushEvent,
    ) -> Result<usize, IngestError> {
        // The year comes from the handling time, not from the commits.
        let prefix = meetings_prefix(self.clock.now().year());
        let added: Vec<&str> = event
            .added_files()
            .filter(|path| path.starts_with(&prefix))
            .collect();

        self.store
            .create_if_not_exists()
            .await
            .map_err(|source| IngestError::CreateTable { source })?;

        // A failed append stops here; earlier records are kept.
        for file_name in &added {
            self.store
                .append(MEETING_PARTITION, file_name)
                .await
                .map_err(|source| IngestError::AppendMeeting {
                    file_name: file_name.to_string(),
                    source,
                })?;

            info!(
                ldm_file_name = %file_name,
                delivery = headers.delivery.as_deref().unwrap_or_default(),
                "Added new LDM: {file_name}"
            );
        }

        Ok(added.len())
    }
}
