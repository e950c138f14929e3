use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use tracing::error;

use crate::db::{
    meeting::MEETING_PARTITION,
    store::{MeetingStore, MeetingStoreError},
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("CreateTable: {source}")]
    CreateTable {
        source: MeetingStoreError,
    },
    #[error("ListPartition: {source}")]
    ListPartition {
        source: MeetingStoreError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "Reading stored meetings failed");
        match self {
            HandlerError::CreateTable { source } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response(),
            HandlerError::ListPartition { source } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response(),
        }
    }
}

/// Axum handler: GET /feed
///
/// Every stored file name, most recently ingested first.
#[utoipa::path(get, path = "/feed", tag = "Feed", operation_id = "list_stored_meetings",
    responses(
        (status = 200, description = "Stored meeting file names, newest first", body = [String]),
        (status = 500, description = "Table store failure", body = String)))]
pub async fn handler(
    Extension(store): Extension<Arc<dyn MeetingStore>>,
) -> Result<Json<Vec<String>>, HandlerError> {
    store
        .create_if_not_exists()
        .await
        .map_err(|source| HandlerError::CreateTable { source })?;

    let meetings = store
        .list_partition(MEETING_PARTITION)
        .await
        .map_err(|source| HandlerError::ListPartition { source })?;

    Ok(Json(meetings.into_iter().map(|meeting| meeting.file_name).collect()))
}
