use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Datelike;
use interfaces_github_contents::index::{ContentEntry, FetchDirectoryContentsError};
use thiserror::Error;
use tracing::error;

use crate::{
    app::LiveFeedState,
    feed::{build_channel, build_feed_items, channel::RSS_CONTENT_TYPE, write_rss, WriteRssError},
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("FetchDirectoryContents {path}: {source}")]
    FetchDirectoryContents {
        path: String,
        source: FetchDirectoryContentsError,
    },
    #[error(transparent)]
    WriteRss {
        #[from]
        source: WriteRssError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "Building live feed failed");
        match self {
            HandlerError::FetchDirectoryContents { .. } => (StatusCode::BAD_GATEWAY, self.to_string()).into_response(),
            HandlerError::WriteRss { source } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response(),
        }
    }
}

async fn fetch_meetings_directory(
    state: &LiveFeedState,
    year: i32,
) -> Result<Vec<ContentEntry>, HandlerError> {
    let path = state.config.meetings_path(year);
    state
        .github
        .fetch_directory_contents(&state.config.organization, &state.config.repository, &path)
        .await
        .map_err(|source| HandlerError::FetchDirectoryContents { path, source })
}

/// Axum handler: GET /feed
///
/// Lists last year's and this year's meeting directories on every request.
#[utoipa::path(get, path = "/feed", tag = "Feed", operation_id = "live_meetings_feed",
    responses(
        (status = 200, description = "RSS 2.0 feed of the latest meetings", body = String, content_type = "application/rss+xml"),
        (status = 500, description = "Feed could not be rendered", body = String),
        (status = 502, description = "GitHub listing failed", body = String)))]
pub async fn handler(Extension(state): Extension<LiveFeedState>) -> Result<Response, HandlerError> {
    let now = state.clock.now();
    let year = now.year();

    let (previous, current) = tokio::try_join!(
        fetch_meetings_directory(&state, year - 1),
        fetch_meetings_directory(&state, year),
    )?;

    let items = build_feed_items(previous.iter().chain(current.iter()), state.config.count);
    let xml = write_rss(&build_channel(items, &state.config, now))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, RSS_CONTENT_TYPE)],
        xml,
    )
        .into_response())
}
