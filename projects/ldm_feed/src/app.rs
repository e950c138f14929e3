use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use interfaces_github_contents::index::GitHubContentsClient;
use tower_http::trace::TraceLayer;

use crate::{
    clock::Clock,
    config::FeedConfiguration,
    db::store::MeetingStore,
    endpoints::{
        feed::index::handler as feed_handler, github::index::handler as github_handler,
        github::index::WebhookSecret, health::index::handler as health_handler,
        live_feed::index::handler as live_feed_handler,
    },
    ingest::WebhookEventProcessor,
    openapi::{api_docs, LiveFeedApiDoc, TableFeedApiDoc},
};

/// Everything the live feed handler needs per request.
#[derive(Clone)]
pub struct LiveFeedState {
    pub config: Arc<FeedConfiguration>,
    pub github: Arc<GitHubContentsClient>,
    pub clock: Arc<dyn Clock>,
}

/// `GET /feed` from the table store, `POST /github` for push deliveries.
pub fn table_feed_router(
    store: Arc<dyn MeetingStore>,
    processor: Arc<dyn WebhookEventProcessor>,
    secret: WebhookSecret,
) -> Router {
    Router::new()
        .route("/feed", get(feed_handler))
        .route("/github", post(github_handler))
        .route("/health", get(health_handler))
        .merge(api_docs::<TableFeedApiDoc>())
        .layer(Extension(store))
        .layer(Extension(processor))
        .layer(Extension(secret))
        .layer(TraceLayer::new_for_http())
}

/// `GET /feed` rebuilt from GitHub on every request.
pub fn live_feed_router(state: LiveFeedState) -> Router {
    Router::new()
        .route("/feed", get(live_feed_handler))
        .route("/health", get(health_handler))
        .merge(api_docs::<LiveFeedApiDoc>())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
