use std::sync::Arc;

use axum::serve;
use interfaces_github_contents::index::GitHubContentsClient;
use projects_ldm_feed::{
    app::{live_feed_router, LiveFeedState},
    clock::SystemClock,
    config::{ConfigError, FeedConfiguration, GitHubApiConfiguration, ServerConfiguration},
};
use thiserror::Error;
use tracing::{info, warn};
use utils_trace::init as tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("Config: {source}")]
    Config {
        #[source]
        source: ConfigError,
    },
    #[error("TcpListenerBind: {source}")]
    TcpListenerBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Serve: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    dotenvy::dotenv().ok();

    tracing_init("info").map_err(|source| MainError::TracingInit { source })?;

    let server = ServerConfiguration::from_env().map_err(|source| MainError::Config { source })?;
    let feed = FeedConfiguration::from_env().map_err(|source| MainError::Config { source })?;
    let github = GitHubApiConfiguration::from_env().map_err(|source| MainError::Config { source })?;

    if github.token.is_none() {
        warn!("GITHUB_API_TOKEN is not set; GitHub requests are unauthenticated");
    }

    info!(
        organization = %feed.organization,
        repository = %feed.repository,
        path = %feed.path,
        count = feed.count,
        "Serving live feed"
    );

    let state = LiveFeedState {
        config: Arc::new(feed),
        github: Arc::new(GitHubContentsClient::new(github.base_url, github.token)),
        clock: Arc::new(SystemClock),
    };

    let listener = tokio::net::TcpListener::bind(server.listen_addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Live feed running on addr: {}", server.listen_addr);

    serve(listener, live_feed_router(state))
        .await
        .map_err(|source| MainError::Serve { source })?;

    Ok(())
}
