use std::sync::Arc;

use axum::serve;
use projects_ldm_feed::{
    app::table_feed_router,
    clock::SystemClock,
    config::{ConfigError, ServerConfiguration, TableStoreConfiguration},
    db::{
        establish_pool,
        store::{MeetingStore, PgMeetingStore},
        EstablishPoolError,
    },
    endpoints::github::index::WebhookSecret,
    ingest::{PushWebhookEventProcessor, WebhookEventProcessor},
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
    #[error("EstablishPool: {source}")]
    EstablishPool {
        #[source]
        source: EstablishPoolError,
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
    let config = TableStoreConfiguration::from_env().map_err(|source| MainError::Config { source })?;

    if config.webhook_secret.is_none() {
        warn!("GITHUB_WEBHOOK_SECRET is not set; webhook signatures will not be checked");
    }

    let pool = establish_pool(&config.database_url).map_err(|source| MainError::EstablishPool { source })?;

    let store: Arc<dyn MeetingStore> = Arc::new(PgMeetingStore::new(pool));
    let processor: Arc<dyn WebhookEventProcessor> =
        Arc::new(PushWebhookEventProcessor::new(store.clone(), Arc::new(SystemClock)));

    let app = table_feed_router(store, processor, WebhookSecret(config.webhook_secret));

    let listener = tokio::net::TcpListener::bind(server.listen_addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Table feed running on addr: {}", server.listen_addr);

    serve(listener, app)
        .await
        .map_err(|source| MainError::Serve { source })?;

    Ok(())
}
