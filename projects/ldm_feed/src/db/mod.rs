pub mod meeting;
pub mod schema;
pub mod store;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use thiserror::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum EstablishPoolError {
    #[error("BuildPool: {source}")]
    BuildPool {
        #[from]
        source: r2d2::Error,
    },
}

/// Builds the pool and waits for its first connection, so a bad
/// `DATABASE_URL` fails at startup rather than on the first request.
pub fn establish_pool(database_url: &str) -> Result<PgPool, EstablishPoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|source| EstablishPoolError::BuildPool { source })
}
