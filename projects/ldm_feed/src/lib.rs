//! C# Language Design Meeting notes feed
//!
//! - REST endpoints in `endpoints/`, wired up in `app`
//! - PostgreSQL table store in `db/`
//! - Push-event ingestion in `ingest`, RSS assembly in `feed/`
//! - Configured from environment variables, see `config`
//! - OpenAPI document and Swagger UI in `openapi`

pub mod app;
pub mod clock;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod feed;
pub mod ingest;
pub mod openapi;
