//! Startup configuration read from the environment.
//!
//! Every setting is read once in `main` and validated there; the resulting
//! values are immutable for the life of the process.

use std::net::SocketAddr;

use interfaces_github_contents::index::DEFAULT_API_URL;
use thiserror::Error;
use url::Url;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
pub const YEAR_PLACEHOLDER: &str = "{year}";
pub const MIN_FEED_COUNT: usize = 1;
pub const MAX_FEED_COUNT: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting {key}")]
    Missing { key: &'static str },

    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Empty and whitespace-only values are treated as unset.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing { key })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfiguration {
    pub listen_addr: SocketAddr,
}

impl ServerConfiguration {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = optional(&lookup, "LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw.parse::<SocketAddr>().map_err(|err| ConfigError::Invalid {
            key: "LISTEN_ADDR",
            reason: format!("{raw}: {err}"),
        })?;

        Ok(Self { listen_addr })
    }
}

/// Settings of the table-backed service.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStoreConfiguration {
    pub database_url: String,
    pub webhook_secret: Option<String>,
}

impl TableStoreConfiguration {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            webhook_secret: optional(&lookup, "GITHUB_WEBHOOK_SECRET"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GitHubApiConfiguration {
    pub base_url: String,
    pub token: Option<String>,
}

impl GitHubApiConfiguration {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = optional(&lookup, "GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Url::parse(&base_url).map_err(|err| ConfigError::Invalid {
            key: "GITHUB_API_URL",
            reason: err.to_string(),
        })?;

        Ok(Self {
            base_url,
            token: optional(&lookup, "GITHUB_API_TOKEN"),
        })
    }
}

/// Settings of the live RSS feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfiguration {
    pub count: usize,
    pub organization: String,
    pub repository: String,
    /// Directory of one year's notes, with `{year}` standing in for the year.
    pub path: String,
    pub home_page: Url,
}

impl FeedConfiguration {
    pub fn new(
        count: usize,
        organization: impl Into<String>,
        repository: impl Into<String>,
        path: impl Into<String>,
        home_page: &str,
    ) -> Result<Self, ConfigError> {
        if !(MIN_FEED_COUNT..=MAX_FEED_COUNT).contains(&count) {
            return Err(ConfigError::Invalid {
                key: "FEED_COUNT",
                reason: format!("{count} is outside {MIN_FEED_COUNT}..={MAX_FEED_COUNT}"),
            });
        }

        let organization = organization.into();
        if organization.trim().is_empty() {
            return Err(ConfigError::Missing { key: "FEED_ORGANIZATION" });
        }

        let repository = repository.into();
        if repository.trim().is_empty() {
            return Err(ConfigError::Missing { key: "FEED_REPOSITORY" });
        }

        let path = path.into();
        if path.trim().is_empty() {
            return Err(ConfigError::Missing { key: "FEED_PATH" });
        }
        if !path.contains(YEAR_PLACEHOLDER) {
            return Err(ConfigError::Invalid {
                key: "FEED_PATH",
                reason: format!("{path} has no {YEAR_PLACEHOLDER} placeholder"),
            });
        }

        let home_page = Url::parse(home_page).map_err(|err| ConfigError::Invalid {
            key: "FEED_HOME_PAGE",
            reason: format!("{home_page}: {err}"),
        })?;

        Ok(Self {
            count,
            organization,
            repository,
            path,
            home_page,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_count = required(&lookup, "FEED_COUNT")?;
        let count = raw_count.parse::<usize>().map_err(|err| ConfigError::Invalid {
            key: "FEED_COUNT",
            reason: format!("{raw_count}: {err}"),
        })?;

        Self::new(
            count,
            required(&lookup, "FEED_ORGANIZATION")?,
            required(&lookup, "FEED_REPOSITORY")?,
            required(&lookup, "FEED_PATH")?,
            &required(&lookup, "FEED_HOME_PAGE")?,
        )
    }

    pub fn meetings_path(&self, year: i32) -> String {
        self.path.replace(YEAR_PLACEHOLDER, &year.to_string())
    }
}
