use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. A valid `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) -> Result<(), TracingInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(rust_log.as_deref(), default_level)?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|source| TracingInitError::SetGlobalDefault { source })?;

    Ok(())
}

/// Unset, blank or unparsable `rust_log` falls back to `default_level`.
fn env_filter(rust_log: Option<&str>, default_level: &str) -> Result<EnvFilter, TracingInitError> {
    if let Some(filter) = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return Ok(filter);
    }

    EnvFilter::try_new(default_level).map_err(|source| TracingInitError::InvalidFilter {
        directives: default_level.to_string(),
        source,
    })
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("Invalid filter {directives:?}: {source}")]
    InvalidFilter {
        directives: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to set global default subscriber: {source}")]
    SetGlobalDefault {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_rust_log_wins_over_default() {
        let filter = env_filter(Some("debug"), "info").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_unset_or_invalid_rust_log_uses_default() {
        for rust_log in [None, Some(""), Some("ldm=verbose")] {
            let filter = env_filter(rust_log, "warn").unwrap();
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN), "{rust_log:?}");
        }
    }

    #[test]
    fn test_invalid_default_is_error() {
        let err = env_filter(None, "ldm=verbose").unwrap_err();
        assert!(matches!(
            err,
            TracingInitError::InvalidFilter { ref directives, .. } if directives == "ldm=verbose"
        ));
    }
}
