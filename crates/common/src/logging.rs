//! Tracing setup for the reframe tools.
//!
//! Logs go to stderr so a filter script can be piped from stdout. A
//! `RUST_LOG` environment filter takes precedence over the configured level.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{ReframeError, ReframeResult};

/// Build the event filter for `config`, preferring `RUST_LOG` when it is set.
pub fn env_filter(config: &LoggingConfig) -> ReframeResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    level_filter(&config.level)
}

fn level_filter(level: &str) -> ReframeResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| ReframeError::config(format!("invalid log level {level:?}: {e}")))
}

/// Install the global subscriber. Fails if the level does not parse or a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> ReframeResult<()> {
    let filter = env_filter(config)?;

    let installed = if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    installed.map_err(|e| ReframeError::config(format!("cannot install logger: {e}")))
}
