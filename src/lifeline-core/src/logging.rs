//! Tracing subscriber bootstrap.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Widgets run inside a terminal UI,
/// so hosts normally point the writer at a file; this helper writes to stderr
/// and is meant for headless runs and tools.
pub fn init_logging(level: &str, json: bool) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // The first call may lose to another test's subscriber; the second
        // call must fail either way.
        let _ = init_logging("debug", false);
        assert!(init_logging("debug", true).is_err());
    }
}
