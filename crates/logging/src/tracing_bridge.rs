//! crates/logging/src/tracing_bridge.rs
//! Installs the global tracing subscriber used by the `pageshift` binary.
//!
//! Events go to stderr through a compact `fmt` layer so stdout stays
//! reserved for verdicts and JSON records. Filtering is driven by
//! [`VerbosityConfig`], or by `PAGESHIFT_LOG` when that variable is set.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(&VerbosityConfig::from_verbose_level(2))?;
//! tracing::debug!(target: "pageshift::search", shift = 4, "candidate rejected");
//! ```

use std::io::IsTerminal;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::config::{LOG_ENV_VAR, VerbosityConfig};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TracingInitError {
    /// `PAGESHIFT_LOG` or the computed directives were malformed.
    #[error("invalid {LOG_ENV_VAR} directives: {0}")]
    Filter(#[from] ParseError),
}

/// Installs the global subscriber described by `config`.
///
/// Returns `Ok(false)` when a global subscriber was already present, which
/// makes repeated calls harmless.
pub fn init_tracing(config: &VerbosityConfig) -> Result<bool, TracingInitError> {
    let filter = config.to_env_filter()?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .without_time()
        .compact();

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok();
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_install_is_harmless() {
        let config = VerbosityConfig::from_verbose_level(0);
        init_tracing(&config).unwrap();
        assert!(!init_tracing(&config).unwrap());
    }
}
