//! crates/logging/src/config.rs
//! Verbosity configuration derived from `-v` counts and `--debug` topics.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use super::levels::Topic;

/// Environment variable whose directives override the computed filter.
pub const LOG_ENV_VAR: &str = "PAGESHIFT_LOG";

/// How much diagnostic output the tools emit on stderr.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Number of `-v` flags given.
    pub verbose: u8,
    /// Topics raised to debug level regardless of `verbose`.
    pub debug_topics: Vec<Topic>,
}

impl VerbosityConfig {
    /// Creates a configuration for the given `-v` count.
    ///
    /// | level | filter |
    /// |-------|--------|
    /// | 0     | warn   |
    /// | 1     | info   |
    /// | 2     | debug  |
    /// | 3+    | trace  |
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self {
            verbose: level,
            debug_topics: Vec::new(),
        }
    }

    /// Raises the listed topics to debug level.
    #[must_use]
    pub fn with_debug_topics(mut self, topics: impl IntoIterator<Item = Topic>) -> Self {
        for topic in topics {
            if !self.debug_topics.contains(&topic) {
                self.debug_topics.push(topic);
            }
        }
        self
    }

    /// Global level implied by the `-v` count.
    #[must_use]
    pub const fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Directive string equivalent to this configuration, e.g.
    /// `warn,pageshift::search=debug`.
    #[must_use]
    pub fn directives(&self) -> String {
        let global = self.level_filter();
        let mut directives = global.to_string().to_ascii_lowercase();
        if global < LevelFilter::DEBUG {
            for topic in &self.debug_topics {
                directives.push(',');
                directives.push_str(&topic.target());
                directives.push_str("=debug");
            }
        }
        directives
    }

    /// Builds the subscriber filter.
    ///
    /// When `PAGESHIFT_LOG` holds a non-empty value its directives are used
    /// verbatim; otherwise the filter follows [`Self::directives`].
    pub fn to_env_filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        match std::env::var(LOG_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => EnvFilter::try_new(value),
            _ => EnvFilter::try_new(self.directives()),
        }
    }
}
