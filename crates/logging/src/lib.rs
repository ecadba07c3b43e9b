#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `logging` owns the diagnostic side of the pageshift tools: mapping `-v`
//! counts and `--debug` topic lists onto `tracing` filters, and installing
//! the stderr subscriber the binary uses.
//!
//! Library crates emit events under `pageshift::<topic>` targets
//! (`pageshift::search`, `pageshift::policy`, ...). Each [`Topic`] names one
//! of those targets so individual subsystems can be raised to debug level
//! without drowning the rest of the output.
//!
//! # Examples
//!
//! ```
//! use logging::{Topic, VerbosityConfig};
//!
//! let config = VerbosityConfig::from_verbose_level(1).with_debug_topics([Topic::Policy]);
//! assert_eq!(config.directives(), "info,pageshift::policy=debug");
//! ```

mod config;
mod levels;
mod tracing_bridge;

pub use config::{LOG_ENV_VAR, VerbosityConfig};
pub use levels::{TARGET_PREFIX, Topic, UnknownTopic, parse_topic_list};
pub use tracing_bridge::{TracingInitError, init_tracing};
