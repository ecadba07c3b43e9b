#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Page files and the logs that point at them.
//!
//! Memory dumps are split into fixed-size pages stored as `{id}_{suffix}`
//! files in a flat directory. This crate locates and reads those files
//! ([`PageStore`]), rebuilds displaced variants of a page ([`slide_page`]),
//! summarises byte distributions ([`ByteHistogram`]) and turns fuzzy-hash
//! collision logs into page pairs ([`parse_collision_log`]).
//!
//! ```no_run
//! use pagestore::PageStore;
//!
//! let store = PageStore::new("dumps");
//! let page = store.read(228438)?;
//! println!("{} bytes from {}", page.bytes.len(), page.path.display());
//! # Ok::<(), pagestore::StoreError>(())
//! ```

mod collisions;
mod error;
mod histogram;
mod slide;
mod store;

pub use collisions::{CollisionRecord, parse_collision_log, read_collision_log};
pub use error::{CollisionLogError, StoreError, StoreResult};
pub use histogram::ByteHistogram;
pub use slide::{DEFAULT_FILL, slide_page};
pub use store::{Page, PageStore};
