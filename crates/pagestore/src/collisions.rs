//! crates/pagestore/src/collisions.rs
//!
//! Parsing of fuzzy-hash collision logs.
//!
//! The hashing runs report every colliding pair on its own line:
//!
//! ```text
//! CRITICAL:datalayer.database.page: [-] TLSH COLLISION [#pages 228438:228442]
//! ```
//!
//! Several hash functions may report the same pair, so records are grouped
//! by `(page1, page2)`, sorted by that key, and carry every hash name that
//! flagged them.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::CollisionLogError;

const MARKER: &str = "COLLISION";
const HASH_PREFIX: &str = "[-] ";
const PAGES_PREFIX: &str = "#pages ";

/// One colliding page pair and the hash functions that flagged it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionRecord {
    /// First page id.
    pub page1: u64,
    /// Second page id.
    pub page2: u64,
    /// Hash names in first-seen order, without repeats.
    pub hashes: Vec<String>,
}

impl CollisionRecord {
    /// Hash names joined with `+`, e.g. `TLSH+SSDEEP`.
    pub fn hash_label(&self) -> String {
        self.hashes.join("+")
    }
}

/// Reads and groups the collision log at `path`.
pub fn read_collision_log(path: &Path) -> Result<Vec<CollisionRecord>, CollisionLogError> {
    let file = File::open(path)?;
    parse_collision_log(BufReader::new(file))
}

/// Parses collision lines from `reader`, grouping them by page pair.
///
/// Lines without the `COLLISION` marker are ignored. Records come back
/// sorted by `(page1, page2)`.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub fn parse_collision_log<R: BufRead>(reader: R) -> Result<Vec<CollisionRecord>, CollisionLogError> {
    let mut groups: BTreeMap<(u64, u64), Vec<String>> = BTreeMap::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let Some((hash, page1, page2)) = parse_line(&line, number + 1)? else {
            continue;
        };
        let hashes = groups.entry((page1, page2)).or_default();
        if !hashes.iter().any(|known| known == hash) {
            hashes.push(hash.to_owned());
        }
    }

    let records: Vec<CollisionRecord> = groups
        .into_iter()
        .map(|((page1, page2), hashes)| CollisionRecord {
            page1,
            page2,
            hashes,
        })
        .collect();

    #[cfg(feature = "tracing")]
    tracing::info!(target: "pageshift::store", pairs = records.len(), "collision log parsed");

    Ok(records)
}

fn parse_line(line: &str, number: usize) -> Result<Option<(&str, u64, u64)>, CollisionLogError> {
    if !line.contains(MARKER) {
        return Ok(None);
    }

    let hash = line
        .split_once(HASH_PREFIX)
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .filter(|name| *name != MARKER)
        .ok_or(CollisionLogError::MissingHash { line: number })?;

    let malformed = |text: &str| CollisionLogError::MalformedPages {
        line: number,
        text: text.to_owned(),
    };
    let (_, pages) = line
        .split_once(PAGES_PREFIX)
        .ok_or_else(|| malformed(line.trim()))?;
    let pages = pages.trim_end().trim_end_matches(']').trim();
    let (first, second) = pages.split_once(':').ok_or_else(|| malformed(pages))?;
    let page1 = first.trim().parse().map_err(|_| malformed(pages))?;
    let page2 = second.trim().parse().map_err(|_| malformed(pages))?;

    Ok(Some((hash, page1, page2)))
}
