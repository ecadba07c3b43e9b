//! crates/pagestore/src/store.rs
//!
//! Lookup of page dumps stored as `{id}_{anything}` files in one directory.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{StoreError, StoreResult};

/// Contents of one page dump.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page {
    /// Page id taken from the file name prefix.
    pub id: u64,
    /// File the bytes were read from.
    pub path: PathBuf,
    /// Raw page bytes. Length is not checked here.
    pub bytes: Vec<u8>,
}

/// A flat directory of page dumps.
#[derive(Clone, Debug)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    /// Opens a store rooted at `dir`. The directory is not touched until a
    /// page is looked up.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the page files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the page `id`.
    ///
    /// When several files share the `{id}_` prefix the lexicographically
    /// smallest name wins, so lookups do not depend on directory order.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(dir = %self.dir.display())))]
    pub fn locate(&self, id: u64) -> StoreResult<PathBuf> {
        let prefix = format!("{id}_");
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::ListDir {
            dir: self.dir.clone(),
            source,
        })?;

        let mut best: Option<(String, PathBuf)> = None;
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::ListDir {
                dir: self.dir.clone(),
                source,
            })?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !name.starts_with(&prefix) {
                continue;
            }
            if !entry.file_type().is_ok_and(|kind| kind.is_file()) {
                continue;
            }
            if best.as_ref().is_none_or(|(current, _)| name < *current) {
                best = Some((name, entry.path()));
            }
        }

        match best {
            Some((_name, path)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "pageshift::store", id, path = %path.display(), "page located");
                Ok(path)
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "pageshift::store", id, "page file not found");
                Err(StoreError::NotFound {
                    id,
                    dir: self.dir.clone(),
                })
            }
        }
    }

    /// Locates and reads the page `id`.
    pub fn read(&self, id: u64) -> StoreResult<Page> {
        let path = self.locate(id)?;
        let bytes = fs::read(&path).map_err(|source| StoreError::Read {
            id,
            path: path.clone(),
            source,
        })?;
        Ok(Page { id, path, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::PageDir;

    #[test]
    fn locate_finds_prefixed_file() {
        let dir = PageDir::new().unwrap();
        let written = dir.write_page(42, b"data").unwrap();
        let store = PageStore::new(dir.path());
        assert_eq!(store.locate(42).unwrap(), written);
    }

    #[test]
    fn locate_requires_underscore_after_id() {
        let dir = PageDir::new().unwrap();
        dir.write_file("420_page.dmp", b"other").unwrap();
        let store = PageStore::new(dir.path());
        assert!(matches!(
            store.locate(42),
            Err(StoreError::NotFound { id: 42, .. })
        ));
    }

    #[test]
    fn locate_prefers_smallest_name() {
        let dir = PageDir::new().unwrap();
        dir.write_file("7_zeta", b"z").unwrap();
        let expected = dir.write_file("7_alpha", b"a").unwrap();
        dir.write_file("7_mid", b"m").unwrap();
        let store = PageStore::new(dir.path());
        assert_eq!(store.locate(7).unwrap(), expected);
    }

    #[test]
    fn locate_skips_directories() {
        let dir = PageDir::new().unwrap();
        fs::create_dir(dir.path().join("3_sub")).unwrap();
        let store = PageStore::new(dir.path());
        assert!(store.locate(3).is_err());
    }

    #[test]
    fn missing_directory_is_list_error() {
        let dir = PageDir::new().unwrap();
        let store = PageStore::new(dir.path().join("absent"));
        assert!(matches!(store.locate(1), Err(StoreError::ListDir { .. })));
    }

    #[test]
    fn read_returns_bytes_without_length_check() {
        let dir = PageDir::new().unwrap();
        dir.write_page(5, &[1, 2, 3]).unwrap();
        let page = PageStore::new(dir.path()).read(5).unwrap();
        assert_eq!(page.id, 5);
        assert_eq!(page.bytes, vec![1, 2, 3]);
    }
}
