//! Shared fixtures for the pageshift test suites.
//!
//! Pages are generated from a seeded xorshift stream so every test sees the
//! same bytes on every run without depending on a random number crate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Default page size used by the fixtures.
pub const PAGE_SIZE: usize = 4096;

/// Returns `len` pseudo-random bytes derived from `seed`.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Returns a pseudo-random page of [`PAGE_SIZE`] bytes.
pub fn noise_page(seed: u32) -> Vec<u8> {
    noise(PAGE_SIZE, seed)
}

/// Returns `page` displaced by `shift` bytes: `shift` copies of `fill`
/// followed by the page, truncated to the original length.
pub fn slid(page: &[u8], shift: usize, fill: u8) -> Vec<u8> {
    let shift = shift.min(page.len());
    let mut out = vec![fill; shift];
    out.extend_from_slice(&page[..page.len() - shift]);
    out
}

/// Returns a copy of `page` with every byte at `positions` inverted.
pub fn with_flipped(page: &[u8], positions: &[usize]) -> Vec<u8> {
    let mut out = page.to_vec();
    for &position in positions {
        out[position] = !out[position];
    }
    out
}

/// Temporary directory holding page files named `{id}_{suffix}`.
pub struct PageDir {
    dir: TempDir,
}

impl PageDir {
    /// Creates an empty page directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `bytes` as the page identified by `id`.
    pub fn write_page(&self, id: u64, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(format!("{id}_page.dmp"));
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes an arbitrary file into the directory.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
