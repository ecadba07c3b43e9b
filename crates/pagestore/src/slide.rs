//! crates/pagestore/src/slide.rs
//!
//! Rebuilding displaced copies of a page.

use crate::error::{StoreError, StoreResult};

/// Fill byte used when none is given.
pub const DEFAULT_FILL: u8 = 0x00;

/// Returns `page` pushed forward by `shift` bytes.
///
/// The first `shift` bytes are `payload` followed by repetitions of `fill`;
/// the original content follows and the result is truncated to
/// `page.len()`. A shift at or beyond the page length yields a page made of
/// prefix bytes only.
pub fn slide_page(page: &[u8], shift: usize, fill: u8, payload: &[u8]) -> StoreResult<Vec<u8>> {
    if payload.len() > shift {
        return Err(StoreError::PayloadTooLong {
            payload_len: payload.len(),
            shift,
        });
    }

    let len = page.len();
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(payload);
    out.resize(shift, fill);
    out.extend_from_slice(&page[..len.saturating_sub(shift)]);
    out.truncate(len);
    Ok(out)
}
