use std::fs;
use std::io::Write;
use std::path::Path;

use pagestore::{PageStore, slide_page};

use crate::error::CliError;

pub(crate) struct SlideRequest<'a> {
    pub(crate) id: u64,
    pub(crate) shift: usize,
    pub(crate) fill: u8,
    pub(crate) payload: Option<&'a Path>,
    pub(crate) output: &'a Path,
}

/// Writes a displaced copy of a page to `request.output`.
pub(crate) fn run_slide<Out: Write>(
    store: &PageStore,
    request: &SlideRequest<'_>,
    stdout: &mut Out,
) -> Result<i32, CliError> {
    let page = store.read(request.id)?;
    let payload = match request.payload {
        Some(path) => fs::read(path)
            .map_err(|source| CliError::io(format!("reading payload {}", path.display()), source))?,
        None => Vec::new(),
    };

    let moved = slide_page(&page.bytes, request.shift, request.fill, &payload)?;
    fs::write(request.output, &moved).map_err(|source| {
        CliError::io(format!("writing {}", request.output.display()), source)
    })?;

    tracing::info!(
        target: "pageshift::store",
        id = request.id,
        shift = request.shift,
        output = %request.output.display(),
        "slid page written"
    );
    writeln!(
        stdout,
        "{}: page {} shifted by {} bytes ({} payload bytes, fill 0x{:02x})",
        request.output.display(),
        request.id,
        request.shift,
        payload.len(),
        request.fill
    )
    .map_err(|source| CliError::io("writing output", source))?;
    Ok(0)
}
