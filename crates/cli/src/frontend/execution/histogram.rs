use std::io::Write;

use pagestore::{ByteHistogram, PageStore};

use crate::error::CliError;

/// Prints the `top` most frequent byte values of a page.
pub(crate) fn run_histogram<Out: Write>(
    store: &PageStore,
    id: u64,
    top: usize,
    stdout: &mut Out,
) -> Result<i32, CliError> {
    let page = store.read(id)?;
    let histogram = ByteHistogram::from_bytes(&page.bytes);
    write_histogram(stdout, id, &histogram, top)
        .map_err(|source| CliError::io("writing output", source))?;
    Ok(0)
}

fn write_histogram<W: Write>(
    out: &mut W,
    id: u64,
    histogram: &ByteHistogram,
    top: usize,
) -> std::io::Result<()> {
    writeln!(
        out,
        "page {id}: {} bytes, {} distinct values",
        histogram.total(),
        histogram.distinct()
    )?;
    for (byte, count) in histogram.most_common(top) {
        writeln!(
            out,
            "0x{byte:02x} {count:>6} {:>7.2}%",
            histogram.fraction(byte) * 100.0
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_values_by_frequency() {
        let mut data = vec![0u8; 3072];
        data.extend(std::iter::repeat_n(0xAA, 1024));
        let mut out = Vec::new();
        write_histogram(&mut out, 9, &ByteHistogram::from_bytes(&data), 5).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "page 9: 4096 bytes, 2 distinct values\n\
             0x00   3072   75.00%\n\
             0xaa   1024   25.00%\n"
        );
    }
}
