//! crates/cli/src/report.rs
//!
//! Human-readable presentation of a classification.
//!
//! The classifier returns structured results only. This module turns a
//! [`Classification`] into the step-by-step narration printed by
//! `pageshift compare`, and renders the optional side-by-side hex dump.

use std::io::{self, Write};
use std::path::Path;

use displacement::{Alignment, Classification, ClassifierConfig, DescriptionStyle, Side, Verdict};

/// Bytes per row of the hex dump.
pub const HEX_ROW_WIDTH: usize = 16;

/// Everything needed to narrate one comparison.
#[derive(Clone, Copy, Debug)]
pub struct PairReport<'a> {
    /// File the first page came from.
    pub first_path: &'a Path,
    /// File the second page came from.
    pub second_path: &'a Path,
    /// Stage results.
    pub classification: &'a Classification,
    /// Settings the classifier ran with.
    pub config: &'a ClassifierConfig,
    /// Renderer for the final description.
    pub style: DescriptionStyle,
    /// Whether a hex dump follows; suppresses the hint to request one.
    pub show_diff: bool,
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::OverFirst => "first",
        Side::OverSecond => "second",
    }
}

fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round())
}

fn write_shift<W: Write>(out: &mut W, indent: &str, alignment: &Alignment) -> io::Result<()> {
    write!(
        out,
        "{indent}shift of {} bytes needed over the {} page",
        alignment.shift,
        side_name(alignment.side)
    )?;
    if alignment.diff_count > 0 {
        write!(out, " ({} differing bytes)", alignment.diff_count)?;
    }
    writeln!(out)
}

/// Writes the decision path followed by the final description.
pub fn write_narration<W: Write>(out: &mut W, report: &PairReport<'_>) -> io::Result<()> {
    let PairReport {
        classification,
        config,
        ..
    } = *report;

    writeln!(out, "files compared:")?;
    writeln!(out, " - {}", report.first_path.display())?;
    writeln!(out, " - {}", report.second_path.display())?;

    if let Verdict::SizeError {
        first_len,
        second_len,
    } = classification.verdict
    {
        writeln!(
            out,
            "error: pages do not have the expected size of {} bytes",
            config.page_size
        )?;
        writeln!(out, "  first: {first_len} bytes")?;
        writeln!(out, "  second: {second_len} bytes")?;
        return write_result(out, report);
    }

    if let Some(exact) = &classification.exact {
        write_shift(out, "", exact)?;
        if classification.verdict.is_identical() && !report.show_diff {
            writeln!(out, "> pages are identical, rerun with --show-diff to see them")?;
        }
        if config.is_low_confidence(exact.shift) {
            writeln!(
                out,
                "warning: the shift exceeds {} of the page size and may be wrong",
                percent(config.low_confidence_ratio)
            )?;
        }
    }

    if let Some(bulk) = &classification.bulk {
        if classification.exact.is_some() {
            writeln!(out, "unreliable shift, comparing byte by byte...")?;
        } else {
            writeln!(out, "no shift found, comparing byte by byte...")?;
        }

        let threshold = percent(config.bulk_threshold);
        if bulk.is_bulk_equal {
            writeln!(out, "> contents match byte by byte above {threshold}")?;
            writeln!(out, "> differing bytes ({}):", bulk.diffs.len())?;
            for diff in &bulk.diffs {
                writeln!(
                    out,
                    "  - position 0x{:04x}: 0x{:02x} in the first page, 0x{:02x} in the second",
                    diff.position, diff.first, diff.second
                )?;
            }
            if bulk.diffs.is_empty() {
                writeln!(out, "> no differences")?;
                if !report.show_diff {
                    writeln!(out, "> rerun with --show-diff to see the full comparison")?;
                }
            }
        } else {
            writeln!(out, "> contents do not match byte by byte above {threshold} either")?;
        }
    }

    if classification.tolerant_attempted {
        writeln!(
            out,
            "> trying the shift search with a budget of {} bytes...",
            config.diff_budget
        )?;
        match (&classification.tolerant, &classification.verdict) {
            (Some(tolerant), _) => write_shift(out, "   ", tolerant)?,
            (None, Verdict::ExactShift { .. }) => {
                writeln!(out, "   no tolerant shift, keeping the exact shift")?;
            }
            (None, _) => writeln!(out, "> no shift or byte-by-byte match found")?,
        }
    }

    write_result(out, report)
}

fn write_result<W: Write>(out: &mut W, report: &PairReport<'_>) -> io::Result<()> {
    writeln!(
        out,
        "result: {}",
        report.classification.verdict.render(report.style)
    )
}

fn write_hex_cells<W: Write>(out: &mut W, row: &[u8]) -> io::Result<()> {
    for column in 0..HEX_ROW_WIDTH {
        if column > 0 {
            write!(out, " ")?;
        }
        match row.get(column) {
            Some(byte) => write!(out, "{byte:02x}")?,
            None => write!(out, "  ")?,
        }
    }
    Ok(())
}

fn row_at(data: &[u8], start: usize) -> &[u8] {
    if start >= data.len() {
        &[]
    } else {
        &data[start..(start + HEX_ROW_WIDTH).min(data.len())]
    }
}

/// Writes both pages side by side, [`HEX_ROW_WIDTH`] bytes per row.
///
/// Rows whose bytes differ are marked with `|` between the two dumps.
/// Returns the number of differing rows.
pub fn write_hex_diff<W: Write>(out: &mut W, first: &[u8], second: &[u8]) -> io::Result<usize> {
    let rows = first.len().max(second.len()).div_ceil(HEX_ROW_WIDTH);
    let mut differing = 0;
    for index in 0..rows {
        let offset = index * HEX_ROW_WIDTH;
        let left = row_at(first, offset);
        let right = row_at(second, offset);
        let marker = if left == right {
            ' '
        } else {
            differing += 1;
            '|'
        };
        write!(out, "{offset:08x}  ")?;
        write_hex_cells(out, left)?;
        write!(out, "  {marker}  ")?;
        write_hex_cells(out, right)?;
        writeln!(out)?;
    }
    Ok(differing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use displacement::Classifier;
    use std::path::PathBuf;
    use test_support::{noise_page, slid, with_flipped};

    fn narrate(first: &[u8], second: &[u8], show_diff: bool) -> String {
        let classifier = Classifier::default();
        let classification = classifier.classify_detailed(first, second);
        let first_path = PathBuf::from("1_a.dmp");
        let second_path = PathBuf::from("2_b.dmp");
        let report = PairReport {
            first_path: &first_path,
            second_path: &second_path,
            classification: &classification,
            config: classifier.config(),
            style: DescriptionStyle::Plain,
            show_diff,
        };
        let mut out = Vec::new();
        write_narration(&mut out, &report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn confident_shift_narration() {
        let first = noise_page(1);
        let text = narrate(&first, &slid(&first, 10, 0), false);
        assert!(text.starts_with("files compared:\n - 1_a.dmp\n - 2_b.dmp\n"));
        assert!(text.contains("shift of 10 bytes needed over the first page\n"));
        assert!(!text.contains("warning"));
        assert!(text.ends_with("result: shift of 10 bytes over side 1\n"));
    }

    #[test]
    fn identical_pages_suggest_hex_dump() {
        let first = noise_page(6);
        let text = narrate(&first, &first, false);
        assert!(text.contains("> pages are identical, rerun with --show-diff"));
        assert!(text.ends_with("result: shift of 0 bytes over side 1\n"));
        assert!(!narrate(&first, &first, true).contains("rerun with --show-diff"));
    }

    #[test]
    fn low_confidence_warning() {
        let first = noise_page(2);
        let text = narrate(&first, &slid(&first, 3000, 0xAA), false);
        assert!(text.contains("warning: the shift exceeds 50% of the page size"));
        assert!(text.contains("unreliable shift, comparing byte by byte..."));
        assert!(text.contains("   shift of 3000 bytes needed over the first page\n"));
        assert!(text.ends_with(
            "result: shift of 3000 bytes over side 1 + 0 differing bytes (low confidence)\n"
        ));
    }

    #[test]
    fn bulk_equal_lists_positions_in_hex() {
        let first = noise_page(3);
        let text = narrate(&first, &with_flipped(&first, &[0x10, 0xabc]), false);
        assert!(text.contains("no shift found, comparing byte by byte..."));
        assert!(text.contains("> differing bytes (2):"));
        assert!(text.contains("  - position 0x0010: "));
        assert!(text.contains("  - position 0x0abc: "));
        assert!(text.ends_with("result: 2 differing bytes\n"));
    }

    #[test]
    fn tolerant_shift_narration() {
        let first = noise_page(4);
        let second = with_flipped(&slid(&first, 5, 0), &[2000]);
        let text = narrate(&first, &second, false);
        assert!(text.contains("do not match byte by byte above 90% either"));
        assert!(text.contains("budget of 2 bytes"));
        assert!(text.contains("   shift of 5 bytes needed over the first page (1 differing bytes)"));
    }

    #[test]
    fn undetermined_narration() {
        let text = narrate(&[0u8; 4096], &[0xFFu8; 4096], false);
        assert!(text.contains("> no shift or byte-by-byte match found"));
        assert!(text.ends_with("result: undefined\n"));
    }

    #[test]
    fn size_error_narration() {
        let text = narrate(&[0u8; 100], &[0u8; 4096], false);
        assert!(text.contains("expected size of 4096 bytes"));
        assert!(text.contains("  first: 100 bytes"));
        assert!(text.ends_with("result: size mismatch error (100 vs 4096 bytes)\n"));
    }

    #[test]
    fn hex_diff_marks_changed_rows() {
        let first: Vec<u8> = (0u8..40).collect();
        let second = with_flipped(&first, &[17]);
        let mut out = Vec::new();
        let differing = write_hex_diff(&mut out, &first, &second).unwrap();
        assert_eq!(differing, 1);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("00000000  00 01 02"));
        assert!(lines[0].contains("     "));
        assert!(!lines[0].contains('|'));
        assert!(lines[1].starts_with("00000010  10 11 12"));
        assert!(lines[1].contains("  |  10 ee 12"));
        assert!(lines[2].contains("26 27"));
    }

    #[test]
    fn hex_diff_handles_unequal_lengths() {
        let mut out = Vec::new();
        let differing = write_hex_diff(&mut out, &[1, 2, 3], &[]).unwrap();
        assert_eq!(differing, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
