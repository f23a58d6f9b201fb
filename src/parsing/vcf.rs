//! Reader for the VCF header block.
//!
//! The header is not auto-detected: the caller says how many lines it spans.
//! The last of those lines must be the column header
//! (`#CHROM POS ID REF ALT QUAL FILTER INFO FORMAT sample...`), which supplies
//! the sample names in column order.

use std::io::BufRead;

use tracing::debug;

use crate::core::error::FilterError;

/// Prefix of the column header line
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";

/// Number of columns preceding the first sample (fixed columns plus FORMAT)
pub const SAMPLE_COLUMN_OFFSET: usize = 9;

/// Header lines of a VCF, kept verbatim for echoing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfHeader {
    /// Raw header lines including their original terminators
    pub lines: Vec<Vec<u8>>,
    /// Sample names from the column header line, in column order
    pub sample_names: Vec<String>,
}

impl VcfHeader {
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_names.len()
    }
}

/// Read exactly `count` header lines from `reader`
///
/// Lines are kept as raw bytes; only the `#CHROM` line has to be UTF-8.
///
/// # Errors
///
/// Returns `FilterError::Io` on read failure, or `FilterError::Configuration`
/// if the input ends before `count` lines or the last header line is not a
/// UTF-8 `#CHROM` column header.
pub fn read_header<R: BufRead>(reader: &mut R, count: usize) -> Result<VcfHeader, FilterError> {
    if count == 0 {
        return Err(FilterError::configuration(
            "header line count must include the #CHROM line (got 0)",
        ));
    }

    let mut lines = Vec::with_capacity(count);
    for read in 0..count {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(FilterError::Configuration(format!(
                "expected {count} header lines but input ended after {read}"
            )));
        }
        lines.push(line);
    }

    let sample_names = std::str::from_utf8(strip_line_terminator(&lines[count - 1]))
        .map_err(|_| FilterError::configuration("column header line is not valid UTF-8"))
        .and_then(parse_sample_names)
        .map_err(|e| match e {
            FilterError::Configuration(message) => FilterError::Configuration(format!(
                "header line {count}: {message}; check the header line count"
            )),
            other => other,
        })?;

    debug!(
        "Read {} header lines declaring {} samples",
        lines.len(),
        sample_names.len()
    );

    Ok(VcfHeader {
        lines,
        sample_names,
    })
}

/// Extract sample names from the `#CHROM` column header line
///
/// # Errors
///
/// Returns `FilterError::Configuration` if the line is not a column header.
pub fn parse_sample_names(line: &str) -> Result<Vec<String>, FilterError> {
    if !line.starts_with(COLUMN_HEADER_PREFIX) {
        return Err(FilterError::configuration(
            "expected the #CHROM column header line",
        ));
    }

    Ok(line
        .split('\t')
        .skip(SAMPLE_COLUMN_OFFSET)
        .map(str::to_string)
        .collect())
}

/// Split a raw line into its content and its terminator (`\n`, `\r\n`, or none)
#[must_use]
pub fn split_line_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let content = strip_line_terminator(line);
    line.split_at(content.len())
}

/// Strip a trailing `\n` or `\r\n`
#[must_use]
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n")
        .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
        .unwrap_or(line)
}
