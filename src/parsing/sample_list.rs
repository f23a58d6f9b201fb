//! Parser for haploid sample lists.
//!
//! One sample name per line. Surrounding whitespace is trimmed, blank lines
//! and `#` comments are skipped.

use std::path::Path;

use crate::core::error::FilterError;
use crate::core::ploidy::PloidySet;

/// Parse a haploid sample list file
///
/// # Errors
///
/// Returns `FilterError::Io` if the file cannot be read, or
/// `FilterError::Configuration` if it lists no names.
pub fn parse_sample_list_file(path: &Path) -> Result<PloidySet, FilterError> {
    let content = std::fs::read_to_string(path)?;
    parse_sample_list_text(&content).map_err(|e| match e {
        FilterError::Configuration(message) => {
            FilterError::Configuration(format!("{message} ({})", path.display()))
        }
        other => other,
    })
}

/// Parse haploid sample names from text
///
/// # Errors
///
/// Returns `FilterError::Configuration` if the text lists no names.
pub fn parse_sample_list_text(text: &str) -> Result<PloidySet, FilterError> {
    let names = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    PloidySet::new(names)
}
