//! Centralized validation of input and output paths.

use std::path::Path;

use crate::core::error::FilterError;

/// Path naming standard input or standard output
pub const STDIO_PATH: &str = "-";

/// Whether `path` stands for standard input/output
#[must_use]
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Refuse to write the output over the input being read.
///
/// # Errors
///
/// Returns `FilterError::Configuration` if both paths name the same file.
pub fn validate_output_path(input: &Path, output: &Path) -> Result<(), FilterError> {
    if is_stdio(input) || is_stdio(output) {
        return Ok(());
    }

    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        // Output does not exist yet, so it cannot be the input
        _ => input == output,
    };

    if same {
        return Err(FilterError::Configuration(format!(
            "output path {} would overwrite the input",
            output.display()
        )));
    }
    Ok(())
}
