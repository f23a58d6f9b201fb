//! Opening inputs and outputs, with `-` for standard streams.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::utils::validation::is_stdio;

/// Open a buffered reader on a file, or on standard input for `-`
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if is_stdio(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Open a buffered writer on a file, or on standard output for `-`
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if is_stdio(path) {
        Ok(Box::new(BufWriter::new(io::stdout().lock())))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

/// Output path next to `input`, replacing a `.vcf` extension with `suffix`.
///
/// `calls.vcf` with `_modified.vcf` gives `calls_modified.vcf`; reading from
/// standard input gives standard output.
#[must_use]
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    if is_stdio(input) {
        return PathBuf::from(crate::utils::validation::STDIO_PATH);
    }

    let base = match input.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("vcf") => input.file_stem(),
        _ => input.file_name(),
    };
    let stem = base
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/calls.vcf"), "_modified.vcf"),
            PathBuf::from("data/calls_modified.vcf")
        );
        assert_eq!(
            default_output_path(Path::new("calls.VCF"), "_het_positions.txt"),
            PathBuf::from("calls_het_positions.txt")
        );
        assert_eq!(
            default_output_path(Path::new("calls.txt"), "_AD_positions.txt"),
            PathBuf::from("calls.txt_AD_positions.txt")
        );
        assert_eq!(
            default_output_path(Path::new("-"), "_modified.vcf"),
            PathBuf::from("-")
        );
    }

    #[test]
    fn test_open_output_and_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        {
            let mut out = open_output(&path).unwrap();
            out.write_all(b"line\n").unwrap();
            out.flush().unwrap();
        }

        let mut line = String::new();
        open_input(&path).unwrap().read_line(&mut line).unwrap();
        assert_eq!(line, "line\n");
    }
}
