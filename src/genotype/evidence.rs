//! Extraction of per-sample genotype evidence from a record.

use crate::core::error::RecordError;
use crate::core::record::VariantRecord;
use crate::core::types::{EvidenceMode, MISSING_VALUE};

/// Evidence for one sample at one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenotypeEvidence {
    /// Allele indices of the called genotype, in call order; `None` is a missing allele
    Called(Vec<Option<usize>>),
    /// Read depth per allele, reference first; empty when AD is missing
    Depths(Vec<u32>),
}

/// Extract the evidence for one sample
///
/// A sample that dropped the sub-field, or carries `.` in it, yields missing
/// evidence rather than an error.
///
/// # Errors
///
/// Returns `RecordError::MissingField` if FORMAT lacks the key the mode needs
/// or if the AD array does not cover every allele, and
/// `RecordError::Malformed` for unparseable allele or depth tokens.
pub fn extract(
    record: &VariantRecord<'_>,
    sample_index: usize,
    mode: EvidenceMode,
) -> Result<GenotypeEvidence, RecordError> {
    let key = mode.format_key();
    let key_index = record.format_index(key).ok_or_else(|| {
        RecordError::MissingField(format!(
            "FORMAT '{}' lacks the {key} key required for {mode} evidence",
            record.format_keys.join(":")
        ))
    })?;

    if sample_index >= record.sample_count() {
        return Err(RecordError::Malformed(format!(
            "sample column {} requested but record has {} samples",
            sample_index + 1,
            record.sample_count()
        )));
    }

    let value = record.sub_value(sample_index, key_index).unwrap_or(MISSING_VALUE);

    match mode {
        EvidenceMode::Genotype => {
            parse_genotype(value, record.alternate_count()).map(GenotypeEvidence::Called)
        }
        EvidenceMode::Depth => {
            parse_allele_depths(value, record.allele_count()).map(GenotypeEvidence::Depths)
        }
    }
}

/// Parse a GT value such as `0/1`, `1|2`, `1` or `./.` into allele indices
///
/// # Errors
///
/// Returns `RecordError::Malformed` if a token is neither `.` nor a decimal
/// index, or if an index points past the last alternate allele.
pub fn parse_genotype(
    value: &str,
    alternate_count: usize,
) -> Result<Vec<Option<usize>>, RecordError> {
    if value.is_empty() {
        return Ok(vec![None]);
    }

    value
        .split(['/', '|'])
        .map(|token| {
            if token == MISSING_VALUE {
                return Ok(None);
            }
            let index = parse_decimal::<usize>(token).ok_or_else(|| {
                RecordError::Malformed(format!("invalid allele '{token}' in genotype '{value}'"))
            })?;
            if index > alternate_count {
                return Err(RecordError::Malformed(format!(
                    "genotype '{value}' references allele {index} but the site has {alternate_count} alternate(s)"
                )));
            }
            Ok(Some(index))
        })
        .collect()
}

/// Parse an AD value such as `5,0,3` into per-allele depths
///
/// A `.` or empty value means no depth data and yields an empty vector; a `.`
/// inside the array counts as zero reads.
///
/// # Errors
///
/// Returns `RecordError::Malformed` for non-numeric tokens, and
/// `RecordError::MissingField` if the array length differs from `allele_count`.
pub fn parse_allele_depths(value: &str, allele_count: usize) -> Result<Vec<u32>, RecordError> {
    if value.is_empty() || value == MISSING_VALUE {
        return Ok(Vec::new());
    }

    let depths = value
        .split(',')
        .map(|token| {
            if token == MISSING_VALUE {
                return Ok(0);
            }
            parse_decimal::<u32>(token).ok_or_else(|| {
                RecordError::Malformed(format!("invalid depth '{token}' in AD '{value}'"))
            })
        })
        .collect::<Result<Vec<u32>, RecordError>>()?;

    if depths.len() != allele_count {
        return Err(RecordError::MissingField(format!(
            "AD '{value}' has {} values but the site has {allele_count} alleles (REF + ALT)",
            depths.len()
        )));
    }

    Ok(depths)
}

/// Parse a plain run of ASCII digits, rejecting signs and whitespace
fn parse_decimal<T: std::str::FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
