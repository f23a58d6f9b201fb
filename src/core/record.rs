//! Model of a single VCF data line.
//!
//! Fields borrow from the input line so that untouched columns can be written
//! back byte-for-byte. Only sample columns can be replaced, and only those are
//! ever re-rendered.

use std::borrow::Cow;
use std::fmt;

use crate::core::error::RecordError;
use crate::core::types::MISSING_VALUE;

/// Fixed columns every data line must carry (CHROM through INFO)
pub const MIN_COLUMNS: usize = 8;

/// One VCF data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord<'a> {
    pub chromosome: &'a str,
    /// Kept verbatim, no numeric re-rendering
    pub position: &'a str,
    pub id: &'a str,
    pub reference_allele: &'a str,
    /// ALT split on `,`; a lone `.` means the site has no alternates
    pub alternate_alleles: Vec<&'a str>,
    pub quality: &'a str,
    pub filter: &'a str,
    pub info: &'a str,
    /// FORMAT split on `:`; empty when the line has no FORMAT column
    pub format_keys: Vec<&'a str>,
    /// One `:`-delimited value per sample column
    pub sample_values: Vec<Cow<'a, str>>,
    has_format: bool,
}

impl<'a> VariantRecord<'a> {
    /// Parse a tab-delimited data line (without its line terminator)
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if fewer than eight columns are
    /// present, or if sample columns follow an empty FORMAT column.
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let columns: Vec<&str> = line.split('\t').collect();

        if columns.len() < MIN_COLUMNS {
            return Err(RecordError::Malformed(format!(
                "expected at least {MIN_COLUMNS} tab-delimited columns, found {}",
                columns.len()
            )));
        }

        let has_format = columns.len() > MIN_COLUMNS;
        let format_keys: Vec<&str> = match columns.get(MIN_COLUMNS) {
            Some(&format) if !format.is_empty() => format.split(':').collect(),
            _ => Vec::new(),
        };

        let sample_values: Vec<Cow<'a, str>> = columns
            .iter()
            .skip(MIN_COLUMNS + 1)
            .map(|value| Cow::Borrowed(*value))
            .collect();

        if format_keys.is_empty() && !sample_values.is_empty() {
            return Err(RecordError::Malformed(
                "sample columns present but FORMAT column is empty".to_string(),
            ));
        }

        Ok(Self {
            chromosome: columns[0],
            position: columns[1],
            id: columns[2],
            reference_allele: columns[3],
            alternate_alleles: columns[4].split(',').collect(),
            quality: columns[5],
            filter: columns[6],
            info: columns[7],
            format_keys,
            sample_values,
            has_format,
        })
    }

    /// Number of alternate alleles (0 when ALT is `.`)
    #[must_use]
    pub fn alternate_count(&self) -> usize {
        if self.alternate_alleles.as_slice() == [MISSING_VALUE] {
            0
        } else {
            self.alternate_alleles.len()
        }
    }

    /// Number of alleles including the reference
    #[must_use]
    pub fn allele_count(&self) -> usize {
        self.alternate_count() + 1
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_values.len()
    }

    /// Position of `key` in FORMAT (exact, case-sensitive match)
    #[must_use]
    pub fn format_index(&self, key: &str) -> Option<usize> {
        self.format_keys.iter().position(|k| *k == key)
    }

    /// Sub-value of a sample at a FORMAT position.
    ///
    /// Returns `None` if the sample does not exist or if the sample dropped
    /// trailing sub-fields, which VCF permits.
    #[must_use]
    pub fn sub_value(&self, sample_index: usize, key_index: usize) -> Option<&str> {
        self.sample_values
            .get(sample_index)
            .and_then(|value| value.split(':').nth(key_index))
    }

    /// Replace one sub-value of a sample, leaving its other sub-fields as-is.
    ///
    /// Dropped trailing sub-fields are filled with `.` up to `key_index`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if the sample index is out of range.
    pub fn set_sub_value(
        &mut self,
        sample_index: usize,
        key_index: usize,
        new_value: &str,
    ) -> Result<(), RecordError> {
        let value = self.sample_values.get_mut(sample_index).ok_or_else(|| {
            RecordError::Malformed(format!("no sample column at index {sample_index}"))
        })?;

        let mut fields: Vec<&str> = value.split(':').collect();
        while fields.len() <= key_index {
            fields.push(MISSING_VALUE);
        }
        fields[key_index] = new_value;

        let rewritten = fields.join(":");
        *value = Cow::Owned(rewritten);
        Ok(())
    }

    /// Whether any sample column has been replaced since parsing
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.sample_values
            .iter()
            .any(|value| matches!(value, Cow::Owned(_)))
    }

    /// Render the record as a tab-delimited line (no terminator)
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VariantRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chromosome,
            self.position,
            self.id,
            self.reference_allele,
            self.alternate_alleles.join(","),
            self.quality,
            self.filter,
            self.info,
        )?;

        if self.has_format {
            write!(f, "\t{}", self.format_keys.join(":"))?;
        }

        for value in &self.sample_values {
            write!(f, "\t{value}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "chr1\t100\trs1\tA\tT,G\t50\tPASS\tDP=10\tGT:AD\t0/1:5,3,0\t1:0,7,0\t0/2:4,0,4";

    #[test]
    fn test_parse_record() {
        let record = VariantRecord::parse(LINE).unwrap();

        assert_eq!(record.chromosome, "chr1");
        assert_eq!(record.position, "100");
        assert_eq!(record.id, "rs1");
        assert_eq!(record.reference_allele, "A");
        assert_eq!(record.alternate_alleles, vec!["T", "G"]);
        assert_eq!(record.alternate_count(), 2);
        assert_eq!(record.allele_count(), 3);
        assert_eq!(record.format_keys, vec!["GT", "AD"]);
        assert_eq!(record.sample_count(), 3);
        assert_eq!(record.sample_values[2], "0/2:4,0,4");
    }

    #[test]
    fn test_parse_too_few_columns() {
        let result = VariantRecord::parse("chr1\t100\t.\tA\tT");
        assert!(matches!(result, Err(RecordError::Malformed(_))));
    }

    #[test]
    fn test_parse_sites_only() {
        let line = "chr1\t100\t.\tA\tT\t.\t.\t.";
        let record = VariantRecord::parse(line).unwrap();
        assert!(record.format_keys.is_empty());
        assert_eq!(record.sample_count(), 0);
        assert_eq!(record.serialize(), line);
    }

    #[test]
    fn test_parse_samples_without_format() {
        let result = VariantRecord::parse("chr1\t100\t.\tA\tT\t.\t.\t.\t\t0/1");
        assert!(matches!(result, Err(RecordError::Malformed(_))));
    }

    #[test]
    fn test_missing_alt_has_no_alternates() {
        let record = VariantRecord::parse("chr1\t100\t.\tA\t.\t.\t.\t.\tGT\t0").unwrap();
        assert_eq!(record.alternate_count(), 0);
        assert_eq!(record.allele_count(), 1);
    }

    #[test]
    fn test_symbolic_alleles_pass_through() {
        let line = "chr2\t321\t.\tG\tG]17:198982],<DEL>\t.\t.\tSVTYPE=BND\tGT\t0/1";
        let record = VariantRecord::parse(line).unwrap();
        assert_eq!(record.alternate_alleles, vec!["G]17:198982]", "<DEL>"]);
        assert_eq!(record.serialize(), line);
    }

    #[test]
    fn test_format_index_is_case_sensitive() {
        let record = VariantRecord::parse("chr1\t1\t.\tA\tT\t.\t.\t.\tgt:AD\t0/1:1,1").unwrap();
        assert_eq!(record.format_index("GT"), None);
        assert_eq!(record.format_index("AD"), Some(1));
    }

    #[test]
    fn test_sub_value_with_dropped_trailing_fields() {
        let record = VariantRecord::parse("chr1\t1\t.\tA\tT\t.\t.\t.\tGT:AD:DP\t1\t0/1:3,4:7").unwrap();
        assert_eq!(record.sub_value(0, 0), Some("1"));
        assert_eq!(record.sub_value(0, 1), None);
        assert_eq!(record.sub_value(1, 2), Some("7"));
        assert_eq!(record.sub_value(5, 0), None);
    }

    #[test]
    fn test_serialize_roundtrip_unmodified() {
        let record = VariantRecord::parse(LINE).unwrap();
        assert!(!record.is_modified());
        assert_eq!(record.serialize(), LINE);
    }

    #[test]
    fn test_set_sub_value_keeps_other_fields() {
        let mut record = VariantRecord::parse(LINE).unwrap();
        record.set_sub_value(2, 0, "./.").unwrap();

        assert!(record.is_modified());
        assert_eq!(record.sample_values[0], "0/1:5,3,0");
        assert_eq!(record.sample_values[2], "./.:4,0,4");
        assert_eq!(
            record.serialize(),
            "chr1\t100\trs1\tA\tT,G\t50\tPASS\tDP=10\tGT:AD\t0/1:5,3,0\t1:0,7,0\t./.:4,0,4"
        );
    }

    #[test]
    fn test_set_sub_value_pads_dropped_fields() {
        let mut record = VariantRecord::parse("chr1\t1\t.\tA\tT\t.\t.\t.\tAD:DP:GT\t3,4").unwrap();
        record.set_sub_value(0, 2, ".").unwrap();
        assert_eq!(record.sample_values[0], "3,4:.:.");
    }

    #[test]
    fn test_set_sub_value_out_of_range() {
        let mut record = VariantRecord::parse(LINE).unwrap();
        assert!(record.set_sub_value(3, 0, ".").is_err());
    }
}
