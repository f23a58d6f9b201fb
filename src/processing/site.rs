use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::error::{FilterError, RecordError};
use crate::core::ploidy::HaploidSample;
use crate::core::record::VariantRecord;
use crate::core::types::{
    ActionMode, Classification, EvidenceMode, MaskStyle, GENOTYPE_KEY, MISSING_VALUE,
};
use crate::genotype::classify::{classify, DepthThresholds};
use crate::genotype::evidence::extract;

/// Configuration of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Which FORMAT field decides heterozygosity
    pub evidence: EvidenceMode,
    /// Mask the calls or only report them
    pub action: ActionMode,
    /// How masked genotypes are written
    pub mask_style: MaskStyle,
    /// Thresholds for allele-depth evidence
    pub depth: DepthThresholds,
}

impl RunConfig {
    /// Check that the evidence and action modes can be combined.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Configuration` for depth evidence with the mask
    /// action: masking rewrites GT, which depth evidence never looks at.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.evidence == EvidenceMode::Depth && self.action == ActionMode::Mask {
            return Err(FilterError::configuration(
                "allele-depth evidence is only supported with the report action",
            ));
        }
        Ok(())
    }
}

/// A heterozygous call in a haploid sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedCall<'a> {
    pub chrom: &'a str,
    pub pos: &'a str,
    pub sample: &'a str,
}

/// Result of processing one record
#[derive(Debug, Clone)]
pub struct SiteOutcome<'a> {
    /// The record, with masked genotypes applied in mask mode
    pub record: VariantRecord<'a>,
    /// Heterozygous haploid calls found (report mode only)
    pub flagged: Vec<FlaggedCall<'a>>,
    pub heterozygous: usize,
    pub masked: usize,
    pub uninformative: usize,
}

/// Applies classification and the configured action to each record
#[derive(Debug)]
pub struct SiteProcessor {
    config: RunConfig,
    haploids: Vec<HaploidSample>,
    sample_count: usize,
}

impl SiteProcessor {
    /// # Errors
    ///
    /// Returns `FilterError::Configuration` if the configuration is invalid.
    pub fn new(
        config: RunConfig,
        haploids: Vec<HaploidSample>,
        sample_count: usize,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            config,
            haploids,
            sample_count,
        })
    }

    /// Parse a data line and handle every haploid sample in it
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if the line is structurally invalid
    /// or its sample count differs from the header, and
    /// `RecordError::MissingField` if a required FORMAT key is absent.
    pub fn process<'a>(&'a self, line: &'a str) -> Result<SiteOutcome<'a>, RecordError> {
        let mut record = VariantRecord::parse(line)?;

        if record.sample_count() != self.sample_count {
            return Err(RecordError::Malformed(format!(
                "found {} sample columns but the header declares {}",
                record.sample_count(),
                self.sample_count
            )));
        }

        let mut outcome_flags = Vec::new();
        let mut heterozygous = 0;
        let mut masked = 0;
        let mut uninformative = 0;

        for haploid in &self.haploids {
            let evidence = extract(&record, haploid.column, self.config.evidence)?;
            let classification = classify(&evidence, &self.config.depth);

            match classification {
                Classification::Heterozygous => heterozygous += 1,
                Classification::Uninformative => {
                    uninformative += 1;
                    continue;
                }
                Classification::Homozygous => continue,
            }

            trace!(
                "{}:{} {} is heterozygous ({:?})",
                record.chromosome,
                record.position,
                haploid.name,
                evidence
            );

            match self.config.action {
                ActionMode::Mask => {
                    mask_genotype(&mut record, haploid.column, self.config.mask_style)?;
                    masked += 1;
                }
                ActionMode::Report => outcome_flags.push(FlaggedCall {
                    chrom: record.chromosome,
                    pos: record.position,
                    sample: &haploid.name,
                }),
            }
        }

        Ok(SiteOutcome {
            record,
            flagged: outcome_flags,
            heterozygous,
            masked,
            uninformative,
        })
    }
}

/// Replace a sample's GT with a missing call, keeping every other sub-field
fn mask_genotype(
    record: &mut VariantRecord<'_>,
    column: usize,
    style: MaskStyle,
) -> Result<(), RecordError> {
    let key_index = record.format_index(GENOTYPE_KEY).ok_or_else(|| {
        RecordError::MissingField(format!("FORMAT lacks the {GENOTYPE_KEY} key"))
    })?;
    let genotype = record.sub_value(column, key_index).unwrap_or(MISSING_VALUE);
    let missing = missing_call(genotype, style);
    record.set_sub_value(column, key_index, &missing)
}

/// Build the missing call replacing `genotype`.
///
/// `MatchArity` keeps the number of alleles and the delimiters of the
/// original call (`0/1` -> `./.`, `0|1|2` -> `.|.|.`).
#[must_use]
pub fn missing_call(genotype: &str, style: MaskStyle) -> String {
    match style {
        MaskStyle::Haploid => MISSING_VALUE.to_string(),
        MaskStyle::MatchArity => {
            let mut call = String::from(MISSING_VALUE);
            for delimiter in genotype.chars().filter(|c| matches!(c, '/' | '|')) {
                call.push(delimiter);
                call.push_str(MISSING_VALUE);
            }
            call
        }
    }
}
