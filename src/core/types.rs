use serde::{Deserialize, Serialize};

/// FORMAT key holding the called genotype
pub const GENOTYPE_KEY: &str = "GT";

/// FORMAT key holding per-allele read depths
pub const ALLELE_DEPTH_KEY: &str = "AD";

/// The VCF missing-value symbol
pub const MISSING_VALUE: &str = ".";

/// Source of evidence used to decide whether a call is heterozygous
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceMode {
    /// Trust the called genotype (GT)
    #[default]
    Genotype,
    /// Look at the raw allele depths (AD)
    Depth,
}

impl EvidenceMode {
    /// FORMAT key this mode reads from
    #[must_use]
    pub fn format_key(self) -> &'static str {
        match self {
            Self::Genotype => GENOTYPE_KEY,
            Self::Depth => ALLELE_DEPTH_KEY,
        }
    }
}

impl std::fmt::Display for EvidenceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Genotype => write!(f, "genotype (GT)"),
            Self::Depth => write!(f, "allele depth (AD)"),
        }
    }
}

/// What to do with a heterozygous haploid call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionMode {
    /// Rewrite the call to missing and emit the VCF
    #[default]
    Mask,
    /// Leave the VCF alone and list the offending positions
    Report,
}

impl std::fmt::Display for ActionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mask => write!(f, "mask"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// How a masked genotype is written back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MaskStyle {
    /// One `.` per allele of the original call, keeping its delimiter (`0/1` -> `./.`)
    #[default]
    MatchArity,
    /// A single `.`, the haploid missing call
    Haploid,
}

/// Outcome of classifying one sample at one site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Two or more distinct alleles observed
    Heterozygous,
    /// Exactly one allele observed
    Homozygous,
    /// Missing or insufficient data
    Uninformative,
}

impl Classification {
    #[must_use]
    pub fn is_heterozygous(self) -> bool {
        self == Self::Heterozygous
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heterozygous => write!(f, "heterozygous"),
            Self::Homozygous => write!(f, "homozygous"),
            Self::Uninformative => write!(f, "uninformative"),
        }
    }
}
