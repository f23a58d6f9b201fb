//! Genotype evidence and heterozygosity classification.
//!
//! [`evidence::extract`] pulls either the called genotype (GT) or the allele
//! depths (AD) of one sample out of a record, and [`classify::classify`]
//! decides whether that evidence shows more than one allele.

pub mod classify;
pub mod evidence;

pub use classify::{classify, AlleleBalance, DepthThresholds};
pub use evidence::{extract, GenotypeEvidence};
