//! Heterozygosity classification.
//!
//! The rule is the same for both evidence sources: a call is heterozygous when
//! two or more distinct alleles are observed, whatever the number of alternate
//! alleles at the site.
//!
//! - Called genotypes observe the distinct non-missing allele indices.
//! - Allele depths observe every allele whose read support reaches
//!   `min_depth` (default 1, i.e. any read at all).
//!
//! Depth classification can additionally require an allele balance: some
//! supported alternate must carry a depth within `[low, high]` times the
//! reference depth. When the reference has no reads at all the window is not
//! applied and two supported alternates are enough.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::FilterError;
use crate::core::types::Classification;
use crate::genotype::evidence::GenotypeEvidence;

/// Default reads needed for an allele to count as present
pub const DEFAULT_MIN_DEPTH: u32 = 1;

/// Accepted ratio window of an alternate allele's depth against the reference depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlleleBalance {
    pub low: f64,
    pub high: f64,
}

impl AlleleBalance {
    /// # Errors
    ///
    /// Returns `FilterError::Configuration` unless `0 <= low <= high` and both
    /// bounds are finite.
    pub fn new(low: f64, high: f64) -> Result<Self, FilterError> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(FilterError::Configuration(format!(
                "invalid allele balance window [{low}, {high}]"
            )));
        }
        Ok(Self { low, high })
    }

    #[must_use]
    pub fn contains(&self, ratio: f64) -> bool {
        (self.low..=self.high).contains(&ratio)
    }
}

impl FromStr for AlleleBalance {
    type Err = FilterError;

    /// Parse `LOW,HIGH`, e.g. `0.2,1.8`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s.split_once(',').ok_or_else(|| {
            FilterError::Configuration(format!("allele balance must be LOW,HIGH, got '{s}'"))
        })?;
        let parse = |v: &str| {
            v.trim().parse::<f64>().map_err(|_| {
                FilterError::Configuration(format!("invalid allele balance bound '{v}'"))
            })
        };
        Self::new(parse(low)?, parse(high)?)
    }
}

/// Thresholds applied to allele-depth evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthThresholds {
    /// Reads needed for an allele to count as present
    pub min_depth: u32,
    /// Optional allele balance requirement
    pub balance: Option<AlleleBalance>,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            balance: None,
        }
    }
}

/// Classify one sample's evidence
#[must_use]
pub fn classify(evidence: &GenotypeEvidence, thresholds: &DepthThresholds) -> Classification {
    match evidence {
        GenotypeEvidence::Called(alleles) => classify_called(alleles),
        GenotypeEvidence::Depths(depths) => classify_depths(depths, thresholds),
    }
}

/// Classify a called genotype by its distinct non-missing allele indices
#[must_use]
pub fn classify_called(alleles: &[Option<usize>]) -> Classification {
    let distinct: BTreeSet<usize> = alleles.iter().flatten().copied().collect();
    match distinct.len() {
        0 => Classification::Uninformative,
        1 => Classification::Homozygous,
        _ => Classification::Heterozygous,
    }
}

/// Classify per-allele depths by the alleles they support
#[must_use]
pub fn classify_depths(depths: &[u32], thresholds: &DepthThresholds) -> Classification {
    if depths.iter().all(|&depth| depth == 0) {
        return Classification::Uninformative;
    }

    let min_depth = thresholds.min_depth.max(1);
    let present: Vec<usize> = depths
        .iter()
        .enumerate()
        .filter(|&(_, &depth)| depth >= min_depth)
        .map(|(allele, _)| allele)
        .collect();

    match present.len() {
        0 => Classification::Uninformative,
        1 => Classification::Homozygous,
        _ => match &thresholds.balance {
            None => Classification::Heterozygous,
            Some(balance) if is_balanced(depths, &present, balance) => {
                Classification::Heterozygous
            }
            Some(_) => Classification::Homozygous,
        },
    }
}

fn is_balanced(depths: &[u32], present: &[usize], balance: &AlleleBalance) -> bool {
    let reference_depth = depths[0];
    if reference_depth == 0 {
        // No ratio against an unsupported reference; two supported
        // alternates are enough
        return true;
    }

    let reference_depth = f64::from(reference_depth);
    present
        .iter()
        .filter(|&&allele| allele != 0)
        .any(|&allele| balance.contains(f64::from(depths[allele]) / reference_depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depths(values: &[u32]) -> Classification {
        classify_depths(values, &DepthThresholds::default())
    }

    #[test]
    fn test_called_single_allele_is_homozygous() {
        assert_eq!(classify_called(&[Some(1)]), Classification::Homozygous);
        assert_eq!(classify_called(&[Some(0)]), Classification::Homozygous);
        assert_eq!(classify_called(&[Some(2), Some(2)]), Classification::Homozygous);
        assert_eq!(classify_called(&[None, Some(1)]), Classification::Homozygous);
    }

    #[test]
    fn test_called_distinct_alleles_are_heterozygous() {
        assert_eq!(classify_called(&[Some(0), Some(1)]), Classification::Heterozygous);
        assert_eq!(classify_called(&[Some(1), Some(0)]), Classification::Heterozygous);
        // Multiallelic sites, no reference allele involved
        assert_eq!(classify_called(&[Some(1), Some(2)]), Classification::Heterozygous);
        assert_eq!(classify_called(&[Some(0), Some(2)]), Classification::Heterozygous);
        assert_eq!(
            classify_called(&[Some(3), None, Some(7)]),
            Classification::Heterozygous
        );
    }

    #[test]
    fn test_called_all_missing_is_uninformative() {
        assert_eq!(classify_called(&[None]), Classification::Uninformative);
        assert_eq!(classify_called(&[None, None]), Classification::Uninformative);
        assert_eq!(classify_called(&[]), Classification::Uninformative);
    }

    #[test]
    fn test_depths_presence() {
        assert_eq!(depths(&[5, 0, 3]), Classification::Heterozygous);
        assert_eq!(depths(&[0, 12, 0]), Classification::Homozygous);
        assert_eq!(depths(&[9, 0]), Classification::Homozygous);
        assert_eq!(depths(&[0, 1, 1]), Classification::Heterozygous);
    }

    #[test]
    fn test_depths_all_zero_is_uninformative() {
        assert_eq!(depths(&[0, 0, 0]), Classification::Uninformative);
        assert_eq!(depths(&[]), Classification::Uninformative);
    }

    #[test]
    fn test_depths_min_depth() {
        let thresholds = DepthThresholds {
            min_depth: 3,
            balance: None,
        };
        assert_eq!(classify_depths(&[20, 2], &thresholds), Classification::Homozygous);
        assert_eq!(classify_depths(&[20, 3], &thresholds), Classification::Heterozygous);
        assert_eq!(classify_depths(&[1, 2], &thresholds), Classification::Uninformative);
    }

    #[test]
    fn test_depths_allele_balance() {
        let thresholds = DepthThresholds {
            min_depth: 1,
            balance: Some(AlleleBalance::new(0.2, 1.8).unwrap()),
        };
        // 1/20 is below the window
        assert_eq!(classify_depths(&[20, 1], &thresholds), Classification::Homozygous);
        assert_eq!(classify_depths(&[10, 6], &thresholds), Classification::Heterozygous);
        // 30/10 is above the window
        assert_eq!(classify_depths(&[10, 30], &thresholds), Classification::Homozygous);
        // No reference reads: the window does not apply
        assert_eq!(classify_depths(&[0, 10, 5], &thresholds), Classification::Heterozygous);
        assert_eq!(classify_depths(&[0, 10, 1], &thresholds), Classification::Heterozygous);
        // Two alternates are each measured against the reference
        assert_eq!(classify_depths(&[10, 1, 9], &thresholds), Classification::Heterozygous);
        assert_eq!(classify_depths(&[2, 30, 40], &thresholds), Classification::Homozygous);
    }

    #[test]
    fn test_allele_balance_from_str() {
        let balance: AlleleBalance = "0.2,1.8".parse().unwrap();
        assert!((balance.low - 0.2).abs() < f64::EPSILON);
        assert!((balance.high - 1.8).abs() < f64::EPSILON);

        assert!("0.2".parse::<AlleleBalance>().is_err());
        assert!("1.8,0.2".parse::<AlleleBalance>().is_err());
        assert!("a,b".parse::<AlleleBalance>().is_err());
    }

    #[test]
    fn test_classify_dispatch() {
        let thresholds = DepthThresholds::default();
        assert_eq!(
            classify(&GenotypeEvidence::Called(vec![Some(0), Some(2)]), &thresholds),
            Classification::Heterozygous
        );
        assert_eq!(
            classify(&GenotypeEvidence::Depths(vec![5, 0, 3]), &thresholds),
            Classification::Heterozygous
        );
    }
}
