//! Parsers for the text inputs of a run.
//!
//! This module provides parsers for:
//!
//! - **VCF headers**: Read the caller-declared header block and take sample
//!   names from the `#CHROM` line
//! - **Haploid sample lists**: One sample name per line
//!
//! Data lines are parsed by [`VariantRecord`](crate::core::record::VariantRecord).

pub mod sample_list;
pub mod vcf;
