//! Core data types for haploid genotype screening.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`VariantRecord`](record::VariantRecord): One VCF data line, parsed in place
//! - [`PloidySet`](ploidy::PloidySet): The samples declared haploid
//! - [`EvidenceMode`](types::EvidenceMode), [`ActionMode`](types::ActionMode),
//!   [`MaskStyle`](types::MaskStyle): Run configuration axes
//! - [`Classification`](types::Classification): Outcome for one sample at one site
//! - [`FilterError`](error::FilterError): Errors that abort a run
//!
//! ## Allele Indices
//!
//! Genotypes refer to alleles by index:
//!
//! | Index | Allele |
//! |-------|--------|
//! | 0     | REF    |
//! | 1..N  | ALT, in ALT column order |
//! | `.`   | missing |
//!
//! AD arrays are aligned to the same order, so a site with N alternates carries
//! N + 1 depths per sample.

pub mod error;
pub mod ploidy;
pub mod record;
pub mod types;
