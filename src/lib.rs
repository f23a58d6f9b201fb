//! # hapmask
//!
//! A library for finding heterozygous genotype calls in haploid samples of a VCF.
//!
//! Cohorts often mix ploidies: males are haploid on the X chromosome, some
//! organisms are sampled as both haploid and diploid individuals. A haploid
//! sample has a single chromosome copy, so a heterozygous call for it points to
//! a genotyping error or mismapped reads.
//!
//! `hapmask` streams a VCF once and, for every sample declared haploid, decides
//! whether its call shows more than one allele. Such calls are either masked to
//! missing or reported as a list of positions.
//!
//! ## Features
//!
//! - **Two evidence sources**: the called genotype (GT) or the raw allele depths (AD)
//! - **Multiallelic aware**: any two distinct alleles count, not just REF/ALT
//! - **Byte-exact output**: only masked sample columns are re-rendered
//! - **Streaming**: one record in memory at a time
//!
//! ## Example
//!
//! ```rust
//! use hapmask::{PloidySet, RunConfig, VcfWriter};
//! use std::io::Cursor;
//!
//! let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tf1\tm1\n\
//!            chrX\t100\t.\tA\tT,G\t.\t.\t.\tGT\t0/1\t1/2\n";
//!
//! let ploidy = PloidySet::new(["m1"]).unwrap();
//! let mut sink = VcfWriter::new(Vec::new());
//! let summary = hapmask::processing::run(
//!     &mut Cursor::new(vcf),
//!     &mut sink,
//!     1,
//!     &ploidy,
//!     &RunConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(summary.masked_calls, 1);
//! let out = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(out.ends_with("GT\t0/1\t./.\n"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Record model, ploidy set, configuration types and errors
//! - [`parsing`]: Parsers for the VCF header and haploid sample lists
//! - [`genotype`]: Evidence extraction and heterozygosity classification
//! - [`processing`]: Site processor, output sinks and the streaming driver
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod genotype;
pub mod parsing;
pub mod processing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::error::FilterError;
pub use core::ploidy::{HaploidSample, PloidySet};
pub use core::record::VariantRecord;
pub use core::types::*;
pub use processing::emit::{FlagWriter, RecordSink, ReportFormat, VcfWriter};
pub use processing::site::{RunConfig, SiteProcessor};
pub use processing::RunSummary;
