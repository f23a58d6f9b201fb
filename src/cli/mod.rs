//! Command-line interface for hapmask.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **mask**: Rewrite heterozygous calls of haploid samples to missing
//! - **report**: List heterozygous calls of haploid samples without touching the VCF
//!
//! ## Usage
//!
//! ```text
//! # Mask calls, writing calls_modified.vcf next to the input
//! hapmask mask calls.vcf -l haploids.txt -r 42
//!
//! # Stream through a pipe
//! cat calls.vcf | hapmask mask - -l haploids.txt -r 42 -o - > masked.vcf
//!
//! # List heterozygous haploid calls from allele depths
//! hapmask report calls.vcf -l haploids.txt -r 42 --evidence depth
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::types::EvidenceMode;
use crate::processing::RunSummary;
use crate::utils::io::default_output_path;

pub mod mask;
pub mod report;

#[derive(Parser)]
#[command(name = "hapmask")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Mask or report heterozygous calls in haploid samples of a VCF")]
#[command(
    long_about = "hapmask screens a VCF with mixed ploidy for haploid samples carrying heterozygous genotype calls.\n\nA haploid sample has a single chromosome copy, so a heterozygous call indicates a genotyping error or mismapping. Such calls can be:\n- Masked to missing, writing a new VCF\n- Reported as a list of positions, leaving the VCF untouched"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set heterozygous calls of haploid samples to missing
    Mask(mask::MaskArgs),

    /// List heterozygous calls of haploid samples without modifying the VCF
    Report(report::ReportArgs),
}

/// Arguments shared by every command
#[derive(clap::Args)]
pub struct InputArgs {
    /// Input VCF (uncompressed). Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// File listing haploid sample names, one per line
    #[arg(short = 'l', long = "haploids", visible_alias = "list")]
    pub haploids: PathBuf,

    /// Number of header lines in the VCF, counting the #CHROM line: every line
    /// before the first record (not "header rows minus 1")
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub header_lines: u64,

    /// Evidence used to detect heterozygous calls
    #[arg(long, value_enum, default_value = "genotype")]
    pub evidence: EvidenceMode,

    /// Output path. Use '-' for stdout (default: derived from the input name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InputArgs {
    /// The explicit output path, or one derived from the input with `suffix`
    #[must_use]
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, suffix))
    }

    #[must_use]
    pub fn header_line_count(&self) -> usize {
        usize::try_from(self.header_lines).unwrap_or(usize::MAX)
    }
}

/// Print the run summary to stderr
pub(crate) fn print_summary(summary: &RunSummary) {
    eprintln!(
        "Processed {} records with {} haploid samples",
        summary.records, summary.haploid_samples
    );
    eprintln!(
        "  Heterozygous haploid calls: {} in {} records",
        summary.heterozygous_calls, summary.affected_records
    );
    eprintln!("  Masked: {}", summary.masked_calls);
    eprintln!("  Flagged: {}", summary.flagged_calls);
    eprintln!("  Uninformative: {}", summary.uninformative_calls);
}
