use clap::Args;

use crate::cli::{print_summary, InputArgs};
use crate::core::ploidy::PloidySet;
use crate::core::types::{ActionMode, EvidenceMode};
use crate::genotype::classify::{AlleleBalance, DepthThresholds};
use crate::processing;
use crate::processing::emit::{FlagWriter, ReportFormat};
use crate::processing::site::RunConfig;
use crate::utils::io::{open_input, open_output};
use crate::utils::validation::{is_stdio, validate_output_path};

/// Suffix of the default output file for genotype evidence
pub const GENOTYPE_REPORT_SUFFIX: &str = "_het_positions.txt";

/// Suffix of the default output file for allele-depth evidence
pub const DEPTH_REPORT_SUFFIX: &str = "_AD_positions.txt";

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Reads needed for an allele to count as present (depth evidence)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub min_depth: u32,

    /// Require an alternate allele's depth within LOW,HIGH times the reference
    /// depth (depth evidence), e.g. 0.2,1.8
    #[arg(long, value_name = "LOW,HIGH")]
    pub balance: Option<AlleleBalance>,

    /// Report layout
    #[arg(long, value_enum, default_value = "tsv")]
    pub format: ReportFormat,

    /// Write one line per flagged position instead of one per flagged sample
    #[arg(long)]
    pub unique_positions: bool,
}

/// Execute report subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be read,
/// the report cannot be written, or a record is malformed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReportArgs, verbose: bool) -> anyhow::Result<()> {
    let config = RunConfig {
        evidence: args.input.evidence,
        action: ActionMode::Report,
        depth: DepthThresholds {
            min_depth: args.min_depth,
            balance: args.balance,
        },
        ..RunConfig::default()
    };
    config.validate()?;

    if config.evidence == EvidenceMode::Genotype
        && (args.balance.is_some() || args.min_depth != DepthThresholds::default().min_depth)
    {
        tracing::warn!("--min-depth and --balance only apply to --evidence depth; ignoring");
    }

    let ploidy = PloidySet::load(&args.input.haploids)?;
    if verbose {
        eprintln!("Loaded {} haploid sample names", ploidy.len());
    }

    let suffix = match config.evidence {
        EvidenceMode::Genotype => GENOTYPE_REPORT_SUFFIX,
        EvidenceMode::Depth => DEPTH_REPORT_SUFFIX,
    };
    let output = args.input.output_path(suffix);
    validate_output_path(&args.input.input, &output)?;

    let mut reader = open_input(&args.input.input)?;
    let mut sink = FlagWriter::new(open_output(&output)?, args.format, args.unique_positions);

    let summary = processing::run(
        &mut reader,
        &mut sink,
        args.input.header_line_count(),
        &ploidy,
        &config,
    )?;

    if verbose {
        print_summary(&summary);
    }
    if !is_stdio(&output) {
        eprintln!("Heterozygous positions saved as {}", output.display());
    }

    Ok(())
}
