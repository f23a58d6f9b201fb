use clap::Args;

use crate::cli::{print_summary, InputArgs};
use crate::core::ploidy::PloidySet;
use crate::core::types::{ActionMode, MaskStyle};
use crate::processing;
use crate::processing::emit::VcfWriter;
use crate::processing::site::RunConfig;
use crate::utils::io::{open_input, open_output};
use crate::utils::validation::{is_stdio, validate_output_path};

/// Suffix of the default output file
pub const MODIFIED_VCF_SUFFIX: &str = "_modified.vcf";

#[derive(Args)]
pub struct MaskArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// How masked genotypes are written: one '.' per allele (./.) or a single '.'
    #[arg(long, value_enum, default_value = "match-arity")]
    pub mask_style: MaskStyle,
}

/// Execute mask subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be read,
/// the output cannot be written, or a record is malformed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MaskArgs, verbose: bool) -> anyhow::Result<()> {
    let config = RunConfig {
        evidence: args.input.evidence,
        action: ActionMode::Mask,
        mask_style: args.mask_style,
        ..RunConfig::default()
    };
    config.validate()?;

    let ploidy = PloidySet::load(&args.input.haploids)?;
    if verbose {
        eprintln!("Loaded {} haploid sample names", ploidy.len());
    }

    let output = args.input.output_path(MODIFIED_VCF_SUFFIX);
    validate_output_path(&args.input.input, &output)?;

    let mut reader = open_input(&args.input.input)?;
    let mut sink = VcfWriter::new(open_output(&output)?);

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
        eprintln!("Modified VCF file saved as {}", output.display());
    }

    Ok(())
}
