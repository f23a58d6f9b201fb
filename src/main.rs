use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod genotype;
mod parsing;
mod processing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("hapmask=debug,info")
    } else {
        EnvFilter::new("hapmask=warn")
    };

    // stdout may carry the VCF, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Mask(args) => {
            cli::mask::run(args, cli.verbose)?;
        }
        cli::Commands::Report(args) => {
            cli::report::run(args, cli.verbose)?;
        }
    }

    Ok(())
}
