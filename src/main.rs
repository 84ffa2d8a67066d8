extern crate env_logger;
#[macro_use]
extern crate log;

use std::io::stdout;

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod curate;
mod error;
mod fasta;
mod mapping;
mod quality;
mod stats;

use cli::{Cli, Commands};
use fasta::FastaFile;
use stats::Statistics;

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Stats { files } => {
            let mut out = stdout();

            // each file is processed to completion with its own fresh counters
            for path in files {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("could not read {}", path.display()))?;

                let fasta = FastaFile::parse(&text);
                Statistics::compute(&fasta).write_report(&mut out)?;
            }
        }
        Commands::Curate {
            input,
            mapping,
            output,
        } => {
            curate::curate(input, mapping, output)?;

            info!("Completed successfully.")
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
