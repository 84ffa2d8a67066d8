use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 magtidy version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   FASTA statistics and metagenome bin curation";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report descriptive statistics for each FASTA file given
    #[command(arg_required_else_help = true)]
    Stats {
        /// the input .fasta files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Collect per-sample genome bins into one relabeled output directory
    #[command(arg_required_else_help = true)]
    Curate {
        /// the root directory, one subdirectory per library
        #[arg(long)]
        input: PathBuf,

        /// tab-separated table mapping library names to culture names
        #[arg(long)]
        mapping: PathBuf,

        /// the combined output directory
        #[arg(short, default_value = "curated")]
        output: PathBuf,
    },
}
