use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weekly-bot")]
#[command(about = "Identify item icons on a weekly board screenshot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log per-region detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate and identify every icon on a board screenshot
    Identify {
        /// Board screenshot
        #[arg(required = true)]
        screenshot: PathBuf,

        /// Directory of `<label>_<tier>.<ext>` reference icons
        #[arg(short, long)]
        references: PathBuf,

        /// JSON pipeline configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of tier rows on the board
        #[arg(long)]
        rows: Option<usize>,

        /// Height icons and crops are scaled to before matching
        #[arg(long)]
        canonical_height: Option<i32>,

        /// Write results as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the screenshot with region boxes and labels drawn on it
        #[arg(long)]
        annotate: Option<PathBuf>,
    },

    /// List reference icons from a catalog export that are not on disk yet
    Manifest {
        /// Catalog export: JSON array of `{name, tier, img_url}`
        #[arg(required = true)]
        catalog: PathBuf,

        /// Reference icon directory to check
        #[arg(short, long)]
        references: PathBuf,

        /// Extension the icons are stored with
        #[arg(long, default_value = "png")]
        ext: String,
    },
}
