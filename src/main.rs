use clap::Parser;

mod cli;
mod identify;
mod manifest;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Identify {
            screenshot,
            references,
            config,
            rows,
            canonical_height,
            json,
            annotate,
        } => {
            let overrides = identify::Overrides {
                rows,
                canonical_height,
                json,
                annotate,
            };
            let config = identify::build_config(config.as_deref(), overrides)?;
            let results = identify::identify_board(&screenshot, &references, config)?;
            identify::print_results(&results);
        }

        Commands::Manifest {
            catalog,
            references,
            ext,
        } => {
            let missing = manifest::missing_references(&catalog, &references, &ext)?;
            manifest::print_missing(&missing);
        }
    }

    Ok(())
}
