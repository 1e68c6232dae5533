mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use wikipage::Wikipedia;

use crate::cli::{Cli, Commands};
use crate::commands::links::Listing;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let wiki = Wikipedia::new(cli.client.into_config())?;

    match cli.command {
        Commands::Summary(args) => commands::text::summary(&wiki, args),
        Commands::Text(args) => commands::text::full_text(&wiki, args),
        Commands::Sections(args) => commands::text::sections(&wiki, args),
        Commands::Links(args) => commands::links::run(&wiki, args, Listing::Links),
        Commands::Backlinks(args) => commands::links::run(&wiki, args, Listing::Backlinks),
        Commands::Categories(args) => commands::links::run(&wiki, args, Listing::Categories),
        Commands::Members(args) => commands::links::run(&wiki, args, Listing::Members),
        Commands::Langlinks(args) => commands::links::langlinks(&wiki, args),
        Commands::Info(args) => commands::info::run(&wiki, args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
