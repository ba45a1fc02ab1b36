//! appxprep CLI - Windows packaging preparation for cordova apps

use anyhow::Result;
use appxprep::ManifestError;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e.downcast_ref::<ManifestError>().and_then(|m| m.help()) {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("appxprep=debug")
    } else {
        EnvFilter::new("appxprep=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Prepare(args) => commands::prepare::execute(args, color),
        Commands::BuildConfig(args) => commands::build_config::execute(args),
    }
}
