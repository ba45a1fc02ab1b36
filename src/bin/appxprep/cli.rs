//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// appxprep - Reconcile Windows appx manifests with a cordova app descriptor
#[derive(Parser)]
#[command(name = "appxprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update the appx manifests, project SDK versions and images
    Prepare(PrepareArgs),

    /// Generate the signing and locale projitems
    BuildConfig(BuildConfigArgs),
}

#[derive(Args)]
pub struct PrepareArgs {
    /// Platform root (defaults to current directory)
    #[arg(long, env = "APPXPREP_ROOT")]
    pub root: Option<PathBuf>,

    /// App descriptor (defaults to <root>/config.xml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not write installed SDK versions into the Windows 10 project
    #[arg(long)]
    pub skip_sdk: bool,

    /// Publisher id for the package identity
    #[arg(long)]
    pub publisher_id: Option<String>,
}

#[derive(Args)]
pub struct BuildConfigArgs {
    /// Platform root (defaults to current directory)
    #[arg(long, env = "APPXPREP_ROOT")]
    pub root: Option<PathBuf>,

    /// App descriptor (defaults to <root>/config.xml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Build options file in the cordova build.json layout
    #[arg(long)]
    pub build_json: Option<PathBuf>,

    /// Generate the release configuration
    #[arg(short, long)]
    pub release: bool,

    /// Signing certificate (.pfx)
    #[arg(long)]
    pub certificate: Option<String>,

    /// Signing certificate thumbprint
    #[arg(long)]
    pub thumbprint: Option<String>,
}
