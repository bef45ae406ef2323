mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbox_core::config::SiteConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightbox", about = "Image viewer and path repair tool for static sites")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every site-relative image on a page and repair broken paths
    Probe(commands::probe::ProbeArgs),
    /// List a page's images and whether they open the viewer
    Inspect(commands::inspect::InspectArgs),
    /// Record a visit and print the visit count
    Visits(commands::visits::VisitsArgs),
    /// Print or save the default site config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.config {
        Some(ref path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SiteConfig::default(),
    };

    match &cli.command {
        Commands::Probe(args) => commands::probe::run(args, &config),
        Commands::Inspect(args) => commands::inspect::run(args, &config),
        Commands::Visits(args) => commands::visits::run(args, &config),
        Commands::Config(args) => commands::config::run(args),
    }
}
