use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lightbox_core::config::SiteConfig;
use lightbox_core::visits::{record_visit, visit_count, TomlFileStore};

#[derive(Args)]
pub struct VisitsArgs {
    /// Store file (TOML); overrides `visit_store` from the config
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Print the current count without recording a visit
    #[arg(long)]
    pub peek: bool,
}

pub fn run(args: &VisitsArgs, config: &SiteConfig) -> Result<()> {
    let path = args
        .store
        .clone()
        .or_else(|| config.visit_store.clone())
        .unwrap_or_else(|| PathBuf::from("visits.toml"));

    let mut store = TomlFileStore::open(&path)
        .with_context(|| format!("Failed to open visit store {}", path.display()))?;

    let count = if args.peek {
        visit_count(&store)
    } else {
        record_visit(&mut store)
            .with_context(|| format!("Failed to update visit store {}", path.display()))?
    };

    println!("Visits: {count}");
    Ok(())
}
