use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lightbox_core::config::SiteConfig;
use lightbox_core::page::Page;

use crate::summary;

#[derive(Args)]
pub struct InspectArgs {
    /// HTML page to inspect
    pub page: PathBuf,
}

pub fn run(args: &InspectArgs, config: &SiteConfig) -> Result<()> {
    let html = std::fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read {}", args.page.display()))?;
    let page_path = format!("/{}", args.page.file_name().unwrap_or_default().to_string_lossy());
    let page = Page::from_html(page_path, &html)
        .with_context(|| format!("Failed to scan {}", args.page.display()))?;

    summary::print_image_table(&page, &config.exemptions);
    Ok(())
}
