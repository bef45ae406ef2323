use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lightbox_core::config::SiteConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default SiteConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = SiteConfig {
        visit_store: Some(PathBuf::from("visits.toml")),
        ..SiteConfig::default()
    };
    let toml_str = config.to_toml()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
