mod app;
mod convert;
mod messages;
mod panels;
mod progress;
mod scroll;
mod states;
mod worker;

use std::path::Path;

use lightbox_core::config::SiteConfig;

/// Picked up from the working directory when present.
const CONFIG_FILE: &str = "lightbox.toml";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config(Path::new(CONFIG_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Lightbox"),
        ..Default::default()
    };

    eframe::run_native(
        "Lightbox",
        options,
        Box::new(move |cc| Ok(Box::new(app::LightboxApp::new(&cc.egui_ctx, config)?))),
    )
}

fn load_config(path: &Path) -> SiteConfig {
    if !path.exists() {
        return SiteConfig::default();
    }
    match SiteConfig::load(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring {}: {e}", path.display());
            SiteConfig::default()
        }
    }
}
