use std::path::Path;

use anyhow::Context;
use lightbox_core::config::SiteConfig;
use lightbox_core::probe::PathResolver;

use crate::app::LightboxApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Page...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_page(app);
                }

                if ui.button("Add Image...").clicked() {
                    ui.close();
                    add_image(app);
                }

                ui.separator();

                if ui.button("Load Site Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Save Site Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_page(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_page(app: &mut LightboxApp) {
    if app.ui_state.is_busy() {
        return;
    }
    app.ui_state.start("Probing images");

    let cmd_tx = app.cmd_tx.clone();
    let result_tx = app.result_tx.clone();
    let resolver = PathResolver::from_config(&app.config);
    std::thread::spawn(move || {
        match rfd::FileDialog::new()
            .add_filter("HTML pages", &["html", "htm"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            Some(path) => {
                let _ = cmd_tx.send(WorkerCommand::OpenPage { path, resolver });
            }
            None => {
                let _ = result_tx.send(WorkerResult::Cancelled);
            }
        }
    });
}

fn add_image(app: &mut LightboxApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ImportImage { path });
        }
    });
}

fn import_config(app: &mut LightboxApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match read_config(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("{e:#}"),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn read_config(path: &Path) -> anyhow::Result<SiteConfig> {
    SiteConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

fn export_config(app: &mut LightboxApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("lightbox.toml")
            .save_file()
        else {
            return;
        };
        let written = config
            .to_toml()
            .context("Failed to serialize config")
            .and_then(|content| {
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))
            });
        let result = match written {
            Ok(()) => WorkerResult::Log {
                message: format!("Saved config: {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("{e:#}"),
            },
        };
        let _ = result_tx.send(result);
    });
}
