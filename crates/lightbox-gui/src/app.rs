use std::path::Path;
use std::sync::mpsc;

use lightbox_core::config::SiteConfig;
use lightbox_core::page::{ImageId, PageImage, PageNode, Page};
use lightbox_core::probe::Resolution;
use lightbox_core::viewer::ViewerController;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::scroll::GuiScrollLock;
use crate::states::{GalleryState, UIState};
use crate::worker;

pub struct LightboxApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: SiteConfig,
    pub ui_state: UIState,
    pub gallery: GalleryState,
    pub viewer: ViewerController<GuiScrollLock>,
    pub show_about: bool,
}

impl LightboxApp {
    pub fn new(ctx: &egui::Context, config: SiteConfig) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;

        let app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            viewer: new_viewer(&config),
            config,
            ui_state: UIState::default(),
            gallery: GalleryState::default(),
            show_about: false,
        };
        app.send_command(WorkerCommand::RecordVisit {
            store: app.config.visit_store.clone(),
        });
        Ok(app)
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::PageLoaded {
                    path,
                    page,
                    results,
                    elapsed,
                } => {
                    self.ui_state.finish();
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}, {})",
                        path.display(),
                        summarize(&results),
                        format_duration(elapsed)
                    ));
                    self.show_page(path, page);
                }
                WorkerResult::ImageDecoded { id, image } => {
                    self.upload_texture(ctx, id, image);
                }
                WorkerResult::ImageImported { path, image } => {
                    self.add_image(ctx, &path, image);
                }
                WorkerResult::VisitRecorded { count } => {
                    self.ui_state.visit_count = Some(count);
                }
                WorkerResult::ConfigImported { config } => {
                    self.ui_state.add_log("Site config loaded; reopen the page to apply".into());
                    self.viewer.close();
                    self.viewer = new_viewer(&config);
                    if let Some(ref page) = self.gallery.page {
                        self.viewer.attach(page.root());
                    }
                    self.config = config;
                }
                WorkerResult::Cancelled => {
                    self.ui_state.finish();
                }
                WorkerResult::Progress {
                    items_done,
                    items_total,
                } => {
                    self.ui_state.progress_items_done = Some(items_done);
                    self.ui_state.progress_items_total = Some(items_total);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.finish();
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Replace the gallery with a freshly loaded page and register its images
    /// with a new viewer.
    fn show_page(&mut self, path: std::path::PathBuf, page: Page) {
        self.viewer.close();
        self.viewer = new_viewer(&self.config);
        let attached = self.viewer.attach(page.root());
        self.ui_state.add_log(format!(
            "{} of {} images open the viewer",
            attached,
            page.images().len()
        ));

        self.gallery.textures.clear();
        self.gallery.open_image = None;
        self.gallery.file_path = Some(path);
        self.gallery.page = Some(page);
    }

    /// Append an imported image to the page. The viewer is notified through
    /// the insertion and makes it clickable.
    fn add_image(&mut self, ctx: &egui::Context, path: &Path, image: egui::ColorImage) {
        let alt = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let node = PageNode::Image(PageImage::new(path.display().to_string(), alt));

        let page = self.gallery.page.get_or_insert_with(|| Page::new("/"));
        let ids = page.insert(node, &mut self.viewer);
        if let Some(&id) = ids.first() {
            self.ui_state.add_log(format!("Added {} as image {id}", path.display()));
            self.upload_texture(ctx, id, image);
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context, id: ImageId, image: egui::ColorImage) {
        let texture = ctx.load_texture(format!("image-{}", id.0), image, egui::TextureOptions::LINEAR);
        self.gallery.textures.insert(id, texture);
    }

    /// Open the lightbox on a gallery image. Exempt images are ignored.
    pub fn open_image(&mut self, id: ImageId) {
        if self.viewer.click(id) {
            self.gallery.open_image = Some(id);
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for LightboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::gallery::show(ctx, self);
        panels::lightbox::show(ctx, self);

        if !self.viewer.state().is_open() {
            self.gallery.open_image = None;
        }

        if self.show_about {
            egui::Window::new("About Lightbox")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Lightbox");
                        ui.label("Image viewer with path repair");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn new_viewer(config: &SiteConfig) -> ViewerController<GuiScrollLock> {
    ViewerController::new(
        config.viewer.clone(),
        config.exemptions.clone(),
        GuiScrollLock::default(),
    )
}

fn summarize(results: &[(ImageId, Resolution)]) -> String {
    let repaired = results
        .iter()
        .filter(|(_, r)| matches!(r, Resolution::Repaired { .. }))
        .count();
    let broken = results.iter().filter(|(_, r)| r.is_broken()).count();
    format!("{} images, {repaired} repaired, {broken} broken", results.len())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else {
        format!("{secs:.1}s")
    }
}
