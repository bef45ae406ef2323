use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use lightbox_core::page::{ImageId, Page};
use lightbox_core::probe::{FsProbe, PathResolver};
use lightbox_core::visits::{record_visit, MemoryStore, TomlFileStore};
use rayon::prelude::*;

use crate::convert::load_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::progress::ChannelProbeReporter;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("lightbox-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::OpenPage { path, resolver } => {
                handle_open_page(&path, &resolver, &tx, &ctx);
            }
            WorkerCommand::ImportImage { path } => {
                handle_import_image(&path, &tx, &ctx);
            }
            WorkerCommand::RecordVisit { store } => {
                handle_record_visit(store.as_deref(), &tx, &ctx);
            }
        }
    }
}

/// The page's directory is served as the site root.
fn site_location(path: &Path) -> (PathBuf, String) {
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (root, format!("/{name}"))
}

fn handle_open_page(
    path: &Path,
    resolver: &PathResolver,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();

    let html = match std::fs::read_to_string(path) {
        Ok(html) => html,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to read {}: {e}", path.display()));
            return;
        }
    };

    let (root, page_path) = site_location(path);
    let mut page = match Page::from_html(page_path, &html) {
        Ok(page) => page,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to scan {}: {e}", path.display()));
            return;
        }
    };

    let probe = FsProbe::new(root, page.path());
    let reporter = ChannelProbeReporter::new(tx.clone(), ctx.clone());
    let results = resolver.resolve_page_reported(&mut page, &probe, &reporter);

    let to_decode: Vec<(ImageId, String)> = page
        .images()
        .iter()
        .filter(|img| !img.broken)
        .map(|img| (img.id, img.src.clone()))
        .collect();

    send(tx, ctx, WorkerResult::PageLoaded {
        path: path.to_path_buf(),
        page,
        results,
        elapsed: start.elapsed(),
    });

    to_decode.par_iter().for_each(|(id, src)| {
        let file = match probe.resolve_path(src) {
            Ok(file) => file,
            Err(e) => {
                send_log(tx, ctx, format!("Not displaying {src}: {e}"));
                return;
            }
        };
        match load_color_image(&file) {
            Ok(image) => send(tx, ctx, WorkerResult::ImageDecoded { id: *id, image }),
            Err(e) => send_log(tx, ctx, format!("Failed to decode {src}: {e}")),
        }
    });
}

fn handle_import_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match load_color_image(path) {
        Ok(image) => send(tx, ctx, WorkerResult::ImageImported {
            path: path.to_path_buf(),
            image,
        }),
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

fn handle_record_visit(
    store: Option<&Path>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = match store {
        Some(path) => TomlFileStore::open(path).and_then(|mut store| record_visit(&mut store)),
        None => record_visit(&mut MemoryStore::new()),
    };
    match result {
        Ok(count) => send(tx, ctx, WorkerResult::VisitRecorded { count }),
        Err(e) => send_error(tx, ctx, format!("Failed to record visit: {e}")),
    }
}
