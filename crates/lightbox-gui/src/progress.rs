use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use lightbox_core::page::ImageId;
use lightbox_core::probe::{ProbeReporter, Resolution};

use crate::messages::WorkerResult;

/// Probe reporter that sends updates over an mpsc channel to the UI thread.
pub struct ChannelProbeReporter {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    total: AtomicUsize,
    done: AtomicUsize,
}

impl ChannelProbeReporter {
    pub fn new(tx: mpsc::Sender<WorkerResult>, ctx: egui::Context) -> Self {
        Self {
            tx,
            ctx,
            total: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        }
    }

    fn send_progress(&self, items_done: usize) {
        let _ = self.tx.send(WorkerResult::Progress {
            items_done,
            items_total: self.total.load(Ordering::Relaxed),
        });
        self.ctx.request_repaint();
    }
}

impl ProbeReporter for ChannelProbeReporter {
    fn begin(&self, total_images: usize) {
        self.total.store(total_images, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        self.send_progress(0);
    }

    fn image_resolved(&self, _id: ImageId, _resolution: &Resolution) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.send_progress(done);
    }
}
