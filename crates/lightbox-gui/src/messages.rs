use std::path::PathBuf;
use std::time::Duration;

use lightbox_core::config::SiteConfig;
use lightbox_core::page::{ImageId, Page};
use lightbox_core::probe::{PathResolver, Resolution};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read an HTML page, repair its image paths and decode every image.
    OpenPage { path: PathBuf, resolver: PathResolver },

    /// Decode a standalone image file to be appended to the page.
    ImportImage { path: PathBuf },

    /// Increment the visit counter. `None` counts in memory only.
    RecordVisit { store: Option<PathBuf> },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// Page scanned and probed. Image textures follow as `ImageDecoded`.
    PageLoaded {
        path: PathBuf,
        page: Page,
        results: Vec<(ImageId, Resolution)>,
        elapsed: Duration,
    },
    ImageDecoded {
        id: ImageId,
        image: egui::ColorImage,
    },
    ImageImported {
        path: PathBuf,
        image: egui::ColorImage,
    },
    VisitRecorded {
        count: u64,
    },
    ConfigImported {
        config: SiteConfig,
    },
    /// A file dialog was dismissed after the UI marked itself busy.
    Cancelled,
    /// Probe progress while a page is loading.
    Progress {
        items_done: usize,
        items_total: usize,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
