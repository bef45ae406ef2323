#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use lightbox_core::error::ProbeError;
use lightbox_core::probe::ImageProbe;
use lightbox_core::viewer::{ExemptionRules, ImageRef, ScrollLock, ViewerController};
use lightbox_core::config::ViewerConfig;

/// Counts scroll suppress/restore calls.
#[derive(Default)]
pub struct RecordingScrollLock {
    pub suppressed: usize,
    pub restored: usize,
}

impl ScrollLock for RecordingScrollLock {
    fn suppress(&mut self) {
        self.suppressed += 1;
    }

    fn restore(&mut self) {
        self.restored += 1;
    }
}

pub fn viewer() -> ViewerController<RecordingScrollLock> {
    ViewerController::new(
        ViewerConfig::default(),
        ExemptionRules::default(),
        RecordingScrollLock::default(),
    )
}

pub fn image_ref(src: &str) -> ImageRef {
    ImageRef::new(src, format!("alt for {src}"), format!("caption for {src}")).unwrap()
}

/// Probe that succeeds only for a fixed set of URLs and records every call.
pub struct ScriptedProbe {
    loads: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn loading(urls: &[&str]) -> Self {
        Self {
            loads: urls.iter().map(|u| u.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageProbe for ScriptedProbe {
    fn probe(&self, url: &str) -> Result<(), ProbeError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.loads.contains(url) {
            Ok(())
        } else {
            Err(ProbeError::NotFound(url.to_string()))
        }
    }
}

/// Write a tiny valid PNG, creating parent directories.
pub fn write_png(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::new(2, 2).save(path).unwrap();
}
