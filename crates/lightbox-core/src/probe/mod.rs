//! Image path probing and the fallback chain that repairs broken paths.

mod fs;
mod resolver;

pub use fs::FsProbe;
pub use resolver::{page_directory, PathCandidateList, PathResolver};

use crate::consts::BROKEN_ALT_PREFIX;
use crate::error::ProbeError;
use crate::page::{ImageId, PageImage};

/// One background load of an image URL, used only to test reachability.
///
/// Implementations must be shareable across threads: different images are
/// probed in parallel, while the candidates for one image are probed in
/// sequence.
pub trait ImageProbe: Sync {
    fn probe(&self, url: &str) -> Result<(), ProbeError>;
}

/// Outcome of resolving one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The original source loads.
    Loaded,
    /// A path variation loads. `attempts` counts candidates tried, including
    /// the successful one.
    Repaired { src: String, attempts: usize },
    /// Every variation failed.
    Broken { tried: Vec<String> },
    /// The source is not site-relative and was left alone.
    Skipped,
}

impl Resolution {
    /// Write the outcome back to the image: a repaired source, or the broken
    /// marker plus the alt-text prefix.
    pub fn apply(&self, image: &mut PageImage) {
        match self {
            Self::Repaired { src, .. } => image.src = src.clone(),
            Self::Broken { .. } => {
                image.broken = true;
                if !image.alt.starts_with(BROKEN_ALT_PREFIX) {
                    image.alt = format!("{BROKEN_ALT_PREFIX}{}", image.alt);
                }
            }
            Self::Loaded | Self::Skipped => {}
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Broken { .. })
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => write!(f, "Loaded"),
            Self::Repaired { src, .. } => write!(f, "Repaired -> {src}"),
            Self::Broken { tried } => write!(f, "Broken ({} variations failed)", tried.len()),
            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

/// Progress callbacks for [`PathResolver::resolve_page_reported`].
///
/// Called from worker threads. All methods default to no-ops.
pub trait ProbeReporter: Send + Sync {
    fn begin(&self, _total_images: usize) {}

    fn image_resolved(&self, _id: ImageId, _resolution: &Resolution) {}

    fn finish(&self) {}
}

pub(crate) struct NoOpReporter;
impl ProbeReporter for NoOpReporter {}
