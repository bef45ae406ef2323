use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::consts::{DEFAULT_IMAGE_PREFIX, DEFAULT_PROJECT_SUBPATH};
use crate::page::{ImageId, Page, PageImage};

use super::{ImageProbe, NoOpReporter, ProbeReporter, Resolution};

/// Ordered path rewrites for one failing image, tried first to last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathCandidateList(Vec<String>);

impl PathCandidateList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl IntoIterator for PathCandidateList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Directory part of a URL path, keeping the trailing slash.
///
/// `/site/docs/index.html` becomes `/site/docs/`. A path without any slash
/// is returned unchanged.
pub fn page_directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => path,
    }
}

#[derive(Clone, Debug)]
pub struct PathResolver {
    image_prefix: String,
    project_subpath: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_PREFIX, DEFAULT_PROJECT_SUBPATH)
    }
}

impl PathResolver {
    pub fn new(image_prefix: impl Into<String>, project_subpath: impl Into<String>) -> Self {
        Self {
            image_prefix: image_prefix.into(),
            project_subpath: project_subpath.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.image_prefix.clone(), config.project_subpath.clone())
    }

    /// Whether `src` is site-relative and should be probed.
    pub fn needs_probe(&self, src: &str) -> bool {
        src.starts_with(&self.image_prefix)
    }

    /// Path variations for `src` on the page at `page_path`, in the order
    /// they are tried.
    pub fn candidates(&self, src: &str, page_path: &str) -> PathCandidateList {
        let subpath = if self.project_subpath.ends_with('/') {
            self.project_subpath.clone()
        } else {
            format!("{}/", self.project_subpath)
        };
        PathCandidateList(vec![
            format!("./{src}"),
            format!("/{src}"),
            format!("{subpath}{src}"),
            format!("{}{src}", page_directory(page_path)),
        ])
    }

    /// Probe the image's current source and, if that fails, each candidate
    /// in turn. Stops at the first success.
    pub fn resolve<P: ImageProbe + ?Sized>(
        &self,
        image: &PageImage,
        page_path: &str,
        probe: &P,
    ) -> Resolution {
        if !self.needs_probe(&image.src) {
            return Resolution::Skipped;
        }

        debug!(src = %image.src, "checking image");
        match probe.probe(&image.src) {
            Ok(()) => {
                debug!(src = %image.src, "image loads correctly");
                return Resolution::Loaded;
            }
            Err(e) => debug!(src = %image.src, "image failed to load: {e}"),
        }

        let mut tried = Vec::new();
        for candidate in self.candidates(&image.src, page_path) {
            match probe.probe(&candidate) {
                Ok(()) => {
                    info!(src = %image.src, found = %candidate, "found working path");
                    return Resolution::Repaired {
                        src: candidate,
                        attempts: tried.len() + 1,
                    };
                }
                Err(e) => {
                    debug!(variation = %candidate, "variation failed: {e}");
                    tried.push(candidate);
                }
            }
        }

        warn!(src = %image.src, "all path variations failed");
        Resolution::Broken { tried }
    }

    /// Resolve every image on the page and apply the outcomes.
    pub fn resolve_page<P: ImageProbe + ?Sized>(
        &self,
        page: &mut Page,
        probe: &P,
    ) -> Vec<(ImageId, Resolution)> {
        self.resolve_page_reported(page, probe, &NoOpReporter)
    }

    /// Like [`resolve_page`](Self::resolve_page), reporting each image as it
    /// completes. Images are resolved in parallel and may complete in any
    /// order; the returned list is in document order.
    pub fn resolve_page_reported<P: ImageProbe + ?Sized>(
        &self,
        page: &mut Page,
        probe: &P,
        reporter: &dyn ProbeReporter,
    ) -> Vec<(ImageId, Resolution)> {
        let page_path = page.path().to_string();
        let images: Vec<PageImage> = page.images().into_iter().cloned().collect();
        reporter.begin(images.len());

        let results: Vec<(ImageId, Resolution)> = images
            .par_iter()
            .map(|image| {
                let resolution = self.resolve(image, &page_path, probe);
                reporter.image_resolved(image.id, &resolution);
                (image.id, resolution)
            })
            .collect();

        for (id, resolution) in &results {
            if let Some(image) = page.image_mut(*id) {
                resolution.apply(image);
            }
        }
        reporter.finish();
        results
    }
}
