use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ProbeError;

use super::{page_directory, ImageProbe};

/// Probes URLs against a site checked out on disk.
///
/// The site root stands in for the server's `/`. Relative URLs resolve
/// against the directory of the page being probed.
#[derive(Clone, Debug)]
pub struct FsProbe {
    root: PathBuf,
    page_path: String,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>, page_path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            page_path: page_path.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a URL to the file it would be served from.
    pub fn resolve_path(&self, url: &str) -> Result<PathBuf, ProbeError> {
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        if path.is_empty() || path.contains("://") || path.starts_with("//") || path.starts_with("data:")
        {
            return Err(ProbeError::Unsupported(url.to_string()));
        }

        let joined = if path.starts_with('/') {
            path.to_string()
        } else {
            let base = match page_directory(&self.page_path) {
                dir if dir.ends_with('/') => dir,
                _ => "/",
            };
            format!("{base}{path}")
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(ProbeError::OutsideRoot(url.to_string()));
                    }
                }
                s => segments.push(s),
            }
        }

        Ok(segments
            .iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }
}

impl ImageProbe for FsProbe {
    fn probe(&self, url: &str) -> Result<(), ProbeError> {
        let path = self.resolve_path(url)?;
        if !path.is_file() {
            return Err(ProbeError::NotFound(path.display().to_string()));
        }

        let reader = image::ImageReader::open(&path)?.with_guessed_format()?;
        let (width, height) = reader.into_dimensions().map_err(|e| ProbeError::Undecodable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!(url, width, height, "probe succeeded");
        Ok(())
    }
}
