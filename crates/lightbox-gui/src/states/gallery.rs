use std::collections::HashMap;
use std::path::PathBuf;

use lightbox_core::page::{ImageId, Page};

/// The open page and the textures decoded for its images.
#[derive(Default)]
pub struct GalleryState {
    pub file_path: Option<PathBuf>,
    pub page: Option<Page>,
    pub textures: HashMap<ImageId, egui::TextureHandle>,
    /// Image shown in the lightbox, if open.
    pub open_image: Option<ImageId>,
}

impl GalleryState {
    pub fn texture(&self, id: ImageId) -> Option<&egui::TextureHandle> {
        self.textures.get(&id)
    }
}
