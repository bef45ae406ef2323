mod gallery;
mod ui;

pub use gallery::GalleryState;
pub use ui::UIState;
