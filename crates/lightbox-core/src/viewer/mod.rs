//! The lightbox: a single modal overlay showing one image with zoom and pan.

mod controller;
mod event;
mod exempt;
mod image_ref;
mod scroll;
mod state;

pub use controller::ViewerController;
pub use event::{Key, ViewerEvent};
pub use exempt::{Exemption, ExemptionRules};
pub use image_ref::ImageRef;
pub use scroll::{NoScrollLock, ScrollLock};
pub use state::ViewerState;
