use std::time::Instant;

use crate::geometry::Point;

use super::ImageRef;

/// Viewer state. Read-only outside the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub(super) is_open: bool,
    pub(super) scale: f32,
    pub(super) pan: Point,
    pub(super) is_panning: bool,
    pub(super) pan_anchor: Point,
    pub(super) image: Option<ImageRef>,
    pub(super) opened_at: Option<Instant>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            is_open: false,
            scale: 1.0,
            pan: Point::ZERO,
            is_panning: false,
            pan_anchor: Point::ZERO,
            image: None,
            opened_at: None,
        }
    }
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    /// Offset between the pointer and the pan origin captured when panning began.
    pub fn pan_anchor(&self) -> Point {
        self.pan_anchor
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Zoomed past 1:1. Only affects the cursor affordance.
    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    pub fn opened_at(&self) -> Option<Instant> {
        self.opened_at
    }
}
