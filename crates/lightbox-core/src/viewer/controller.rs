use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::config::ViewerConfig;
use crate::geometry::Point;
use crate::page::{ImageId, PageNode, SubtreeObserver};

use super::{ExemptionRules, ImageRef, Key, NoScrollLock, ScrollLock, ViewerEvent, ViewerState};

/// Owns the viewer state and the set of images that open it when clicked.
///
/// All mutation goes through the operations below so that scale stays within
/// the configured bounds and pan is zero whenever scale is at or below 1.
pub struct ViewerController<S: ScrollLock = NoScrollLock> {
    state: ViewerState,
    config: ViewerConfig,
    exemptions: ExemptionRules,
    scroll: S,
    clickable: HashMap<ImageId, ImageRef>,
}

impl Default for ViewerController<NoScrollLock> {
    fn default() -> Self {
        Self::new(ViewerConfig::default(), ExemptionRules::default(), NoScrollLock)
    }
}

impl<S: ScrollLock> ViewerController<S> {
    pub fn new(config: ViewerConfig, exemptions: ExemptionRules, scroll: S) -> Self {
        Self {
            state: ViewerState::default(),
            config,
            exemptions,
            scroll,
            clickable: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn exemptions(&self) -> &ExemptionRules {
        &self.exemptions
    }

    pub fn scroll_lock(&self) -> &S {
        &self.scroll
    }

    pub fn scroll_lock_mut(&mut self) -> &mut S {
        &mut self.scroll
    }

    /// Show `image` with zoom reset. Reopening replaces the current image.
    pub fn open(&mut self, image: ImageRef) {
        let was_open = self.state.is_open;
        debug!(src = image.source_url(), "opening viewer");
        self.state = ViewerState {
            is_open: true,
            image: Some(image),
            opened_at: Some(Instant::now()),
            ..ViewerState::default()
        };
        if !was_open {
            self.scroll.suppress();
        }
    }

    /// Reset to defaults and restore scroll. No-op when already closed.
    pub fn close(&mut self) {
        if !self.state.is_open {
            return;
        }
        debug!("closing viewer");
        self.state = ViewerState::default();
        self.scroll.restore();
    }

    /// One discrete wheel step. Negative `delta` zooms in, positive zooms out.
    pub fn zoom(&mut self, delta: f32, pointer: Point) {
        if delta < 0.0 {
            self.zoom_by(self.config.zoom_in_factor, pointer);
        } else if delta > 0.0 {
            self.zoom_by(self.config.zoom_out_factor, pointer);
        }
    }

    /// Multiply scale by `factor`, keeping the point under `pointer` fixed.
    pub fn zoom_by(&mut self, factor: f32, pointer: Point) {
        if !self.state.is_open || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_scale = self.state.scale;
        let new_scale = (old_scale * factor).clamp(self.config.min_scale, self.config.max_scale);

        if new_scale <= 1.0 {
            self.state.scale = new_scale;
            self.state.pan = Point::ZERO;
            self.state.is_panning = false;
            return;
        }

        let ratio = new_scale / old_scale;
        self.state.pan = pointer - (pointer - self.state.pan) * ratio;
        self.state.scale = new_scale;
    }

    /// Start a drag. Only possible while zoomed past 1:1.
    pub fn begin_pan(&mut self, pointer: Point) -> bool {
        if !self.state.is_open || !self.state.is_zoomed() {
            return false;
        }
        self.state.is_panning = true;
        self.state.pan_anchor = pointer - self.state.pan;
        true
    }

    /// Follow the pointer. Pan is not bounded by the image extent.
    pub fn continue_pan(&mut self, pointer: Point) {
        if self.state.is_panning {
            self.state.pan = pointer - self.state.pan_anchor;
        }
    }

    pub fn end_pan(&mut self) {
        self.state.is_panning = false;
    }

    pub fn reset_zoom(&mut self) {
        self.state.scale = 1.0;
        self.state.pan = Point::ZERO;
        self.state.is_panning = false;
    }

    /// Whether the usage hint should still be shown at `now`.
    pub fn instructions_visible_at(&self, now: Instant) -> bool {
        match (self.state.is_open, self.state.opened_at) {
            (true, Some(opened)) => {
                now.saturating_duration_since(opened) < self.config.instructions_duration()
            }
            _ => false,
        }
    }

    pub fn handle(&mut self, event: ViewerEvent) {
        if !self.state.is_open {
            return;
        }
        match event {
            ViewerEvent::CloseButton | ViewerEvent::Backdrop | ViewerEvent::Key(Key::Escape) => {
                self.close()
            }
            ViewerEvent::ImageClick | ViewerEvent::Key(Key::Other) => {}
            ViewerEvent::Wheel { delta, pointer } => self.zoom(delta, pointer),
            ViewerEvent::PointerDown(pointer) => {
                self.begin_pan(pointer);
            }
            ViewerEvent::PointerMove(pointer) => self.continue_pan(pointer),
            ViewerEvent::PointerUp => self.end_pan(),
            ViewerEvent::DoubleClick => self.reset_zoom(),
        }
    }

    /// Make every non-exempt image in `node` clickable. Returns how many were
    /// registered. Re-attaching an image refreshes its reference.
    pub fn attach(&mut self, node: &PageNode) -> usize {
        let mut attached = 0;
        for image in node.images() {
            if let Some(reason) = self.exemptions.exemption(image) {
                debug!(id = %image.id, src = %image.src, %reason, "image exempt from viewer");
                self.clickable.remove(&image.id);
                continue;
            }
            match image.image_ref() {
                Ok(image_ref) => {
                    self.clickable.insert(image.id, image_ref);
                    attached += 1;
                }
                Err(e) => debug!(id = %image.id, "not attaching image: {e}"),
            }
        }
        attached
    }

    pub fn is_clickable(&self, id: ImageId) -> bool {
        self.clickable.contains_key(&id)
    }

    pub fn clickable_count(&self) -> usize {
        self.clickable.len()
    }

    /// Open the viewer on a registered image. Exempt and unknown images are
    /// ignored and `false` is returned.
    pub fn click(&mut self, id: ImageId) -> bool {
        match self.clickable.get(&id).cloned() {
            Some(image_ref) => {
                self.open(image_ref);
                true
            }
            None => false,
        }
    }
}

impl<S: ScrollLock> SubtreeObserver for ViewerController<S> {
    fn subtree_inserted(&mut self, node: &PageNode) {
        let attached = self.attach(node);
        debug!(attached, "attached inserted images");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_ignored_while_closed() {
        let mut viewer = ViewerController::default();
        viewer.zoom(-1.0, Point::new(10.0, 10.0));
        assert_eq!(viewer.state().scale(), 1.0);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut viewer = ViewerController::default();
        viewer.open(ImageRef::new("images/a.png", "", "").unwrap());
        viewer.zoom(0.0, Point::new(10.0, 10.0));
        assert_eq!(viewer.state().scale(), 1.0);
    }
}
