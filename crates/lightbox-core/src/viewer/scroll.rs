/// Host hook for suppressing page scroll while the overlay is open.
///
/// The controller calls `suppress` once when the viewer opens and `restore`
/// once when it closes. Both default to no-ops.
pub trait ScrollLock {
    fn suppress(&mut self) {}

    fn restore(&mut self) {}
}

/// Scroll lock for hosts with nothing to scroll.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScrollLock;

impl ScrollLock for NoScrollLock {}
