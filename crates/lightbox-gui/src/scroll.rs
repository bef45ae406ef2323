use lightbox_core::viewer::ScrollLock;

/// Page scroll suppression for the gallery. The gallery reads the flag each
/// frame and disables its scroll area while the lightbox is open.
#[derive(Default)]
pub struct GuiScrollLock {
    locked: bool,
}

impl GuiScrollLock {
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl ScrollLock for GuiScrollLock {
    fn suppress(&mut self) {
        self.locked = true;
    }

    fn restore(&mut self) {
        self.locked = false;
    }
}
