/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Label of the running worker task (None = idle).
    pub running: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Probe progress.
    pub progress_items_done: Option<usize>,
    pub progress_items_total: Option<usize>,

    pub visit_count: Option<u64>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    pub fn start(&mut self, label: impl Into<String>) {
        self.running = Some(label.into());
        self.progress_items_done = None;
        self.progress_items_total = None;
    }

    pub fn finish(&mut self) {
        self.running = None;
        self.progress_items_done = None;
        self.progress_items_total = None;
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
