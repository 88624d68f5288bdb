//! Progress reporting for the ask pipeline.
//!
//! The pipeline's one long step is the model call; the driver shows a
//! spinner there, while headless callers plug in [`NoopProgress`].

use indicatif::{ProgressBar, ProgressStyle};

/// Minimal progress interface used inside `ask`.
pub trait Progress: Send + Sync {
    /// Advance to the next stage with a short message.
    fn step(&self, _msg: &str) {}
    /// Replace the current message without advancing.
    fn message(&self, _msg: &str) {}
    /// Finish the UI.
    fn finish(&self, _msg: &str) {}
}

/// No-op reporter for headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Indicatif spinner for the interactive driver.
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap()
                .tick_chars("-\\|/ "),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { pb }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for SpinnerProgress {
    fn step(&self, msg: &str) {
        self.pb.inc(1);
        self.pb.set_message(msg.to_string());
    }
    fn message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }
    fn finish(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }
}
