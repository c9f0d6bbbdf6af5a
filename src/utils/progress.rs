//! Spinner shown by the CLI while long operations run
//!
//! Without the `progress` feature every call is a no-op.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

/// Inputs shorter than this finish too fast to be worth a spinner
pub const SPINNER_MIN_LEN: usize = 1 << 20;

/// Optional stderr spinner
pub struct Spinner {
    #[cfg(feature = "progress")]
    bar: Option<ProgressBar>,
}

#[cfg(feature = "progress")]
impl Spinner {
    /// Start a spinner with `message` if `len` bytes are being processed and
    /// `enabled` is set
    pub fn start(message: &str, len: usize, enabled: bool) -> Self {
        let bar = (enabled && len >= SPINNER_MIN_LEN).then(|| {
            let bar = ProgressBar::new_spinner();
            let template = "{spinner:.cyan} {msg} [{elapsed}]";
            if let Ok(style) = ProgressStyle::default_spinner().template(template) {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        Self { bar }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Stop and erase the spinner
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(not(feature = "progress"))]
impl Spinner {
    pub fn start(_message: &str, _len: usize, _enabled: bool) -> Self {
        Self {}
    }

    pub fn is_active(&self) -> bool {
        false
    }

    pub fn set_message(&self, _message: &str) {}

    pub fn finish(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_has_no_spinner() {
        let spinner = Spinner::start("building", 10, true);
        assert!(!spinner.is_active());
        spinner.set_message("still building");
        spinner.finish();
    }

    #[test]
    fn test_disabled_spinner() {
        let spinner = Spinner::start("building", SPINNER_MIN_LEN * 2, false);
        assert!(!spinner.is_active());
        spinner.finish();
    }
}
