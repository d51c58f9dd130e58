//! Progress reporting for the page loop.
//!
//! TTY mode: one indicatif records bar. Non-TTY mode: bars are hidden and
//! logs carry the progress.

use std::io::IsTerminal;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Central progress context, detecting TTY once at startup.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty: std::io::stderr().is_terminal(),
        }
    }

    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }

    /// Bar counting records against the expected total. Hidden off-TTY.
    ///
    /// The total is usually unknown until the first page arrives; create
    /// with 0 and call `set_length` once the count is discovered.
    pub fn records_bar(&self, total: u64) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(total));
        pb.set_style(
            ProgressStyle::with_template(
                "{prefix:<10.cyan} {bar:30.green/dim} {pos:>8}/{len:8} {eta:>4}",
            )
            .expect("invalid template")
            .progress_chars("--"),
        );
        pb
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}
