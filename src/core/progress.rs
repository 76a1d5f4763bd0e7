//! Progress reporting using indicatif.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

/// Style for per-file batch progress.
pub fn file_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// A thread-safe progress tracker for parallel operations.
#[derive(Clone)]
pub struct ProgressTracker {
    bar: ProgressBar,
    counter: Arc<AtomicUsize>,
}

impl ProgressTracker {
    /// Create a visible tracker on stderr when it is a terminal, hidden otherwise.
    pub fn new(total: usize, message: &str) -> Self {
        let bar = if is_tty() {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(file_progress_style());
            bar.set_message(message.to_string());
            bar
        } else {
            let bar = ProgressBar::hidden();
            bar.set_length(total as u64);
            bar
        };

        Self {
            bar,
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Move the tracker to `current` (monotonic; stale updates are ignored).
    pub fn update(&self, current: usize) {
        let previous = self.counter.fetch_max(current, Ordering::Relaxed);
        if current > previous {
            self.bar.set_position(current as u64);
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}

/// Check if stderr is a TTY (for deciding whether to show progress bars).
pub fn is_tty() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}
