use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{prefix:.bold} {wide_bar:.green/white} {bytes}/{total_bytes} {bytes_per_sec}";

/// Byte counter drawn on stderr while a local file is hashed.
///
/// Draws nothing when stderr is not a terminal, so piped output stays clean.
pub struct Bar {
    inner: ProgressBar,
}

impl Bar {
    pub fn new(total: u64, label: &str) -> Self {
        if !Term::stderr().is_term() {
            return Self::hidden();
        }

        let inner = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar()).progress_chars("=> ");

        inner.set_style(style);
        inner.set_prefix(label.to_owned());

        Self { inner }
    }

    pub fn hidden() -> Self {
        Self { inner: ProgressBar::hidden() }
    }

    pub fn add(&self, bytes: u64) {
        self.inner.inc(bytes);
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Clears the bar; the result table replaces it.
    pub fn finish(&self) {
        self.inner.finish_and_clear();
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.inner.is_finished() {
            self.inner.abandon();
        }
    }
}
