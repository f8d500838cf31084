//! Terminal progress indicators.

use crate::shell;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    future::Future,
    io::{IsTerminal, stderr},
    time::Duration,
};

/// Frames of the lookup spinner.
pub static GLOBE: &[&str] = &["🌍 ", "🌎 ", "🌏 ", ""];

const TICK: Duration = Duration::from_millis(180);

/// A spinner drawn on stderr while a network round-trip is in flight.
///
/// The spinner is a no-op when the shell is quiet or stderr is not a terminal, so piped output
/// never contains control sequences.
#[derive(Debug, Default)]
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Starts a new spinner.
    pub fn start() -> Self {
        if shell::is_quiet() || !stderr().is_terminal() {
            return Self::default();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner}") {
            bar.set_style(style.tick_strings(GLOBE));
        }
        bar.enable_steady_tick(TICK);
        Self { bar: Some(bar) }
    }

    /// Returns `true` if the spinner is being drawn.
    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Stops the spinner and clears its line.
    pub fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drives `fut` to completion while a [`Spinner`] is shown.
pub async fn spin<F: Future>(fut: F) -> F::Output {
    let mut spinner = Spinner::start();
    let out = fut.await;
    spinner.stop();
    out
}
