//! Indicatif progress for the publish phase.
//!
//! The backend call gives no intermediate progress, so a ticker animates
//! the bar through the upload phases while the submission is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Phase label for a given percentage, mirroring the upload stages.
fn phase_for(pct: u64) -> &'static str {
    match pct {
        0..=29 => "Preparing files...",
        30..=69 => "Uploading media...",
        70..=89 => "Processing...",
        _ => "Finalizing...",
    }
}

/// Animated submission progress bar. Create before awaiting the publisher,
/// then call `finish` or `abandon` with the outcome.
pub struct PublishProgress {
    bar: ProgressBar,
    ticker: tokio::task::JoinHandle<()>,
}

impl PublishProgress {
    pub fn start() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{bar:30.magenta} {percent:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(phase_for(0));

        // Creep toward 90% while the call is pending; the last 10% is
        // reserved for the real completion.
        let ticker_bar = bar.clone();
        let ticker = tokio::spawn(async move {
            let mut pct = 0u64;
            while pct < 90 && !ticker_bar.is_finished() {
                tokio::time::sleep(Duration::from_millis(120)).await;
                pct += 3;
                ticker_bar.set_position(pct);
                ticker_bar.set_message(phase_for(pct));
            }
        });

        Self { bar, ticker }
    }

    /// Complete the bar and print the outcome line.
    pub fn finish(self, message: &str) {
        self.ticker.abort();
        self.bar.set_position(100);
        self.bar.finish_with_message(message.to_string());
    }

    /// Clear the bar after a failed or cancelled submission.
    pub fn abandon(self) {
        self.ticker.abort();
        self.bar.finish_and_clear();
    }
}
