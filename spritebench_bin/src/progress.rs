//! Progress bar and report printing while providers run.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use spritebench::{ProviderReport, RunObserver};

/// Prints each provider's report line to stdout as soon as it finishes and
/// shows sample progress on stderr.
pub struct ReportPrinter {
    show_progress: bool,
    bar: Option<ProgressBar>,
}

impl ReportPrinter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress: show_progress && std::io::stderr().is_terminal(),
            bar: None,
        }
    }
}

impl RunObserver for ReportPrinter {
    fn provider_started(&mut self, provider: &'static str, samples: usize) {
        if !self.show_progress {
            return;
        }

        let bar = ProgressBar::new(samples as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:>12} [{bar:30.cyan/blue}] {pos}/{len} samples")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        bar.set_message(provider);
        self.bar = Some(bar);
    }

    fn sample_finished(&mut self, _provider: &'static str, _index: usize, _elapsed_ms: f64) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn provider_finished(&mut self, report: &ProviderReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        println!("{}", report);
    }
}
