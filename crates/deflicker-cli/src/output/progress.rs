//! Progress bar adapter using indicatif.

use std::collections::HashMap;

use deflicker_core::{Phase, ProgressEvent, ProgressSink};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// One progress bar per batch phase.
pub struct PhaseProgress {
    multi: Option<MultiProgress>,
    bars: HashMap<Phase, ProgressBar>,
}

impl PhaseProgress {
    /// Creates bars for `phases`, each sized to `total` items.
    ///
    /// With `show` unset no bars are drawn and every event is dropped.
    #[must_use]
    pub fn new(phases: &[Phase], total: usize, show: bool) -> Self {
        if !show {
            return Self {
                multi: None,
                bars: HashMap::new(),
            };
        }

        let multi = MultiProgress::new();
        let style = ProgressStyle::default_bar()
            .template(
                "{prefix:>8} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .map(|style| style.progress_chars("#>-"));

        let bars = phases
            .iter()
            .map(|&phase| {
                let bar = multi.add(ProgressBar::new(total as u64));
                if let Ok(style) = &style {
                    bar.set_style(style.clone());
                }
                bar.set_prefix(phase.name());
                (phase, bar)
            })
            .collect();

        Self {
            multi: Some(multi),
            bars,
        }
    }

    /// Stops every bar that has not completed, leaving it on screen.
    pub fn finish(&self) {
        for bar in self.bars.values() {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }

    /// Prints a line above the bars without tearing them.
    pub fn println(&self, line: &str) {
        match &self.multi {
            Some(multi) => multi.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }
}

impl ProgressSink for PhaseProgress {
    fn on_event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::PhaseStarted { phase, total } => {
                if let Some(bar) = self.bars.get(&phase) {
                    bar.set_length(total as u64);
                    bar.reset_elapsed();
                }
            }
            ProgressEvent::Tick { phase, .. } => {
                if let Some(bar) = self.bars.get(&phase) {
                    bar.inc(1);
                }
            }
            ProgressEvent::PhaseFinished { phase } => {
                if let Some(bar) = self.bars.get(&phase) {
                    bar.finish();
                }
            }
        }
    }
}
