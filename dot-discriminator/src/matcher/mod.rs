//! Finds the positions at which a [Template] matches a signal.
//!
//! The scan visits each valid position in increasing order, evaluates the
//! template there and feeds the result to a [RunDetector]. Each maximal run
//! of matching positions that ends before the scan does is reported once, at
//! `ceil(i - run_length / 2)` where `i` is the first non-matching position
//! after the run.
//!
//! A run still matching at the last valid position is dropped unless
//! [TrailingRun::Flush] is requested. In particular, an empty template
//! matches everywhere, forming one unterminated run, so produces no detections.
mod detector;
mod save_to_file;

use crate::{
    error::{DotDiscError, DotDiscResult},
    template::{self, Criterion, Template},
};
use dotdisc_common::Real;
use tracing::{debug, instrument};

pub use detector::{DetectionFilter, DetectionIter, RunDetector, TrailingRun};
pub use save_to_file::SaveToFileFilter;

/// The reported position of a completed run.
pub type Detection = Real;

#[derive(Default, Debug, Clone)]
pub struct TemplateMatcher {
    template: Template,
    trailing_run: TrailingRun,
}

impl TemplateMatcher {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            ..Default::default()
        }
    }

    pub fn with_trailing_run(self, trailing_run: TrailingRun) -> Self {
        Self {
            trailing_run,
            ..self
        }
    }

    /// Validates the signal and returns the detections in increasing order.
    /// Fails before scanning if the signal is empty.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            num_samples = signal.len(),
            num_criteria = self.template.len(),
            trailing_run = %self.trailing_run
        )
    )]
    pub fn run(&self, signal: &[Real]) -> DotDiscResult<Vec<Detection>> {
        if signal.is_empty() {
            return Err(DotDiscError::EmptySignal);
        }
        let window = self.template.scan_window();
        debug!(
            low_offset = window.low_offset(),
            high_offset = window.high_offset(),
            positions = ?window.positions(signal.len()),
            "Scan window"
        );
        let detections: Vec<_> = self
            .template
            .scan(signal)
            .detections(RunDetector::new(self.trailing_run))
            .collect();
        debug!(num_detections = detections.len(), "Scan complete");
        Ok(detections)
    }
}

/// Scans `signal` with `criteria` and returns the detections of every
/// completed run, dropping any trailing run. Total for any input.
pub fn match_template(signal: &[Real], criteria: &[Criterion]) -> Vec<Detection> {
    template::scan(criteria, signal)
        .detections(RunDetector::default())
        .collect()
}

/// Entry point for hosts that hold the criteria as a flat buffer of
/// `[threshold, direction sign, offset]` rows.
pub fn match_flat(signal: &[Real], criteria: &[Real]) -> DotDiscResult<Vec<Detection>> {
    TemplateMatcher::new(Template::from_flat(criteria)?).run(signal)
}
