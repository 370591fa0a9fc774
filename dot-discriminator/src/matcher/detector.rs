use super::Detection;
use crate::template::ScanPoint;
use dotdisc_common::{Position, Real};
use strum::{Display, EnumString};
use tracing::trace;

/// What to do with a run that is still matching when the scan range is exhausted.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TrailingRun {
    /// The run is discarded and produces no detection.
    #[default]
    Drop,
    /// The run is terminated at the end of the scan range and reported.
    Flush,
}

/// Collapses consecutive matching scan positions into single detections.
#[derive(Default, Debug, Clone)]
pub struct RunDetector {
    run_length: usize,
    trailing_run: TrailingRun,
}

impl RunDetector {
    pub fn new(trailing_run: TrailingRun) -> Self {
        Self {
            trailing_run,
            ..Default::default()
        }
    }

    /// Number of consecutive matching positions up to the last one signalled.
    pub fn run_length(&self) -> usize {
        self.run_length
    }

    fn detection(end: Position, run_length: usize) -> Detection {
        (end as Real - run_length as Real / 2.0).ceil()
    }

    pub fn signal(&mut self, position: Position, is_match: bool) -> Option<Detection> {
        if !is_match && self.run_length > 0 {
            let detection = Self::detection(position, self.run_length);
            self.run_length = 0;
            Some(detection)
        } else {
            if is_match {
                self.run_length += 1;
            }
            None
        }
    }

    /// Called once after the last position, with `end` one past that position.
    pub fn finish(&mut self, end: Position) -> Option<Detection> {
        let run_length = std::mem::take(&mut self.run_length);
        if run_length == 0 {
            return None;
        }
        match self.trailing_run {
            TrailingRun::Drop => {
                trace!(run_length, end, "Dropping unterminated run");
                None
            }
            TrailingRun::Flush => Some(Self::detection(end, run_length)),
        }
    }
}

#[derive(Clone)]
pub struct DetectionIter<I>
where
    I: Iterator<Item = ScanPoint>,
{
    source: I,
    detector: RunDetector,
    end: Option<Position>,
    finished: bool,
}

impl<I> Iterator for DetectionIter<I>
where
    I: Iterator<Item = ScanPoint>,
{
    type Item = Detection;

    fn next(&mut self) -> Option<Detection> {
        for (position, is_match) in &mut self.source {
            self.end = Some(position.saturating_add(1));
            if let Some(detection) = self.detector.signal(position, is_match) {
                return Some(detection);
            }
        }
        if self.finished {
            return None;
        }
        self.finished = true;
        self.end.and_then(|end| self.detector.finish(end))
    }
}

pub trait DetectionFilter<I>
where
    I: Iterator<Item = ScanPoint>,
{
    fn detections(self, detector: RunDetector) -> DetectionIter<I>;
}

impl<I> DetectionFilter<I> for I
where
    I: Iterator<Item = ScanPoint>,
{
    fn detections(self, detector: RunDetector) -> DetectionIter<I> {
        DetectionIter {
            source: self,
            detector,
            end: None,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_points(matches: &[bool]) -> impl Iterator<Item = ScanPoint> + '_ {
        matches
            .iter()
            .copied()
            .enumerate()
            .map(|(i, m)| (i as Position, m))
    }

    #[test]
    fn run_is_collapsed_when_it_ends() {
        let mut detector = RunDetector::default();
        assert_eq!(detector.signal(0, false), None);
        assert_eq!(detector.signal(1, true), None);
        assert_eq!(detector.signal(2, true), None);
        assert_eq!(detector.run_length(), 2);
        assert_eq!(detector.signal(3, false), Some(2.0));
        assert_eq!(detector.run_length(), 0);
        assert_eq!(detector.signal(4, false), None);
    }

    #[test]
    fn odd_run_lengths_round_up() {
        let mut detector = RunDetector::default();
        assert_eq!(detector.signal(4, true), None);
        assert_eq!(detector.signal(5, false), Some(5.0));
        for i in 6..9 {
            assert_eq!(detector.signal(i, true), None);
        }
        assert_eq!(detector.signal(9, false), Some(8.0));
    }

    #[test]
    fn trailing_run_dropped_by_default() {
        let mut iter =
            scan_points(&[false, true, false, true, true]).detections(RunDetector::default());
        assert_eq!(iter.next(), Some(2.0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn trailing_run_flushed_on_request() {
        let mut iter = scan_points(&[false, true, false, true, true])
            .detections(RunDetector::new(TrailingRun::Flush));
        assert_eq!(iter.next(), Some(2.0));
        assert_eq!(iter.next(), Some(4.0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn no_positions() {
        let mut iter = scan_points(&[]).detections(RunDetector::new(TrailingRun::Flush));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn parse_trailing_run() {
        assert_eq!("drop".parse::<TrailingRun>(), Ok(TrailingRun::Drop));
        assert_eq!("Flush".parse::<TrailingRun>(), Ok(TrailingRun::Flush));
        assert!("keep".parse::<TrailingRun>().is_err());
        assert_eq!(TrailingRun::Flush.to_string(), "flush");
    }
}
