use dotdisc_common::Position;
use itertools::{Itertools, MinMaxResult};
use std::{iter, ops::Range};

/// The span of offsets used by a template, always including zero.
/// Restricting the scan to [ScanWindow::positions] guarantees that
/// `position + offset` lies inside the signal for every criterion.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    low_offset: Position,
    high_offset: Position,
}

impl ScanWindow {
    pub fn from_offsets<I>(offsets: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        match offsets.into_iter().chain(iter::once(0)).minmax() {
            MinMaxResult::MinMax(low_offset, high_offset) => Self {
                low_offset,
                high_offset,
            },
            MinMaxResult::OneElement(_) | MinMaxResult::NoElements => Self::default(),
        }
    }

    /// `min(0, min(offsets))`
    pub fn low_offset(&self) -> Position {
        self.low_offset
    }

    /// `max(0, max(offsets))`
    pub fn high_offset(&self) -> Position {
        self.high_offset
    }

    /// The half-open range `-low_offset .. len - high_offset` of valid scan
    /// positions for a signal of length `len`. Empty if the template is wider
    /// than the signal.
    pub fn positions(&self, len: usize) -> Range<Position> {
        let len = Position::try_from(len).unwrap_or(Position::MAX);
        let start = self.low_offset.checked_neg().unwrap_or(Position::MAX);
        let end = len.saturating_sub(self.high_offset);
        start..end.max(start)
    }
}
