use crate::error::{DotDiscError, DotDiscResult};
use dotdisc_common::{Position, Real};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

/// The side of the threshold a sample must lie on for a criterion to hold.
/// Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    /// Strictly positive values are `Above`, anything else (zero, negative, NaN) is `Below`.
    pub fn from_sign(sign: Real) -> Self {
        if sign > 0.0 { Self::Above } else { Self::Below }
    }

    pub fn test(self, value: Real, threshold: Real) -> bool {
        match self {
            Self::Above => value > threshold,
            Self::Below => value < threshold,
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

/// A single "dot": a threshold test applied at a fixed offset from the scan position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub threshold: Real,
    pub direction: Direction,
    pub offset: Position,
}

impl Criterion {
    pub fn new(threshold: Real, direction: Direction, offset: Position) -> Self {
        Self {
            threshold,
            direction,
            offset,
        }
    }

    /// Builds a criterion from one `[threshold, direction sign, offset]` row
    /// of a flat criteria buffer. The offset is truncated toward zero.
    pub(crate) fn from_row(index: usize, row: &[Real]) -> DotDiscResult<Self> {
        let &[threshold, sign, offset] = row else {
            return Err(DotDiscError::MalformedCriteria { len: row.len() });
        };
        if !offset.is_finite() {
            return Err(DotDiscError::InvalidOffset {
                index,
                value: offset,
            });
        }
        Ok(Self::new(
            threshold,
            Direction::from_sign(sign),
            offset.trunc() as Position,
        ))
    }

    /// Tests the sample at `position + offset`. A lookup falling outside the
    /// signal is never performed and counts as a failed test.
    pub fn test(&self, signal: &[Real], position: Position) -> bool {
        position
            .checked_add(self.offset)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| signal.get(index))
            .is_some_and(|&value| self.direction.test(value, self.threshold))
    }
}

/// Parses `"threshold,direction,offset"`, where direction is either
/// `above`/`below` or a number following the sign convention of [Direction::from_sign].
impl FromStr for Criterion {
    type Err = DotDiscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vals: Vec<_> = s.split(',').map(str::trim).collect();
        let &[threshold, direction, offset] = vals.as_slice() else {
            return Err(DotDiscError::InvalidCriterion(format!(
                "Incorrect number of parameters in criterion, expected pattern 'threshold,direction,offset', got '{s}'"
            )));
        };
        let threshold = Real::from_str(threshold).map_err(|e| {
            DotDiscError::InvalidCriterion(format!("threshold '{threshold}' in '{s}': {e}"))
        })?;
        let direction = match Real::from_str(direction) {
            Ok(sign) => Direction::from_sign(sign),
            Err(_) => Direction::from_str(direction).map_err(|e| {
                DotDiscError::InvalidCriterion(format!("direction '{direction}' in '{s}': {e}"))
            })?,
        };
        let offset = Position::from_str(offset).map_err(|e| {
            DotDiscError::InvalidCriterion(format!("offset '{offset}' in '{s}': {e}"))
        })?;
        Ok(Self::new(threshold, direction, offset))
    }
}
