//! A template is an ordered set of criteria ("dots") which must all hold
//! simultaneously at a scan position for that position to match.
//! The order of the criteria only affects how early the conjunction exits.
mod criterion;
mod scan_window;

use crate::error::{DotDiscError, DotDiscResult};
use dotdisc_common::{Position, Real};
use serde::{Deserialize, Serialize};

pub use criterion::{Criterion, Direction};
pub use scan_window::ScanWindow;

/// Number of fields in each row of a flat criteria buffer.
pub const FIELDS_PER_CRITERION: usize = 3;

/// A scan position paired with whether every criterion held there.
pub type ScanPoint = (Position, bool);

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    criteria: Vec<Criterion>,
}

impl Template {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    /// Unpacks a flat buffer of `[threshold, direction sign, offset]` rows.
    pub fn from_flat(buffer: &[Real]) -> DotDiscResult<Self> {
        if !buffer.len().is_multiple_of(FIELDS_PER_CRITERION) {
            return Err(DotDiscError::MalformedCriteria { len: buffer.len() });
        }
        buffer
            .chunks_exact(FIELDS_PER_CRITERION)
            .enumerate()
            .map(|(index, row)| Criterion::from_row(index, row))
            .collect::<DotDiscResult<Vec<_>>>()
            .map(Self::new)
    }

    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn scan_window(&self) -> ScanWindow {
        scan_window(&self.criteria)
    }

    /// See [is_match].
    pub fn is_match(&self, signal: &[Real], position: Position) -> bool {
        is_match(&self.criteria, signal, position)
    }

    /// See [scan].
    pub fn scan<'a>(&'a self, signal: &'a [Real]) -> impl Iterator<Item = ScanPoint> + 'a {
        scan(&self.criteria, signal)
    }
}

impl FromIterator<Criterion> for Template {
    fn from_iter<T: IntoIterator<Item = Criterion>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

pub fn scan_window(criteria: &[Criterion]) -> ScanWindow {
    ScanWindow::from_offsets(criteria.iter().map(|criterion| criterion.offset))
}

/// True if every criterion holds at `position`.
/// An empty set of criteria holds vacuously everywhere.
pub fn is_match(criteria: &[Criterion], signal: &[Real], position: Position) -> bool {
    criteria
        .iter()
        .all(|criterion| criterion.test(signal, position))
}

/// Evaluates the criteria at each valid scan position, in increasing order.
/// Positions outside the [ScanWindow] are never evaluated.
pub fn scan<'a>(
    criteria: &'a [Criterion],
    signal: &'a [Real],
) -> impl Iterator<Item = ScanPoint> + 'a {
    scan_window(criteria)
        .positions(signal.len())
        .map(move |position| (position, is_match(criteria, signal, position)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_buffer() {
        let template = Template::from_flat(&[1.0, 1.0, 0.0, -2.0, -1.0, -2.0]);
        assert_eq!(
            template,
            Ok(Template::new(vec![
                Criterion::new(1.0, Direction::Above, 0),
                Criterion::new(-2.0, Direction::Below, -2),
            ]))
        );
    }

    #[test]
    fn empty_flat_buffer() {
        assert_eq!(Template::from_flat(&[]), Ok(Template::default()));
    }

    #[test]
    fn flat_buffer_with_missing_field() {
        assert_eq!(
            Template::from_flat(&[1.0, 1.0, 0.0, 2.0, 1.0]),
            Err(DotDiscError::MalformedCriteria { len: 5 })
        );
    }

    #[test]
    fn flat_buffer_with_nan_offset() {
        assert!(matches!(
            Template::from_flat(&[1.0, 1.0, 0.0, 2.0, 1.0, Real::NAN]),
            Err(DotDiscError::InvalidOffset { index: 1, .. })
        ));
    }

    #[test]
    fn conjunction() {
        let template: Template = [
            Criterion::new(1.0, Direction::Above, 0),
            Criterion::new(1.0, Direction::Below, 1),
        ]
        .into_iter()
        .collect();
        let signal = [5.0, 0.0, 5.0, 5.0];
        assert!(template.is_match(&signal, 0));
        assert!(!template.is_match(&signal, 1));
        assert!(!template.is_match(&signal, 2));
    }

    #[test]
    fn empty_template_matches_everywhere() {
        let template = Template::default();
        let signal = [0.0, 1.0, 2.0];
        assert_eq!(
            template.scan(&signal).collect::<Vec<_>>(),
            vec![(0, true), (1, true), (2, true)]
        );
    }

    #[test]
    fn negative_offset_moves_scan_start() {
        let template = Template::new(vec![
            Criterion::new(1.0, Direction::Above, -2),
            Criterion::new(1.0, Direction::Above, 0),
        ]);
        let signal = [5.0, 5.0, 5.0, 0.0, 5.0, 5.0, 0.0, 0.0];
        let positions: Vec<_> = template.scan(&signal).map(|(i, _)| i).collect();
        assert_eq!(positions, vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn template_from_json() {
        let template: Template = serde_json::from_str(
            r#"{ "criteria": [
                { "threshold": 1.5, "direction": "above", "offset": 0 },
                { "threshold": -0.5, "direction": "below", "offset": -4 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(template.len(), 2);
        assert_eq!(
            template.criteria()[1],
            Criterion::new(-0.5, Direction::Below, -4)
        );
        assert_eq!(template.scan_window().positions(10), 4..10);
    }
}
