//! Template ("dot") discrimination of one dimensional signals.
//!
//! A template is a set of criteria, each a threshold test at a fixed offset
//! from a moving scan position. Positions at which every criterion holds are
//! grouped into runs, and each completed run is reported as one detection:
//! ```rust
//! use dot_discriminator::{Criterion, Direction, match_template};
//!
//! let signal = [0.0, 0.0, 5.0, 5.0, 5.0, 0.0, 0.0];
//! let detections = match_template(&signal, &[Criterion::new(1.0, Direction::Above, 0)]);
//! assert_eq!(detections, vec![4.0]);
//! ```
pub mod error;
pub mod loader;
pub mod matcher;
pub mod template;

pub use dotdisc_common::{Position, Real};
pub use error::{DotDiscError, DotDiscResult};
pub use matcher::{
    Detection, SaveToFileFilter, TemplateMatcher, TrailingRun, match_flat, match_template,
};
pub use template::{Criterion, Direction, ScanWindow, Template};
