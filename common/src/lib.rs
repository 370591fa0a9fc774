pub mod tracer;

pub use tracer::{TracerEngine, TracerError, TracerOptions};

/// Scalar type of signal samples, criterion thresholds and detection timestamps.
pub type Real = f64;

/// A signed sample index. Scan positions and criterion offsets share this type
/// so that `position + offset` can be formed without casting.
pub type Position = isize;
