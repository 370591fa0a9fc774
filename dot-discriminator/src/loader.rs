use crate::template::Template;
use dotdisc_common::Real;
use std::{
    fs::{self, File},
    io::BufReader,
    num::ParseFloatError,
    path::Path,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid sample '{token}' on line {line}: {error}")]
    ParseSample {
        line: usize,
        token: String,
        error: ParseFloatError,
    },
    #[error("Invalid template: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses samples separated by newlines, commas or whitespace.
/// Anything after a `#` on a line is ignored.
pub fn parse_signal(text: &str) -> Result<Vec<Real>, LoaderError> {
    let mut signal = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        for token in content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            let sample = token
                .parse::<Real>()
                .map_err(|error| LoaderError::ParseSample {
                    line: index + 1,
                    token: token.to_owned(),
                    error,
                })?;
            signal.push(sample);
        }
    }
    Ok(signal)
}

pub fn load_signal(path: &Path) -> Result<Vec<Real>, LoaderError> {
    let signal = parse_signal(&fs::read_to_string(path)?)?;
    debug!(num_samples = signal.len(), "Loaded signal from {}", path.display());
    Ok(signal)
}

/// Loads a template stored as `{ "criteria": [ { "threshold", "direction", "offset" }, ... ] }`.
pub fn load_template(path: &Path) -> Result<Template, LoaderError> {
    let template: Template = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    debug!(
        num_criteria = template.len(),
        "Loaded template from {}",
        path.display()
    );
    Ok(template)
}
