use std::{fs::File, path::Path, sync::Mutex};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer, fmt::writer::BoxMakeWriter, layer::SubscriberExt};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Cannot create log file: {0}")]
    LogFile(#[from] std::io::Error),
    #[error("Global subscriber already set: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}

#[derive(Default)]
pub struct TracerOptions<'a> {
    /// If set, log lines are written to this file (without ANSI colouring)
    /// instead of stdout.
    pub log_file: Option<&'a Path>,
}

/// This object initialises the stdout (or file) tracer.
/// Log lines are filtered by the `RUST_LOG` environment variable.
pub struct TracerEngine {
    to_file: bool,
}

impl TracerEngine {
    /// Initialises the global tracing subscriber.
    /// #Arguments
    /// * `options` - The caller-specified instance of TracerOptions.
    /// #Returns
    /// An instance of TracerEngine, or an error if the log file cannot be
    /// created or a global subscriber has already been installed.
    pub fn new(options: TracerOptions) -> Result<Self, TracerError> {
        let to_file = options.log_file.is_some();

        let writer = match options.log_file {
            Some(path) => BoxMakeWriter::new(Mutex::new(File::create(path)?)),
            None => BoxMakeWriter::new(std::io::stdout),
        };

        let fmt_tracer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(!to_file);

        // This filter is applied to the fmt tracer
        let log_filter = EnvFilter::from_default_env();

        let subscriber =
            tracing_subscriber::Registry::default().with(fmt_tracer.with_filter(log_filter));

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(Self { to_file })
    }

    pub fn is_writing_to_file(&self) -> bool {
        self.to_file
    }
}
