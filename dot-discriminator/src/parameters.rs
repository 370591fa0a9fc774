use anyhow::Result;
use clap::Parser;
use dot_discriminator::{Criterion, Template, TrailingRun, loader::load_template};
use std::path::PathBuf;

// cargo run --bin dot-discriminator -- --signal-file trace.txt --dot=1.5,above,0 --dot=-0.5,below,4

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub(crate) struct Cli {
    /// Text file of samples separated by newlines, commas or whitespace
    #[clap(long, env = "DOTDISC_SIGNAL_FILE")]
    pub(crate) signal_file: PathBuf,

    /// JSON file of the form {"criteria": [{"threshold", "direction", "offset"}, ...]}
    #[clap(long, env = "DOTDISC_TEMPLATE_FILE")]
    pub(crate) template_file: Option<PathBuf>,

    /// A criterion "threshold,direction,offset", where direction is "above", "below",
    /// or a number (positive meaning above). Appended after any criteria from the template file
    #[clap(long = "dot")]
    pub(crate) dots: Vec<Criterion>,

    /// Write detections to this file rather than stdout
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,

    /// Whether a run still matching at the end of the signal is dropped or reported
    #[clap(long, default_value_t = TrailingRun::Drop)]
    pub(crate) trailing_run: TrailingRun,

    /// Write log lines to this file rather than stdout
    #[clap(long, env = "DOTDISC_LOG_FILE")]
    pub(crate) log_file: Option<PathBuf>,
}

impl Cli {
    pub(crate) fn template(&self) -> Result<Template> {
        let mut template = match &self.template_file {
            Some(path) => load_template(path)?,
            None => Template::default(),
        };
        for dot in &self.dots {
            template.push(dot.clone());
        }
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dot_discriminator::Direction;

    #[test]
    fn dots_from_command_line() {
        let cli = Cli::try_parse_from([
            "dot-discriminator",
            "--signal-file",
            "trace.txt",
            "--dot=1.5,above,0",
            "--dot=-0.5,-1,4",
            "--trailing-run",
            "flush",
        ])
        .unwrap();
        assert_eq!(cli.trailing_run, TrailingRun::Flush);
        assert_eq!(
            cli.template().unwrap().criteria(),
            &[
                Criterion::new(1.5, Direction::Above, 0),
                Criterion::new(-0.5, Direction::Below, 4)
            ]
        );
    }

    #[test]
    fn malformed_dot_rejected() {
        assert!(
            Cli::try_parse_from(["dot-discriminator", "--signal-file", "x", "--dot=1.5,above"])
                .is_err()
        );
    }

    #[test]
    fn trailing_run_defaults_to_drop() {
        let cli = Cli::try_parse_from(["dot-discriminator", "--signal-file", "x"]).unwrap();
        assert_eq!(cli.trailing_run, TrailingRun::Drop);
        assert!(cli.template().unwrap().is_empty());
    }
}
