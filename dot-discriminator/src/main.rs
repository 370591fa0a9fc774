mod parameters;

use anyhow::Result;
use clap::Parser;
use dot_discriminator::{SaveToFileFilter, TemplateMatcher, TrailingRun, loader::load_signal};
use dotdisc_common::{TracerEngine, TracerOptions};
use parameters::Cli;
use std::io::{Write, stdout};
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = Cli::parse();

    let _tracer = TracerEngine::new(TracerOptions {
        log_file: args.log_file.as_deref(),
    })?;

    let signal = load_signal(&args.signal_file)?;
    let template = args.template()?;
    info!(
        num_samples = signal.len(),
        num_criteria = template.len(),
        "Loaded signal and template"
    );
    if template.is_empty() && args.trailing_run == TrailingRun::Drop {
        warn!("No criteria given: every position matches, so no run can complete");
    }

    let matcher = TemplateMatcher::new(template).with_trailing_run(args.trailing_run);
    let detections = matcher.run(&signal)?;
    info!(num_detections = detections.len(), "Template matching complete");

    match &args.output {
        Some(path) => {
            detections.into_iter().save_to_file(path)?;
            info!("Detections saved to {}", path.display());
        }
        None => {
            let mut out = stdout().lock();
            for detection in detections {
                writeln!(out, "{detection}")?;
            }
        }
    }
    Ok(())
}
