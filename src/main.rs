//! CLI entry point for batch wave function collapse generation

use clap::Parser;
use wavecollapse::io::cli::{BatchProcessor, Cli};
use wavecollapse::io::logging::init_logging;

fn main() -> wavecollapse::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level())?;

    let mut processor = BatchProcessor::new(cli);
    let summary = processor.process()?;
    tracing::info!(
        models = summary.models,
        failed = summary.failed_models,
        outputs = summary.outputs,
        contradictions = summary.contradictions,
        "batch finished"
    );
    Ok(())
}
