//! Command-line interface for batch generation from a samples description

use crate::generator::Generator;
use crate::io::configuration::{DEFAULT_ATTEMPTS, DEFAULT_OUTPUT_DIR, DEFAULT_SEED, ModelConfig};
use crate::io::error::{Result, io_error};
use crate::io::logging::{DEFAULT_LOG_LEVEL, QUIET_LOG_LEVEL};
use crate::io::progress::ProgressManager;
use crate::io::samples::load_samples;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wavecollapse")]
#[command(
    author,
    version,
    about = "Generate bitmaps and tilemaps by wave function collapse"
)]
/// Command-line arguments for the batch generator
pub struct Cli {
    /// Samples description listing the models to generate
    #[arg(value_name = "SAMPLES")]
    pub samples: PathBuf,

    /// Directory containing `samples/` and `tilesets/`
    #[arg(short, long, default_value = ".")]
    pub resources: PathBuf,

    /// Directory generated files are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Seed of the generator that hands out per-attempt seeds
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Attempts per output before giving up
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            QUIET_LOG_LEVEL
        } else {
            DEFAULT_LOG_LEVEL
        }
    }
}

/// Totals for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Models listed in the samples description
    pub models: usize,
    /// Models that could not be built
    pub failed_models: usize,
    /// Output images written
    pub outputs: usize,
    /// Runs that ended in a contradiction
    pub contradictions: usize,
}

/// Runs every model of a samples description and writes the results
pub struct BatchProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    rng: StdRng,
}

impl BatchProcessor {
    /// Create a batch processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let rng = StdRng::seed_from_u64(cli.seed);

        Self {
            cli,
            progress_manager,
            rng,
        }
    }

    /// Process every model in the samples description
    ///
    /// Models that fail to build are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the samples description cannot be read, the output
    /// directory cannot be created, or an output cannot be written
    pub fn process(&mut self) -> Result<BatchSummary> {
        let configs = load_samples(&self.cli.samples)?;
        std::fs::create_dir_all(&self.cli.output)
            .map_err(|e| io_error(&self.cli.output, "create output directory", e))?;

        let mut summary = BatchSummary {
            models: configs.len(),
            ..BatchSummary::default()
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(configs.len());
        }

        for (index, config) in configs.iter().enumerate() {
            self.process_model(index, config, &mut summary)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    fn process_model(
        &mut self,
        index: usize,
        config: &ModelConfig,
        summary: &mut BatchSummary,
    ) -> Result<()> {
        let start_time = Instant::now();
        let mut generator = match Generator::load(config, &self.cli.resources) {
            Ok(generator) => generator,
            Err(error) => {
                tracing::error!(model = %config.name, %error, "failed to build model");
                summary.failed_models += 1;
                return Ok(());
            }
        };

        tracing::info!(
            model = %config.name,
            symbols = generator.model().symbol_count(),
            heuristic = %config.heuristic,
            "model ready"
        );
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_model(index, &config.name, config.screenshots);
        }

        for screenshot in 0..config.screenshots {
            for attempt in 0..self.cli.attempts {
                let seed: u64 = self.rng.random();
                let outcome = generator.run(seed);
                if outcome.is_success() {
                    generator.save(&self.cli.output, &format!("{} {seed}", config.name))?;
                    summary.outputs += 1;
                    tracing::debug!(model = %config.name, seed, attempt, ?outcome, "output written");
                    break;
                }
                summary.contradictions += 1;
                tracing::warn!(model = %config.name, seed, attempt, "contradiction");
            }
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_outputs(index, screenshot + 1);
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_model(index);
        }
        tracing::info!(
            model = %config.name,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "model finished"
        );
        Ok(())
    }
}
