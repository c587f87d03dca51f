//! A model paired with the extractor output needed to render it

use crate::algorithm::executor::{Model, RunOutcome};
use crate::analysis::patterns::PatternSet;
use crate::analysis::tileset::{TileSet, TilesetDescription};
use crate::io::configuration::{ModelConfig, ModelKind, SAMPLES_DIR, TILESETS_DIR};
use crate::io::error::{Result, invalid_parameter, io_error};
use crate::io::image::Bitmap;
use crate::io::tileset::load_tileset;
use crate::io::visualization::{render_overlapping, render_tiled, text_output};
use crate::spatial::Grid;
use std::path::Path;

/// What the model's symbols stand for
#[derive(Debug, Clone)]
pub enum Source {
    /// N×N patterns from a sample image
    Overlapping(PatternSet),
    /// Oriented tiles from a tileset
    Tiled {
        /// Expanded tiles
        tiles: TileSet,
        /// Paint fully undecided cells black in partial renders
        black_background: bool,
        /// Whether a text listing accompanies each image
        text_output: bool,
    },
}

/// Builds, runs and renders one configured model
#[derive(Debug, Clone)]
pub struct Generator {
    config: ModelConfig,
    model: Model,
    source: Source,
}

impl Generator {
    /// Build an overlapping model from an in-memory sample
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not overlapping, or pattern
    /// extraction or grid validation fails
    pub fn from_sample(config: &ModelConfig, sample: &Bitmap) -> Result<Self> {
        let ModelKind::Overlapping { options, ground } = &config.kind else {
            return Err(invalid_parameter(
                "kind",
                &config.name,
                &"expected an overlapping model",
            ));
        };
        let patterns = PatternSet::extract(sample, options)?;
        let model = Model::new(
            patterns.alphabet().clone(),
            grid_for(config)?,
            config.heuristic,
            *ground,
        )?;

        Ok(Self {
            config: config.clone(),
            model,
            source: Source::Overlapping(patterns),
        })
    }

    /// Build a tiled model from a parsed tileset and an image loader
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not tiled, or tile expansion
    /// or grid validation fails
    pub fn from_tileset<F>(config: &ModelConfig, description: &TilesetDescription, load: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Bitmap>,
    {
        let ModelKind::Tiled {
            subset,
            black_background,
            text_output,
        } = &config.kind
        else {
            return Err(invalid_parameter(
                "kind",
                &config.name,
                &"expected a tiled model",
            ));
        };
        let tiles = TileSet::build(description, subset.as_deref(), load)?;
        let model = Model::new(
            tiles.alphabet().clone(),
            grid_for(config)?,
            config.heuristic,
            false,
        )?;

        Ok(Self {
            config: config.clone(),
            model,
            source: Source::Tiled {
                tiles,
                black_background: *black_background,
                text_output: *text_output,
            },
        })
    }

    /// Build a model from files under a resource directory
    ///
    /// Samples are read from `samples/{name}.png`; tilesets from
    /// `tilesets/{name}.xml` with images in `tilesets/{name}/`.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource is missing or invalid
    pub fn load(config: &ModelConfig, resources: &Path) -> Result<Self> {
        match &config.kind {
            ModelKind::Overlapping { .. } => {
                let path = resources
                    .join(SAMPLES_DIR)
                    .join(format!("{}.png", config.name));
                Self::from_sample(config, &Bitmap::load(path)?)
            }
            ModelKind::Tiled { .. } => {
                let directory = resources.join(TILESETS_DIR);
                let description = load_tileset(directory.join(format!("{}.xml", config.name)))?;
                let images = directory.join(&config.name);
                Self::from_tileset(config, &description, |image| {
                    Bitmap::load(images.join(format!("{image}.png")))
                })
            }
        }
    }

    /// Run the model once
    pub fn run(&mut self, seed: u64) -> RunOutcome {
        self.model.run(seed, self.config.limit)
    }

    /// Render the current model state
    pub fn render(&self) -> Bitmap {
        match &self.source {
            Source::Overlapping(patterns) => render_overlapping(&self.model, patterns),
            Source::Tiled {
                tiles,
                black_background,
                ..
            } => render_tiled(&self.model, tiles, *black_background),
        }
    }

    /// Text listing of the decided tiles, for tiled models that request one
    pub fn text(&self) -> Option<String> {
        match &self.source {
            Source::Tiled {
                tiles,
                text_output: true,
                ..
            } => Some(text_output(&self.model, tiles)),
            _ => None,
        }
    }

    /// Write `{stem}.png` and, when requested, `{stem}.txt` into a directory
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written
    pub fn save(&self, directory: &Path, stem: &str) -> Result<()> {
        self.render().save(directory.join(format!("{stem}.png")))?;
        if let Some(text) = self.text() {
            let path = directory.join(format!("{stem}.txt"));
            std::fs::write(&path, text).map_err(|e| io_error(&path, "write text output", e))?;
        }
        Ok(())
    }

    /// The configuration this generator was built from
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The underlying solver
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// What the symbols stand for
    pub const fn source(&self) -> &Source {
        &self.source
    }
}

fn grid_for(config: &ModelConfig) -> Result<Grid> {
    Grid::new(
        config.width,
        config.height,
        config.periodic,
        config.footprint(),
    )
}
