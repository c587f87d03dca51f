//! Per-model progress tracking with automatic batching for large sample sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for a batch of models
///
/// Shows one bar per recent model (outputs written out of outputs requested)
/// and, for large batches, an extra bar counting finished models.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    model_bars: Vec<ProgressBar>,
    /// Stores (`label`, `outputs_done`, `outputs_requested`) for rolling window display
    model_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Models: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            model_bars: Vec::new(),
            model_states: Vec::new(),
        }
    }

    /// Create bars for a batch of `model_count` models
    pub fn initialize(&mut self, model_count: usize) {
        if model_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(model_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..model_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.model_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a model that will produce `outputs` images
    pub fn start_model(&mut self, index: usize, name: &str, outputs: usize) {
        if index >= self.model_states.len() {
            self.model_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.model_states.get_mut(index) {
            *state = (name.to_string(), 0, outputs);
        }
        self.update_bars();
    }

    /// Report how many outputs of a model are finished
    pub fn update_outputs(&mut self, index: usize, done: usize) {
        if let Some(state) = self.model_states.get_mut(index) {
            state.1 = done;
        }
        self.update_bars();
    }

    /// Mark a model as finished
    pub fn complete_model(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.model_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All models processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .model_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_idx, (name, done, requested)) in visible.iter().copied().enumerate() {
            if let Some(bar) = self.model_bars.get(bar_idx) {
                bar.set_length(*requested as u64);
                bar.set_position(*done as u64);
                let width = requested.to_string().len();
                bar.set_message(format!("{done:>width$}/{requested}"));
                bar.set_prefix(name.clone());
            }
        }

        for bar in self.model_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
