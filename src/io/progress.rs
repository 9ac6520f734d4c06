//! Multi-pass progress tracking with automatic batching for large runs

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Display state of one generation pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassState {
    /// Label shown next to the bar
    pub label: String,
    /// Cells resolved so far
    pub resolved: usize,
    /// Cells in the wave grid
    pub total: usize,
    /// Whether the pass has finished
    pub done: bool,
}

/// Coordinates progress display for generation passes
///
/// Shows one bar per pass for small runs and adds a batch bar once the run
/// has more passes than individual bars. Bars display the most recent passes.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    pass_bars: Vec<ProgressBar>,
    pass_states: Vec<PassState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PASS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Passes: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            pass_bars: Vec::new(),
            pass_states: Vec::new(),
        }
    }

    /// Create bars for the given number of passes
    pub fn initialize(&mut self, pass_count: usize) {
        if pass_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(pass_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..pass_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(PASS_STYLE.clone());
            self.pass_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a pass about to start
    pub fn start_pass(&mut self, index: usize, label: &str, total_cells: usize) {
        if index >= self.pass_states.len() {
            self.pass_states.resize(index + 1, PassState::default());
        }
        if let Some(state) = self.pass_states.get_mut(index) {
            *state = PassState {
                label: label.to_string(),
                resolved: 0,
                total: total_cells,
                done: false,
            };
        }
        self.update_bars();
    }

    /// Report resolved cells for a running pass
    pub fn update_pass(&mut self, index: usize, resolved: usize) {
        if let Some(state) = self.pass_states.get_mut(index) {
            state.resolved = resolved.min(state.total);
        }
        self.update_bars();
    }

    /// Mark a pass as finished and advance the batch bar
    pub fn complete_pass(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.pass_states.get_mut(index) {
            state.resolved = state.total;
            state.done = true;
        }
        self.update_bars();
    }

    /// Tracked pass states in registration order
    pub fn pass_states(&self) -> &[PassState] {
        &self.pass_states
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All passes generated");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&PassState> = self
            .pass_states
            .iter()
            .filter(|state| !state.label.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, state) in visible.iter().enumerate() {
            if let Some(bar) = self.pass_bars.get(bar_index) {
                bar.set_length(state.total as u64);
                bar.set_position(state.resolved as u64);
                let width = state.total.to_string().len();
                bar.set_message(format!("{:>width$}/{}", state.resolved, state.total));
                let mark = if state.done { "✓ " } else { "" };
                bar.set_prefix(format!("{mark}{}", state.label));
            }
        }

        for bar in self.pass_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
