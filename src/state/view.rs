//! Chart and view configuration state

use std::time::{Duration, Instant};

use crate::chart::{ChartConfig, ChartKind};
use crate::constants::plot::DEFAULT_HISTOGRAM_BINS;
use crate::sampling::SamplingConfig;

/// View state manages the chart selection and display options
#[derive(Debug, Clone)]
pub struct ViewState {
    // Column selection
    /// Current X axis column index
    pub x_index: usize,

    /// Current Y axis column index
    pub y_index: usize,

    // Chart configuration
    /// Current chart type
    pub chart_kind: ChartKind,

    /// Sampling strategy and parameters
    pub sampling: SamplingConfig,

    /// Number of histogram bins
    pub bin_count: usize,

    // Summary view (small multiples)
    /// Render the random-combination grid instead of a single chart
    pub show_summary: bool,

    /// Column pairs for the summary grid
    pub combinations: Vec<(usize, usize)>,

    /// Pending summary request, regenerated once the debounce window passes
    summary_requested_at: Option<Instant>,

    // Display options
    /// Dark mode theme toggle
    pub dark_mode: bool,

    /// Grid visibility
    pub show_grid: bool,

    /// Statistics panel visibility
    pub show_stats_panel: bool,

    /// Data table panel visibility
    pub show_data_table: bool,

    /// X axis is timestamp data
    pub x_is_timestamp: bool,

    /// Reset zoom bounds flag
    pub reset_bounds: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            x_index: 0,
            y_index: 0,
            chart_kind: ChartKind::default(),
            sampling: SamplingConfig::default(),
            bin_count: DEFAULT_HISTOGRAM_BINS,
            show_summary: false,
            combinations: Vec::new(),
            summary_requested_at: None,
            dark_mode: true,
            show_grid: true,
            show_stats_panel: false,
            show_data_table: false,
            x_is_timestamp: false,
            reset_bounds: false,
        }
    }
}

impl ViewState {
    /// The chart configuration for the currently selected axes
    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            kind: self.chart_kind,
            x_index: self.x_index,
            y_index: self.y_index,
            sampling: self.sampling.clone(),
            bin_count: self.bin_count,
        }
    }

    /// Reset plot bounds on next frame
    pub fn reset_plot_bounds(&mut self) {
        self.reset_bounds = true;
    }

    /// Record a summary-view request; repeated requests restart the window
    pub fn request_summary(&mut self) {
        self.summary_requested_at = Some(Instant::now());
    }

    /// True while a summary request is waiting out its debounce window
    pub fn summary_pending(&self) -> bool {
        self.summary_requested_at.is_some()
    }

    /// Consume the pending request once `debounce` has elapsed
    pub fn take_due_summary_request(&mut self, debounce: Duration) -> bool {
        match self.summary_requested_at {
            Some(at) if at.elapsed() >= debounce => {
                self.summary_requested_at = None;
                true
            }
            _ => false,
        }
    }

    /// Leave the summary view and drop its combinations
    pub fn clear_summary(&mut self) {
        self.show_summary = false;
        self.combinations.clear();
        self.summary_requested_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_debounce() {
        let mut view = ViewState::default();
        assert!(!view.take_due_summary_request(Duration::from_millis(300)));

        view.request_summary();
        assert!(view.summary_pending());
        // Not yet elapsed
        assert!(!view.take_due_summary_request(Duration::from_millis(300)));
        assert!(view.summary_pending());
        // Zero debounce fires immediately and consumes the request
        assert!(view.take_due_summary_request(Duration::ZERO));
        assert!(!view.summary_pending());
    }

    #[test]
    fn test_clear_summary() {
        let mut view = ViewState::default();
        view.show_summary = true;
        view.combinations = vec![(0, 1)];
        view.request_summary();

        view.clear_summary();
        assert!(!view.show_summary);
        assert!(view.combinations.is_empty());
        assert!(!view.summary_pending());
    }
}
