//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Sampling defaults
pub mod sampling {
    /// Default reduction rate for the rate-based strategies
    pub const DEFAULT_RATE: f64 = 0.5;

    /// Default interval for systematic sampling (keep every k-th row)
    pub const DEFAULT_INTERVAL: usize = 5;

    /// Upper bound for the interval slider
    pub const MAX_INTERVAL: usize = 50;
}

/// Plotting and visualization defaults
pub mod plot {
    /// Default number of histogram bins
    pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

    /// Histogram bin count bounds (user-adjustable slider)
    pub const MIN_HISTOGRAM_BINS: usize = 1;
    pub const MAX_HISTOGRAM_BINS: usize = 100;

    /// Maximum number of small-multiple charts in the summary view
    pub const MAX_SUMMARY_CHARTS: usize = 10;

    /// Debounce applied to the summary-view trigger
    pub const SUMMARY_DEBOUNCE_MS: u64 = 300;

    /// Point radius for scatter marks
    pub const SCATTER_RADIUS: f32 = 4.0;

    /// Point radius for line-chart marks
    pub const LINE_POINT_RADIUS: f32 = 3.0;
}

/// Data loading defaults
pub mod data {
    /// Rows used for CSV schema inference
    pub const INFER_SCHEMA_ROWS: usize = 100;

    /// Warn when more than this percentage of a column fails numeric parsing
    pub const NAN_WARN_PERCENT: f64 = 5.0;

    /// Maximum number of recent files to track
    pub const MAX_RECENT_FILES: usize = 5;
}

/// UI layout defaults
pub mod layout {
    /// Stats side panel default width
    pub const STATS_PANEL_WIDTH: f32 = 260.0;

    /// Data table side panel default width
    pub const DATA_PANEL_WIDTH: f32 = 400.0;

    /// Small-multiple chart size in the summary grid
    pub const SUMMARY_CHART_WIDTH: f32 = 340.0;
    pub const SUMMARY_CHART_HEIGHT: f32 = 220.0;

    /// Data table row height
    pub const TABLE_ROW_HEIGHT: f32 = 18.0;
}

/// Configuration file defaults
pub mod config {
    /// Default file name for saved view configurations
    pub const CONFIG_FILE: &str = "sampleviz_view.json";
}
