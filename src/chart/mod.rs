//! Chart construction, decoupled from rendering
//!
//! A chart is built in two steps: sampling plus binning produce a
//! [`ChartScene`] (plain data, testable without a GUI), and the ui module
//! draws the scene. Scenes are rebuilt only when their inputs change.

pub mod combos;
pub mod histogram;
pub mod scene;

pub use combos::random_combinations;
pub use histogram::{Bin, bin_values, frequency_buffer, y_domain_max};
pub use scene::{ChartScene, PieSlice, PointMark, build_scene};

use serde::{Deserialize, Serialize};

use crate::constants::plot::DEFAULT_HISTOGRAM_BINS;
use crate::sampling::SamplingConfig;

/// The available chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Scatter,
    Histogram,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Line,
        ChartKind::Pie,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Histogram => "Histogram",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
        }
    }
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Scatter
    }
}

/// Everything needed to build one chart from a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub x_index: usize,
    pub y_index: usize,
    pub sampling: SamplingConfig,
    pub bin_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            x_index: 0,
            y_index: 0,
            sampling: SamplingConfig::default(),
            bin_count: DEFAULT_HISTOGRAM_BINS,
        }
    }
}
