//! Application state management
//!
//! This module organizes the SampleViz application state into logical
//! components: the loaded dataset, the chart/view configuration, and
//! transient UI state.

mod ui;
mod view;

pub use ui::UiState;
pub use view::ViewState;

use std::path::PathBuf;

use crate::data::DataSource;

/// Main application state container
pub struct AppState {
    /// Current data source (CSV or Parquet)
    pub data: Option<DataSource>,

    /// Chart and view configuration
    pub view: ViewState,

    /// UI interaction state
    pub ui: UiState,

    /// Currently loaded file path
    pub current_file: Option<PathBuf>,

    /// Recently opened files
    pub recent_files: Vec<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            data: None,
            view: ViewState::default(),
            ui: UiState::default(),
            current_file: None,
            recent_files: Vec::new(),
        }
    }
}

impl AppState {
    /// Check if data is loaded
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Get the number of rows in the current dataset
    pub fn row_count(&self) -> usize {
        self.data.as_ref().map(|ds| ds.height()).unwrap_or(0)
    }

    /// Get the number of columns in the current dataset
    pub fn column_count(&self) -> usize {
        self.data.as_ref().map(|ds| ds.width()).unwrap_or(0)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(|ds| ds.column_names())
            .unwrap_or_default()
    }

    /// Indices of columns eligible for chart axes
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.data
            .as_ref()
            .map(|ds| ds.numeric_columns())
            .unwrap_or_default()
    }
}
