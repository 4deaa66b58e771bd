//! Error types for SampleViz
//!
//! This module provides structured error handling using thiserror,
//! replacing ad-hoc String-based errors with proper typed errors.

use thiserror::Error;

/// Main error type for SampleViz operations
#[derive(Error, Debug)]
pub enum VizError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Invalid column index
    #[error("Invalid column index: {index} (available: {max})")]
    InvalidColumnIndex { index: usize, max: usize },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// No numeric columns available for charting
    #[error("Dataset has no numeric columns to chart")]
    NoNumericColumns,

    /// Sampling rate outside [0, 1]
    #[error("Sampling rate {rate} is outside the valid range 0.0..=1.0")]
    InvalidSamplingRate { rate: f64 },

    /// Systematic sampling interval of zero
    #[error("Systematic sampling interval must be at least 1")]
    InvalidInterval,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for SampleViz operations
pub type Result<T> = std::result::Result<T, VizError>;

/// UI-friendly error message formatting
impl VizError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            VizError::FileIo(e) => format!("File error: {}", e),
            VizError::Polars(e) => format!("Data error: {}", e),
            VizError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            VizError::InvalidColumnIndex { index, max } => {
                format!("Column index {} out of range (max: {})", index, max)
            }
            VizError::EmptyDataset => "Dataset is empty".to_string(),
            VizError::NoNumericColumns => {
                "No numeric columns found; charts need numeric data".to_string()
            }
            VizError::InvalidSamplingRate { rate } => {
                format!("Sampling rate must be between 0 and 1 (got {})", rate)
            }
            VizError::InvalidInterval => "Sampling interval must be at least 1".to_string(),
            VizError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error (for toast notifications)
    pub fn title(&self) -> &'static str {
        match self {
            VizError::FileIo(_) => "File Error",
            VizError::Polars(_) => "Data Error",
            VizError::UnsupportedFormat { .. } => "Unsupported Format",
            VizError::InvalidColumnIndex { .. } => "Invalid Column",
            VizError::EmptyDataset => "Empty Dataset",
            VizError::NoNumericColumns => "No Numeric Columns",
            VizError::InvalidSamplingRate { .. } => "Invalid Sampling Rate",
            VizError::InvalidInterval => "Invalid Interval",
            VizError::Json(_) => "JSON Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VizError::InvalidColumnIndex { index: 7, max: 2 };
        assert_eq!(err.user_message(), "Column index 7 out of range (max: 2)");
        assert_eq!(err.title(), "Invalid Column");

        let err = VizError::InvalidSamplingRate { rate: 1.5 };
        assert_eq!(
            err.user_message(),
            "Sampling rate must be between 0 and 1 (got 1.5)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let viz_err: VizError = io_err.into();
        assert!(matches!(viz_err, VizError::FileIo(_)));
    }
}
