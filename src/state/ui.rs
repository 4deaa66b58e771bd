//! UI interaction state

use std::collections::HashMap;

use crate::data::ColumnStats;

/// UI state manages error display and per-session caches
#[derive(Default)]
pub struct UiState {
    /// Error message to display in UI (status bar)
    pub error_message: Option<String>,

    /// Cached statistics per column (column_idx -> stats)
    stats_cache: HashMap<usize, ColumnStats>,

    /// Stats cache version (invalidate when data changes)
    stats_cache_version: u64,

    /// Data version counter (increments on load)
    pub data_version: u64,
}

impl UiState {
    /// Increment data version (call after loading new data)
    pub fn on_data_loaded(&mut self) {
        self.data_version += 1;
        self.stats_cache.clear();
        self.stats_cache_version = 0;
    }

    /// Set an error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clear the current error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Get cached stats for a column, or None if not cached
    pub fn get_cached_stats(&self, col_idx: usize) -> Option<&ColumnStats> {
        if self.stats_cache_version == self.data_version {
            self.stats_cache.get(&col_idx)
        } else {
            None
        }
    }

    /// Cache stats for a column
    pub fn cache_stats(&mut self, col_idx: usize, stats: ColumnStats) {
        if self.stats_cache_version != self.data_version {
            self.stats_cache.clear();
            self.stats_cache_version = self.data_version;
        }
        self.stats_cache.insert(col_idx, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_cache_invalidated_on_load() {
        let mut ui = UiState::default();
        ui.on_data_loaded();
        ui.cache_stats(0, ColumnStats::default());
        assert!(ui.get_cached_stats(0).is_some());

        ui.on_data_loaded();
        assert!(ui.get_cached_stats(0).is_none());
    }

    #[test]
    fn test_error_lifecycle() {
        let mut ui = UiState::default();
        assert!(ui.error_message.is_none());
        ui.set_error("boom");
        assert_eq!(ui.error_message.as_deref(), Some("boom"));
        ui.clear_error();
        assert!(ui.error_message.is_none());
    }
}
