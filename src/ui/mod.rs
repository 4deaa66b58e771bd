mod data_table;
mod plot;
mod stats_panel;
mod toolbar;

pub use data_table::render_data_table;
pub use plot::{render_chart, render_summary_grid};
pub use stats_panel::render_stats_panel;
pub use toolbar::render_toolbar;
