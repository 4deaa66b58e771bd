use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::SampleViz;
use crate::constants::layout::TABLE_ROW_HEIGHT;

/// Render a read-only, virtualized view of the loaded dataset
pub fn render_data_table(app: &mut SampleViz, ui: &mut egui::Ui) {
    profiling::scope!("render_data_table");

    ui.heading("Data");
    ui.separator();

    let headers = app.headers();
    let n_rows = app.state.row_count();
    let columns = app.table_columns();
    if columns.is_empty() {
        ui.label("No data loaded");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), headers.len())
        .header(20.0, |mut header| {
            for name in &headers {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(TABLE_ROW_HEIGHT, n_rows, |mut row| {
                let row_idx = row.index();
                for col in columns {
                    row.col(|ui| {
                        ui.label(col.get(row_idx).map(String::as_str).unwrap_or(""));
                    });
                }
            });
        });
}
