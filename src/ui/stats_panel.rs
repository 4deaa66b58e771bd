use eframe::egui;

use crate::app::SampleViz;
use crate::data::{ColumnStats, stats::calculate_stats};

/// Render per-column statistics with sparkline histograms
pub fn render_stats_panel(app: &mut SampleViz, ui: &mut egui::Ui) {
    profiling::scope!("render_stats_panel");

    ui.heading("Statistics");
    ui.separator();

    let headers = app.headers();
    let numeric = app.state.numeric_columns();
    if numeric.is_empty() {
        ui.label("No numeric columns");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (slot, &col_idx) in numeric.iter().enumerate() {
            if app.state.ui.get_cached_stats(col_idx).is_none() {
                let values = app
                    .state
                    .data
                    .as_ref()
                    .and_then(|ds| ds.column_as_f64(col_idx).ok())
                    .unwrap_or_default();
                app.state.ui.cache_stats(col_idx, calculate_stats(&values));
            }
            let Some(stats) = app.state.ui.get_cached_stats(col_idx) else {
                continue;
            };

            let color = SampleViz::series_color(slot);
            egui::CollapsingHeader::new(&headers[col_idx])
                .id_salt(col_idx)
                .default_open(slot == 0)
                .show(ui, |ui| {
                    draw_sparkline(ui, stats, color);
                    egui::Grid::new(("stats_grid", col_idx))
                        .num_columns(2)
                        .show(ui, |ui| {
                            ui.label("Count");
                            ui.label(format!("{}", stats.count));
                            ui.end_row();
                            ui.label("Min");
                            ui.label(format!("{:.3}", stats.min));
                            ui.end_row();
                            ui.label("Max");
                            ui.label(format!("{:.3}", stats.max));
                            ui.end_row();
                            ui.label("Mean");
                            ui.label(format!("{:.3}", stats.mean));
                            ui.end_row();
                            ui.label("Median");
                            ui.label(format!("{:.3}", stats.median));
                            ui.end_row();
                            ui.label("Std Dev");
                            ui.label(format!("{:.3}", stats.std_dev));
                            ui.end_row();
                            ui.label("P5 / P95");
                            ui.label(format!("{:.3} / {:.3}", stats.p5, stats.p95));
                            ui.end_row();
                            ui.label("P25 / P75");
                            ui.label(format!("{:.3} / {:.3}", stats.p25, stats.p75));
                            ui.end_row();
                        });
                });
        }
    });
}

/// Draw a sparkline histogram
fn draw_sparkline(ui: &mut egui::Ui, stats: &ColumnStats, color: egui::Color32) {
    let desired_size = egui::vec2(ui.available_width().min(200.0), 24.0);
    let (rect, _response) = ui.allocate_exact_size(desired_size, egui::Sense::hover());

    if stats.histogram.is_empty() || stats.histogram_max == 0 {
        return;
    }

    let painter = ui.painter();
    let bin_width = rect.width() / stats.histogram.len() as f32;
    let max_height = rect.height() - 2.0;

    painter.rect_filled(rect, 2.0, ui.visuals().extreme_bg_color);

    for (i, &count) in stats.histogram.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let height = (count as f32 / stats.histogram_max as f32) * max_height;
        let bar_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left() + i as f32 * bin_width, rect.bottom() - height - 1.0),
            egui::vec2(bin_width - 1.0, height),
        );
        painter.rect_filled(bar_rect, 0.0, color.gamma_multiply(0.7));
    }
}
