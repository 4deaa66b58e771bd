use eframe::egui::ComboBox;

use crate::app::SampleViz;
use crate::chart::ChartKind;
use crate::constants::plot::{MAX_HISTOGRAM_BINS, MIN_HISTOGRAM_BINS};
use crate::widgets::SamplingControls;

/// Render the toolbar: file handling, axis/chart/sampling selection, and
/// view toggles
pub fn render_toolbar(app: &mut SampleViz, ctx: &eframe::egui::Context, ui: &mut eframe::egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("📂").on_hover_text("Open Data File").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Data Files", &["csv", "parquet"])
                .pick_file()
            {
                if let Err(e) = app.load_file(path) {
                    app.state.ui.set_error(format!("{}: {}", e.title(), e.user_message()));
                }
            }
        }

        // Recent files menu
        if !app.state.recent_files.is_empty() {
            ComboBox::from_id_salt("recent_files")
                .selected_text("📋")
                .show_ui(ui, |ui| {
                    ui.label("Recent Files:");
                    ui.separator();
                    // Need to clone to avoid borrow checker issues with load_file
                    for path in app.state.recent_files.clone().iter() {
                        if let Some(name) = path.file_name() {
                            if ui.button(name.to_string_lossy()).clicked() {
                                if let Err(e) = app.load_file(path.clone()) {
                                    app.state.ui.set_error(format!("{}: {}", e.title(), e.user_message()));
                                }
                            }
                        }
                    }
                });
        }

        ui.separator();

        if ui.button("💾").on_hover_text("Save View Config").clicked() {
            app.save_config();
        }
        if ui.button("📥").on_hover_text("Load View Config").clicked() {
            app.load_config();
        }

        ui.separator();

        let theme_icon = if app.state.view.dark_mode { "🌙" } else { "☀" };
        if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
            app.state.view.dark_mode = !app.state.view.dark_mode;
        }

        ui.toggle_value(&mut app.state.view.show_stats_panel, "∑")
            .on_hover_text("Statistics");
        ui.toggle_value(&mut app.state.view.show_data_table, "📋")
            .on_hover_text("Data Table");
    });

    // Handle drag and drop using Option combinators
    ctx.input(|i| {
        i.raw
            .dropped_files
            .first()
            .and_then(|f| f.path.as_ref())
            .map(|path| {
                if let Err(e) = app.load_file(path.clone()) {
                    app.state.ui.set_error(format!("{}: {}", e.title(), e.user_message()));
                }
            });
    });

    if !app.state.has_data() {
        return;
    }

    let headers = app.headers();
    let numeric = app.state.numeric_columns();
    if numeric.is_empty() {
        ui.label("No numeric columns available for charting");
        return;
    }

    ui.separator();

    ui.horizontal(|ui| {
        let old_x = app.state.view.x_index;

        ComboBox::from_label("X-Axis")
            .selected_text(headers.get(app.state.view.x_index).cloned().unwrap_or_default())
            .show_ui(ui, |ui| {
                for &i in &numeric {
                    ui.selectable_value(&mut app.state.view.x_index, i, &headers[i]);
                }
            });

        ComboBox::from_label("Y-Axis")
            .selected_text(headers.get(app.state.view.y_index).cloned().unwrap_or_default())
            .show_ui(ui, |ui| {
                for &i in &numeric {
                    ui.selectable_value(&mut app.state.view.y_index, i, &headers[i]);
                }
            });

        if old_x != app.state.view.x_index {
            app.state.view.x_is_timestamp = app
                .state
                .data
                .as_ref()
                .map(|ds| ds.is_datetime_column(app.state.view.x_index))
                .unwrap_or(false);
            app.state.view.reset_plot_bounds();
        }

        ComboBox::from_label("Chart Type")
            .selected_text(app.state.view.chart_kind.label())
            .show_ui(ui, |ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut app.state.view.chart_kind, kind, kind.label());
                }
            });

        if app.state.view.chart_kind == ChartKind::Histogram {
            ui.label("Bins:");
            ui.add(eframe::egui::Slider::new(
                &mut app.state.view.bin_count,
                MIN_HISTOGRAM_BINS..=MAX_HISTOGRAM_BINS,
            ));
        }
    });

    ui.horizontal(|ui| {
        eframe::egui::CollapsingHeader::new("🎲 Sampling")
            .id_salt("sampling_controls")
            .default_open(true)
            .show(ui, |ui| {
                SamplingControls::new(&mut app.state.view.sampling, &headers).show(ui);
            });

        ui.separator();

        if app.state.view.show_summary {
            if ui.button("Show Single").clicked() {
                app.state.view.clear_summary();
            }
        } else if numeric.len() >= 2 && ui.button("Summary View").clicked() {
            // Regeneration fires once the debounce window passes
            app.state.view.request_summary();
        }
        if app.state.view.summary_pending() {
            ui.spinner();
        }

        ui.checkbox(&mut app.state.view.show_grid, "Grid");
    });
}
