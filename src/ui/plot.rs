use chrono::{DateTime, Utc};
use eframe::egui;
use egui_plot::{Bar, BarChart, Line, Plot, Points};

use crate::app::SampleViz;
use crate::chart::{ChartScene, PieSlice};
use crate::constants::layout::{SUMMARY_CHART_HEIGHT, SUMMARY_CHART_WIDTH};
use crate::constants::plot::{LINE_POINT_RADIUS, SCATTER_RADIUS};

/// Mark color for single charts
const TEAL: egui::Color32 = egui::Color32::from_rgba_premultiplied(75, 192, 192, 200);

/// Line stroke for line charts
const STEEL_BLUE: egui::Color32 = egui::Color32::from_rgb(70, 130, 180);

/// Render the single-chart view from the cached scene
pub fn render_chart(app: &mut SampleViz, ui: &mut egui::Ui) {
    profiling::scope!("render_chart");

    let reset = std::mem::take(&mut app.state.view.reset_bounds);
    let headers = app.headers();
    let x_name = headers
        .get(app.state.view.x_index)
        .cloned()
        .unwrap_or_default();
    let y_name = headers
        .get(app.state.view.y_index)
        .cloned()
        .unwrap_or_default();
    let show_grid = app.state.view.show_grid;
    let x_is_timestamp = app.state.view.x_is_timestamp;

    let Some(scene) = app.scene() else {
        ui.vertical_centered(|ui| {
            ui.label("Nothing to chart for the current selection");
        });
        return;
    };

    if scene.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label("The sampled selection produced no drawable marks");
        });
        return;
    }

    match scene {
        ChartScene::Pie { slices } => {
            render_pie(ui, slices, &y_name, None);
        }
        _ => {
            let height = ui.available_height().max(200.0);
            let plot = configure_plot(
                Plot::new("chart").show_grid(show_grid).height(height),
                scene,
                &x_name,
                &y_name,
                x_is_timestamp,
                reset,
            );
            plot.show(ui, |plot_ui| draw_scene(plot_ui, scene, &x_name, &y_name, None));
        }
    }
}

/// Render the summary grid of small multiples
pub fn render_summary_grid(app: &mut SampleViz, ui: &mut egui::Ui) {
    profiling::scope!("render_summary_grid");

    let headers = app.headers();
    let show_grid = app.state.view.show_grid;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for (idx, chart) in app.summary_charts().iter().enumerate() {
                let (x_idx, y_idx) = chart.pair;
                let x_name = headers.get(x_idx).cloned().unwrap_or_default();
                let y_name = headers.get(y_idx).cloned().unwrap_or_default();

                ui.group(|ui| {
                    ui.set_width(SUMMARY_CHART_WIDTH);
                    ui.vertical(|ui| {
                        ui.label(format!("{} vs {}", x_name, y_name));
                        let Some(scene) = &chart.scene else {
                            ui.label("(no data)");
                            return;
                        };
                        match scene {
                            ChartScene::Pie { slices } => {
                                render_pie(ui, slices, &y_name, Some(SUMMARY_CHART_HEIGHT));
                            }
                            _ => {
                                let plot = configure_plot(
                                    Plot::new(format!("summary_{}_{}", x_idx, y_idx))
                                        .show_grid(show_grid)
                                        .height(SUMMARY_CHART_HEIGHT),
                                    scene,
                                    &x_name,
                                    &y_name,
                                    false,
                                    false,
                                );
                                plot.show(ui, |plot_ui| {
                                    draw_scene(plot_ui, scene, &x_name, &y_name, Some(idx))
                                });
                            }
                        }
                    });
                });
            }
        });
    });
}

/// Apply axis formatters, tooltips, and domain hints shared by both views
fn configure_plot<'a>(
    mut plot: Plot<'a>,
    scene: &ChartScene,
    x_name: &str,
    y_name: &str,
    x_is_timestamp: bool,
    reset: bool,
) -> Plot<'a> {
    if reset {
        plot = plot.reset();
    }

    if x_is_timestamp {
        plot = plot.x_axis_formatter(|mark, _range| {
            let secs = mark.value.floor() as i64;
            if let Some(dt) = DateTime::<Utc>::from_timestamp(secs, 0) {
                dt.format("%Y-%m-%d\n%H:%M:%S").to_string()
            } else {
                format!("{:.2}", mark.value)
            }
        });
    } else {
        // Ensure x-axis labels always render with sensible formatting
        plot = plot.x_axis_formatter(|mark, _range| {
            if mark.value.abs() < 0.01 && mark.value != 0.0 {
                format!("{:.2e}", mark.value)
            } else if mark.value.abs() >= 1000.0 {
                format!("{:.0}", mark.value)
            } else {
                format!("{:.2}", mark.value)
            }
        });
    }

    match scene {
        ChartScene::Histogram { bins, y_max } => {
            // Histogram domain is pinned to [0, max] on x and
            // [0, max frequency + buffer] on y
            plot = plot.include_x(0.0).include_y(0.0).include_y(*y_max);
            if let Some(last) = bins.last() {
                plot = plot.include_x(last.upper);
            }
            let x_label = x_name.to_string();
            plot = plot.label_formatter(move |_name, value| {
                format!("{}: {:.2}\nFrequency: {:.0}", x_label, value.x, value.y.max(0.0))
            });
        }
        _ => {
            let (x_label, y_label) = (x_name.to_string(), y_name.to_string());
            plot = plot.label_formatter(move |name, value| {
                let x_text = if x_is_timestamp {
                    DateTime::<Utc>::from_timestamp(value.x.floor() as i64, 0)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| format!("{:.3}", value.x))
                } else {
                    format!("{:.3}", value.x)
                };
                if name.is_empty() {
                    format!("{}: {}\n{}: {:.3}", x_label, x_text, y_label, value.y)
                } else {
                    format!("{}\n{}: {}\n{}: {:.3}", name, x_label, x_text, y_label, value.y)
                }
            });
        }
    }

    plot
}

/// Draw the scene's marks into a prepared plot
fn draw_scene(
    plot_ui: &mut egui_plot::PlotUi<'_>,
    scene: &ChartScene,
    x_name: &str,
    y_name: &str,
    palette_index: Option<usize>,
) {
    let color = palette_index
        .map(SampleViz::series_color)
        .unwrap_or(TEAL);

    match scene {
        ChartScene::Scatter { points } => {
            let data: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
            plot_ui.points(
                Points::new(y_name.to_string(), data)
                    .radius(SCATTER_RADIUS)
                    .color(color),
            );
        }
        ChartScene::Line { points } => {
            let data: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
            let line_color = if palette_index.is_some() { color } else { STEEL_BLUE };
            plot_ui.line(
                Line::new(y_name.to_string(), data.clone())
                    .color(line_color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(y_name.to_string(), data)
                    .radius(LINE_POINT_RADIUS)
                    .color(line_color),
            );
        }
        ChartScene::Histogram { bins, .. } => {
            let width = bins.first().map(|b| b.upper - b.lower).unwrap_or(1.0);
            let bars: Vec<Bar> = bins
                .iter()
                .map(|bin| {
                    Bar::new(bin.lower + width / 2.0, bin.count as f64).width(width)
                })
                .collect();
            let x_label = x_name.to_string();
            let half = width / 2.0;
            plot_ui.bar_chart(
                BarChart::new(format!("{} Frequency", x_name), bars)
                    .color(color)
                    .element_formatter(Box::new(move |bar, _chart| {
                        format!(
                            "{}: {:.2} - {:.2}\nFrequency: {:.0}",
                            x_label,
                            bar.argument - half,
                            bar.argument + half,
                            bar.value
                        )
                    })),
            );
        }
        // Pie charts bypass the plot entirely
        ChartScene::Pie { .. } => {}
    }
}

/// Draw a pie chart with the painter; egui_plot has no radial marks
fn render_pie(ui: &mut egui::Ui, slices: &[PieSlice], y_name: &str, max_size: Option<f32>) {
    let available = ui.available_size();
    let mut size = available.x.min(available.y.max(200.0));
    if let Some(cap) = max_size {
        size = size.min(cap);
    }

    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let center = rect.center();
    let radius = size * 0.45;

    // Hovered slice from the pointer's angle around the center
    let hovered = response.hover_pos().and_then(|pos| {
        let delta = pos - center;
        if delta.length() > radius {
            return None;
        }
        let mut angle = (delta.x as f64).atan2(-delta.y as f64);
        if angle < 0.0 {
            angle += std::f64::consts::TAU;
        }
        slices
            .iter()
            .position(|s| angle >= s.start_angle && angle < s.end_angle)
    });

    let painter = ui.painter();
    for (i, slice) in slices.iter().enumerate() {
        let base = SampleViz::series_color(i);
        let fill = if hovered == Some(i) {
            base
        } else {
            base.gamma_multiply(0.8)
        };

        // Triangle fan along the arc keeps every filled shape convex
        let steps = ((slice.fraction * 64.0).ceil() as usize).max(2);
        let angle_at = |step: usize| {
            let t = step as f64 / steps as f64;
            slice.start_angle + t * (slice.end_angle - slice.start_angle)
        };
        let point_at = |angle: f64| {
            center
                + egui::vec2(
                    (angle.sin() * radius as f64) as f32,
                    (-angle.cos() * radius as f64) as f32,
                )
        };

        for step in 0..steps {
            painter.add(egui::Shape::convex_polygon(
                vec![center, point_at(angle_at(step)), point_at(angle_at(step + 1))],
                fill,
                egui::Stroke::NONE,
            ));
        }

        // Slice boundary
        painter.line_segment(
            [center, point_at(slice.start_angle)],
            egui::Stroke::new(1.0, ui.visuals().window_fill()),
        );
    }

    if let Some(i) = hovered {
        let slice = &slices[i];
        let text = format!(
            "{}: {}\n{:.1}% (row {})",
            y_name,
            slice.value,
            slice.fraction * 100.0,
            slice.row + 1
        );
        response.on_hover_text(text);
    }
}
