use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::chart::{self, ChartConfig, ChartKind, ChartScene};
use crate::constants::data::{MAX_RECENT_FILES, NAN_WARN_PERCENT};
use crate::constants::layout::{DATA_PANEL_WIDTH, STATS_PANEL_WIDTH};
use crate::constants::plot::{MAX_SUMMARY_CHARTS, SUMMARY_DEBOUNCE_MS};
use crate::data::DataSource;
use crate::error::{Result, VizError};
use crate::sampling::SamplingMethod;
use crate::state::AppState;
use crate::ui;

/// Persistable view configuration
#[derive(Serialize, Deserialize)]
pub struct ViewConfig {
    pub chart_kind: ChartKind,
    pub sampling_method: SamplingMethod,
    pub sampling_rate: f64,
    pub sampling_interval: usize,
    pub bin_count: usize,
    pub show_grid: bool,
    pub dark_mode: bool,
}

/// A cached single-chart scene keyed by its inputs
struct SceneCache {
    key: (u64, ChartConfig),
    scene: Option<ChartScene>,
}

/// One small-multiple chart in the summary grid
pub struct SummaryChart {
    pub pair: (usize, usize),
    pub scene: Option<ChartScene>,
}

struct SummaryCache {
    key: (u64, ChartConfig, Vec<(usize, usize)>),
    charts: Vec<SummaryChart>,
}

pub struct SampleViz {
    /// Application state
    pub state: AppState,

    /// Rng for the randomized sampling strategies and column shuffles
    rng: StdRng,

    /// Scene for the single-chart view, rebuilt when inputs change
    scene: Option<SceneCache>,

    /// Scenes for the summary grid
    summary: Option<SummaryCache>,

    /// Column-major string cache for the data table
    table_cache: Option<(u64, Vec<Vec<String>>)>,
}

impl Default for SampleViz {
    fn default() -> Self {
        Self {
            state: AppState::default(),
            rng: StdRng::from_entropy(),
            scene: None,
            summary: None,
            table_cache: None,
        }
    }
}

impl SampleViz {
    pub fn headers(&self) -> Vec<String> {
        self.state.column_names()
    }

    /// Category-10 palette used for pie slices and summary multiples
    pub fn series_color(index: usize) -> egui::Color32 {
        let colors = [
            egui::Color32::from_rgb(31, 119, 180),  // Blue
            egui::Color32::from_rgb(255, 127, 14),  // Orange
            egui::Color32::from_rgb(44, 160, 44),   // Green
            egui::Color32::from_rgb(214, 39, 40),   // Red
            egui::Color32::from_rgb(148, 103, 189), // Purple
            egui::Color32::from_rgb(140, 86, 75),   // Brown
            egui::Color32::from_rgb(227, 119, 194), // Pink
            egui::Color32::from_rgb(127, 127, 127), // Gray
            egui::Color32::from_rgb(188, 189, 34),  // Yellow
            egui::Color32::from_rgb(23, 190, 207),  // Cyan
        ];
        colors[index % colors.len()]
    }

    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        let ds = DataSource::load(&path)?;
        if ds.height() == 0 {
            return Err(VizError::EmptyDataset);
        }

        let headers = ds.column_names();
        let numeric = ds.numeric_columns();
        let total_rows = ds.height();

        // Surface columns with significant numeric parse failures
        let mut warnings = Vec::new();
        for (col_idx, &nan_count) in ds.nan_counts().iter().enumerate() {
            if nan_count == 0 {
                continue;
            }
            let pct = (nan_count as f64 / total_rows as f64) * 100.0;
            if pct > NAN_WARN_PERCENT {
                tracing::warn!(
                    column = %headers[col_idx],
                    nan_count,
                    total_rows,
                    "numeric parse failures"
                );
                warnings.push(format!(
                    "Column '{}': {}/{} values ({:.1}%) failed to parse",
                    headers[col_idx], nan_count, total_rows, pct
                ));
            }
        }

        // Default axes to the first two numeric columns
        self.state.view.x_index = numeric.first().copied().unwrap_or(0);
        self.state.view.y_index = numeric.get(1).or(numeric.first()).copied().unwrap_or(0);
        self.state.view.x_is_timestamp = ds.is_datetime_column(self.state.view.x_index);
        // Strata selection belongs to the previous schema
        self.state.view.sampling.strata_column = None;
        self.state.view.clear_summary();
        self.state.view.reset_bounds = true;

        tracing::info!(rows = total_rows, cols = ds.width(), path = %path.display(), "loaded dataset");

        self.state.data = Some(ds);
        self.state.ui.on_data_loaded();
        self.table_cache = None;

        // Update recent files list
        self.state.recent_files.retain(|p| p != &path);
        self.state.recent_files.insert(0, path.clone());
        self.state.recent_files.truncate(MAX_RECENT_FILES);
        self.state.current_file = Some(path);

        if numeric.is_empty() {
            self.state
                .ui
                .set_error(VizError::NoNumericColumns.user_message());
        } else if !warnings.is_empty() {
            self.state
                .ui
                .set_error(format!("Data parsing warnings:\n{}", warnings.join("\n")));
        } else {
            self.state.ui.clear_error();
        }

        Ok(())
    }

    /// The scene for the single-chart view, if one could be built
    pub fn scene(&self) -> Option<&ChartScene> {
        self.scene.as_ref().and_then(|cache| cache.scene.as_ref())
    }

    /// The charts for the summary grid
    pub fn summary_charts(&self) -> &[SummaryChart] {
        self.summary
            .as_ref()
            .map(|cache| cache.charts.as_slice())
            .unwrap_or(&[])
    }

    /// Column-major string view of the dataset for the data table
    pub fn table_columns(&mut self) -> &[Vec<String>] {
        let version = self.state.ui.data_version;
        let valid = matches!(&self.table_cache, Some((v, _)) if *v == version);
        if !valid {
            let cols: Vec<Vec<String>> = self
                .state
                .data
                .as_ref()
                .map(|ds| {
                    (0..ds.width())
                        .map(|i| ds.column_as_string(i).unwrap_or_default())
                        .collect()
                })
                .unwrap_or_default();
            self.table_cache = Some((version, cols));
        }
        match &self.table_cache {
            Some((_, cols)) => cols,
            None => &[],
        }
    }

    /// Regenerate the summary-view column pairs
    fn generate_summary(&mut self) {
        let numeric = self.state.numeric_columns();
        self.state.view.combinations =
            chart::random_combinations(&mut self.rng, &numeric, MAX_SUMMARY_CHARTS);
        self.state.view.show_summary = true;
        tracing::debug!(pairs = self.state.view.combinations.len(), "summary view generated");
    }

    /// Fire a pending summary request once its debounce window has passed
    fn process_summary_debounce(&mut self, ctx: &egui::Context) {
        let debounce = Duration::from_millis(SUMMARY_DEBOUNCE_MS);
        if self.state.view.take_due_summary_request(debounce) {
            self.generate_summary();
        } else if self.state.view.summary_pending() {
            ctx.request_repaint_after(Duration::from_millis(SUMMARY_DEBOUNCE_MS / 4));
        }
    }

    /// Rebuild cached scenes whose inputs changed since the last frame
    fn refresh_scenes(&mut self) {
        profiling::scope!("refresh_scenes");

        let Some(ds) = &self.state.data else {
            self.scene = None;
            self.summary = None;
            return;
        };

        let version = self.state.ui.data_version;
        let config = self.state.view.chart_config();

        let key = (version, config.clone());
        let stale = self.scene.as_ref().map(|c| c.key != key).unwrap_or(true);
        if stale {
            let scene = match chart::build_scene(ds, &config, &mut self.rng) {
                Ok(scene) => Some(scene),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to build chart scene");
                    self.state.ui.set_error(e.user_message());
                    None
                }
            };
            self.scene = Some(SceneCache { key, scene });
        }

        if self.state.view.show_summary {
            let key = (version, config.clone(), self.state.view.combinations.clone());
            let stale = self.summary.as_ref().map(|c| c.key != key).unwrap_or(true);
            if stale {
                let mut charts = Vec::with_capacity(key.2.len());
                for &(x_index, y_index) in &key.2 {
                    let pair_config = ChartConfig {
                        x_index,
                        y_index,
                        ..config.clone()
                    };
                    let scene = chart::build_scene(ds, &pair_config, &mut self.rng).ok();
                    charts.push(SummaryChart {
                        pair: (x_index, y_index),
                        scene,
                    });
                }
                self.summary = Some(SummaryCache { key, charts });
            }
        } else {
            self.summary = None;
        }
    }

    pub fn save_config(&mut self) {
        let view = &self.state.view;
        let config = ViewConfig {
            chart_kind: view.chart_kind,
            sampling_method: view.sampling.method,
            sampling_rate: view.sampling.rate,
            sampling_interval: view.sampling.interval,
            bin_count: view.bin_count,
            show_grid: view.show_grid,
            dark_mode: view.dark_mode,
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(crate::constants::config::CONFIG_FILE)
            .save_file()
        {
            match serde_json::to_string_pretty(&config) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        self.state
                            .ui
                            .set_error(format!("Failed to save config: {}", e));
                    }
                }
                Err(e) => {
                    self.state
                        .ui
                        .set_error(format!("Failed to serialize config: {}", e));
                }
            }
        }
    }

    pub fn load_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<ViewConfig>(&contents) {
                    Ok(config) => {
                        let view = &mut self.state.view;
                        view.chart_kind = config.chart_kind;
                        view.sampling.method = config.sampling_method;
                        view.sampling.rate = config.sampling_rate;
                        view.sampling.interval = config.sampling_interval;
                        view.bin_count = config.bin_count;
                        view.show_grid = config.show_grid;
                        view.dark_mode = config.dark_mode;
                    }
                    Err(e) => {
                        self.state
                            .ui
                            .set_error(format!("Failed to parse config file: {}", e));
                    }
                },
                Err(e) => {
                    self.state
                        .ui
                        .set_error(format!("Failed to read config file: {}", e));
                }
            }
        }
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(ref file) = self.state.current_file {
                if let Some(name) = file.file_name() {
                    ui.label(format!("📄 {}", name.to_string_lossy()))
                        .on_hover_text(file.display().to_string());
                    ui.separator();
                }
            }
            if self.state.has_data() {
                ui.label(format!(
                    "Rows: {} | Cols: {}",
                    self.state.row_count(),
                    self.state.column_count()
                ));
                if let Some(scene) = self.scene() {
                    ui.separator();
                    ui.label(format!("Marks: {}", scene.mark_count()));
                }
            }

            let mut dismissed = false;
            if let Some(msg) = &self.state.ui.error_message {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(230, 100, 80), msg);
                if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                    dismissed = true;
                }
            }
            if dismissed {
                self.state.ui.clear_error();
            }
        });
    }
}

impl eframe::App for SampleViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.view.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.process_summary_debounce(ctx);
        self.refresh_scenes();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::render_toolbar(self, ctx, ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        if self.state.view.show_stats_panel && self.state.has_data() {
            egui::SidePanel::left("stats_panel")
                .default_width(STATS_PANEL_WIDTH)
                .show(ctx, |ui| {
                    ui::render_stats_panel(self, ui);
                });
        }

        if self.state.view.show_data_table && self.state.has_data() {
            egui::SidePanel::right("data_panel")
                .default_width(DATA_PANEL_WIDTH)
                .show(ctx, |ui| {
                    ui::render_data_table(self, ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.has_data() {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.heading("Drop a CSV file here, or use 📂 Open");
                });
            } else if self.state.view.show_summary {
                ui::render_summary_grid(self, ui);
            } else {
                ui::render_chart(self, ui);
            }
        });

        profiling::finish_frame!();
    }
}
