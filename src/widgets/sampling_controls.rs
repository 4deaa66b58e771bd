//! Sampling method controls widget

use egui::{Response, Ui};

use crate::constants::sampling::MAX_INTERVAL;
use crate::sampling::{SamplingConfig, SamplingMethod};

/// A reusable widget for sampling strategy selection and parameters
pub struct SamplingControls<'a> {
    config: &'a mut SamplingConfig,
    headers: &'a [String],
}

impl<'a> SamplingControls<'a> {
    /// Create a new sampling controls widget
    pub fn new(config: &'a mut SamplingConfig, headers: &'a [String]) -> Self {
        Self { config, headers }
    }

    /// Show the sampling controls
    pub fn show(self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            egui::ComboBox::from_id_salt("sampling_method")
                .selected_text(self.config.method.label())
                .show_ui(ui, |ui| {
                    for method in SamplingMethod::ALL {
                        ui.selectable_value(&mut self.config.method, method, method.label());
                    }
                });

            if self.config.method.uses_rate() {
                ui.horizontal(|ui| {
                    ui.label("Rate:");
                    ui.add(egui::Slider::new(&mut self.config.rate, 0.0..=1.0).step_by(0.05));
                });
            }

            if self.config.method.uses_interval() {
                ui.horizontal(|ui| {
                    ui.label("Interval:");
                    ui.add(egui::Slider::new(&mut self.config.interval, 1..=MAX_INTERVAL));
                });
            }

            if self.config.method.uses_strata() {
                let selected = self
                    .config
                    .strata_column
                    .and_then(|i| self.headers.get(i))
                    .map(String::as_str)
                    .unwrap_or("(entire dataset)");
                egui::ComboBox::from_label("Stratify by")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        // No column means one stratum spanning the dataset
                        ui.selectable_value(&mut self.config.strata_column, None, "(entire dataset)");
                        for (i, name) in self.headers.iter().enumerate() {
                            ui.selectable_value(&mut self.config.strata_column, Some(i), name);
                        }
                    });
            }
        })
        .response
    }
}
