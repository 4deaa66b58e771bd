#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Data module for Polars-based data handling
mod data;

// Application constants
mod constants;

// Error handling
mod error;

// Sampling strategies (the shared data-reduction core)
mod sampling;

// Chart scene construction
mod chart;

// Application state modules
mod state;

// Application shell and UI
mod app;
mod ui;
mod widgets;

use app::SampleViz;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sampleviz=info")),
        )
        .init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "SampleViz - CSV Sampling Visualizer",
        options,
        Box::new(|_| Ok(Box::new(SampleViz::default()))),
    )
    .unwrap();
}
