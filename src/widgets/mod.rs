//! Reusable UI widgets for SampleViz

mod sampling_controls;

pub use sampling_controls::SamplingControls;
