//! Pure chart construction: (dataset, config) -> scene
//!
//! Sampling and binning happen here, once per input change; rendering reads
//! the resulting scene every frame without touching the dataset.

use std::f64::consts::TAU;

use rand::Rng;

use crate::chart::histogram::{Bin, bin_values, y_domain_max};
use crate::chart::{ChartConfig, ChartKind};
use crate::data::DataSource;
use crate::error::{Result, VizError};
use crate::sampling::sample_indices;

/// One scatter/line mark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMark {
    pub x: f64,
    pub y: f64,
}

/// One pie wedge. Angles are measured clockwise from 12 o'clock, in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Source row in the unsampled dataset
    pub row: usize,
    pub value: f64,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// A renderer-agnostic chart description
#[derive(Debug, Clone, PartialEq)]
pub enum ChartScene {
    Scatter { points: Vec<PointMark> },
    Histogram { bins: Vec<Bin>, y_max: f64 },
    Line { points: Vec<PointMark> },
    Pie { slices: Vec<PieSlice> },
}

impl ChartScene {
    /// Number of marks the scene will draw
    pub fn mark_count(&self) -> usize {
        match self {
            ChartScene::Scatter { points } | ChartScene::Line { points } => points.len(),
            ChartScene::Histogram { bins, .. } => bins.len(),
            ChartScene::Pie { slices } => slices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mark_count() == 0
    }
}

/// Build a chart scene: sample the dataset, then derive the marks for the
/// configured chart kind. NaN coordinates are filtered here so axis domains
/// stay finite.
pub fn build_scene<R: Rng>(
    ds: &DataSource,
    config: &ChartConfig,
    rng: &mut R,
) -> Result<ChartScene> {
    profiling::scope!("build_scene");

    let len = ds.height();
    if len == 0 {
        return Err(VizError::EmptyDataset);
    }

    // Strata keys are only materialized when the strategy needs them; an
    // unset or out-of-range column means a single stratum.
    let strata = if config.sampling.method.uses_strata() {
        config
            .sampling
            .strata_column
            .filter(|&idx| idx < ds.width())
            .map(|idx| ds.column_as_string(idx))
            .transpose()?
    } else {
        None
    };

    let indices = sample_indices(rng, len, &config.sampling, strata.as_deref())?;
    tracing::debug!(
        total = len,
        sampled = indices.len(),
        method = config.sampling.method.label(),
        "sampled dataset"
    );

    let xs = ds.column_as_f64(config.x_index)?;
    let ys = ds.column_as_f64(config.y_index)?;

    let scene = match config.kind {
        ChartKind::Scatter => ChartScene::Scatter {
            points: collect_points(&indices, &xs, &ys),
        },
        ChartKind::Line => {
            let mut points = collect_points(&indices, &xs, &ys);
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
            ChartScene::Line { points }
        }
        ChartKind::Histogram => {
            let sampled_x: Vec<f64> = indices.iter().map(|&i| xs[i]).collect();
            let bins = bin_values(&sampled_x, config.bin_count);
            let y_max = y_domain_max(&bins);
            ChartScene::Histogram { bins, y_max }
        }
        ChartKind::Pie => ChartScene::Pie {
            slices: collect_slices(&indices, &ys),
        },
    };

    Ok(scene)
}

fn collect_points(indices: &[usize], xs: &[f64], ys: &[f64]) -> Vec<PointMark> {
    indices
        .iter()
        .filter_map(|&i| {
            let (x, y) = (xs[i], ys[i]);
            (x.is_finite() && y.is_finite()).then_some(PointMark { x, y })
        })
        .collect()
}

/// Pie wedges from positive finite values, angles proportional to value share
fn collect_slices(indices: &[usize], ys: &[f64]) -> Vec<PieSlice> {
    let entries: Vec<(usize, f64)> = indices
        .iter()
        .filter_map(|&i| {
            let v = ys[i];
            (v.is_finite() && v > 0.0).then_some((i, v))
        })
        .collect();

    let total: f64 = entries.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    entries
        .into_iter()
        .map(|(row, value)| {
            let fraction = value / total;
            let start_angle = angle;
            angle += fraction * TAU;
            PieSlice {
                row,
                value,
                fraction,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{SamplingConfig, SamplingMethod};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;
    use tempfile::Builder;

    fn dataset(rows: &[(f64, f64)]) -> DataSource {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y").unwrap();
        for (x, y) in rows {
            writeln!(file, "{},{}", x, y).unwrap();
        }
        file.flush().unwrap();
        DataSource::load(file.path()).unwrap()
    }

    fn no_sampling(kind: ChartKind) -> ChartConfig {
        ChartConfig {
            kind,
            x_index: 0,
            y_index: 1,
            sampling: SamplingConfig {
                method: SamplingMethod::None,
                ..SamplingConfig::default()
            },
            ..ChartConfig::default()
        }
    }

    #[test]
    fn test_scatter_scene() {
        let ds = dataset(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
        let mut rng = StdRng::seed_from_u64(1);

        let scene = build_scene(&ds, &no_sampling(ChartKind::Scatter), &mut rng).unwrap();
        match scene {
            ChartScene::Scatter { points } => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[0], PointMark { x: 1.0, y: 2.0 });
            }
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_line_scene_sorted_by_x() {
        let ds = dataset(&[(5.0, 1.0), (1.0, 2.0), (3.0, 3.0)]);
        let mut rng = StdRng::seed_from_u64(1);

        let scene = build_scene(&ds, &no_sampling(ChartKind::Line), &mut rng).unwrap();
        match scene {
            ChartScene::Line { points } => {
                let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![1.0, 3.0, 5.0]);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_systematic_scatter_keeps_every_fifth_row() {
        // Sequential x 1..=10, interval 5: rows 0 and 5 (x values 1 and 6)
        let rows: Vec<(f64, f64)> = (1..=10).map(|i| (i as f64, i as f64 * 10.0)).collect();
        let ds = dataset(&rows);
        let mut rng = StdRng::seed_from_u64(1);

        let config = ChartConfig {
            sampling: SamplingConfig {
                method: SamplingMethod::Systematic,
                ..SamplingConfig::default()
            },
            ..no_sampling(ChartKind::Scatter)
        };
        let scene = build_scene(&ds, &config, &mut rng).unwrap();
        match scene {
            ChartScene::Scatter { points } => {
                let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![1.0, 6.0]);
            }
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_histogram_scene_counts_and_buffer() {
        let rows: Vec<(f64, f64)> = (1..=10).map(|i| (i as f64, 0.0)).collect();
        let ds = dataset(&rows);
        let mut rng = StdRng::seed_from_u64(1);

        let config = ChartConfig {
            bin_count: 5,
            ..no_sampling(ChartKind::Histogram)
        };
        let scene = build_scene(&ds, &config, &mut rng).unwrap();
        match scene {
            ChartScene::Histogram { bins, y_max } => {
                assert_eq!(bins.len(), 5);
                let total: usize = bins.iter().map(|b| b.count).sum();
                assert_eq!(total, 10);
                let max_count = bins.iter().map(|b| b.count).max().unwrap();
                assert_eq!(y_max, (max_count + 5) as f64);
            }
            other => panic!("expected histogram, got {:?}", other),
        }
    }

    #[test]
    fn test_pie_scene_fractions_sum_to_one() {
        let ds = dataset(&[(1.0, 10.0), (2.0, 30.0), (3.0, 60.0)]);
        let mut rng = StdRng::seed_from_u64(1);

        let scene = build_scene(&ds, &no_sampling(ChartKind::Pie), &mut rng).unwrap();
        match scene {
            ChartScene::Pie { slices } => {
                assert_eq!(slices.len(), 3);
                let total: f64 = slices.iter().map(|s| s.fraction).sum();
                assert!((total - 1.0).abs() < 1e-12);
                assert!((slices[2].end_angle - TAU).abs() < 1e-9);
                assert_eq!(slices[1].row, 1);
            }
            other => panic!("expected pie, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_rows_filtered_from_points() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "1.0,2.0").unwrap();
        writeln!(file, ",3.0").unwrap();
        writeln!(file, "4.0,").unwrap();
        file.flush().unwrap();
        let ds = DataSource::load(file.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let scene = build_scene(&ds, &no_sampling(ChartKind::Scatter), &mut rng).unwrap();
        match scene {
            ChartScene::Scatter { points } => assert_eq!(points.len(), 1),
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_stratified_uses_column_keys() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y,team").unwrap();
        for i in 0..8 {
            writeln!(file, "{},{},{}", i, i * 2, if i < 4 { "a" } else { "b" }).unwrap();
        }
        file.flush().unwrap();
        let ds = DataSource::load(file.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let config = ChartConfig {
            sampling: SamplingConfig {
                method: SamplingMethod::Stratified,
                strata_column: Some(2),
                ..SamplingConfig::default()
            },
            ..no_sampling(ChartKind::Scatter)
        };
        let scene = build_scene(&ds, &config, &mut rng).unwrap();
        match scene {
            // ceil(4 * 0.5) from each of the two teams
            ChartScene::Scatter { points } => assert_eq!(points.len(), 4),
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y").unwrap();
        file.flush().unwrap();
        let ds = DataSource::load(file.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            build_scene(&ds, &no_sampling(ChartKind::Scatter), &mut rng),
            Err(VizError::EmptyDataset)
        ));
    }
}
