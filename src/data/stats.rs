//! Per-column summary statistics for the stats panel

/// Number of bins in the sparkline histogram
const SPARKLINE_BINS: usize = 20;

/// Statistics for a single column, NaN values excluded
#[derive(Debug, Clone, Default)]
pub struct ColumnStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub p5: f64,
    pub p25: f64,
    pub p75: f64,
    pub p95: f64,
    /// Bin counts for the sparkline
    pub histogram: Vec<u32>,
    /// Max bin count for scaling
    pub histogram_max: u32,
}

/// Calculate comprehensive statistics for a column
pub fn calculate_stats(values: &[f64]) -> ColumnStats {
    let mut clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.is_empty() {
        return ColumnStats::default();
    }

    let count = clean.len();
    let mean = clean.iter().sum::<f64>() / count as f64;

    clean.sort_by(|a, b| a.total_cmp(b));

    let min = clean[0];
    let max = clean[count - 1];

    // Percentiles using linear interpolation
    let percentile = |p: f64| -> f64 {
        let idx = p * (count - 1) as f64;
        let lo = idx.floor() as usize;
        let hi = (lo + 1).min(count - 1);
        let frac = idx - lo as f64;
        clean[lo] * (1.0 - frac) + clean[hi] * frac
    };

    let variance = clean.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    let mut histogram = vec![0u32; SPARKLINE_BINS];
    let range = max - min;
    if range > 0.0 {
        let bin_width = range / SPARKLINE_BINS as f64;
        for &v in &clean {
            let bin = (((v - min) / bin_width).floor() as usize).min(SPARKLINE_BINS - 1);
            histogram[bin] += 1;
        }
    } else {
        // All values identical
        histogram[SPARKLINE_BINS / 2] = count as u32;
    }
    let histogram_max = *histogram.iter().max().unwrap_or(&1);

    ColumnStats {
        count,
        min,
        max,
        mean,
        median: percentile(0.5),
        std_dev: variance.sqrt(),
        p5: percentile(0.05),
        p25: percentile(0.25),
        p75: percentile(0.75),
        p95: percentile(0.95),
        histogram,
        histogram_max,
    }
}
