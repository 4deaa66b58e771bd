//! Histogram binning over the domain [0, max]

/// One histogram bin: [lower, upper) except the last bin, which is closed
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Partition `[0, max(values)]` into `bin_count` equal-width bins and count
/// membership. NaN values and values outside the domain are dropped, so bin
/// counts sum to the number of in-domain finite values.
///
/// Returns an empty vec when there is nothing to bin (no finite values, or a
/// non-positive domain).
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<Bin> {
    if bin_count == 0 {
        return Vec::new();
    }

    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return Vec::new();
    }

    let width = max / bin_count as f64;
    let mut counts = vec![0usize; bin_count];

    for &v in values {
        if !v.is_finite() || v < 0.0 || v > max {
            continue;
        }
        let idx = ((v / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Headroom added above the tallest bin when deriving the Y-axis domain,
/// stepped by frequency magnitude
pub fn frequency_buffer(max_count: usize) -> usize {
    if max_count < 99 {
        5
    } else if max_count < 999 {
        100
    } else if max_count < 2000 {
        300
    } else {
        799
    }
}

/// Y-axis upper bound for a set of bins: max bin count plus the buffer
pub fn y_domain_max(bins: &[Bin]) -> f64 {
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    (max_count + frequency_buffer(max_count)) as f64
}
