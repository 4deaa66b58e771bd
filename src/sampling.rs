//! Row-sampling strategies shared by every chart kind.
//!
//! All strategies operate on row indices so the same reduction logic serves
//! scatter, histogram, line, and pie construction. Randomized strategies take
//! the rng as a parameter; tests seed a `StdRng`, the app passes its own.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::sampling::{DEFAULT_INTERVAL, DEFAULT_RATE};
use crate::error::{Result, VizError};

/// The available sampling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingMethod {
    /// Use the dataset as-is
    None,
    /// Bernoulli trial per row: keep with probability `rate`
    Random,
    /// Exactly `ceil(n * rate)` distinct rows, chosen uniformly
    SimpleRandom,
    /// Contiguous chunks of the sequence, all rows of the chosen chunks kept
    Cluster,
    /// Simple random sampling within each stratum
    Stratified,
    /// Bernoulli sampling within each stratum
    StratifiedRandom,
    /// Every k-th row starting at index 0
    Systematic,
}

impl SamplingMethod {
    pub const ALL: [SamplingMethod; 7] = [
        SamplingMethod::None,
        SamplingMethod::Random,
        SamplingMethod::SimpleRandom,
        SamplingMethod::Cluster,
        SamplingMethod::Stratified,
        SamplingMethod::StratifiedRandom,
        SamplingMethod::Systematic,
    ];

    /// Human-readable label for UI combo boxes
    pub fn label(&self) -> &'static str {
        match self {
            SamplingMethod::None => "No Sampling",
            SamplingMethod::Random => "Random Sampling",
            SamplingMethod::SimpleRandom => "Simple Random Sampling",
            SamplingMethod::Cluster => "Cluster Random Sampling",
            SamplingMethod::Stratified => "Stratified Sampling",
            SamplingMethod::StratifiedRandom => "Stratified Random Sampling",
            SamplingMethod::Systematic => "Systematic Sampling",
        }
    }

    /// Whether the strategy consumes the reduction rate
    pub fn uses_rate(&self) -> bool {
        !matches!(self, SamplingMethod::None | SamplingMethod::Systematic)
    }

    /// Whether the strategy consumes the systematic interval
    pub fn uses_interval(&self) -> bool {
        matches!(self, SamplingMethod::Systematic)
    }

    /// Whether the strategy groups rows by a stratification column
    pub fn uses_strata(&self) -> bool {
        matches!(
            self,
            SamplingMethod::Stratified | SamplingMethod::StratifiedRandom
        )
    }
}

impl Default for SamplingMethod {
    fn default() -> Self {
        SamplingMethod::Random
    }
}

/// Parameters for a sampling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub method: SamplingMethod,

    /// Reduction rate in [0, 1] for the rate-based strategies
    pub rate: f64,

    /// Keep-every-k interval for systematic sampling
    pub interval: usize,

    /// Column index used to group rows into strata. When unset (or when the
    /// index is out of range) the whole dataset forms a single stratum, so
    /// the stratified variants degrade to their whole-dataset counterparts.
    pub strata_column: Option<usize>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            method: SamplingMethod::default(),
            rate: DEFAULT_RATE,
            interval: DEFAULT_INTERVAL,
            strata_column: None,
        }
    }
}

/// Select row indices from a sequence of length `len` according to `config`.
///
/// `strata` supplies the stratification key per row for the stratified
/// variants; `None` means a single stratum. Returned indices are in the order
/// each strategy produces them (strata concatenate in first-occurrence order).
pub fn sample_indices<R: Rng>(
    rng: &mut R,
    len: usize,
    config: &SamplingConfig,
    strata: Option<&[String]>,
) -> Result<Vec<usize>> {
    if config.method.uses_rate() && !(0.0..=1.0).contains(&config.rate) {
        return Err(VizError::InvalidSamplingRate { rate: config.rate });
    }
    if config.method.uses_interval() && config.interval == 0 {
        return Err(VizError::InvalidInterval);
    }

    let indices = match config.method {
        SamplingMethod::None => (0..len).collect(),
        SamplingMethod::Random => bernoulli_indices(rng, len, config.rate),
        SamplingMethod::SimpleRandom => simple_random_indices(rng, len, config.rate),
        SamplingMethod::Cluster => cluster_indices(len, config.rate),
        SamplingMethod::Stratified => {
            let mut out = Vec::new();
            for group in group_strata(len, strata) {
                let picked = simple_random_indices(rng, group.len(), config.rate);
                out.extend(picked.into_iter().map(|i| group[i]));
            }
            out
        }
        SamplingMethod::StratifiedRandom => {
            let mut out = Vec::new();
            for group in group_strata(len, strata) {
                let picked = bernoulli_indices(rng, group.len(), config.rate);
                out.extend(picked.into_iter().map(|i| group[i]));
            }
            out
        }
        SamplingMethod::Systematic => systematic_indices(len, config.interval),
    };

    Ok(indices)
}

/// Keep each index independently with probability `rate`
fn bernoulli_indices<R: Rng>(rng: &mut R, len: usize, rate: f64) -> Vec<usize> {
    (0..len).filter(|_| rng.gen_bool(rate)).collect()
}

/// Choose exactly `ceil(len * rate)` distinct indices by rejection sampling.
/// Output order is insertion order of the chosen set.
fn simple_random_indices<R: Rng>(rng: &mut R, len: usize, rate: f64) -> Vec<usize> {
    let target = (len as f64 * rate).ceil() as usize;
    let mut chosen = Vec::with_capacity(target);
    let mut seen = HashSet::with_capacity(target);

    while chosen.len() < target {
        let idx = rng.gen_range(0..len);
        if seen.insert(idx) {
            chosen.push(idx);
        }
    }

    chosen
}

/// Partition the sequence into `ceil(len * rate)` contiguous clusters of
/// `floor(len / clusters)` rows and keep ALL rows of every cluster. Coverage
/// is `clusters * cluster_size` rows, not a `rate` fraction of the data.
fn cluster_indices(len: usize, rate: f64) -> Vec<usize> {
    let clusters = (len as f64 * rate).ceil() as usize;
    if clusters == 0 {
        return Vec::new();
    }
    let cluster_size = len / clusters;

    // clusters * cluster_size never exceeds len
    (0..clusters)
        .flat_map(|c| c * cluster_size..(c + 1) * cluster_size)
        .collect()
}

/// Keep every `interval`-th index starting at 0
fn systematic_indices(len: usize, interval: usize) -> Vec<usize> {
    (0..len).step_by(interval).collect()
}

/// Group row indices by stratum key, groups ordered by first occurrence.
/// `None` (or an empty key slice) yields a single group of all rows.
fn group_strata(len: usize, strata: Option<&[String]>) -> Vec<Vec<usize>> {
    let Some(keys) = strata else {
        return vec![(0..len).collect()];
    };

    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for row in 0..len {
        let key = keys.get(row).map(String::as_str).unwrap_or("");
        let slot = *order.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(method: SamplingMethod) -> SamplingConfig {
        SamplingConfig {
            method,
            ..SamplingConfig::default()
        }
    }

    #[test]
    fn test_none_returns_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = sample_indices(&mut rng, 5, &config(SamplingMethod::None), None).unwrap();
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_systematic_interval_five() {
        // 10 rows, interval 5: rows at indices 0 and 5
        let mut rng = StdRng::seed_from_u64(1);
        let out = sample_indices(&mut rng, 10, &config(SamplingMethod::Systematic), None).unwrap();
        assert_eq!(out, vec![0, 5]);
    }

    #[test]
    fn test_systematic_length_and_positions() {
        let mut rng = StdRng::seed_from_u64(1);
        for (len, interval) in [(100, 7), (99, 3), (1, 5), (0, 2)] {
            let cfg = SamplingConfig {
                method: SamplingMethod::Systematic,
                interval,
                ..SamplingConfig::default()
            };
            let out = sample_indices(&mut rng, len, &cfg, None).unwrap();
            assert_eq!(out.len(), len.div_ceil(interval));
            for (i, &idx) in out.iter().enumerate() {
                assert_eq!(idx, i * interval);
            }
        }
    }

    #[test]
    fn test_simple_random_exact_size_distinct() {
        // 100 rows at rate 0.5 yields exactly 50 distinct rows every run
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out =
                sample_indices(&mut rng, 100, &config(SamplingMethod::SimpleRandom), None).unwrap();
            assert_eq!(out.len(), 50);
            let distinct: HashSet<_> = out.iter().copied().collect();
            assert_eq!(distinct.len(), 50);
            assert!(out.iter().all(|&i| i < 100));
        }
    }

    #[test]
    fn test_simple_random_rate_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = SamplingConfig {
            method: SamplingMethod::SimpleRandom,
            rate: 0.0,
            ..SamplingConfig::default()
        };
        assert!(sample_indices(&mut rng, 100, &cfg, None).unwrap().is_empty());

        let cfg = SamplingConfig {
            method: SamplingMethod::SimpleRandom,
            rate: 1.0,
            ..SamplingConfig::default()
        };
        let out = sample_indices(&mut rng, 20, &cfg, None).unwrap();
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn test_bernoulli_rate_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = SamplingConfig {
            method: SamplingMethod::Random,
            rate: 0.0,
            ..SamplingConfig::default()
        };
        assert!(sample_indices(&mut rng, 50, &cfg, None).unwrap().is_empty());

        let cfg = SamplingConfig {
            method: SamplingMethod::Random,
            rate: 1.0,
            ..SamplingConfig::default()
        };
        let out = sample_indices(&mut rng, 50, &cfg, None).unwrap();
        assert_eq!(out, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_cluster_covers_leading_rows() {
        // 10 rows at rate 0.3: ceil(3) clusters of floor(10/3) = 3 rows,
        // covering exactly the first 9 rows
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = SamplingConfig {
            method: SamplingMethod::Cluster,
            rate: 0.3,
            ..SamplingConfig::default()
        };
        let out = sample_indices(&mut rng, 10, &cfg, None).unwrap();
        assert_eq!(out, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_cluster_coverage_formula() {
        let mut rng = StdRng::seed_from_u64(1);
        for (len, rate) in [(100, 0.5), (17, 0.25), (8, 1.0), (1000, 0.1)] {
            let cfg = SamplingConfig {
                method: SamplingMethod::Cluster,
                rate,
                ..SamplingConfig::default()
            };
            let clusters = (len as f64 * rate).ceil() as usize;
            let cluster_size = len / clusters;
            let out = sample_indices(&mut rng, len, &cfg, None).unwrap();
            assert_eq!(out, (0..clusters * cluster_size).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_stratified_samples_within_groups() {
        let mut rng = StdRng::seed_from_u64(3);
        // 6 rows of "a", 4 rows of "b"
        let strata: Vec<String> = ["a"; 6]
            .iter()
            .chain(["b"; 4].iter())
            .map(|s| s.to_string())
            .collect();
        let out = sample_indices(
            &mut rng,
            10,
            &config(SamplingMethod::Stratified),
            Some(&strata),
        )
        .unwrap();

        // ceil(6 * 0.5) + ceil(4 * 0.5) rows, group "a" first
        assert_eq!(out.len(), 5);
        assert!(out[..3].iter().all(|&i| i < 6));
        assert!(out[3..].iter().all(|&i| (6..10).contains(&i)));
    }

    #[test]
    fn test_stratified_without_strata_degrades_to_simple_random() {
        // Single stratum: behaves like simple random over the whole dataset
        let mut rng = StdRng::seed_from_u64(9);
        let out =
            sample_indices(&mut rng, 40, &config(SamplingMethod::Stratified), None).unwrap();
        assert_eq!(out.len(), 20);
        let distinct: HashSet<_> = out.iter().copied().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn test_stratified_random_indices_belong_to_their_group() {
        let mut rng = StdRng::seed_from_u64(11);
        let strata: Vec<String> = (0..30).map(|i| format!("g{}", i % 3)).collect();
        let out = sample_indices(
            &mut rng,
            30,
            &config(SamplingMethod::StratifiedRandom),
            Some(&strata),
        )
        .unwrap();

        // Groups concatenate in first-occurrence order (g0, g1, g2), so the
        // stratum key is non-decreasing across the output
        let groups: Vec<usize> = out.iter().map(|&i| i % 3).collect();
        assert!(groups.windows(2).all(|w| w[0] <= w[1]));
        assert!(out.iter().all(|&i| i < 30));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = SamplingConfig {
            method: SamplingMethod::Random,
            rate: 1.5,
            ..SamplingConfig::default()
        };
        assert!(matches!(
            sample_indices(&mut rng, 10, &cfg, None),
            Err(VizError::InvalidSamplingRate { .. })
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = SamplingConfig {
            method: SamplingMethod::Systematic,
            interval: 0,
            ..SamplingConfig::default()
        };
        assert!(matches!(
            sample_indices(&mut rng, 10, &cfg, None),
            Err(VizError::InvalidInterval)
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let mut rng = StdRng::seed_from_u64(1);
        for method in SamplingMethod::ALL {
            let out = sample_indices(&mut rng, 0, &config(method), None).unwrap();
            assert!(out.is_empty(), "{:?} on empty input", method);
        }
    }
}
