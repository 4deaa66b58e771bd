//! Random column-pair combinations for the summary view

use rand::Rng;
use rand::seq::SliceRandom;

/// Generate up to `cap` random (x, y) column pairs: shuffle the candidate
/// columns, pair each of the first `cap` shuffled columns with every later
/// one, and truncate to `cap` pairs.
pub fn random_combinations<R: Rng>(
    rng: &mut R,
    columns: &[usize],
    cap: usize,
) -> Vec<(usize, usize)> {
    let mut shuffled = columns.to_vec();
    shuffled.shuffle(rng);

    let limit = cap.min(shuffled.len());
    let mut pairs = Vec::new();
    for i in 0..limit {
        for j in (i + 1)..limit {
            pairs.push((shuffled[i], shuffled[j]));
        }
    }
    pairs.truncate(cap);
    pairs
}
