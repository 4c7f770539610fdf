//! # Pairwise Distances
//!
//! The condensed (upper-triangle) representation of a symmetric,
//! zero-diagonal distance matrix, and the builder that fills one from an
//! item sequence and a [`DistanceMetric`].
//!
//! ## Canonical Pair Order
//!
//! For `N` items the condensed vector holds `N(N-1)/2` entries, one per pair
//! `(i, j)` with `0 <= i < j < N`, with `i` as the outer (slower) index and
//! `j` as the inner (faster) index. For `N = 4`:
//!
//! ```text
//! position:  0      1      2      3      4      5
//! pair:     (0,1)  (0,2)  (0,3)  (1,2)  (1,3)  (2,3)
//! ```
//!
//! Two condensed vectors line up entry-for-entry only because both were
//! enumerated in this order.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;
use crate::error::{MantelError, Result};

/// Number of pairs among `n` items.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Recover `N` from a condensed length, if the length is `N(N-1)/2` for
/// some `N >= 2`.
pub fn triangular_root(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    // Float estimate, then confirm exactly on the neighbours.
    let estimate = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    (estimate.saturating_sub(1)..=estimate + 1).find(|&n| n >= 2 && pair_count(n) == len)
}

/// Position of pair `(i, j)` in the condensed vector of `n` items.
///
/// Requires `i < j < n`.
pub fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n, "pair ({i}, {j}) out of order for n = {n}");
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

/// Iterator over all pairs `(i, j)` of `n` items in canonical order.
pub fn pair_indices(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

/// Condensed vector of pairwise distances over `N >= 2` items.
///
/// Every entry is finite and non-negative; the length is always triangular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CondensedDistances {
    n: usize,
    values: Vec<f64>,
}

impl CondensedDistances {
    /// Validate and wrap a condensed vector.
    pub fn from_vec(values: Vec<f64>) -> Result<Self> {
        let n = triangular_root(values.len()).ok_or_else(|| {
            MantelError::InvalidInput(format!(
                "condensed vector length {} is not N(N-1)/2 for any N >= 2",
                values.len()
            ))
        })?;
        if let Some((pos, bad)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(MantelError::InvalidInput(format!(
                "distance at position {pos} is {bad}; distances must be finite and non-negative"
            )));
        }
        Ok(Self { n, values })
    }

    /// Number of underlying items `N`.
    pub fn n_items(&self) -> usize {
        self.n
    }

    /// Number of pairs, `N(N-1)/2`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a valid condensed vector covers at least one pair.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Distance between items `i` and `j`. Zero on the diagonal, `None`
    /// when either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.n || j >= self.n {
            return None;
        }
        Some(self.lookup(i, j))
    }

    /// Expand into the full symmetric matrix.
    pub fn to_square(&self) -> SquareMatrix {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        for ((i, j), &d) in pair_indices(n).zip(&self.values) {
            data[i * n + j] = d;
            data[j * n + i] = d;
        }
        SquareMatrix { n, data }
    }

    /// Wrap values already known to satisfy the invariants.
    pub(crate) fn from_parts(n: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), pair_count(n));
        Self { n, values }
    }

    pub(crate) fn lookup(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.values[condensed_index(self.n, i, j)],
            std::cmp::Ordering::Greater => self.values[condensed_index(self.n, j, i)],
        }
    }
}

impl TryFrom<Vec<f64>> for CondensedDistances {
    type Error = MantelError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_vec(values)
    }
}

impl From<CondensedDistances> for Vec<f64> {
    fn from(d: CondensedDistances) -> Self {
        d.values
    }
}

impl AsRef<[f64]> for CondensedDistances {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Dense `N x N` symmetric distance matrix, row-major, zero diagonal.
///
/// Only used as a transient working form; the condensed vector is the
/// representation passed between stages.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn n(&self) -> usize {
        self.n
    }

    /// Entry at row `i`, column `j`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.n || j >= self.n {
            return None;
        }
        Some(self.data[i * self.n + j])
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.n).then(|| &self.data[i * self.n..(i + 1) * self.n])
    }

    /// Read the upper triangle back out in canonical order.
    pub fn to_condensed(&self) -> Result<CondensedDistances> {
        let n = self.n;
        let values = pair_indices(n).map(|(i, j)| self.data[i * n + j]).collect();
        CondensedDistances::from_vec(values)
    }

    pub(crate) fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }
}

/// Distances between every pair of `items`, in canonical pair order.
///
/// Fails with `InvalidInput` when there are fewer than two items or the
/// metric yields a negative or non-finite value. Deterministic: identical
/// input always produces an identical vector.
pub fn pairwise_distances<T, M>(items: &[T], metric: &M) -> Result<CondensedDistances>
where
    M: DistanceMetric<T> + ?Sized,
{
    if items.len() < 2 {
        return Err(MantelError::InvalidInput(format!(
            "need at least 2 items to form a pair, got {}",
            items.len()
        )));
    }
    let values = pair_indices(items.len())
        .map(|(i, j)| metric.distance(&items[i], &items[j]))
        .collect();
    CondensedDistances::from_vec(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{normalized_edit_distance, NormalizedLevenshtein};

    #[test]
    fn canonical_order_for_four_items() {
        let pairs: Vec<_> = pair_indices(4).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        for (pos, (i, j)) in pairs.into_iter().enumerate() {
            assert_eq!(condensed_index(4, i, j), pos);
        }
    }

    #[test]
    fn triangular_lengths() {
        assert_eq!(triangular_root(1), Some(2));
        assert_eq!(triangular_root(3), Some(3));
        assert_eq!(triangular_root(6), Some(4));
        assert_eq!(triangular_root(45), Some(10));
        assert_eq!(triangular_root(4950), Some(100));
        assert_eq!(triangular_root(0), None);
        assert_eq!(triangular_root(2), None);
        assert_eq!(triangular_root(5), None);
        assert_eq!(triangular_root(44), None);
    }

    #[test]
    fn rejects_non_triangular_length() {
        let err = CondensedDistances::from_vec(vec![0.1; 5]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(CondensedDistances::from_vec(vec![0.1, -0.2, 0.3]).is_err());
        assert!(CondensedDistances::from_vec(vec![0.1, f64::NAN, 0.3]).is_err());
    }

    #[test]
    fn square_round_trip_preserves_values() {
        let d = CondensedDistances::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let sq = d.to_square();
        assert_eq!(sq.n(), 4);
        for i in 0..4 {
            assert_eq!(sq.get(i, i), Some(0.0));
            for j in 0..4 {
                assert_eq!(sq.get(i, j), sq.get(j, i));
                assert_eq!(sq.get(i, j), d.get(i, j));
            }
        }
        assert_eq!(sq.row(1), Some(&[1.0, 0.0, 4.0, 5.0][..]));
        assert_eq!(sq.to_condensed().unwrap(), d);
        assert_eq!(d.get(4, 0), None);
    }

    #[test]
    fn builder_needs_two_items() {
        let err = pairwise_distances(&["solo"], &NormalizedLevenshtein).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
        let empty: [&str; 0] = [];
        assert!(pairwise_distances(&empty, &NormalizedLevenshtein).is_err());
    }

    #[test]
    fn builder_fills_canonical_order() {
        let words = ["cat", "bat", "rat", "hat"];
        let d = pairwise_distances(&words, &NormalizedLevenshtein).unwrap();
        assert_eq!(d.len(), 6);
        assert_eq!(d.n_items(), 4);
        for ((i, j), &v) in pair_indices(4).zip(d.as_slice()) {
            assert_eq!(v, normalized_edit_distance(words[i], words[j]));
        }
        assert!(d.as_slice().iter().all(|&v| (v - 1.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn builder_is_deterministic() {
        let words: Vec<String> = ["feline", "flying mammal", "rodent", "headwear", "hat"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let a = pairwise_distances(&words, &NormalizedLevenshtein).unwrap();
        let b = pairwise_distances(&words, &NormalizedLevenshtein).unwrap();
        assert_eq!(a.len(), pair_count(words.len()));
        let bits_a: Vec<u64> = a.as_slice().iter().map(|v| v.to_bits()).collect();
        let bits_b: Vec<u64> = b.as_slice().iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn builder_accepts_custom_metric() {
        let points = [0.0_f64, 1.0, 3.0];
        let d = pairwise_distances(&points, &|a: &f64, b: &f64| (a - b).abs()).unwrap();
        assert_eq!(d.as_slice(), &[1.0, 3.0, 2.0]);
    }

    #[test]
    fn builder_rejects_invalid_metric_output() {
        let err = pairwise_distances(&[1.0_f64, 2.0], &|_: &f64, _: &f64| -1.0).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn serde_validates_length() {
        let d: CondensedDistances = serde_json::from_str("[0.5, 0.25, 0.75]").unwrap();
        assert_eq!(d.n_items(), 3);
        assert_eq!(serde_json::to_string(&d).unwrap(), "[0.5,0.25,0.75]");
        assert!(serde_json::from_str::<CondensedDistances>("[0.5, 0.25]").is_err());
    }
}
