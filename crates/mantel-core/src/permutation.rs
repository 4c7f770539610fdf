//! # Permutation Engine
//!
//! Relabels the items underlying a condensed distance vector and reads the
//! relabeled distances back out in canonical pair order.
//!
//! Shuffling raw positions of the condensed vector would break the pairwise
//! structure. Instead a permutation `p` of the `N` item indices is drawn and
//! the permuted entry for canonical pair `(i, j)` is the original distance
//! between items `p[i]` and `p[j]`:
//!
//! ```text
//! permuted[(i, j)] = square[p[i]][p[j]]
//! ```
//!
//! [`permute_via_square`] is the reference path: it materializes the
//! square matrix and re-extracts the upper triangle.
//! [`CondensedDistances::permuted`] computes the same vector by index
//! arithmetic on the condensed form, and is what the Monte Carlo loop uses.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MantelError, Result};
use crate::pairwise::{pair_indices, CondensedDistances};

/// A bijection of `{0..N-1}` onto itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    /// Validate that `order` contains every index in `0..order.len()`
    /// exactly once.
    pub fn new(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &idx in &order {
            if idx >= n {
                return Err(MantelError::InvalidInput(format!(
                    "permutation index {idx} out of range for {n} items"
                )));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(MantelError::InvalidInput(format!(
                    "permutation repeats index {idx}"
                )));
            }
        }
        Ok(Self { order })
    }

    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// Uniformly random permutation (Fisher–Yates).
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    fn check_size(&self, d: &CondensedDistances) -> Result<()> {
        if self.len() != d.n_items() {
            return Err(MantelError::InvalidInput(format!(
                "permutation over {} items applied to distances over {} items",
                self.len(),
                d.n_items()
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = MantelError;

    fn try_from(order: Vec<usize>) -> Result<Self> {
        Self::new(order)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.order
    }
}

impl CondensedDistances {
    /// Relabel items by `perm` without building the square matrix.
    pub fn permuted(&self, perm: &Permutation) -> Result<Self> {
        perm.check_size(self)?;
        Ok(self.relabel(perm.as_slice()))
    }

    /// Requires `p.len() == self.n_items()`.
    fn relabel(&self, p: &[usize]) -> Self {
        let values = pair_indices(self.n_items())
            .map(|(i, j)| self.lookup(p[i], p[j]))
            .collect();
        Self::from_parts(self.n_items(), values)
    }
}

/// Relabel items by `perm` through the full square matrix.
pub fn permute_via_square(d: &CondensedDistances, perm: &Permutation) -> Result<CondensedDistances> {
    perm.check_size(d)?;
    let square = d.to_square();
    let p = perm.as_slice();
    let values = pair_indices(d.n_items())
        .map(|(i, j)| square.at(p[i], p[j]))
        .collect();
    Ok(CondensedDistances::from_parts(d.n_items(), values))
}

/// Draw a fresh permutation and apply it to `d`.
pub fn shuffle_distances<R: Rng + ?Sized>(d: &CondensedDistances, rng: &mut R) -> CondensedDistances {
    let perm = Permutation::random(d.n_items(), rng);
    d.relabel(perm.as_slice())
}

/// [`shuffle_distances`] over a raw slice.
///
/// Fails with `InvalidInput` when the length is not `N(N-1)/2` for any
/// `N >= 2`.
pub fn shuffle_condensed<R: Rng + ?Sized>(values: &[f64], rng: &mut R) -> Result<CondensedDistances> {
    let d = CondensedDistances::from_vec(values.to_vec())?;
    Ok(shuffle_distances(&d, rng))
}
