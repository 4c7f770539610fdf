//! # mantel-core — Mantel Test Over Pairwise Distances
//!
//! Tests whether two distance measures over the same items are correlated,
//! e.g. string-form distance against meaning-form distance for a list of
//! word/meaning pairs. The pipeline is:
//!
//! ```text
//! items ─▶ pairwise_distances ─▶ CondensedDistances ─┐
//!                                                     ├─▶ MantelTest::run ─▶ MantelResult
//! items ─▶ pairwise_distances ─▶ CondensedDistances ─┘
//! ```
//!
//! - **Distance** (`distance.rs`): normalized Levenshtein distance and the
//!   [`DistanceMetric`] trait.
//! - **Pairwise** (`pairwise.rs`): the condensed upper-triangle vector and
//!   its canonical pair order.
//! - **Permutation** (`permutation.rs`): uniform item relabeling that
//!   preserves the pairwise structure.
//! - **Stats** (`stats.rs`): mean, population standard deviation, Pearson.
//! - **Mantel** (`mantel.rs`): veridical `r`, null distribution, Z-score.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Random sources are always injected by the caller; nothing here touches
//!   a global generator.
//! - Errors fail fast; an undefined statistic is an error, never a default.

pub mod distance;
pub mod error;
pub mod mantel;
pub mod pairwise;
pub mod permutation;
pub mod stats;

// Re-export primary types for ergonomic imports.
pub use distance::{
    levenshtein, normalized_edit_distance, normalized_levenshtein, DistanceMetric,
    NormalizedLevenshtein,
};
pub use error::{ErrorKind, MantelError, Result};
pub use mantel::{
    mantel_test, monte_carlo, run_mantel_on_pairs, MantelResult, MantelTest, NullDistribution,
    DEFAULT_RANDOMIZATIONS,
};
pub use pairwise::{
    condensed_index, pair_count, pair_indices, pairwise_distances, triangular_root,
    CondensedDistances, SquareMatrix,
};
pub use permutation::{permute_via_square, shuffle_condensed, shuffle_distances, Permutation};
pub use stats::{mean, pearson, std_dev};
