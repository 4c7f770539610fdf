//! # Distance Metric
//!
//! Normalized Levenshtein (edit) distance between two symbol sequences,
//! and the [`DistanceMetric`] seam through which the pairwise builder
//! consumes it.
//!
//! The edit distance is the classic dynamic program over a single rolling
//! row. Insertion, deletion, and substitution each cost 1; matching symbols
//! cost 0. The shorter sequence drives the row width, so memory is
//! `O(min(len(a), len(b)))`.
//!
//! Normalization divides the raw distance by the longer length, which
//! bounds the result to `[0, 1]`. Two empty sequences have distance 0.

/// A dissimilarity between two items of type `T`.
///
/// Implementations must return a finite, non-negative value. The pairwise
/// builder rejects anything else with `InvalidInput`.
///
/// Any `Fn(&T, &T) -> f64` closure is a metric.
pub trait DistanceMetric<T: ?Sized> {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &T, b: &T) -> f64;
}

impl<T: ?Sized, F> DistanceMetric<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    fn distance(&self, a: &T, b: &T) -> f64 {
        self(a, b)
    }
}

/// Normalized edit distance over the `char`s of a string.
///
/// Compares Unicode scalar values, not bytes: `"café"` and `"cafe"` are
/// one substitution apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedLevenshtein;

impl<S: AsRef<str> + ?Sized> DistanceMetric<S> for NormalizedLevenshtein {
    fn distance(&self, a: &S, b: &S) -> f64 {
        normalized_edit_distance(a.as_ref(), b.as_ref())
    }
}

/// Raw Levenshtein distance between two symbol sequences.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (row_idx, long_sym) in long.iter().enumerate() {
        // `diag` holds the previous row's value at column `col`.
        let mut diag = row[0];
        row[0] = row_idx + 1;
        for (col, short_sym) in short.iter().enumerate() {
            let above = row[col + 1];
            row[col + 1] = if short_sym == long_sym {
                diag
            } else {
                1 + diag.min(above).min(row[col])
            };
            diag = above;
        }
    }
    row[short.len()]
}

/// Levenshtein distance divided by the longer sequence length.
pub fn normalized_levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

/// Normalized edit distance between two strings, compared by `char`.
pub fn normalized_edit_distance(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    normalized_levenshtein(&a, &b)
}
