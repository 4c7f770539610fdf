//! # Mantel Statistic
//!
//! Assembles the Mantel test from its parts:
//!
//! 1. The veridical correlation `r` between two condensed distance vectors.
//! 2. A null distribution of `R` correlations, each between a freshly
//!    relabeled copy of the first vector and the unchanged second vector.
//! 3. The null mean `m`, population standard deviation `sd`, and the
//!    Z-score `z = (r - m) / sd`.
//!
//! ## Randomness
//!
//! The random source is always passed in. With a seeded generator (and a
//! fixed worker count) the result is reproducible bit-for-bit.
//!
//! ## Workers
//!
//! With `workers > 1` the `R` iterations are split across scoped threads.
//! Each worker owns a `StdRng` seeded from a `u64` drawn from the caller's
//! generator before any worker starts. Samples are concatenated in worker
//! order and reduced only after every worker has finished.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::NormalizedLevenshtein;
use crate::error::{MantelError, Result};
use crate::pairwise::{pairwise_distances, CondensedDistances};
use crate::permutation::shuffle_distances;
use crate::stats::{mean, pearson, std_dev};

/// Reference Monte Carlo sample count.
pub const DEFAULT_RANDOMIZATIONS: usize = 10_000;

/// Outcome of a Mantel test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MantelResult {
    /// Veridical Pearson correlation of the two distance vectors.
    pub r: f64,
    /// Mean of the null distribution.
    pub mean: f64,
    /// Population standard deviation of the null distribution.
    pub sd: f64,
    /// `(r - mean) / sd`.
    pub z: f64,
}

/// Correlations sampled under random relabeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullDistribution {
    samples: Vec<f64>,
}

impl NullDistribution {
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> Result<f64> {
        mean(&self.samples)
    }

    pub fn std_dev(&self) -> Result<f64> {
        std_dev(&self.samples)
    }

    /// Standard score of `r` against this distribution.
    ///
    /// Fails with `DegenerateInput` when the standard deviation is zero.
    pub fn z_score(&self, r: f64) -> Result<f64> {
        let m = self.mean()?;
        let sd = self.std_dev()?;
        if sd == 0.0 {
            return Err(MantelError::DegenerateInput(format!(
                "all {} null correlations are identical; Z-score is undefined",
                self.samples.len()
            )));
        }
        Ok((r - m) / sd)
    }
}

/// Mantel test parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MantelTest {
    randomizations: usize,
    workers: usize,
}

impl Default for MantelTest {
    fn default() -> Self {
        Self {
            randomizations: DEFAULT_RANDOMIZATIONS,
            workers: 1,
        }
    }
}

impl MantelTest {
    /// A single-worker test drawing `randomizations` samples.
    ///
    /// At least two samples are needed for a standard deviation.
    pub fn new(randomizations: usize) -> Result<Self> {
        if randomizations < 2 {
            return Err(MantelError::InvalidInput(format!(
                "randomizations must be at least 2, got {randomizations}"
            )));
        }
        Ok(Self {
            randomizations,
            workers: 1,
        })
    }

    /// Split the Monte Carlo loop across `workers` threads.
    pub fn with_workers(self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(MantelError::InvalidInput(
                "workers must be at least 1".into(),
            ));
        }
        Ok(Self { workers, ..self })
    }

    pub fn randomizations(&self) -> usize {
        self.randomizations
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the full test on two entry-aligned distance vectors.
    pub fn run<R: Rng + ?Sized>(
        &self,
        d1: &CondensedDistances,
        d2: &CondensedDistances,
        rng: &mut R,
    ) -> Result<MantelResult> {
        check_aligned(d1, d2)?;
        tracing::debug!(
            items = d1.n_items(),
            pairs = d1.len(),
            randomizations = self.randomizations,
            workers = self.workers,
            "running Mantel test"
        );

        let r = pearson(d1.as_slice(), d2.as_slice())?;
        let null = self.null_distribution(d1, d2, rng)?;
        let mean = null.mean()?;
        let sd = null.std_dev()?;
        let z = null.z_score(r)?;

        tracing::debug!(r, mean, sd, z, "Mantel test complete");
        Ok(MantelResult { r, mean, sd, z })
    }

    /// Sample the null distribution without computing `r`.
    pub fn null_distribution<R: Rng + ?Sized>(
        &self,
        d1: &CondensedDistances,
        d2: &CondensedDistances,
        rng: &mut R,
    ) -> Result<NullDistribution> {
        check_aligned(d1, d2)?;
        let workers = self.workers.min(self.randomizations);
        if workers <= 1 {
            let samples = sample_correlations(d1, d2, self.randomizations, rng)?;
            return Ok(NullDistribution::from_samples(samples));
        }

        let base = self.randomizations / workers;
        let extra = self.randomizations % workers;
        let plan: Vec<(usize, u64)> = (0..workers)
            .map(|w| (base + usize::from(w < extra), rng.gen::<u64>()))
            .collect();

        let partitions: Vec<Result<Vec<f64>>> = std::thread::scope(|scope| {
            let handles: Vec<_> = plan
                .iter()
                .enumerate()
                .map(|(worker, &(count, seed))| {
                    scope.spawn(move || {
                        tracing::trace!(worker, count, "Monte Carlo partition started");
                        let mut worker_rng = StdRng::seed_from_u64(seed);
                        sample_correlations(d1, d2, count, &mut worker_rng)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        let mut samples = Vec::with_capacity(self.randomizations);
        for partition in partitions {
            samples.extend(partition?);
        }
        Ok(NullDistribution::from_samples(samples))
    }
}

fn check_aligned(d1: &CondensedDistances, d2: &CondensedDistances) -> Result<()> {
    if d1.len() != d2.len() {
        return Err(MantelError::InvalidInput(format!(
            "distance vectors differ in length: {} vs {}",
            d1.len(),
            d2.len()
        )));
    }
    Ok(())
}

/// `count` correlations between relabelings of `d1` and the fixed `d2`.
fn sample_correlations<R: Rng + ?Sized>(
    d1: &CondensedDistances,
    d2: &CondensedDistances,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    (0..count)
        .map(|_| {
            let shuffled = shuffle_distances(d1, rng);
            pearson(shuffled.as_slice(), d2.as_slice())
        })
        .collect()
}

/// Sample the null distribution on a single thread.
pub fn monte_carlo<R: Rng + ?Sized>(
    d1: &CondensedDistances,
    d2: &CondensedDistances,
    randomizations: usize,
    rng: &mut R,
) -> Result<NullDistribution> {
    MantelTest::new(randomizations)?.null_distribution(d1, d2, rng)
}

/// Single-threaded Mantel test with `randomizations` samples.
pub fn mantel_test<R: Rng + ?Sized>(
    d1: &CondensedDistances,
    d2: &CondensedDistances,
    randomizations: usize,
    rng: &mut R,
) -> Result<MantelResult> {
    MantelTest::new(randomizations)?.run(d1, d2, rng)
}

/// Full pipeline over paired strings: edit distances within each column,
/// then the Mantel test between the two columns.
///
/// `strings[i]` and `meanings[i]` must describe the same entity; sequences
/// of different lengths are rejected with `MalformedInput`.
pub fn run_mantel_on_pairs<S, R>(
    strings: &[S],
    meanings: &[S],
    test: &MantelTest,
    rng: &mut R,
) -> Result<MantelResult>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if strings.len() != meanings.len() {
        return Err(MantelError::MalformedInput(format!(
            "paired sequences differ in length: {} strings vs {} meanings",
            strings.len(),
            meanings.len()
        )));
    }
    let d_strings = pairwise_distances(strings, &NormalizedLevenshtein)?;
    let d_meanings = pairwise_distances(meanings, &NormalizedLevenshtein)?;
    test.run(&d_strings, &d_meanings, rng)
}
