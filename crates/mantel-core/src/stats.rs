//! Summary statistics used by the Mantel assembler.
//!
//! Standard deviation is the population estimator (divide by `n`, not
//! `n - 1`), used consistently for the null distribution.

use crate::error::{MantelError, Result};

fn require_samples(x: &[f64], what: &str) -> Result<()> {
    if x.is_empty() {
        return Err(MantelError::InvalidInput(format!("{what} of an empty sequence")));
    }
    if let Some((pos, bad)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(MantelError::InvalidInput(format!(
            "{what} input has non-finite value {bad} at position {pos}"
        )));
    }
    Ok(())
}

fn is_constant(x: &[f64]) -> bool {
    x.iter().all(|&v| v == x[0])
}

/// Arithmetic mean.
pub fn mean(x: &[f64]) -> Result<f64> {
    require_samples(x, "mean")?;
    Ok(x.iter().sum::<f64>() / x.len() as f64)
}

/// Population standard deviation. Exactly `0.0` when every value is equal.
pub fn std_dev(x: &[f64]) -> Result<f64> {
    require_samples(x, "standard deviation")?;
    if is_constant(x) {
        return Ok(0.0);
    }
    let m = mean(x)?;
    let var = x.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / x.len() as f64;
    Ok(var.sqrt())
}

/// Pearson correlation coefficient, clamped to `[-1, 1]`.
///
/// Fails with `InvalidInput` on empty, mismatched, or non-finite inputs and
/// with `DegenerateInput` when either input has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(MantelError::InvalidInput(format!(
            "correlation needs equal-length inputs, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    require_samples(x, "correlation")?;
    require_samples(y, "correlation")?;
    if is_constant(x) || is_constant(y) {
        return Err(MantelError::DegenerateInput(
            "correlation is undefined for a zero-variance input".into(),
        ));
    }

    let mx = mean(x)?;
    let my = mean(y)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let den = (sxx * syy).sqrt();
    // Sums of squares can overflow for huge finite inputs.
    if den == 0.0 || !den.is_finite() {
        return Err(MantelError::DegenerateInput(
            "correlation is undefined for a zero-variance input".into(),
        ));
    }
    Ok((sxy / den).clamp(-1.0, 1.0))
}
