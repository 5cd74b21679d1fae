//! Per-column standardization used by the logistic model.
//!
//! The raw feature table mixes scales (ages around 50, charges up to 120,
//! boolean indicators), so the logistic model fits a `Scaler` on its
//! training rows and applies the same transform at predict time. The forest
//! is scale-invariant and uses the raw table.

use crate::math::Array2;

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f64 = 1e-9;
}

/// Fit a `Scaler` from a matrix where rows are samples and columns are
/// features.
pub fn fit_scaler(x: &Array2<f64>) -> Scaler {
    let (nrows, ncols) = x.shape();
    assert!(nrows > 0 && ncols > 0, "fit_scaler requires non-empty matrix");

    let mut mean = vec![0.0f64; ncols];
    for r in 0..nrows {
        for c in 0..ncols {
            mean[c] += x[(r, c)];
        }
    }
    let nrows_f = nrows as f64;
    for v in mean.iter_mut() {
        *v /= nrows_f;
    }

    let mut std = vec![0.0f64; ncols];
    for r in 0..nrows {
        for c in 0..ncols {
            let d = x[(r, c)] - mean[c];
            std[c] += d * d;
        }
    }
    for v in std.iter_mut() {
        *v = (*v / nrows_f).sqrt().max(Scaler::MIN_STD);
    }

    Scaler { mean, std }
}

/// Transform all rows using the provided `Scaler`.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Array2<f64> {
    let (nrows, ncols) = x.shape();
    let mut out = Vec::with_capacity(nrows * ncols);
    for r in 0..nrows {
        for c in 0..ncols {
            out.push((x[(r, c)] - sc.mean[c]) / sc.std[c]);
        }
    }
    Array2::from_shape_vec((nrows, ncols), out).expect("transform_all: shape mismatch")
}
