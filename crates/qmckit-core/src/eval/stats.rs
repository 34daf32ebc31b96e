use super::error::EvalError;
use ndarray::{Array, Dimension};

/// Scales `xs` so its mean is one.
pub fn normalize_mean<D: Dimension>(xs: &Array<f64, D>) -> Result<Array<f64, D>, EvalError> {
    let mean = xs.mean().ok_or(EvalError::EmptyInput)?;
    Ok(xs / mean)
}

/// Weighted mean and weighted variance of `xs` under the weights `ws`.
///
/// The weights are mean-normalized first, so only their relative magnitudes
/// matter. The variance is taken about the weighted mean.
pub fn weighted_mean_var<D: Dimension>(
    xs: &Array<f64, D>,
    ws: &Array<f64, D>,
) -> Result<(f64, f64), EvalError> {
    if xs.shape() != ws.shape() {
        return Err(EvalError::ShapeMismatch {
            expected: xs.shape().to_vec(),
            found: ws.shape().to_vec(),
        });
    }
    let ws = normalize_mean(ws)?;
    let n = xs.len() as f64;
    let mean = (&ws * xs).sum() / n;
    let var = (&ws * &(xs - mean).mapv(|d| d * d)).sum() / n;
    Ok((mean, var))
}
