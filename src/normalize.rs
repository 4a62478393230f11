//! Per-feature rescaling of a sample matrix.
//!
//! Both functions work column by column and return a new matrix. A column
//! whose values are all equal can't be rescaled, and is reported as
//! `Error::DegenerateColumn` instead of filling the result with NaN.

use crate::error::{Error, Result};
use crate::matrix::Matrix;

use itertools::Itertools;

/// Applies a z-score to every column: `(x - mean) / stddev`, using the
/// population standard deviation.
pub fn normalize(inputs: &Matrix) -> Result<Matrix> {
    rescale(inputs, |column| {
        let n = column.len() as f64;
        let mean = column.iter().sum::<f64>() / n;
        let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        (mean, variance.sqrt())
    })
}

/// Maps every column linearly onto `[0, 1]`: `(x - min) / (max - min)`.
pub fn scale(inputs: &Matrix) -> Result<Matrix> {
    rescale(inputs, |column| {
        let (min, max) = column.iter().copied().minmax().into_option().unwrap_or_default();
        (min, max - min)
    })
}

/// Replaces each entry with `(x - offset) / divisor`, where `stats` picks
/// the offset and divisor for a whole column.
fn rescale<F>(inputs: &Matrix, stats: F) -> Result<Matrix>
where
    F: Fn(&[f64]) -> (f64, f64),
{
    let mut result = Matrix::zeros(inputs.rows(), inputs.cols());
    for j in 0..inputs.cols() {
        let column: Vec<f64> = inputs.column(j).collect();
        // Rounding in the mean can leave a tiny nonzero spread on a
        // constant column, so compare the values themselves.
        if column.iter().all_equal() {
            return Err(Error::DegenerateColumn { column: j });
        }
        let (offset, divisor) = stats(&column);
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(Error::DegenerateColumn { column: j });
        }
        for (i, x) in column.iter().enumerate() {
            result.row_mut(i)[j] = (x - offset) / divisor;
        }
    }
    Ok(result)
}
