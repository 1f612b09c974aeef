//! Ordinary least-squares linear regression
//!
//! Solves the normal equations `(X^T X) w = X^T y` on centered data via
//! Cholesky decomposition, retrying with a small ridge term when the
//! Gram matrix is not positive definite and falling back to Gauss-Jordan
//! inversion as a last resort.

use crate::error::{PrediksiError, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Cholesky solve of the symmetric system `a x = b`, with `ridge` added to
/// the diagonal. Returns None when the (regularized) matrix is still not
/// positive definite.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>, ridge: f64) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    // Decompose A + ridge*I = L * L^T
    let mut l = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] + ridge - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L * y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Matrix inversion by Gauss-Jordan elimination with partial pivoting
fn matrix_inverse(m: &Array2<f64>) -> Option<Array2<f64>> {
    let n = m.nrows();
    if n != m.ncols() {
        return None;
    }

    // Augmented matrix [M | I]
    let mut aug = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = m[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let mut max_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[max_row, col]].abs() {
                max_row = row;
            }
        }

        if max_row != col {
            for j in 0..2 * n {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[max_row, j]];
                aug[[max_row, j]] = tmp;
            }
        }

        if aug[[col, col]].abs() < 1e-10 {
            return None;
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                for j in 0..2 * n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }

    Some(inv)
}

/// Solve least squares via the normal equations
fn solve_least_squares(x: &Array2<f64>, y: &Array1<f64>) -> Option<Array1<f64>> {
    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);

    if let Some(result) = cholesky_solve(&xtx, &xty, 0.0) {
        return Some(result);
    }

    // Near-singular: retry with a small diagonal nudge scaled to the matrix
    let n = xtx.nrows().max(1);
    let ridge = 1e-8 * xtx.diag().iter().map(|v| v.abs()).sum::<f64>() / n as f64;
    if ridge > 0.0 {
        if let Some(result) = cholesky_solve(&xtx, &xty, ridge) {
            return Some(result);
        }
    }

    matrix_inverse(&xtx).map(|inv| inv.dot(&xty))
}

/// Ordinary least-squares linear regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Fitted coefficients, one per feature
    pub coefficients: Option<Array1<f64>>,
    /// Fitted intercept
    pub intercept: Option<f64>,
    /// Whether to fit an intercept
    pub fit_intercept: bool,
    /// Whether the model has been fitted
    pub is_fitted: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Create a new model that fits an intercept
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept: true,
            is_fitted: false,
        }
    }

    /// Enable/disable fitting an intercept
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Fit the model to training data.
    ///
    /// A zero-column design matrix degenerates cleanly: the coefficient
    /// vector is empty and the intercept is the training target mean.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();

        if n_samples != y.len() {
            return Err(PrediksiError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(PrediksiError::InsufficientData(
                "cannot fit a regression on zero rows".to_string(),
            ));
        }

        // Center data if fitting an intercept
        let (x_centered, y_centered, x_mean, y_mean) = if self.fit_intercept {
            let x_mean = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(x.ncols()));
            let y_mean = y.mean().unwrap_or(0.0);

            let x_centered = x - &x_mean.clone().insert_axis(Axis(0));
            let y_centered = y - y_mean;

            (x_centered, y_centered, Some(x_mean), Some(y_mean))
        } else {
            (x.clone(), y.clone(), None, None)
        };

        let coefficients = match solve_least_squares(&x_centered, &y_centered) {
            Some(coef) => coef,
            None => {
                return Err(PrediksiError::ComputationError(
                    "design matrix is singular, cannot solve least squares".to_string(),
                ));
            }
        };

        let intercept = if self.fit_intercept {
            let x_mean = x_mean.unwrap();
            let y_mean = y_mean.unwrap();
            Some(y_mean - coefficients.dot(&x_mean))
        } else {
            Some(0.0)
        };

        self.coefficients = Some(coefficients);
        self.intercept = intercept;
        self.is_fitted = true;

        Ok(self)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(PrediksiError::NotFitted);
        }

        let coefficients = self.coefficients.as_ref().ok_or(PrediksiError::NotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);

        if x.ncols() != coefficients.len() {
            return Err(PrediksiError::ShapeError {
                expected: format!("{} feature columns", coefficients.len()),
                actual: format!("{} feature columns", x.ncols()),
            });
        }

        Ok(x.dot(coefficients) + intercept)
    }
}
