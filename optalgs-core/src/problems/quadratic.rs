//! Quadratic forms `q(x) = xᵀQx + bᵀx` on R^n.
//!
//! Along a line `x + αd` a quadratic is a parabola in `α`, so its minimizer
//! has a closed form. `ExactQuadratic` uses that to pick step sizes.

use crate::error::{DescentError, Result};
use crate::manifolds::EuclideanSpace;
use crate::numerics::linalg::{bilinear, dot, mat_vec_into};
use crate::problems::objective::Objective;

/// Relative tolerance used when checking `Q` for symmetry.
const SYMMETRY_TOL: f64 = 1e-12;

/// `q(x) = xᵀQx + bᵀx` with a symmetric `n x n` matrix `Q` stored row-major.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadraticForm {
    dim: usize,
    matrix: Vec<f64>,
    linear: Vec<f64>,
}

impl QuadraticForm {
    /// Build a form from a row-major matrix and a linear term.
    pub fn new(dim: usize, matrix: Vec<f64>, linear: Vec<f64>) -> Result<Self> {
        let form = Self {
            dim,
            matrix,
            linear,
        };
        form.validate()?;
        Ok(form)
    }

    /// Form without a linear term.
    pub fn homogeneous(dim: usize, matrix: Vec<f64>) -> Result<Self> {
        Self::new(dim, matrix, vec![0.0; dim])
    }

    /// `Σ w_i x_i²`. `diagonal(&[1.0, 2.0])` is `x₀² + 2x₁²`.
    pub fn diagonal(weights: &[f64]) -> Self {
        let dim = weights.len();
        let mut matrix = vec![0.0; dim * dim];
        for (i, w) in weights.iter().enumerate() {
            matrix[i * dim + i] = *w;
        }
        Self {
            dim,
            matrix,
            linear: vec![0.0; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn matrix(&self) -> &[f64] {
        &self.matrix
    }

    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    /// Check buffer sizes and symmetry of `Q`.
    ///
    /// Forms obtained through deserialization skip the constructor, so
    /// solvers call this again before using one.
    pub fn validate(&self) -> Result<()> {
        let n = self.dim;
        if self.matrix.len() != n * n {
            return Err(DescentError::DimensionMismatch {
                context: "quadratic form matrix",
                expected: n * n,
                got: self.matrix.len(),
            });
        }
        if self.linear.len() != n {
            return Err(DescentError::DimensionMismatch {
                context: "quadratic form linear term",
                expected: n,
                got: self.linear.len(),
            });
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let qij = self.matrix[i * n + j];
                let qji = self.matrix[j * n + i];
                let scale = qij.abs().max(qji.abs()).max(1.0);
                if !((qij - qji).abs() <= SYMMETRY_TOL * scale) {
                    return Err(DescentError::invalid(
                        "matrix",
                        format!("not symmetric at ({i}, {j}): {qij} vs {qji}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// q(x)
    pub fn eval(&self, x: &[f64]) -> f64 {
        bilinear(&self.matrix, self.dim, x, x) + dot(&self.linear, x)
    }

    /// out = 2Qx + b
    pub fn gradient_into(&self, x: &[f64], out: &mut [f64]) {
        mat_vec_into(&self.matrix, self.dim, x, out);
        for (o, b) in out.iter_mut().zip(&self.linear) {
            *o = 2.0 * *o + b;
        }
    }

    /// dᵀQd, the curvature of `α ↦ q(x + αd)` up to a factor of two.
    pub fn curvature(&self, d: &[f64]) -> f64 {
        bilinear(&self.matrix, self.dim, d, d)
    }

    /// Minimizer of `α ↦ q(x + αd)`:
    /// `α = -(2dᵀQx + bᵀd) / (2dᵀQd)`.
    ///
    /// Returns `None` when the form is not strictly convex along `d`.
    pub fn exact_step(&self, x: &[f64], d: &[f64]) -> Option<f64> {
        let curvature = self.curvature(d);
        if !(curvature > 0.0) || !curvature.is_finite() {
            return None;
        }
        let slope = 2.0 * bilinear(&self.matrix, self.dim, d, x) + dot(&self.linear, d);
        let alpha = -slope / (2.0 * curvature);
        alpha.is_finite().then_some(alpha)
    }
}

impl Objective<EuclideanSpace> for QuadraticForm {
    fn value(&self, x: &Vec<f64>) -> f64 {
        self.eval(x)
    }

    fn gradient(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        grad.resize(self.dim, 0.0);
        self.gradient_into(x, grad);
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dim)
    }
}
