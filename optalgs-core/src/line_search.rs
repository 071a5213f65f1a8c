//! Function-style entry points: pass `f`, `grad_f` and a starting point,
//! get back a [`DescentOutcome`].
//!
//! `grad_f` returns a fresh vector; a length different from `x0` is reported
//! as [`DescentError::DimensionMismatch`](crate::error::DescentError).
//! Running out of iterations is not an error: the outcome is
//! [`DescentOutcome::NotConverged`] and a warning is logged.

use crate::error::Result;
use crate::manifolds::EuclideanSpace;
use crate::problems::quadratic::QuadraticForm;
use crate::solvers::gd::{
    ArmijoBacktracking, ConstantStep, DescentOutcome, ExactQuadratic, GradientDescent,
    StepSizeStrategy, DEFAULT_MAX_ITERS,
};

pub const DEFAULT_MAX_ITER: usize = DEFAULT_MAX_ITERS;
pub const ARMIJO_DEFAULT_ALPHA0: f64 = 1.0;
pub const ARMIJO_DEFAULT_GAMA: f64 = 0.8;
pub const ARMIJO_DEFAULT_C: f64 = 0.5;

fn descend<F, G, LS>(
    f: F,
    grad_f: G,
    x0: &[f64],
    max_iter: usize,
    strategy: &mut LS,
) -> Result<DescentOutcome<Vec<f64>>>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
    LS: StepSizeStrategy<EuclideanSpace>,
{
    GradientDescent::new()
        .with_max_iters(max_iter)
        .minimize_with_fn_and_strategy(
            x0.to_vec(),
            |x: &Vec<f64>| f(x.as_slice()),
            |x: &Vec<f64>, grad: &mut Vec<f64>| *grad = grad_f(x.as_slice()),
            strategy,
        )
}

/// Gradient descent with the closed-form step of `form` along `-grad_f(x)`.
///
/// For `f(x) = x₀² + 2x₁²` pass `QuadraticForm::diagonal(&[1.0, 2.0])`.
pub fn exact_line_search<F, G>(
    f: F,
    grad_f: G,
    form: &QuadraticForm,
    x0: &[f64],
    max_iter: usize,
) -> Result<DescentOutcome<Vec<f64>>>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    let mut strategy = ExactQuadratic::new(form.clone());
    descend(f, grad_f, x0, max_iter, &mut strategy)
}

/// Gradient descent with a fixed step size. The outcome carries no trajectory.
pub fn constant_step_search<F, G>(
    f: F,
    grad_f: G,
    x0: &[f64],
    alpha: f64,
    max_iter: usize,
) -> Result<DescentOutcome<Vec<f64>>>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    let mut strategy = ConstantStep::new(alpha);
    descend(f, grad_f, x0, max_iter, &mut strategy)
}

/// Gradient descent with Armijo backtracking (`ARMIJO_DEFAULT_*` are the
/// customary parameters).
pub fn armijo_line_search<F, G>(
    f: F,
    grad_f: G,
    x0: &[f64],
    alpha0: f64,
    gama: f64,
    c: f64,
    max_iter: usize,
) -> Result<DescentOutcome<Vec<f64>>>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    let mut strategy = ArmijoBacktracking::new(alpha0, gama, c);
    descend(f, grad_f, x0, max_iter, &mut strategy)
}
