//! Standard objectives for exercising the solvers.

use crate::manifolds::EuclideanSpace;
use crate::problems::objective::Objective;

/// Rosenbrock function `f(x, y) = (a - x)^2 + b (y - x^2)^2`.
///
/// Global minimum at `(a, a^2)`.
#[derive(Clone, Copy, Debug)]
pub struct Rosenbrock {
    pub a: f64,
    pub b: f64,
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self { a: 1.0, b: 100.0 }
    }
}

impl Objective<EuclideanSpace> for Rosenbrock {
    fn value(&self, x: &Vec<f64>) -> f64 {
        let (x0, x1) = (x[0], x[1]);
        (self.a - x0).powi(2) + self.b * (x1 - x0 * x0).powi(2)
    }

    fn gradient(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        let (x0, x1) = (x[0], x[1]);
        let t = x1 - x0 * x0;
        grad[0] = -2.0 * (self.a - x0) - 4.0 * self.b * x0 * t;
        grad[1] = 2.0 * self.b * t;
    }

    fn dimension(&self) -> Option<usize> {
        Some(2)
    }
}
