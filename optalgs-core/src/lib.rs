//! optalgs: gradient descent with pluggable step-size strategies
//!
//! - `Space`: an abstraction of vector spaces, `EuclideanSpace` (`Vec<f64>`)
//!   its concrete implementation
//! - `Objective`: a generic objective function interface
//! - `GradientDescent`: the descent loop, parameterized by a
//!   `StepSizeStrategy`
//! - strategies: `ExactQuadratic` (closed form for quadratics),
//!   `ConstantStep`, `ArmijoBacktracking`
//! - `line_search`: function-style entry points over closures

pub mod error;
pub mod line_search;
pub mod manifolds;
pub mod numerics;
pub mod problems;
pub mod solvers;

pub use error::{DescentError, Result};
pub use line_search::{armijo_line_search, constant_step_search, exact_line_search};
pub use manifolds::{EuclideanSpace, Space};
pub use problems::{Objective, QuadraticForm};
pub use solvers::gd::{
    ArmijoBacktracking, ConstantStep, DescentOutcome, DescentReport, ExactQuadratic,
    GradientDescent, StepSizeStrategy, StopReason,
};
pub use solvers::SolverTraceRecord;
