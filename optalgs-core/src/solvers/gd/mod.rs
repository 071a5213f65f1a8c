mod solve;
mod types;

pub use crate::solvers::common::step_policy::{
    ArmijoBacktracking, ConstantStep, ExactQuadratic, LineSearchResult, StepContext,
    StepSizeStrategy,
};
pub use types::{
    DescentOutcome, DescentReport, GradientDescent, StopReason, DEFAULT_MAX_ITERS,
    DEFAULT_TOL_GRAD,
};
