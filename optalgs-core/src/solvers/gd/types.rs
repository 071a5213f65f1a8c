use crate::manifolds::{space::Space, EuclideanSpace};
use crate::solvers::SolverTraceRecord;

/// Iteration cap used when none is given.
pub const DEFAULT_MAX_ITERS: usize = 500;

/// Gradient-norm threshold below which a run counts as converged.
pub const DEFAULT_TOL_GRAD: f64 = 1e-5;

/// Configuration for gradient descent.
///
/// The step size is chosen each iteration by a
/// [`StepSizeStrategy`](crate::solvers::common::step_policy::StepSizeStrategy)
/// passed to the `minimize_*` methods.
#[derive(Clone, Debug)]
pub struct GradientDescent<S: Space = EuclideanSpace> {
    /// Space to operate on.
    pub space: S,
    /// Maximum number of iterations (step updates).
    pub max_iters: usize,
    /// Considered converged when the gradient norm is at most this threshold.
    pub tol_grad: f64,
    /// If true, logs per-iteration diagnostics (f, |grad|, alpha) at info level.
    pub verbose: bool,
    /// If true, stores per-iteration trace rows into the report.
    pub collect_trace: bool,
}

impl<S: Space> GradientDescent<S> {
    /// Build a solver on an explicitly provided space.
    pub fn with_space(space: S) -> Self {
        Self {
            space,
            max_iters: DEFAULT_MAX_ITERS,
            tol_grad: DEFAULT_TOL_GRAD,
            verbose: false,
            collect_trace: false,
        }
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
}

impl GradientDescent<EuclideanSpace> {
    /// Build a solver with Euclidean space defaults.
    pub fn new() -> Self {
        Self::with_space(EuclideanSpace)
    }
}

impl Default for GradientDescent<EuclideanSpace> {
    fn default() -> Self {
        Self::new()
    }
}

/// Final state of a run, converged or not.
#[derive(Clone, Debug)]
pub struct DescentReport<P> {
    pub x: P,
    /// f(x) at the final point.
    pub f: f64,
    /// Number of iterations performed.
    pub fc: usize,
    pub grad_norm: f64,
    pub trace: Option<Vec<SolverTraceRecord>>,
}

/// Why a run stopped without converging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StopReason {
    /// The iteration cap was reached.
    MaxIterations,
    /// The strategy could not produce an acceptable step.
    LineSearchFailed { alpha: f64, trials: usize },
}

/// Result of a descent run.
#[derive(Clone, Debug)]
pub enum DescentOutcome<P> {
    /// `trajectory` holds the accepted step sizes in order, or `None` for
    /// strategies that do not track one (constant step).
    Converged {
        trajectory: Option<Vec<f64>>,
        report: DescentReport<P>,
    },
    NotConverged {
        reason: StopReason,
        partial: DescentReport<P>,
    },
}

impl<P> DescentOutcome<P> {
    pub fn converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    pub fn report(&self) -> &DescentReport<P> {
        match self {
            Self::Converged { report, .. } => report,
            Self::NotConverged { partial, .. } => partial,
        }
    }

    pub(crate) fn report_mut(&mut self) -> &mut DescentReport<P> {
        match self {
            Self::Converged { report, .. } => report,
            Self::NotConverged { partial, .. } => partial,
        }
    }

    pub fn into_report(self) -> DescentReport<P> {
        match self {
            Self::Converged { report, .. } => report,
            Self::NotConverged { partial, .. } => partial,
        }
    }

    /// Accepted step sizes of a converged run.
    pub fn trajectory(&self) -> Option<&[f64]> {
        match self {
            Self::Converged { trajectory, .. } => trajectory.as_deref(),
            Self::NotConverged { .. } => None,
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Converged { .. } => None,
            Self::NotConverged { reason, .. } => Some(*reason),
        }
    }

    pub fn x(&self) -> &P {
        &self.report().x
    }

    pub fn f(&self) -> f64 {
        self.report().f
    }

    pub fn fc(&self) -> usize {
        self.report().fc
    }
}
