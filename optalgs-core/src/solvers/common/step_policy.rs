use crate::error::{DescentError, Result};
use crate::manifolds::space::Space;
use crate::problems::quadratic::QuadraticForm;

/// Outcome of a step search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSearchResult {
    pub accepted: bool,
    pub alpha: f64,
    /// Number of trial step sizes evaluated.
    pub trials: usize,
}

impl LineSearchResult {
    pub fn accept(alpha: f64, trials: usize) -> Self {
        Self {
            accepted: true,
            alpha,
            trials,
        }
    }

    pub fn reject(alpha: f64, trials: usize) -> Self {
        Self {
            accepted: false,
            alpha,
            trials,
        }
    }
}

/// Per-iteration context passed to a step-size strategy.
pub struct StepContext<'a, S: Space> {
    pub iter: usize,
    pub x: &'a S::Point,
    pub grad: &'a S::Tangent,
    /// Search direction, always `-grad`.
    pub direction: &'a S::Tangent,
    /// Directional derivative `⟨grad, direction⟩` at alpha = 0.
    pub dphi0: f64,
}

/// Policy interface for selecting a step size along the descent direction.
///
/// `eval_cost(alpha)` returns `f(x + alpha * direction)`, or `None` when the
/// trial value is not finite.
pub trait StepSizeStrategy<S: Space> {
    /// Short name used in trace rows and log records.
    fn name(&self) -> &'static str;

    /// Whether accepted step sizes are kept in the run's trajectory.
    fn tracks_trajectory(&self) -> bool {
        true
    }

    /// Validate parameters against the starting point and reset any state
    /// carried between iterations. Called once at the start of every run.
    fn prepare(&mut self, _space: &S, _x0: &S::Point) -> Result<()> {
        Ok(())
    }

    /// Pick a step size for the current iteration.
    fn search(
        &mut self,
        ctx: &StepContext<'_, S>,
        eval_cost: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult;
}

/// Fixed step size; never looks at the objective.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantStep {
    pub alpha: f64,
}

impl ConstantStep {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl<S: Space> StepSizeStrategy<S> for ConstantStep {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn tracks_trajectory(&self) -> bool {
        false
    }

    fn search(
        &mut self,
        _ctx: &StepContext<'_, S>,
        _eval_cost: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult {
        LineSearchResult::accept(self.alpha, 0)
    }
}

/// Closed-form step for a quadratic objective.
///
/// The step minimizes `form` along the direction, so it is only the exact
/// line-search step when the objective being minimized is `form` itself (up to
/// a constant factor and offset).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactQuadratic {
    pub form: QuadraticForm,
}

impl ExactQuadratic {
    pub fn new(form: QuadraticForm) -> Self {
        Self { form }
    }
}

impl<S> StepSizeStrategy<S> for ExactQuadratic
where
    S: Space<Point = Vec<f64>, Tangent = Vec<f64>>,
{
    fn name(&self) -> &'static str {
        "exact"
    }

    fn prepare(&mut self, space: &S, x0: &Vec<f64>) -> Result<()> {
        self.form.validate()?;
        let n = space.dim(x0);
        if self.form.dim() != n {
            return Err(DescentError::DimensionMismatch {
                context: "quadratic form",
                expected: n,
                got: self.form.dim(),
            });
        }
        Ok(())
    }

    fn search(
        &mut self,
        ctx: &StepContext<'_, S>,
        _eval_cost: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult {
        match self.form.exact_step(ctx.x, ctx.direction) {
            Some(alpha) => LineSearchResult::accept(alpha, 0),
            None => LineSearchResult::reject(f64::NAN, 0),
        }
    }
}

/// Armijo backtracking.
///
/// Accepts the first `alpha` with
/// `f(x + alpha d) - f(x) - c * alpha * ⟨grad, d⟩ <= slack`,
/// shrinking by `gama` after each failed trial. The search for iteration
/// `k + 1` starts from the step accepted at iteration `k`; only the first
/// iteration of a run starts from `alpha0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmijoBacktracking {
    pub alpha0: f64,
    pub gama: f64,
    pub c: f64,
    pub slack: f64,
    pub max_steps: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    carried: Option<f64>,
}

impl ArmijoBacktracking {
    pub fn new(alpha0: f64, gama: f64, c: f64) -> Self {
        Self {
            alpha0,
            gama,
            c,
            ..Self::default()
        }
    }

    pub fn with_slack(mut self, slack: f64) -> Self {
        self.slack = slack;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Step size the next search starts from.
    pub fn current_alpha(&self) -> f64 {
        self.carried.unwrap_or(self.alpha0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.alpha0.is_finite() && self.alpha0 > 0.0) {
            return Err(DescentError::invalid(
                "alpha0",
                format!("must be finite and positive, got {}", self.alpha0),
            ));
        }
        if !(self.gama > 0.0 && self.gama < 1.0) {
            return Err(DescentError::invalid(
                "gama",
                format!("must lie in (0, 1), got {}", self.gama),
            ));
        }
        if !(self.c > 0.0 && self.c < 1.0) {
            return Err(DescentError::invalid(
                "c",
                format!("must lie in (0, 1), got {}", self.c),
            ));
        }
        if self.max_steps == 0 {
            return Err(DescentError::invalid("max_steps", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for ArmijoBacktracking {
    fn default() -> Self {
        Self {
            alpha0: 1.0,
            gama: 0.8,
            c: 0.5,
            slack: 1e-6,
            max_steps: 100,
            carried: None,
        }
    }
}

impl<S: Space> StepSizeStrategy<S> for ArmijoBacktracking {
    fn name(&self) -> &'static str {
        "armijo"
    }

    fn prepare(&mut self, _space: &S, _x0: &S::Point) -> Result<()> {
        self.validate()?;
        self.carried = None;
        Ok(())
    }

    fn search(
        &mut self,
        ctx: &StepContext<'_, S>,
        eval_cost: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult {
        let mut alpha = self.current_alpha();
        let Some(cost0) = eval_cost(0.0) else {
            return LineSearchResult::reject(alpha, 0);
        };

        let mut trials = 0;
        for _ in 0..self.max_steps {
            trials += 1;
            if let Some(cost_trial) = eval_cost(alpha) {
                let rsdl = cost_trial - cost0 - self.c * alpha * ctx.dphi0;
                if rsdl <= self.slack {
                    self.carried = Some(alpha);
                    return LineSearchResult::accept(alpha, trials);
                }
            }
            alpha *= self.gama;
        }

        LineSearchResult::reject(alpha, trials)
    }
}
