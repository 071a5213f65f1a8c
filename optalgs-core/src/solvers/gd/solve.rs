use crate::error::{DescentError, Result};
use crate::manifolds::space::Space;
use crate::problems::objective::Objective;
use crate::solvers::common::step_policy::{StepContext, StepSizeStrategy};
use crate::solvers::common::trace::{SolverTracer, TraceRow};

use super::types::{DescentOutcome, DescentReport, GradientDescent, StopReason};

impl<S: Space> GradientDescent<S> {
    fn make_tracer(&self, solver: &'static str) -> SolverTracer {
        if self.collect_trace {
            SolverTracer::with_history(solver, self.verbose)
        } else {
            SolverTracer::new(solver, self.verbose)
        }
    }

    fn attach_trace(
        &self,
        mut outcome: DescentOutcome<S::Point>,
        trace: SolverTracer,
    ) -> DescentOutcome<S::Point> {
        outcome.report_mut().trace = if self.collect_trace {
            trace.into_history()
        } else {
            None
        };
        outcome
    }

    fn run_with_fn_and_strategy<F, G, LS>(
        &self,
        mut x: S::Point,
        mut value_fn: F,
        mut grad_fn: G,
        strategy: &mut LS,
        trace: &SolverTracer,
    ) -> Result<DescentOutcome<S::Point>>
    where
        F: FnMut(&S::Point) -> f64,
        G: FnMut(&S::Point, &mut S::Tangent),
        LS: StepSizeStrategy<S> + ?Sized,
    {
        strategy.prepare(&self.space, &x)?;
        let n = self.space.dim(&x);

        // Pre-allocate buffers to avoid repeated allocations.
        let mut grad = self.space.zero_tangent_like(&x);
        let mut direction = self.space.zero_tangent_like(&x);
        let mut x_trial = self.space.zero_like(&x);
        let mut tmp = self.space.zero_tangent_like(&x); // for retract_into
        let mut trajectory = strategy.tracks_trajectory().then(Vec::new);
        let mut fc = 0;

        loop {
            grad_fn(&x, &mut grad);
            let got = self.space.tangent_dim(&grad);
            if got != n {
                return Err(DescentError::DimensionMismatch {
                    context: "gradient",
                    expected: n,
                    got,
                });
            }

            // direction = -grad
            self.space.scale_into(&mut direction, &grad, -1.0);
            let grad_norm = self.space.tangent_norm(&direction);
            let f_current = trace.is_active().then(|| value_fn(&x));

            if grad_norm <= self.tol_grad {
                trace.emit(
                    TraceRow::iter(fc)
                        .f(f_current)
                        .grad_norm(grad_norm)
                        .note("converged"),
                );
                let f = f_current.unwrap_or_else(|| value_fn(&x));
                return Ok(DescentOutcome::Converged {
                    trajectory,
                    report: DescentReport {
                        x,
                        f,
                        fc,
                        grad_norm,
                        trace: None,
                    },
                });
            }

            if fc >= self.max_iters {
                trace.emit(
                    TraceRow::iter(fc)
                        .f(f_current)
                        .grad_norm(grad_norm)
                        .note("max iterations"),
                );
                log::warn!(
                    "{}: line search did not converge within {} iterations (|grad| = {:.3e})",
                    trace.solver(),
                    self.max_iters,
                    grad_norm
                );
                let f = f_current.unwrap_or_else(|| value_fn(&x));
                return Ok(DescentOutcome::NotConverged {
                    reason: StopReason::MaxIterations,
                    partial: DescentReport {
                        x,
                        f,
                        fc,
                        grad_norm,
                        trace: None,
                    },
                });
            }

            let dphi0 = self.space.inner(&grad, &direction);
            let ctx = StepContext::<S> {
                iter: fc,
                x: &x,
                grad: &grad,
                direction: &direction,
                dphi0,
            };
            let mut eval_cost = |alpha_trial: f64| {
                self.space
                    .retract_into(&mut x_trial, &x, &direction, alpha_trial, &mut tmp);
                let f_trial = value_fn(&x_trial);
                f_trial.is_finite().then_some(f_trial)
            };
            let ls = strategy.search(&ctx, &mut eval_cost);

            trace.emit(
                TraceRow::iter(fc)
                    .f(f_current)
                    .grad_norm(grad_norm)
                    .alpha(ls.alpha)
                    .trials(ls.trials)
                    .dphi0(dphi0),
            );

            if !ls.accepted {
                log::warn!(
                    "{}: no acceptable step at iteration {} after {} trials (alpha = {:.3e})",
                    trace.solver(),
                    fc,
                    ls.trials,
                    ls.alpha
                );
                let f = f_current.unwrap_or_else(|| value_fn(&x));
                return Ok(DescentOutcome::NotConverged {
                    reason: StopReason::LineSearchFailed {
                        alpha: ls.alpha,
                        trials: ls.trials,
                    },
                    partial: DescentReport {
                        x,
                        f,
                        fc,
                        grad_norm,
                        trace: None,
                    },
                });
            }

            // x <- Retr_x(alpha * direction)
            self.space
                .retract_step_into(&mut x, &direction, ls.alpha, &mut x_trial, &mut tmp);
            if let Some(alphas) = trajectory.as_mut() {
                alphas.push(ls.alpha);
            }
            fc += 1;
        }
    }

    /// Minimize an [`Objective`] with the given step-size strategy.
    ///
    /// Fails fast if the objective reports a dimension different from `x`.
    pub fn minimize_with_strategy<O, LS>(
        &self,
        obj: &O,
        x: S::Point,
        strategy: &mut LS,
    ) -> Result<DescentOutcome<S::Point>>
    where
        O: Objective<S>,
        LS: StepSizeStrategy<S> + ?Sized,
    {
        if let Some(expected) = obj.dimension() {
            let got = self.space.dim(&x);
            if got != expected {
                return Err(DescentError::DimensionMismatch {
                    context: "objective",
                    expected,
                    got,
                });
            }
        }
        let trace = self.make_tracer(strategy.name());
        let outcome = self.run_with_fn_and_strategy(
            x,
            |p| obj.value(p),
            |p, g| obj.gradient(p, g),
            strategy,
            &trace,
        )?;
        Ok(self.attach_trace(outcome, trace))
    }

    /// Minimize user-provided value and gradient callbacks with the given
    /// step-size strategy. `grad_fn` writes into a buffer shaped like `x`.
    pub fn minimize_with_fn_and_strategy<F, G, LS>(
        &self,
        x: S::Point,
        value_fn: F,
        grad_fn: G,
        strategy: &mut LS,
    ) -> Result<DescentOutcome<S::Point>>
    where
        F: FnMut(&S::Point) -> f64,
        G: FnMut(&S::Point, &mut S::Tangent),
        LS: StepSizeStrategy<S> + ?Sized,
    {
        let trace = self.make_tracer(strategy.name());
        let outcome = self.run_with_fn_and_strategy(x, value_fn, grad_fn, strategy, &trace)?;
        Ok(self.attach_trace(outcome, trace))
    }
}
