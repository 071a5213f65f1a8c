use std::cell::RefCell;
use std::fmt::Write;

/// One per-iteration diagnostic row of a descent run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolverTraceRecord {
    pub solver: &'static str,
    pub iter: usize,
    pub f: Option<f64>,
    pub grad_norm: Option<f64>,
    pub alpha: Option<f64>,
    pub trials: Option<usize>,
    pub dphi0: Option<f64>,
    pub note: Option<&'static str>,
}

impl SolverTraceRecord {
    pub fn format_line(&self) -> String {
        let mut line = format!("[{}] iter {:>6}", self.solver, self.iter);
        if let Some(v) = self.f {
            let _ = write!(line, " | f {:>13.6e}", v);
        }
        if let Some(v) = self.grad_norm {
            let _ = write!(line, " | grad {:>13.6e}", v);
        }
        if let Some(v) = self.alpha {
            let _ = write!(line, " | alpha {:>10.3e}", v);
        }
        if let Some(v) = self.trials {
            let _ = write!(line, " | trials {:>3}", v);
        }
        if let Some(v) = self.dphi0 {
            let _ = write!(line, " | dphi0 {:>13.6e}", v);
        }
        if let Some(note) = self.note {
            let _ = write!(line, " | note {note}");
        }
        line
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TraceRow {
    iter: usize,
    f: Option<f64>,
    grad_norm: Option<f64>,
    alpha: Option<f64>,
    trials: Option<usize>,
    dphi0: Option<f64>,
    note: Option<&'static str>,
}

impl TraceRow {
    pub(crate) fn iter(iter: usize) -> Self {
        Self {
            iter,
            f: None,
            grad_norm: None,
            alpha: None,
            trials: None,
            dphi0: None,
            note: None,
        }
    }

    pub(crate) fn f(mut self, f: Option<f64>) -> Self {
        self.f = f;
        self
    }

    pub(crate) fn grad_norm(mut self, grad_norm: f64) -> Self {
        self.grad_norm = Some(grad_norm);
        self
    }

    pub(crate) fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub(crate) fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    pub(crate) fn dphi0(mut self, dphi0: f64) -> Self {
        self.dphi0 = Some(dphi0);
        self
    }

    pub(crate) fn note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }
}

/// Collects and/or logs trace rows for one run.
///
/// Verbose rows go to the `log` facade at info level under the crate's
/// target, so callers pick the sink through their logger setup.
#[derive(Clone, Debug)]
pub(crate) struct SolverTracer {
    verbose: bool,
    solver: &'static str,
    history: Option<RefCell<Vec<SolverTraceRecord>>>,
}

impl SolverTracer {
    pub(crate) fn new(solver: &'static str, verbose: bool) -> Self {
        Self {
            verbose,
            solver,
            history: None,
        }
    }

    pub(crate) fn with_history(solver: &'static str, verbose: bool) -> Self {
        Self {
            verbose,
            solver,
            history: Some(RefCell::new(Vec::new())),
        }
    }

    /// Whether rows are consumed at all; lets the solver skip extra `f` evaluations.
    pub(crate) fn is_active(&self) -> bool {
        self.verbose || self.history.is_some()
    }

    pub(crate) fn solver(&self) -> &'static str {
        self.solver
    }

    pub(crate) fn emit(&self, row: TraceRow) {
        if !self.is_active() {
            return;
        }
        let record = SolverTraceRecord {
            solver: self.solver,
            iter: row.iter,
            f: row.f,
            grad_norm: row.grad_norm,
            alpha: row.alpha,
            trials: row.trials,
            dphi0: row.dphi0,
            note: row.note,
        };

        if self.verbose {
            log::info!("{}", record.format_line());
        }

        if let Some(history) = &self.history {
            history.borrow_mut().push(record);
        }
    }

    pub(crate) fn into_history(self) -> Option<Vec<SolverTraceRecord>> {
        self.history.map(|history| history.into_inner())
    }
}
