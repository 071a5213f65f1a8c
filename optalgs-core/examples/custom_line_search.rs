use optalgs::{
    manifolds::EuclideanSpace,
    problems::test_functions::Rosenbrock,
    solvers::gd::{GradientDescent, LineSearchResult, StepContext, StepSizeStrategy},
};

/// Diminishing step `alpha0 / (1 + k)`, accepted only if the cost does not grow.
#[derive(Clone, Copy, Debug)]
struct Diminishing {
    alpha0: f64,
}

impl StepSizeStrategy<EuclideanSpace> for Diminishing {
    fn name(&self) -> &'static str {
        "diminishing"
    }

    fn search(
        &mut self,
        ctx: &StepContext<'_, EuclideanSpace>,
        eval_cost: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult {
        let alpha = self.alpha0 / (1.0 + ctx.iter as f64);
        match (eval_cost(0.0), eval_cost(alpha)) {
            (Some(cost0), Some(cost_trial)) if cost_trial <= cost0 => {
                LineSearchResult::accept(alpha, 1)
            }
            _ => LineSearchResult::reject(alpha, 1),
        }
    }
}

fn main() -> optalgs::Result<()> {
    let solver = GradientDescent {
        max_iters: 5_000,
        verbose: false,
        collect_trace: true,
        ..GradientDescent::new()
    };

    let mut strategy = Diminishing { alpha0: 2e-3 };
    let outcome = solver.minimize_with_strategy(&Rosenbrock::default(), vec![-1.2, 1.0], &mut strategy)?;

    if let Some(rows) = &outcome.report().trace {
        for row in rows.iter().step_by(1_000) {
            println!("{}", row.format_line());
        }
    }
    println!(
        "converged={} fc={} x={:?} f={:.3e} stop={:?}",
        outcome.converged(),
        outcome.fc(),
        outcome.x(),
        outcome.f(),
        outcome.stop_reason()
    );
    Ok(())
}
