use optalgs::{
    manifolds::{EuclideanSpace, Space},
    problems::{objective::Objective, test_functions::Rosenbrock, QuadraticForm},
    solvers::gd::{
        ArmijoBacktracking, ConstantStep, ExactQuadratic, GradientDescent, LineSearchResult,
        StepContext, StepSizeStrategy, StopReason,
    },
    DescentError,
};

#[test]
fn quadratic_minimization() {
    // f(x) = x^2 - 4x => x* = 2
    let obj = QuadraticForm::new(1, vec![1.0], vec![-4.0]).unwrap();
    let solver = GradientDescent {
        space: EuclideanSpace,
        max_iters: 1000,
        tol_grad: 1e-6,
        verbose: false,
        collect_trace: false,
    };

    let x0 = vec![0.0];
    let f0 = obj.value(&x0);
    let result = solver
        .minimize_with_strategy(&obj, x0, &mut ArmijoBacktracking::default())
        .unwrap();

    assert!(result.converged());
    assert!((result.x()[0] - 2.0).abs() < 1e-3);
    assert!(result.f() < f0);
}

#[test]
fn exact_search_on_quadratic_objective() {
    // Objective and step share the same form; true gradient 2Qx + b.
    let form = QuadraticForm::new(2, vec![3.0, 1.0, 1.0, 2.0], vec![-1.0, 0.5]).unwrap();
    let solver = GradientDescent::new();
    let result = solver
        .minimize_with_strategy(&form, vec![4.0, -3.0], &mut ExactQuadratic::new(form.clone()))
        .unwrap();

    assert!(result.converged());
    // minimizer solves 2Qx = -b
    let mut g = vec![0.0; 2];
    form.gradient(result.x(), &mut g);
    assert!(g.iter().all(|gi| gi.abs() < 1e-5));
    assert!(result.trajectory().unwrap().iter().all(|a| *a > 0.0));
}

#[test]
fn rosenbrock_decreases_with_armijo() {
    let obj = Rosenbrock { a: 1.0, b: 100.0 };
    let solver = GradientDescent::new().with_max_iters(20_000);

    let x0 = vec![-1.2, 1.0];
    let f0 = obj.value(&x0);
    let result = solver
        .minimize_with_strategy(&obj, x0, &mut ArmijoBacktracking::default())
        .unwrap();

    assert!(result.f() < f0);
    assert!(result.fc() <= 20_000);
}

#[test]
fn objective_dimension_mismatch_fails_fast() {
    let obj = Rosenbrock::default();
    let err = GradientDescent::new()
        .minimize_with_strategy(&obj, vec![0.0, 0.0, 0.0], &mut ConstantStep::new(1e-3))
        .unwrap_err();
    assert_eq!(
        err,
        DescentError::DimensionMismatch {
            context: "objective",
            expected: 2,
            got: 3,
        }
    );
}

#[test]
fn nonlinear_minimization_with_fn() {
    let solver = GradientDescent {
        space: EuclideanSpace,
        max_iters: 200_000,
        tol_grad: 1e-6,
        verbose: false,
        collect_trace: false,
    };

    // initial point
    let x0 = vec![0.0, 0.0];

    // p = [ cos(x) + cos(x+y)
    //       sin(x) + sin(x+y)]
    let p_fn = |x: &Vec<f64>| {
        vec![
            f64::cos(x[0]) + f64::cos(x[0] + x[1]),
            f64::sin(x[0]) + f64::sin(x[0] + x[1]),
        ]
    };
    let dp_fn = |x: &Vec<f64>| {
        vec![
            vec![
                -(f64::sin(x[0]) + f64::sin(x[0] + x[1])),
                -f64::sin(x[0] + x[1]),
            ],
            vec![
                f64::cos(x[0]) + f64::cos(x[0] + x[1]),
                f64::cos(x[0] + x[1]),
            ],
        ]
    };
    let target = [0.5, (f64::sqrt(3.0) + 2.0) / 2.0];
    use std::f64::consts::PI;

    let value_fn = |x: &Vec<f64>| {
        let p = p_fn(x);
        let residual = [p[0] - target[0], p[1] - target[1]];
        0.5 * (residual[0].powi(2) + residual[1].powi(2))
    };

    let grad_fn = |x: &Vec<f64>, grad: &mut Vec<f64>| {
        let p = p_fn(x);
        let residual = [p[0] - target[0], p[1] - target[1]];
        let dp = dp_fn(x);
        grad[0] = residual[0] * dp[0][0] + residual[1] * dp[1][0];
        grad[1] = residual[0] * dp[0][1] + residual[1] * dp[1][1];
    };

    let result = solver
        .minimize_with_fn_and_strategy(x0, value_fn, grad_fn, &mut ConstantStep::new(1e-2))
        .unwrap();

    assert!(result.converged());
    // True minimizer is (pi/3, pi/6)
    assert!((result.x()[0] - PI / 3.0).abs() < 1e-3);
    assert!((result.x()[1] - PI / 6.0).abs() < 1e-3);
}

#[test]
fn gd_respects_max_iters_and_step_size() {
    let value_fn = |x: &Vec<f64>| {
        let d = x[0] - 3.0;
        d * d
    };
    let grad_fn = |x: &Vec<f64>, grad: &mut Vec<f64>| {
        grad[0] = 2.0 * (x[0] - 3.0);
    };

    let run = |alpha: f64, max_iters: usize, tol_grad: f64| {
        GradientDescent {
            space: EuclideanSpace,
            max_iters,
            tol_grad,
            verbose: false,
            collect_trace: false,
        }
        .minimize_with_fn_and_strategy(vec![0.0], value_fn, grad_fn, &mut ConstantStep::new(alpha))
        .unwrap()
    };

    let short_small = run(0.01, 1, 1e-12);
    let short_large = run(0.1, 1, 1e-12);
    let long_run = run(0.1, 200, 1e-9);

    assert!(!short_small.converged());
    assert!(!short_large.converged());
    assert!(long_run.converged());
    assert!(short_small.x()[0] < short_large.x()[0] && short_large.x()[0] < 3.0);
    assert!(long_run.f() < short_large.f());
}

#[test]
fn collected_trace_has_one_row_per_iteration() {
    let solver = GradientDescent {
        collect_trace: true,
        ..GradientDescent::new()
    };
    let result = solver
        .minimize_with_fn_and_strategy(
            vec![2.0, 1.0],
            |x: &Vec<f64>| x[0] * x[0] + 2.0 * x[1] * x[1],
            |x: &Vec<f64>, g: &mut Vec<f64>| {
                g[0] = x[0];
                g[1] = 2.0 * x[1];
            },
            &mut ArmijoBacktracking::default(),
        )
        .unwrap();

    assert!(result.converged());
    let rows = result.report().trace.as_ref().unwrap();
    let alphas = result.trajectory().unwrap();
    assert_eq!(rows.len(), result.fc() + 1);
    for (row, alpha) in rows.iter().zip(alphas) {
        assert_eq!(row.solver, "armijo");
        assert_eq!(row.alpha, Some(*alpha));
        assert!(row.f.is_some());
        assert!(row.dphi0.unwrap() < 0.0);
    }
    let last = rows.last().unwrap();
    assert_eq!(last.note, Some("converged"));
    assert_eq!(last.iter, result.fc());
    assert_eq!(last.f, Some(result.f()));
}

#[test]
fn trace_is_absent_unless_requested() {
    let result = GradientDescent::new()
        .minimize_with_fn_and_strategy(
            vec![1.0],
            |x: &Vec<f64>| x[0] * x[0],
            |x: &Vec<f64>, g: &mut Vec<f64>| g[0] = 2.0 * x[0],
            &mut ConstantStep::new(0.25),
        )
        .unwrap();
    assert!(result.converged());
    assert!(result.report().trace.is_none());
}

/// Wraps a strategy and checks the context it receives.
struct DirectionCheck<LS> {
    inner: LS,
    calls: usize,
}

impl<LS: StepSizeStrategy<EuclideanSpace>> StepSizeStrategy<EuclideanSpace> for DirectionCheck<LS> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn tracks_trajectory(&self) -> bool {
        self.inner.tracks_trajectory()
    }

    fn prepare(&mut self, space: &EuclideanSpace, x0: &Vec<f64>) -> optalgs::Result<()> {
        self.inner.prepare(space, x0)
    }

    fn search(
        &mut self,
        ctx: &StepContext<'_, EuclideanSpace>,
        eval_cost: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult {
        let x = ctx.x;
        let expected = [x[0], 2.0 * x[1]];
        assert_eq!(ctx.iter, self.calls);
        assert_eq!(ctx.grad, &expected.to_vec());
        assert_eq!(ctx.direction, &vec![-expected[0], -expected[1]]);
        let dphi0 = EuclideanSpace.inner(ctx.grad, ctx.direction);
        assert_eq!(ctx.dphi0, dphi0);
        self.calls += 1;
        self.inner.search(ctx, eval_cost)
    }
}

fn check_directions<LS: StepSizeStrategy<EuclideanSpace>>(inner: LS) -> usize {
    let mut strategy = DirectionCheck { inner, calls: 0 };
    let result = GradientDescent::new()
        .minimize_with_fn_and_strategy(
            vec![2.0, 1.0],
            |x: &Vec<f64>| x[0] * x[0] + 2.0 * x[1] * x[1],
            |x: &Vec<f64>, g: &mut Vec<f64>| {
                g[0] = x[0];
                g[1] = 2.0 * x[1];
            },
            &mut strategy,
        )
        .unwrap();
    assert!(result.converged());
    assert_eq!(strategy.calls, result.fc());
    strategy.calls
}

#[test]
fn direction_is_negated_gradient_for_every_strategy() {
    assert!(check_directions(ExactQuadratic::new(QuadraticForm::diagonal(&[1.0, 2.0]))) > 0);
    assert!(check_directions(ConstantStep::new(0.1)) > 0);
    assert!(check_directions(ArmijoBacktracking::default()) > 0);
}

#[test]
fn armijo_gives_up_on_ascent_direction() {
    // gradient with the wrong sign: -grad is an ascent direction
    let solver = GradientDescent::new();
    let mut armijo = ArmijoBacktracking::default().with_max_steps(5);
    let result = solver
        .minimize_with_fn_and_strategy(
            vec![2.0, 1.0],
            |x: &Vec<f64>| x[0] * x[0] + 2.0 * x[1] * x[1],
            |x: &Vec<f64>, g: &mut Vec<f64>| {
                g[0] = -x[0];
                g[1] = -2.0 * x[1];
            },
            &mut armijo,
        )
        .unwrap();

    assert!(!result.converged());
    match result.stop_reason() {
        Some(StopReason::LineSearchFailed { alpha, trials }) => {
            assert_eq!(trials, 5);
            assert!((alpha - 0.8f64.powi(5)).abs() < 1e-12);
        }
        other => panic!("unexpected stop reason {other:?}"),
    }
    assert_eq!(result.fc(), 0);
    assert_eq!(result.x(), &vec![2.0, 1.0]);
}

#[test]
fn armijo_rejects_non_finite_objective() {
    let result = GradientDescent::new()
        .minimize_with_fn_and_strategy(
            vec![1.0],
            |_x: &Vec<f64>| f64::NAN,
            |x: &Vec<f64>, g: &mut Vec<f64>| g[0] = x[0],
            &mut ArmijoBacktracking::default(),
        )
        .unwrap();
    assert_eq!(
        result.stop_reason(),
        Some(StopReason::LineSearchFailed {
            alpha: 1.0,
            trials: 0
        })
    );
}

#[test]
fn strategy_can_be_used_as_trait_object() {
    let mut strategies: Vec<Box<dyn StepSizeStrategy<EuclideanSpace>>> = vec![
        Box::new(ExactQuadratic::new(QuadraticForm::diagonal(&[1.0, 2.0]))),
        Box::new(ConstantStep::new(0.1)),
        Box::new(ArmijoBacktracking::default()),
    ];
    let solver = GradientDescent::new();
    for strategy in strategies.iter_mut() {
        let result = solver
            .minimize_with_fn_and_strategy(
                vec![2.0, 1.0],
                |x: &Vec<f64>| x[0] * x[0] + 2.0 * x[1] * x[1],
                |x: &Vec<f64>, g: &mut Vec<f64>| {
                    g[0] = x[0];
                    g[1] = 2.0 * x[1];
                },
                strategy.as_mut(),
            )
            .unwrap();
        assert!(result.converged(), "{}", strategy.name());
        assert!(result.f() <= 1e-8);
    }
}
