use optalgs::{
    line_search::{
        armijo_line_search, constant_step_search, exact_line_search, ARMIJO_DEFAULT_ALPHA0,
        ARMIJO_DEFAULT_C, ARMIJO_DEFAULT_GAMA, DEFAULT_MAX_ITER,
    },
    DescentOutcome, QuadraticForm,
};

fn f(x: &[f64]) -> f64 {
    x[0] * x[0] + 2.0 * x[1] * x[1]
}

fn grad_f(x: &[f64]) -> Vec<f64> {
    vec![x[0], 2.0 * x[1]]
}

fn show(name: &str, outcome: &DescentOutcome<Vec<f64>>) {
    println!(
        "{name:>8}: converged={} fc={} x*=({:+.3e}, {:+.3e}) f(x*)={:.3e} alphas={:?}",
        outcome.converged(),
        outcome.fc(),
        outcome.x()[0],
        outcome.x()[1],
        outcome.f(),
        outcome.trajectory().map(|a| a.len()),
    );
}

fn main() -> optalgs::Result<()> {
    let x0 = [2.0, 1.0];
    let form = QuadraticForm::diagonal(&[1.0, 2.0]);

    let exact = exact_line_search(f, grad_f, &form, &x0, DEFAULT_MAX_ITER)?;
    let constant = constant_step_search(f, grad_f, &x0, 0.1, DEFAULT_MAX_ITER)?;
    let armijo = armijo_line_search(
        f,
        grad_f,
        &x0,
        ARMIJO_DEFAULT_ALPHA0,
        ARMIJO_DEFAULT_GAMA,
        ARMIJO_DEFAULT_C,
        DEFAULT_MAX_ITER,
    )?;

    show("exact", &exact);
    show("constant", &constant);
    show("armijo", &armijo);
    Ok(())
}
