use super::space::Space;
use crate::numerics::linalg::dot;

/// Euclidean space representing R^n as `Vec<f64>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanSpace;

impl Space for EuclideanSpace {
    type Point = Vec<f64>;
    type Tangent = Vec<f64>;

    fn zero_like(&self, x: &Vec<f64>) -> Vec<f64> {
        vec![0.0; x.len()]
    }

    fn dim(&self, x: &Vec<f64>) -> usize {
        x.len()
    }

    fn tangent_dim(&self, v: &Vec<f64>) -> usize {
        v.len()
    }

    fn zero_tangent_like(&self, x: &Vec<f64>) -> Vec<f64> {
        vec![0.0; x.len()]
    }

    fn inner(&self, u: &Vec<f64>, v: &Vec<f64>) -> f64 {
        dot(u, v)
    }

    fn scale_into(&self, out: &mut Vec<f64>, v: &Vec<f64>, alpha: f64) {
        out.resize(v.len(), 0.0);
        for (o, vi) in out.iter_mut().zip(v) {
            *o = alpha * vi;
        }
    }

    fn add_into(&self, out: &mut Vec<f64>, x: &Vec<f64>, v: &Vec<f64>) {
        out.resize(x.len(), 0.0);
        for i in 0..x.len() {
            out[i] = x[i] + v[i];
        }
    }

    fn retract_into(
        &self,
        out: &mut Vec<f64>,
        x: &Vec<f64>,
        direction: &Vec<f64>,
        alpha: f64,
        _tmp: &mut Vec<f64>,
    ) {
        out.resize(x.len(), 0.0);
        for i in 0..x.len() {
            out[i] = x[i] + alpha * direction[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retract_moves_along_direction() {
        let space = EuclideanSpace;
        let x = vec![2.0, 1.0];
        let d = vec![-2.0, -2.0];
        let y = space.retract(&x, &d, 0.5);
        assert_eq!(y, vec![1.0, 0.0]);
    }

    #[test]
    fn retract_step_swaps_in_place() {
        let space = EuclideanSpace;
        let mut x = vec![1.0, -1.0];
        let mut x_next = space.zero_like(&x);
        let mut tmp = space.zero_tangent_like(&x);
        space.retract_step_into(&mut x, &vec![1.0, 1.0], 2.0, &mut x_next, &mut tmp);
        assert_eq!(x, vec![3.0, 1.0]);
        assert_eq!(x_next, vec![1.0, -1.0]);
    }

    #[test]
    fn tangent_norm_is_euclidean() {
        let space = EuclideanSpace;
        assert!((space.tangent_norm(&vec![3.0, 4.0]) - 5.0).abs() < 1e-15);
    }
}
