// ----------------- helpers (dependency-free) -----------------

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn norm2(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// out = A v, A: (n x n) row-major
pub fn mat_vec_into(a: &[f64], n: usize, v: &[f64], out: &mut [f64]) {
    for i in 0..n {
        out[i] = dot(&a[i * n..(i + 1) * n], v);
    }
}

/// u^T A v, A: (n x n) row-major
pub fn bilinear(a: &[f64], n: usize, u: &[f64], v: &[f64]) -> f64 {
    let mut acc = 0.0;
    for i in 0..n {
        let ui = u[i];
        if ui == 0.0 {
            continue;
        }
        acc += ui * dot(&a[i * n..(i + 1) * n], v);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilinear_matches_mat_vec() {
        let a = [2.0, 1.0, 1.0, 3.0];
        let u = [1.0, -2.0];
        let v = [0.5, 4.0];
        let mut av = [0.0; 2];
        mat_vec_into(&a, 2, &v, &mut av);
        assert_eq!(av, [5.0, 12.5]);
        assert!((bilinear(&a, 2, &u, &v) - dot(&u, &av)).abs() < 1e-12);
    }

    #[test]
    fn norm2_of_unit_axes() {
        assert_eq!(norm2(&[0.0, 1.0, 0.0]), 1.0);
        assert_eq!(norm2(&[]), 0.0);
    }
}
