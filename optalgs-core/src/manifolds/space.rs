//! Space abstractions with retraction-style updates.

/// Trait that represents an abstract optimization space.
///
/// The interface is intentionally small. Solvers work with:
/// - points (`x`) on the space
/// - local update vectors (gradients, `direction`) used by `retract_into`
pub trait Space {
    type Point: Clone;
    type Tangent: Clone;

    fn zero_like(&self, x: &Self::Point) -> Self::Point;

    /// Number of coordinates of a point.
    fn dim(&self, x: &Self::Point) -> usize;

    /// Number of coordinates of a local update vector.
    fn tangent_dim(&self, v: &Self::Tangent) -> usize;

    /// Tangent/local zero vector at `x`.
    fn zero_tangent_like(&self, x: &Self::Point) -> Self::Tangent;

    /// Inner product of two local update vectors.
    fn inner(&self, u: &Self::Tangent, v: &Self::Tangent) -> f64;

    /// Norm on the local update vector.
    fn tangent_norm(&self, v: &Self::Tangent) -> f64 {
        self.inner(v, v).sqrt()
    }

    // --- core ops (allocation-free if impl does it right) ---
    fn scale_into(&self, out: &mut Self::Tangent, v: &Self::Tangent, alpha: f64);
    fn add_into(&self, out: &mut Self::Point, x: &Self::Point, v: &Self::Tangent);

    /// out = Retr_x(alpha * direction)
    fn retract_into(
        &self,
        out: &mut Self::Point,
        x: &Self::Point,
        direction: &Self::Tangent,
        alpha: f64,
        tmp: &mut Self::Tangent,
    ) {
        self.scale_into(tmp, direction, alpha);
        self.add_into(out, x, tmp);
    }

    /// In-place step update: x <- Retr_x(alpha * direction)
    fn retract_step_into(
        &self,
        x: &mut Self::Point,
        direction: &Self::Tangent,
        alpha: f64,
        x_next: &mut Self::Point,
        tmp: &mut Self::Tangent,
    ) {
        self.retract_into(x_next, x, direction, alpha, tmp);
        std::mem::swap(x, x_next);
    }

    // allocating convenience wrapper
    fn retract(&self, x: &Self::Point, direction: &Self::Tangent, alpha: f64) -> Self::Point {
        let mut out = self.zero_like(x);
        let mut tmp = self.zero_tangent_like(x);
        self.retract_into(&mut out, x, direction, alpha, &mut tmp);
        out
    }
}
