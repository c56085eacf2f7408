//! Parametric evaluation on a single arc.

use std::f64::consts::TAU;

use nalgebra::{Rotation2, Vector2};

use super::types::Arc;
use crate::cfg::SWEEP_EPS;

impl Arc {
    /// Point of the (possibly rotated) ellipse at polar angle `angle`.
    ///
    /// Uses the polar radius `ab / sqrt(b² cos²θ + a² sin²θ)`. This is the same
    /// point as the tangent form `x = ab / sqrt(b² + a² tan²θ)` with its
    /// quadrant branch, without the poles at π/2 and 3π/2.
    pub fn point_at(&self, angle: f64) -> Vector2<f64> {
        let (s, c) = angle.sin_cos();
        let (a, b) = (self.a, self.b);
        let r = a * b / (b * b * c * c + a * a * s * s).sqrt();
        let local = Vector2::new(r * c, r * s);
        if self.is_rotated() {
            self.center + Rotation2::new(self.rotation) * local
        } else {
            self.center + local
        }
    }

    /// Whether `p`, assumed to lie on the ellipse, falls inside the sweep.
    ///
    /// The polar angle of `p` (rotation removed) is normalised to `[0, 2π)` and
    /// tested against `[theta1, theta2]` and `[theta1, theta2] − 2π`, which
    /// covers sweeps that cross the 0/2π seam.
    pub fn is_point_on_sweep(&self, p: Vector2<f64>) -> bool {
        let d = p - self.center;
        let angle = (d.y.atan2(d.x) - self.rotation).rem_euclid(TAU);
        let within = |t: f64| t >= self.theta1 - SWEEP_EPS && t <= self.theta2 + SWEEP_EPS;
        within(angle) || within(angle + TAU)
    }

    /// `count` evenly spaced `(angle, point)` samples over `[start, end]`,
    /// both ends included. `count` is raised to 2 if smaller.
    pub fn subdivide(&self, count: usize, start: f64, end: f64) -> Subdivide<'_> {
        let count = count.max(2);
        Subdivide {
            arc: self,
            start,
            step: (end - start) / (count - 1) as f64,
            count,
            next: 0,
        }
    }
}

/// Iterator returned by `Arc::subdivide`. Clone it to restart.
#[derive(Clone, Debug)]
pub struct Subdivide<'a> {
    arc: &'a Arc,
    start: f64,
    step: f64,
    count: usize,
    next: usize,
}

impl Iterator for Subdivide<'_> {
    type Item = (f64, Vector2<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let angle = self.start + self.next as f64 * self.step;
        self.next += 1;
        Some((angle, self.arc.point_at(angle)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Subdivide<'_> {}
