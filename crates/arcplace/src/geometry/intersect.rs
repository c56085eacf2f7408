//! Intersection toolkit for axis-aligned ellipses.
//!
//! Every query returns zero, one or two points (or a short list for
//! ellipse/ellipse), ordered along the query's parameter. Ellipses are given
//! as `(center, a, b)` with `a` along x and `b` along y; rotated ellipses are
//! out of scope here.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::types::Canvas;
use crate::cfg::{BISECT_STEPS, ELLIPSE_ROOT_GRID};

const EPS: f64 = 1e-9;

/// Axis-aligned ellipse `((x−cx)/a)² + ((y−cy)/b)² = 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisEllipse {
    pub center: Vector2<f64>,
    pub a: f64,
    pub b: f64,
}

impl AxisEllipse {
    pub fn new(center: Vector2<f64>, a: f64, b: f64) -> Self {
        Self { center, a, b }
    }

    #[inline]
    fn is_circle(&self) -> bool {
        (self.a - self.b).abs() <= EPS * self.a.max(1.0)
    }

    /// Implicit function: negative inside, zero on the curve, positive outside.
    #[inline]
    pub fn level(&self, p: Vector2<f64>) -> f64 {
        let dx = (p.x - self.center.x) / self.a;
        let dy = (p.y - self.center.y) / self.b;
        dx * dx + dy * dy - 1.0
    }

    /// Point at eccentric anomaly `t`.
    #[inline]
    fn at(&self, t: f64) -> Vector2<f64> {
        self.center + Vector2::new(self.a * t.cos(), self.b * t.sin())
    }
}

/// Intersections of the infinite line `p + t·d` with `e`, as `(t, point)`
/// sorted by `t`. Empty if `d` is zero.
pub fn line_ellipse(p: Vector2<f64>, d: Vector2<f64>, e: &AxisEllipse) -> Vec<(f64, Vector2<f64>)> {
    let (a2, b2) = (e.a * e.a, e.b * e.b);
    let u = p - e.center;
    let qa = d.x * d.x / a2 + d.y * d.y / b2;
    if qa <= f64::EPSILON {
        return Vec::new();
    }
    let qb = 2.0 * (u.x * d.x / a2 + u.y * d.y / b2);
    let qc = u.x * u.x / a2 + u.y * u.y / b2 - 1.0;
    let disc = qb * qb - 4.0 * qa * qc;
    if disc < -EPS {
        return Vec::new();
    }
    if disc <= EPS {
        let t = -qb / (2.0 * qa);
        return vec![(t, p + d * t)];
    }
    let sq = disc.sqrt();
    let (t0, t1) = ((-qb - sq) / (2.0 * qa), (-qb + sq) / (2.0 * qa));
    vec![(t0, p + d * t0), (t1, p + d * t1)]
}

/// Intersections of the line through `p` and `q` with `e`. Empty if `p == q`.
pub fn line_through(p: Vector2<f64>, q: Vector2<f64>, e: &AxisEllipse) -> Vec<Vector2<f64>> {
    line_ellipse(p, q - p, e).into_iter().map(|(_, x)| x).collect()
}

/// Intersections of the closed segment `[p, q]` with `e`.
pub fn segment_ellipse(p: Vector2<f64>, q: Vector2<f64>, e: &AxisEllipse) -> Vec<Vector2<f64>> {
    line_ellipse(p, q - p, e)
        .into_iter()
        .filter(|(t, _)| (-EPS..=1.0 + EPS).contains(t))
        .map(|(_, x)| x)
        .collect()
}

/// Intersections of `e` with the boundary of `canvas`. Points shared by two
/// edges (corners) are reported once.
pub fn rect_ellipse(canvas: &Canvas, e: &AxisEllipse) -> Vec<Vector2<f64>> {
    let c = canvas.corners();
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(8);
    for k in 0..4 {
        for x in segment_ellipse(c[k], c[(k + 1) % 4], e) {
            if !out.iter().any(|y| (x - *y).norm() < 1e-7) {
                out.push(x);
            }
        }
    }
    out
}

/// Result of intersecting two ellipses.
#[derive(Clone, Debug, PartialEq)]
pub enum EllipseMeet {
    /// Finitely many common points (possibly none).
    Points(Vec<Vector2<f64>>),
    /// The two ellipses are the same curve.
    Coincident,
}

/// Intersections of two axis-aligned ellipses.
///
/// Circles are solved in closed form. Other pairs bracket sign changes of
/// `e2.level` along `e1` on a fixed grid and refine by bisection; tangential
/// contacts without a sign change are not reported.
pub fn ellipse_ellipse(e1: &AxisEllipse, e2: &AxisEllipse) -> EllipseMeet {
    let same_shape = (e1.a - e2.a).abs() <= EPS && (e1.b - e2.b).abs() <= EPS;
    if same_shape && (e1.center - e2.center).norm() <= EPS {
        return EllipseMeet::Coincident;
    }
    if e1.is_circle() && e2.is_circle() {
        return EllipseMeet::Points(circle_circle(e1.center, e1.a, e2.center, e2.a));
    }
    let g = |t: f64| e2.level(e1.at(t));
    let n = ELLIPSE_ROOT_GRID;
    let mut out = Vec::new();
    let mut t_prev = 0.0;
    let mut g_prev = g(t_prev);
    for k in 1..=n {
        let t = TAU * k as f64 / n as f64;
        let gt = g(t);
        if g_prev == 0.0 {
            out.push(e1.at(t_prev));
        } else if g_prev * gt < 0.0 {
            let (mut lo, mut hi, mut glo) = (t_prev, t, g_prev);
            for _ in 0..BISECT_STEPS {
                let mid = 0.5 * (lo + hi);
                let gm = g(mid);
                if gm * glo <= 0.0 {
                    hi = mid;
                } else {
                    lo = mid;
                    glo = gm;
                }
            }
            out.push(e1.at(0.5 * (lo + hi)));
        }
        t_prev = t;
        g_prev = gt;
    }
    EllipseMeet::Points(out)
}

fn circle_circle(c1: Vector2<f64>, r1: f64, c2: Vector2<f64>, r2: f64) -> Vec<Vector2<f64>> {
    let delta = c2 - c1;
    let d = delta.norm();
    if d <= EPS || d > r1 + r2 + EPS || d < (r1 - r2).abs() - EPS {
        return Vec::new();
    }
    let along = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h2 = r1 * r1 - along * along;
    let unit = delta / d;
    let base = c1 + unit * along;
    if h2 <= EPS {
        return vec![base];
    }
    let h = h2.sqrt();
    let perp = Vector2::new(-unit.y, unit.x);
    vec![base + perp * h, base - perp * h]
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn horizontal_line_through_unit_circle() {
        let e = AxisEllipse::new(vector![0.0, 0.0], 1.0, 1.0);
        let hits = line_ellipse(vector![-2.0, 0.0], vector![1.0, 0.0], &e);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].1 - vector![-1.0, 0.0]).norm() < 1e-12);
        assert!((hits[1].1 - vector![1.0, 0.0]).norm() < 1e-12);
        // tangent line
        let tangent = line_ellipse(vector![-2.0, 1.0], vector![1.0, 0.0], &e);
        assert_eq!(tangent.len(), 1);
        // miss
        assert!(line_ellipse(vector![-2.0, 1.5], vector![1.0, 0.0], &e).is_empty());
        // zero direction
        assert!(line_through(vector![0.3, 0.3], vector![0.3, 0.3], &e).is_empty());
    }

    #[test]
    fn segment_keeps_only_points_between_ends() {
        let e = AxisEllipse::new(vector![0.0, 0.0], 2.0, 1.0);
        let hits = segment_ellipse(vector![0.0, 0.0], vector![5.0, 0.0], &e);
        assert_eq!(hits.len(), 1);
        assert!((hits[0] - vector![2.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn rectangle_crossings_of_ellipse_at_corner() {
        let canvas = Canvas::new(100.0, 100.0).unwrap();
        let e = AxisEllipse::new(vector![0.0, 0.0], 20.0, 10.0);
        let hits = rect_ellipse(&canvas, &e);
        // crosses the bottom edge at x=20 and the left edge at y=10
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|p| (p - vector![20.0, 0.0]).norm() < 1e-9));
        assert!(hits.iter().any(|p| (p - vector![0.0, 10.0]).norm() < 1e-9));
    }

    #[test]
    fn circles_two_one_zero_points() {
        let c = |x: f64, y: f64, r: f64| AxisEllipse::new(vector![x, y], r, r);
        match ellipse_ellipse(&c(0.0, 0.0, 5.0), &c(8.0, 0.0, 5.0)) {
            EllipseMeet::Points(p) => {
                assert_eq!(p.len(), 2);
                for q in p {
                    assert!((q.x - 4.0).abs() < 1e-9 && (q.y.abs() - 3.0).abs() < 1e-9);
                }
            }
            other => panic!("unexpected {other:?}"),
        }
        match ellipse_ellipse(&c(0.0, 0.0, 5.0), &c(10.0, 0.0, 5.0)) {
            EllipseMeet::Points(p) => assert_eq!(p.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
        match ellipse_ellipse(&c(0.0, 0.0, 5.0), &c(20.0, 0.0, 5.0)) {
            EllipseMeet::Points(p) => assert!(p.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            ellipse_ellipse(&c(1.0, 1.0, 5.0), &c(1.0, 1.0, 5.0)),
            EllipseMeet::Coincident
        );
    }

    #[test]
    fn crossed_ellipses_meet_four_times() {
        let wide = AxisEllipse::new(vector![0.0, 0.0], 4.0, 1.0);
        let tall = AxisEllipse::new(vector![0.0, 0.0], 1.0, 4.0);
        match ellipse_ellipse(&wide, &tall) {
            EllipseMeet::Points(p) => {
                assert_eq!(p.len(), 4);
                for q in p {
                    assert!(wide.level(q).abs() < 1e-9);
                    assert!(tall.level(q).abs() < 1e-7);
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
