//! Arc record, kind tag and canvas.

use nalgebra::Vector2;
use rand::Rng;

use crate::error::ArcError;

use super::quad::arc_length;

/// Kind tag. Selects the semi-axis relation and the center-of-mass formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArcKind {
    Circular,
    Elliptical,
}

impl ArcKind {
    /// Center-of-mass estimate relative to the arc center.
    ///
    /// Not the true centroid: `r (sin θ2 − sin θ1, cos θ1 − cos θ2) / (θ1 + θ2)`,
    /// with `r` the radius (circular) or the mean semi-axis (elliptical). The
    /// elliptical variant shifts both angles by the rotation.
    fn center_of_mass(self, arc: &Arc) -> Result<Vector2<f64>, ArcError> {
        let (r, t1, t2) = match self {
            ArcKind::Circular => (arc.a, arc.theta1, arc.theta2),
            ArcKind::Elliptical => (
                0.5 * (arc.a + arc.b),
                arc.theta1 + arc.rotation,
                arc.theta2 + arc.rotation,
            ),
        };
        let denom = t1 + t2;
        if !denom.is_finite() || denom.abs() < 1e-12 {
            return Err(ArcError::degenerate(
                "theta1 + theta2 vanishes in the center-of-mass estimate",
            ));
        }
        Ok(Vector2::new(
            r * (t2.sin() - t1.sin()) / denom,
            r * (t1.cos() - t2.cos()) / denom,
        ))
    }
}

/// Axis-aligned canvas `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self, ArcError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ArcError::degenerate(format!(
                "canvas must have positive size, got {width}×{height}"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Corners in counterclockwise order starting at the origin.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(self.width, 0.0),
            Vector2::new(self.width, self.height),
            Vector2::new(0.0, self.height),
        ]
    }
}

/// A circular or elliptical arc on a canvas.
///
/// Invariants (checked by the constructors)
/// - `a > 0`, `b > 0`, and `a == b` for `Circular`.
/// - `theta1 < theta2`.
/// - `length` is the quadrature length of the sweep unless supplied.
///
/// `center` starts at the origin until assigned with `with_center` or
/// `with_random_center`.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    pub kind: ArcKind,
    pub a: f64,
    pub b: f64,
    pub theta1: f64,
    pub theta2: f64,
    /// Rotation (radians) about `center`, applied after evaluation.
    pub rotation: f64,
    pub center: Vector2<f64>,
    pub length: f64,
    pub canvas: Canvas,
}

impl Arc {
    /// Circular arc of the given radius over `[theta1, theta2]`.
    pub fn circular(
        radius: f64,
        theta1: f64,
        theta2: f64,
        canvas: Canvas,
    ) -> Result<Self, ArcError> {
        Self::build(ArcKind::Circular, radius, radius, theta1, theta2, 0.0, canvas)
    }

    /// Elliptical arc with semi-axes `a` (local x) and `b` (local y).
    pub fn elliptical(
        a: f64,
        b: f64,
        theta1: f64,
        theta2: f64,
        rotation: f64,
        canvas: Canvas,
    ) -> Result<Self, ArcError> {
        Self::build(ArcKind::Elliptical, a, b, theta1, theta2, rotation, canvas)
    }

    fn build(
        kind: ArcKind,
        a: f64,
        b: f64,
        theta1: f64,
        theta2: f64,
        rotation: f64,
        canvas: Canvas,
    ) -> Result<Self, ArcError> {
        if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
            return Err(ArcError::degenerate(format!(
                "semi-axes must be positive, got a={a}, b={b}"
            )));
        }
        if kind == ArcKind::Circular && a != b {
            return Err(ArcError::degenerate(format!(
                "circular arc needs equal semi-axes, got a={a}, b={b}"
            )));
        }
        if !(theta1.is_finite() && theta2.is_finite()) || theta1 >= theta2 {
            return Err(ArcError::degenerate(format!(
                "empty sweep [{theta1}, {theta2}]"
            )));
        }
        if !rotation.is_finite() {
            return Err(ArcError::degenerate("rotation must be finite"));
        }
        let arc = Self {
            kind,
            a,
            b,
            theta1,
            theta2,
            rotation,
            center: Vector2::zeros(),
            length: arc_length(a, b, theta1, theta2),
            canvas,
        };
        // An undefined center-of-mass estimate is rejected here, not at placement.
        kind.center_of_mass(&arc)?;
        Ok(arc)
    }

    pub fn with_center(mut self, center: Vector2<f64>) -> Self {
        self.center = center;
        self
    }

    /// Replace the quadrature length with an externally supplied target length.
    pub fn with_length(mut self, length: f64) -> Result<Self, ArcError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ArcError::degenerate(format!(
                "arc length must be positive, got {length}"
            )));
        }
        self.length = length;
        Ok(self)
    }

    /// Draw a center uniformly so that `center + center_of_mass_estimate` lies on the canvas.
    pub fn with_random_center<R: Rng>(mut self, rng: &mut R) -> Result<Self, ArcError> {
        self.center = self.random_center(rng)?;
        Ok(self)
    }

    /// Integer center in `[-com, size - com]` per axis.
    pub(crate) fn random_center<R: Rng>(&self, rng: &mut R) -> Result<Vector2<f64>, ArcError> {
        let com = self.center_of_mass_estimate()?;
        let axis = |rng: &mut R, c: f64, size: f64| {
            let lo = (-c) as i64;
            let hi = (size - c) as i64;
            rng.gen_range(lo..=hi.max(lo)) as f64
        };
        let x = axis(rng, com.x, self.canvas.width);
        let y = axis(rng, com.y, self.canvas.height);
        Ok(Vector2::new(x, y))
    }

    /// Same arc with the sweep moved to start at `theta1`; the sweep width is kept.
    pub fn with_origin(mut self, theta1: f64) -> Self {
        let sweep = self.sweep();
        self.theta1 = theta1;
        self.theta2 = theta1 + sweep;
        self
    }

    #[inline]
    pub fn sweep(&self) -> f64 {
        self.theta2 - self.theta1
    }

    #[inline]
    pub fn radius(&self) -> Option<f64> {
        match self.kind {
            ArcKind::Circular => Some(self.a),
            ArcKind::Elliptical => None,
        }
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    /// Guard for the analytic algorithms.
    pub(crate) fn require_unrotated(&self, op: &'static str) -> Result<(), ArcError> {
        if self.is_rotated() {
            return Err(ArcError::Rotated {
                op,
                rotation: self.rotation,
            });
        }
        Ok(())
    }

    /// Center-of-mass estimate relative to `center`; see `ArcKind` for the formula.
    pub fn center_of_mass_estimate(&self) -> Result<Vector2<f64>, ArcError> {
        self.kind.center_of_mass(self)
    }

    /// Arc length of this arc's ellipse over `[theta1, theta2]`.
    pub fn arc_length(&self, theta1: f64, theta2: f64) -> f64 {
        arc_length(self.a, self.b, theta1, theta2)
    }

    /// Points at `theta1` and `theta2`.
    pub fn endpoints(&self) -> [Vector2<f64>; 2] {
        [self.point_at(self.theta1), self.point_at(self.theta2)]
    }
}
