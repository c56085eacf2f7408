//! Candidate construction from ranged parameters.
//!
//! Model
//! - Every tunable is a `Param`: a fixed value or a closed interval sampled
//!   uniformly per arc.
//! - Circular: `radius = 1 / curvature`, random start angle, sweep
//!   `length / radius` so the arc has the requested length.
//! - Elliptical: `b/a = sqrt(1 − e²)`, random start angle, sweep in
//!   `(π/6, 11π/6)`, axes scaled so the quadrature length matches the target.
//! - Centers are drawn with `Arc::with_random_center`.

use std::f64::consts::TAU;
use std::str::FromStr;

use nalgebra::Vector2;
use rand::Rng;

use crate::cfg::{MAX_SWEEP, MIN_SWEEP};
use crate::error::ArcError;
use crate::geometry::{arc_length, Arc, Canvas};

/// A fixed value or a closed interval sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Param {
    Fixed(f64),
    Uniform { lo: f64, hi: f64 },
}

impl Param {
    /// Interval `[lo, hi]` (order-insensitive); equal ends give `Fixed`.
    pub fn range(lo: f64, hi: f64) -> Self {
        if lo == hi {
            Param::Fixed(lo)
        } else {
            Param::Uniform {
                lo: lo.min(hi),
                hi: lo.max(hi),
            }
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            Param::Fixed(v) => v,
            Param::Uniform { lo, hi } => lo + rng.gen::<f64>() * (hi - lo),
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Param::Fixed(v) => (v, v),
            Param::Uniform { lo, hi } => (lo, hi),
        }
    }
}

/// Parses `"v"` or `"lo-hi"`. A leading minus belongs to the first number.
impl FromStr for Param {
    type Err = ArcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let bad = || ArcError::ParseParam(s.to_string());
        let number = |t: &str| t.trim().parse::<f64>().map_err(|_| bad());
        if let Ok(v) = text.parse::<f64>() {
            return Ok(Param::Fixed(v));
        }
        let split_at = text
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(bad)?;
        let lo = number(&text[..split_at])?;
        let hi = number(&text[split_at + 1..])?;
        Ok(Param::range(lo, hi))
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Param::Fixed(v) => write!(f, "{v}"),
            Param::Uniform { lo, hi } => write!(f, "{lo}-{hi}"),
        }
    }
}

/// Circular arc parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularCfg {
    pub curvature: Param,
    pub length: Param,
}

impl Default for CircularCfg {
    fn default() -> Self {
        Self {
            curvature: Param::range(0.002, 0.01),
            length: Param::range(100.0, 500.0),
        }
    }
}

/// Elliptical arc parameters. `rotation` is in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipticalCfg {
    pub eccentricity: Param,
    pub length: Param,
    pub rotation: Param,
}

impl Default for EllipticalCfg {
    fn default() -> Self {
        Self {
            eccentricity: Param::range(0.3, 0.9),
            length: Param::range(100.0, 500.0),
            rotation: Param::Fixed(0.0),
        }
    }
}

/// What to generate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArcSpec {
    Circular(CircularCfg),
    Elliptical(EllipticalCfg),
}

/// Full rotated ellipse placed strictly inside the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub a: f64,
    pub b: f64,
    pub rotation: f64,
    pub center: Vector2<f64>,
}

impl Ellipse {
    pub const LABEL: &'static str = "Ellipse";
    pub const FIELDS: &'static [&'static str] = &["a", "b", "Rotation", "Center X", "Center Y"];

    pub fn field_values(&self) -> Vec<f64> {
        vec![self.a, self.b, self.rotation, self.center.x, self.center.y]
    }
}

/// Builds candidate arcs on a fixed canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArcFactory {
    pub canvas: Canvas,
}

impl ArcFactory {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    /// Circular arc with the given curvature (1/radius) and length, randomly
    /// oriented and centered.
    pub fn circular_arc<R: Rng>(
        &self,
        curvature: f64,
        length: f64,
        rng: &mut R,
    ) -> Result<Arc, ArcError> {
        if !curvature.is_finite() || curvature <= 0.0 {
            return Err(ArcError::degenerate(format!(
                "curvature must be positive, got {curvature}"
            )));
        }
        check_length(length)?;
        let radius = 1.0 / curvature;
        let circumference = TAU * radius;
        let theta1 = rng.gen::<f64>() * TAU;
        let theta2 = theta1 + TAU * (length / circumference);
        Arc::circular(radius, theta1, theta2, self.canvas)?
            .with_length(length)?
            .with_random_center(rng)
    }

    /// Elliptical arc with eccentricity in `[0, 1)`, scaled to the given length.
    pub fn elliptical_arc<R: Rng>(
        &self,
        eccentricity: f64,
        length: f64,
        rotation: f64,
        rng: &mut R,
    ) -> Result<Arc, ArcError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ArcError::degenerate(format!(
                "eccentricity must lie in [0, 1), got {eccentricity}"
            )));
        }
        check_length(length)?;
        let ratio = (1.0 - eccentricity * eccentricity).sqrt();
        let theta1 = rng.gen::<f64>() * TAU;
        let theta2 = theta1 + MIN_SWEEP + rng.gen::<f64>() * (MAX_SWEEP - MIN_SWEEP);
        let scale = length / arc_length(1.0, ratio, theta1, theta2);
        Arc::elliptical(scale, scale * ratio, theta1, theta2, rotation, self.canvas)?
            .with_length(length)?
            .with_random_center(rng)
    }

    /// One candidate with parameters drawn from `spec`.
    pub fn candidate<R: Rng>(&self, spec: &ArcSpec, rng: &mut R) -> Result<Arc, ArcError> {
        match spec {
            ArcSpec::Circular(cfg) => {
                let curvature = cfg.curvature.sample(rng);
                let length = cfg.length.sample(rng);
                self.circular_arc(curvature, length, rng)
            }
            ArcSpec::Elliptical(cfg) => {
                let length = cfg.length.sample(rng);
                let eccentricity = cfg.eccentricity.sample(rng);
                let rotation = cfg.rotation.sample(rng);
                self.elliptical_arc(eccentricity, length, rotation, rng)
            }
        }
    }

    pub fn candidates<R: Rng>(
        &self,
        spec: &ArcSpec,
        amount: usize,
        rng: &mut R,
    ) -> Result<Vec<Arc>, ArcError> {
        (0..amount).map(|_| self.candidate(spec, rng)).collect()
    }

    /// Full ellipse centered in `[m, width − m] × [m, height − m]`, `m = max(a, b)`.
    pub fn cross_section<R: Rng>(
        &self,
        a: f64,
        b: f64,
        rotation: f64,
        rng: &mut R,
    ) -> Result<Ellipse, ArcError> {
        if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
            return Err(ArcError::degenerate(format!(
                "semi-axes must be positive, got a={a}, b={b}"
            )));
        }
        let margin = a.max(b);
        let (w, h) = (self.canvas.width, self.canvas.height);
        if 2.0 * margin > w || 2.0 * margin > h {
            return Err(ArcError::degenerate(format!(
                "ellipse with semi-axis {margin} does not fit a {w}×{h} canvas"
            )));
        }
        let axis = |rng: &mut R, size: f64| {
            rng.gen_range(margin as i64..=(size - margin) as i64) as f64
        };
        let x = axis(rng, w);
        let y = axis(rng, h);
        Ok(Ellipse {
            a,
            b,
            rotation,
            center: Vector2::new(x, y),
        })
    }
}

fn check_length(length: f64) -> Result<(), ArcError> {
    if !length.is_finite() || length <= 0.0 {
        return Err(ArcError::degenerate(format!(
            "arc length must be positive, got {length}"
        )));
    }
    Ok(())
}
