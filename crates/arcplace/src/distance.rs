//! Inter-arc separation: collision test, exact and adaptive minimum distance.
//!
//! Two engines with different contracts:
//! - `exact_min_distance`: analytic, circular and unrotated arcs only. Returns
//!   `COLLISION_SENTINEL` when the arcs touch.
//! - `fast_min_distance`: sampled hill-climb for any kind and rotation. The
//!   result is the distance between two actual arc points, so it never
//!   underestimates, but it can settle on a local minimum in non-convex
//!   configurations. Good enough for the placement accept test.
//!
//! `separation` puts both behind one call selected by `Precision`.

use nalgebra::{DMatrix, Vector2};

use crate::cfg::{
    BRACKET_WIDTH, COLLISION_DISTANCE, LENGTH_PER_SAMPLE, MAX_REFINE_ROUNDS, MIN_SAMPLES,
    SAMPLE_SHRINK, SHRINK_ABOVE,
};
use crate::error::ArcError;
use crate::geometry::intersect::{ellipse_ellipse, line_through, AxisEllipse, EllipseMeet};
use crate::geometry::{Arc, ArcKind};

/// Returned by `exact_min_distance` when the arcs intersect.
pub const COLLISION_SENTINEL: f64 = -1.0;

/// Which distance engine to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Precision {
    /// Sampled refinement; any kind, any rotation.
    #[default]
    Fast,
    /// Closed form; circular, unrotated arcs only.
    Exact,
}

/// Outcome of a separation query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Separation {
    Apart(f64),
    Colliding,
}

impl Separation {
    pub fn distance(&self) -> Option<f64> {
        match *self {
            Separation::Apart(d) => Some(d),
            Separation::Colliding => None,
        }
    }
}

fn unrotated_ellipse(arc: &Arc) -> AxisEllipse {
    AxisEllipse::new(arc.center, arc.a, arc.b)
}

/// Whether the two arcs share a point. The same arc (by reference) never collides with itself.
pub fn collides(a: &Arc, b: &Arc) -> Result<bool, ArcError> {
    if std::ptr::eq(a, b) {
        return Ok(false);
    }
    a.require_unrotated("collides")?;
    b.require_unrotated("collides")?;
    let hit = match ellipse_ellipse(&unrotated_ellipse(a), &unrotated_ellipse(b)) {
        EllipseMeet::Points(points) => points
            .into_iter()
            .any(|p| a.is_point_on_sweep(p) && b.is_point_on_sweep(p)),
        // Same curve: the arcs touch iff the sweeps overlap.
        EllipseMeet::Coincident => {
            a.endpoints().iter().any(|p| b.is_point_on_sweep(*p))
                || b.endpoints().iter().any(|p| a.is_point_on_sweep(*p))
        }
    };
    Ok(hit)
}

/// Analytic minimum distance between two circular, unrotated arcs.
///
/// Returns `COLLISION_SENTINEL` if `collides` holds. Otherwise the minimum over
/// - each endpoint of one arc against the other circle along the ray from that
///   circle's center (points kept only if on the other sweep), both ways;
/// - the four endpoint pairs;
/// - the points where the line of centers meets each circle on its own sweep.
pub fn exact_min_distance(a: &Arc, b: &Arc) -> Result<f64, ArcError> {
    const OP: &str = "exact_min_distance";
    for arc in [a, b] {
        arc.require_unrotated(OP)?;
        if arc.kind != ArcKind::Circular {
            return Err(ArcError::NotCircular { op: OP });
        }
    }
    if collides(a, b)? {
        return Ok(COLLISION_SENTINEL);
    }
    let (ea, eb) = (unrotated_ellipse(a), unrotated_ellipse(b));
    let ends_a = a.endpoints();
    let ends_b = b.endpoints();
    let mut best = f64::INFINITY;
    let mut keep = |d: f64| best = best.min(d);

    for (ends, other, other_ellipse) in [(&ends_a, b, &eb), (&ends_b, a, &ea)] {
        for &end in ends.iter() {
            for p in line_through(other.center, end, other_ellipse) {
                if other.is_point_on_sweep(p) {
                    keep((p - end).norm());
                }
            }
        }
    }

    for pa in &ends_a {
        for pb in &ends_b {
            keep((pa - pb).norm());
        }
    }

    let on_a: Vec<Vector2<f64>> = line_through(a.center, b.center, &ea)
        .into_iter()
        .filter(|p| a.is_point_on_sweep(*p))
        .collect();
    let on_b: Vec<Vector2<f64>> = line_through(a.center, b.center, &eb)
        .into_iter()
        .filter(|p| b.is_point_on_sweep(*p))
        .collect();
    for pa in &on_a {
        for pb in &on_b {
            keep((pa - pb).norm());
        }
    }
    Ok(best)
}

/// Bracket of the sample at `i` and its neighbours.
fn neighbour_bracket(samples: &[(f64, Vector2<f64>)], i: usize) -> (f64, f64) {
    let last = samples.len() - 1;
    match i {
        0 => (samples[0].0, samples[1].0),
        _ if i == last => (samples[last - 1].0, samples[last].0),
        _ => (samples[i - 1].0, samples[i + 1].0),
    }
}

/// Row-major first minimum of the pairwise distance matrix.
fn closest_pair(pa: &[(f64, Vector2<f64>)], pb: &[(f64, Vector2<f64>)]) -> (usize, usize, f64) {
    let dist = DMatrix::from_fn(pa.len(), pb.len(), |i, j| (pa[i].1 - pb[j].1).norm());
    let mut best = (0, 0, f64::INFINITY);
    for i in 0..dist.nrows() {
        for j in 0..dist.ncols() {
            if dist[(i, j)] < best.2 {
                best = (i, j, dist[(i, j)]);
            }
        }
    }
    best
}

/// Adaptive minimum-distance estimate between any two arcs.
///
/// Both sweeps are sampled with the same count, starting near
/// `a.length / 7` and shrinking by 1.5× per round while above 5 (never below
/// 4). Each round narrows both brackets to the neighbours of the closest
/// sample pair; the search stops once both brackets are at most 0.01 rad wide
/// and returns the closest distance of the last round.
pub fn fast_min_distance(a: &Arc, b: &Arc) -> f64 {
    let (mut lo_a, mut hi_a) = (a.theta1, a.theta2);
    let (mut lo_b, mut hi_b) = (b.theta1, b.theta2);
    let mut samples = ((a.length / LENGTH_PER_SAMPLE).floor() as usize).max(MIN_SAMPLES);
    let mut best = f64::INFINITY;
    for _ in 0..MAX_REFINE_ROUNDS {
        if samples > SHRINK_ABOVE {
            samples = ((samples as f64 / SAMPLE_SHRINK) as usize).max(MIN_SAMPLES);
        }
        let pa: Vec<_> = a.subdivide(samples, lo_a, hi_a).collect();
        let pb: Vec<_> = b.subdivide(samples, lo_b, hi_b).collect();
        let (i, j, d) = closest_pair(&pa, &pb);
        best = d;
        (lo_a, hi_a) = neighbour_bracket(&pa, i);
        (lo_b, hi_b) = neighbour_bracket(&pb, j);
        if hi_a - lo_a <= BRACKET_WIDTH && hi_b - lo_b <= BRACKET_WIDTH {
            break;
        }
    }
    best
}

/// `fast_min_distance < 1`.
pub fn fast_collision(a: &Arc, b: &Arc) -> bool {
    fast_min_distance(a, b) < COLLISION_DISTANCE
}

/// Separation with the chosen engine. `Exact` keeps its preconditions.
pub fn separation(a: &Arc, b: &Arc, precision: Precision) -> Result<Separation, ArcError> {
    match precision {
        Precision::Fast => {
            let d = fast_min_distance(a, b);
            Ok(if d < COLLISION_DISTANCE {
                Separation::Colliding
            } else {
                Separation::Apart(d)
            })
        }
        Precision::Exact => {
            let d = exact_min_distance(a, b)?;
            Ok(if d == COLLISION_SENTINEL {
                Separation::Colliding
            } else {
                Separation::Apart(d)
            })
        }
    }
}

#[cfg(test)]
mod tests;
