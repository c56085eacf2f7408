//! Canvas containment tests.
//!
//! - `fast_out_of_bounds`: sampled, any rotation, may miss short excursions
//!   between samples. Used inside the placement loop.
//! - `exact_out_of_bounds`: analytic ellipse/rectangle crossings, unrotated only.

use crate::error::ArcError;
use crate::geometry::intersect::{rect_ellipse, AxisEllipse};
use crate::geometry::Arc;

/// Sample the sweep at roughly one point per unit length and report whether any
/// sample leaves the canvas.
pub fn fast_out_of_bounds(arc: &Arc) -> bool {
    let count = arc.length.round().max(2.0) as usize;
    arc.subdivide(count, arc.theta1, arc.theta2)
        .any(|(_, p)| !arc.canvas.contains(p))
}

/// Analytic containment test for unrotated arcs.
///
/// Out of bounds if the ellipse crosses the canvas boundary at a point on the
/// sweep, or if either endpoint lies outside the canvas.
pub fn exact_out_of_bounds(arc: &Arc) -> Result<bool, ArcError> {
    arc.require_unrotated("exact_out_of_bounds")?;
    let ellipse = AxisEllipse::new(arc.center, arc.a, arc.b);
    if rect_ellipse(&arc.canvas, &ellipse)
        .into_iter()
        .any(|p| arc.is_point_on_sweep(p))
    {
        return Ok(true);
    }
    Ok(arc.endpoints().iter().any(|p| !arc.canvas.contains(*p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Canvas;
    use nalgebra::vector;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn circle_arc(cx: f64, cy: f64, r: f64, t1: f64, t2: f64) -> Arc {
        Arc::circular(r, t1, t2, Canvas::default())
            .unwrap()
            .with_center(vector![cx, cy])
    }

    #[test]
    fn interior_arc_is_in_bounds() {
        let arc = circle_arc(400.0, 400.0, 100.0, 0.0, 5.0);
        assert!(!fast_out_of_bounds(&arc));
        assert!(!exact_out_of_bounds(&arc).unwrap());
    }

    #[test]
    fn arc_crossing_the_right_edge() {
        // circle pokes through x = 800 around angle 0; both endpoints stay inside
        let arc = circle_arc(750.0, 400.0, 100.0, 5.0, 7.5);
        assert!(arc.endpoints().iter().all(|p| arc.canvas.contains(*p)));
        assert!(fast_out_of_bounds(&arc));
        assert!(exact_out_of_bounds(&arc).unwrap());
    }

    #[test]
    fn crossing_outside_the_sweep_is_ignored() {
        // the circle leaves through the right edge, but only the left half is drawn
        let arc = circle_arc(750.0, 400.0, 100.0, FRAC_PI_2 + 0.1, 3.0 * FRAC_PI_2 - 0.1);
        assert!(!fast_out_of_bounds(&arc));
        assert!(!exact_out_of_bounds(&arc).unwrap());
    }

    #[test]
    fn endpoint_outside_without_crossing() {
        // the whole arc sits left of the canvas
        let arc = circle_arc(-300.0, 400.0, 50.0, 0.0, PI);
        assert!(fast_out_of_bounds(&arc));
        assert!(exact_out_of_bounds(&arc).unwrap());
    }

    #[test]
    fn exact_check_rejects_rotated_arcs() {
        let arc = Arc::elliptical(40.0, 20.0, 0.0, 2.0, 0.3, Canvas::default())
            .unwrap()
            .with_center(vector![400.0, 400.0]);
        assert!(matches!(
            exact_out_of_bounds(&arc),
            Err(ArcError::Rotated { .. })
        ));
        assert!(!fast_out_of_bounds(&arc));
    }
}
