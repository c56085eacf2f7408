use super::*;
use crate::geometry::Canvas;
use nalgebra::vector;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn circle_arc(cx: f64, cy: f64, r: f64, t1: f64, t2: f64) -> Arc {
    Arc::circular(r, t1, t2, Canvas::default())
        .unwrap()
        .with_center(vector![cx, cy])
}

#[test]
fn an_arc_never_collides_with_itself() {
    let arc = circle_arc(200.0, 200.0, 50.0, 0.0, 6.0);
    assert!(!collides(&arc, &arc).unwrap());
    let rotated = Arc::elliptical(30.0, 10.0, 0.0, 2.0, 0.7, Canvas::default()).unwrap();
    assert!(!collides(&rotated, &rotated).unwrap());
    // an equal copy is a different arc on the same curve
    let copy = arc.clone();
    assert!(collides(&arc, &copy).unwrap());
}

#[test]
fn nearly_touching_circles_agree() {
    // 71·√2 between centers, radii 50: gap of about 0.409
    let a = circle_arc(200.0, 200.0, 50.0, 0.0, 6.28);
    let b = circle_arc(271.0, 271.0, 50.0, 1.5707, 6.29);
    let expected = 71.0 * std::f64::consts::SQRT_2 - 100.0;
    let exact = exact_min_distance(&a, &b).unwrap();
    assert!(exact > 0.0);
    assert!((exact - expected).abs() < 1e-9, "exact = {exact}");
    let fast = fast_min_distance(&a, &b);
    assert!(fast >= exact - 1e-9, "fast = {fast}");
    assert!(fast - exact < 1.0, "fast = {fast}, exact = {exact}");
    assert!(fast_collision(&a, &b));
}

#[test]
fn concentric_arcs_are_a_radial_gap_apart() {
    let inner = circle_arc(400.0, 400.0, 50.0, 0.5, 2.5);
    let outer = circle_arc(400.0, 400.0, 80.0, 0.5, 2.5);
    let exact = exact_min_distance(&inner, &outer).unwrap();
    assert!((exact - 30.0).abs() < 1e-9);
    let fast = fast_min_distance(&inner, &outer);
    assert!((fast - 30.0).abs() < 1e-6);
    assert_eq!(
        separation(&inner, &outer, Precision::Exact).unwrap(),
        Separation::Apart(exact)
    );
    let sampled = separation(&inner, &outer, Precision::Fast).unwrap();
    assert!((sampled.distance().unwrap() - 30.0).abs() < 1e-6);
}

#[test]
fn crossing_arcs_report_the_sentinel() {
    // circles meet at (400, 370) and (400, 430); both sweeps face each other
    let a = circle_arc(360.0, 400.0, 50.0, 5.0, 7.5);
    let b = circle_arc(440.0, 400.0, 50.0, FRAC_PI_2, 3.0 * FRAC_PI_2);
    assert!(collides(&a, &b).unwrap());
    assert_eq!(exact_min_distance(&a, &b).unwrap(), COLLISION_SENTINEL);
    assert_eq!(
        separation(&a, &b, Precision::Exact).unwrap(),
        Separation::Colliding
    );
    assert!(fast_collision(&a, &b));
    assert_eq!(
        separation(&a, &b, Precision::Fast).unwrap(),
        Separation::Colliding
    );
    assert_eq!(Separation::Colliding.distance(), None);
}

#[test]
fn crossing_circles_with_averted_sweeps_do_not_collide() {
    // same circles, but each arc is drawn on the far side
    let a = circle_arc(360.0, 400.0, 50.0, FRAC_PI_2 + 0.3, 3.0 * FRAC_PI_2 - 0.3);
    let b = circle_arc(440.0, 400.0, 50.0, 5.0, 7.5);
    assert!(!collides(&a, &b).unwrap());
    let exact = exact_min_distance(&a, &b).unwrap();
    // the facing endpoints of b sit closest to a's far side
    assert!(exact > 50.0, "exact = {exact}");
    let fast = fast_min_distance(&a, &b);
    assert!(fast >= exact - 1e-9);
    assert!(fast - exact < 1.0, "fast = {fast}, exact = {exact}");
}

#[test]
fn exact_preconditions() {
    let circ = circle_arc(100.0, 100.0, 20.0, 0.0, 1.0);
    let ell = Arc::elliptical(30.0, 10.0, 0.0, 2.0, 0.0, Canvas::default())
        .unwrap()
        .with_center(vector![300.0, 300.0]);
    assert_eq!(
        exact_min_distance(&circ, &ell),
        Err(ArcError::NotCircular {
            op: "exact_min_distance"
        })
    );
    let turned = Arc { rotation: 0.4, ..ell.clone() };
    assert!(matches!(
        collides(&circ, &turned),
        Err(ArcError::Rotated { .. })
    ));
    // the fast engine has no such restriction
    assert!(fast_min_distance(&circ, &turned).is_finite());
    assert!(separation(&circ, &turned, Precision::Exact).is_err());
}

#[test]
fn elliptical_arcs_collide_where_sweeps_overlap() {
    let wide = Arc::elliptical(80.0, 20.0, 0.0, PI, 0.0, Canvas::default())
        .unwrap()
        .with_center(vector![400.0, 400.0]);
    let tall = Arc::elliptical(20.0, 80.0, 0.0, FRAC_PI_2, 0.0, Canvas::default())
        .unwrap()
        .with_center(vector![400.0, 400.0]);
    assert!(collides(&wide, &tall).unwrap());
    // the lower half of the tall ellipse misses the upper half of the wide one
    let tall_low = Arc { theta1: PI + 0.1, theta2: 2.0 * PI - 0.1, ..tall };
    assert!(!collides(&wide, &tall_low).unwrap());
}

#[test]
fn fast_distance_on_short_arcs_terminates() {
    // fewer than four initial samples and sweeps already below the bracket width
    let a = circle_arc(100.0, 100.0, 10.0, 1.0, 1.005);
    let b = circle_arc(200.0, 100.0, 10.0, 2.0, 2.004);
    let d = fast_min_distance(&a, &b);
    let reference = (a.point_at(1.0) - b.point_at(2.0)).norm();
    assert!((d - reference).abs() < 0.1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn fast_never_beats_exact(
        ax in 100.0f64..700.0, ay in 100.0f64..700.0,
        bx in 100.0f64..700.0, by in 100.0f64..700.0,
        ra in 10.0f64..80.0, rb in 10.0f64..80.0,
        ta in 0.0f64..6.2, tb in 0.0f64..6.2,
        sa in 0.2f64..5.0, sb in 0.2f64..5.0,
    ) {
        let a = circle_arc(ax, ay, ra, ta, ta + sa);
        let b = circle_arc(bx, by, rb, tb, tb + sb);
        let exact = exact_min_distance(&a, &b).unwrap();
        prop_assume!(exact != COLLISION_SENTINEL);
        prop_assert!(fast_min_distance(&a, &b) >= exact - 1e-6);
    }
}
