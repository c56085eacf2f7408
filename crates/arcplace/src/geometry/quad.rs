//! Adaptive Simpson quadrature and the ellipse arc-length integral.

use crate::cfg::{QUAD_MAX_DEPTH, QUAD_TOL};

/// Integrate `f` over `[lo, hi]` to the default tolerance. `lo > hi` flips the sign.
pub fn integrate<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64) -> f64 {
    if lo == hi {
        return 0.0;
    }
    if lo > hi {
        return -integrate(f, hi, lo);
    }
    let mid = 0.5 * (lo + hi);
    let (flo, fmid, fhi) = (f(lo), f(mid), f(hi));
    let whole = simpson(lo, hi, flo, fmid, fhi);
    adapt(&f, lo, hi, flo, fmid, fhi, whole, QUAD_TOL, QUAD_MAX_DEPTH)
}

#[inline]
fn simpson(lo: f64, hi: f64, flo: f64, fmid: f64, fhi: f64) -> f64 {
    (hi - lo) / 6.0 * (flo + 4.0 * fmid + fhi)
}

#[allow(clippy::too_many_arguments)]
fn adapt<F: Fn(f64) -> f64>(
    f: &F,
    lo: f64,
    hi: f64,
    flo: f64,
    fmid: f64,
    fhi: f64,
    whole: f64,
    tol: f64,
    depth: u32,
) -> f64 {
    let mid = 0.5 * (lo + hi);
    let (lm, rm) = (0.5 * (lo + mid), 0.5 * (mid + hi));
    let (flm, frm) = (f(lm), f(rm));
    let left = simpson(lo, mid, flo, flm, fmid);
    let right = simpson(mid, hi, fmid, frm, fhi);
    let delta = left + right - whole;
    if depth == 0 || delta.abs() <= 15.0 * tol {
        // Richardson correction.
        return left + right + delta / 15.0;
    }
    adapt(f, lo, mid, flo, flm, fmid, left, 0.5 * tol, depth - 1)
        + adapt(f, mid, hi, fmid, frm, fhi, right, 0.5 * tol, depth - 1)
}

/// `∫ sqrt(a² sin²θ + b² cos²θ) dθ` over `[theta1, theta2]`.
pub fn arc_length(a: f64, b: f64, theta1: f64, theta2: f64) -> f64 {
    let (a2, b2) = (a * a, b * b);
    integrate(
        |t| {
            let (s, c) = t.sin_cos();
            (a2 * s * s + b2 * c * c).sqrt()
        },
        theta1,
        theta2,
    )
}
