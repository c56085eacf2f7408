//! Tolerance and tuning defaults (internal).
//!
//! Policy
//! - Defaults are fixed constants. Call sites that need a different value take
//!   it through `PlacementCfg` or an explicit argument instead.

use std::f64::consts::PI;

/// Slack applied to angular sweep membership.
pub(crate) const SWEEP_EPS: f64 = 1e-9;
/// Absolute tolerance for adaptive Simpson quadrature.
pub(crate) const QUAD_TOL: f64 = 1e-10;
/// Recursion limit for adaptive Simpson quadrature.
pub(crate) const QUAD_MAX_DEPTH: u32 = 48;

/// Bracket width (radians) at which the adaptive distance search stops.
pub(crate) const BRACKET_WIDTH: f64 = 0.01;
/// Arc length per initial sample in the adaptive distance search.
pub(crate) const LENGTH_PER_SAMPLE: f64 = 7.0;
/// Sample counts above this shrink by `SAMPLE_SHRINK` every round.
pub(crate) const SHRINK_ABOVE: usize = 5;
pub(crate) const SAMPLE_SHRINK: f64 = 1.5;
/// Lowest sample count the adaptive search works with. Four samples shrink an
/// interior bracket to 2/3 of its width per round; three would not shrink it.
pub(crate) const MIN_SAMPLES: usize = 4;
/// Hard cap on refinement rounds.
pub(crate) const MAX_REFINE_ROUNDS: usize = 256;

/// `fast_collision` threshold.
pub(crate) const COLLISION_DISTANCE: f64 = 1.0;
/// Grid used to bracket ellipse/ellipse roots before bisection.
pub(crate) const ELLIPSE_ROOT_GRID: usize = 1024;
pub(crate) const BISECT_STEPS: usize = 64;

/// Elliptical sweeps are drawn from `(MIN_SWEEP, MAX_SWEEP)`.
pub(crate) const MIN_SWEEP: f64 = PI / 6.0;
pub(crate) const MAX_SWEEP: f64 = 11.0 * PI / 6.0;

pub(crate) const DEFAULT_RETRY_BUDGET: usize = 100;
pub(crate) const DEFAULT_MIN_DIST: f64 = 10.0;
