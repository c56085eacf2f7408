//! Randomized accept/reject placement with a bounded retry budget.
//!
//! Model
//! - Candidates are processed in order. Each one is checked against the canvas
//!   (`fast_out_of_bounds`) and against the arcs accepted so far
//!   (`floor(fast_min_distance) < min_dist`). Pending candidates are never
//!   consulted, so the input order shapes the result.
//! - A violating candidate is moved by `retry`: new random start angle (same
//!   sweep width), then a new random center. Once `retry_budget` moves have
//!   all failed the check, it is dropped.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use crate::bounds::fast_out_of_bounds;
use crate::cfg::{DEFAULT_MIN_DIST, DEFAULT_RETRY_BUDGET};
use crate::distance::fast_min_distance;
use crate::error::ArcError;
use crate::factory::{ArcFactory, ArcSpec};
use crate::geometry::{Arc, Canvas};

/// Placement constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementCfg {
    /// Minimum separation between accepted arcs (compared after flooring the distance).
    pub min_dist: f64,
    /// Moves allowed before a candidate is dropped.
    pub retry_budget: usize,
}

impl Default for PlacementCfg {
    fn default() -> Self {
        Self {
            min_dist: DEFAULT_MIN_DIST,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

/// Terminal state of one candidate. `index` is its position in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted { index: usize, attempts: usize },
    Dropped { index: usize, attempts: usize },
}

impl Outcome {
    pub fn is_dropped(&self) -> bool {
        matches!(self, Outcome::Dropped { .. })
    }
}

/// Result of a placement run: accepted arcs in acceptance order, one outcome per candidate.
#[derive(Clone, Debug, Default)]
pub struct Placement {
    pub accepted: Vec<Arc>,
    pub outcomes: Vec<Outcome>,
}

impl Placement {
    pub fn requested(&self) -> usize {
        self.outcomes.len()
    }

    pub fn dropped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_dropped()).count()
    }
}

/// Replay token to make runs reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Whether `candidate` leaves the canvas or comes closer than `min_dist` to an accepted arc.
pub fn violates(candidate: &Arc, accepted: &[Arc], cfg: &PlacementCfg) -> bool {
    fast_out_of_bounds(candidate)
        || accepted
            .iter()
            .any(|arc| fast_min_distance(candidate, arc).floor() < cfg.min_dist)
}

/// One reposition step: same shape and sweep width, new start angle and center.
pub fn retry<R: Rng>(candidate: &Arc, rng: &mut R) -> Result<Arc, ArcError> {
    let moved = candidate.clone().with_origin(rng.gen::<f64>() * TAU);
    moved.with_random_center(rng)
}

/// Run one candidate to `Accepted` or `Dropped`.
pub fn place_one<R: Rng>(
    candidate: Arc,
    accepted: &[Arc],
    cfg: &PlacementCfg,
    rng: &mut R,
) -> Result<(Option<Arc>, usize), ArcError> {
    let mut arc = candidate;
    let mut attempts = 0;
    while violates(&arc, accepted, cfg) {
        if attempts >= cfg.retry_budget {
            return Ok((None, attempts));
        }
        arc = retry(&arc, rng)?;
        attempts += 1;
    }
    Ok((Some(arc), attempts))
}

/// Place `candidates` in order; returns the accepted set and every outcome.
pub fn place<R: Rng>(
    candidates: Vec<Arc>,
    cfg: &PlacementCfg,
    rng: &mut R,
) -> Result<Placement, ArcError> {
    let mut placement = Placement {
        accepted: Vec::with_capacity(candidates.len()),
        outcomes: Vec::with_capacity(candidates.len()),
    };
    for (index, candidate) in candidates.into_iter().enumerate() {
        let (kept, attempts) = place_one(candidate, &placement.accepted, cfg, rng)?;
        match kept {
            Some(arc) => {
                placement.accepted.push(arc);
                placement.outcomes.push(Outcome::Accepted { index, attempts });
            }
            None => {
                tracing::debug!(index, attempts, "candidate dropped: retry budget exhausted");
                placement.outcomes.push(Outcome::Dropped { index, attempts });
            }
        }
    }
    tracing::info!(
        requested = placement.requested(),
        accepted = placement.accepted.len(),
        dropped = placement.dropped(),
        min_dist = cfg.min_dist,
        "placement finished"
    );
    Ok(placement)
}

/// Build `amount` candidates from `spec` and place them, all from one replay token.
pub fn generate(
    spec: &ArcSpec,
    amount: usize,
    canvas: Canvas,
    cfg: &PlacementCfg,
    token: ReplayToken,
) -> Result<Placement, ArcError> {
    let mut rng = token.to_std_rng();
    let candidates = ArcFactory::new(canvas).candidates(spec, amount, &mut rng)?;
    place(candidates, cfg, &mut rng)
}
