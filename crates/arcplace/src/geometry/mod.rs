//! Arc geometry: the `Arc` record and everything evaluated on a single arc.
//!
//! Purpose
//! - One arc record with a kind tag (`ArcKind`) instead of a type per kind;
//!   kind-specific formulas are selected by `match` on the tag.
//! - Parametric evaluation, sweep membership, subdivision, arc length and the
//!   center-of-mass estimate used to bias random placement.
//! - A small intersection toolkit (line/ellipse, ellipse/rectangle,
//!   ellipse/ellipse) shared by the bounds and distance modules.
//!
//! Angles
//! - Angles are polar angles about the arc center, measured from the arc's
//!   local 0° axis (before `rotation` is applied). `point_at(θ)` is the point of
//!   the ellipse hit by the ray at angle θ, so `atan2` recovers θ.

pub mod intersect;
mod param;
pub mod quad;
mod record;
mod types;

pub use param::Subdivide;
pub use quad::{arc_length, integrate};
pub use types::{Arc, ArcKind, Canvas};
