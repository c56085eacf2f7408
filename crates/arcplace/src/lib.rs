//! Arc geometry and constrained random placement.
//!
//! Populations of circular and elliptical arcs are generated from ranged
//! parameters and placed on a canvas so that every arc stays inside the canvas
//! and keeps a minimum separation from every arc accepted before it. Rendering
//! and persistence live in downstream crates; this crate only produces the
//! finalized arc list.
//!
//! Layout
//! - `geometry`: the `Arc` record, parametric evaluation, quadrature, and the
//!   line/ellipse intersection toolkit.
//! - `bounds`, `distance`: canvas containment and inter-arc separation tests.
//! - `factory`, `placement`: candidate construction and the accept/reject loop.

pub mod api;
pub mod bounds;
pub(crate) mod cfg;
pub mod distance;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod placement;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::ArcError;
pub use geometry::{Arc, ArcKind, Canvas};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bounds::{exact_out_of_bounds, fast_out_of_bounds};
    pub use crate::distance::{
        collides, exact_min_distance, fast_collision, fast_min_distance, separation, Precision,
        Separation,
    };
    pub use crate::error::ArcError;
    pub use crate::factory::{ArcFactory, ArcSpec, CircularCfg, Ellipse, EllipticalCfg, Param};
    pub use crate::geometry::{Arc, ArcKind, Canvas};
    pub use crate::placement::{generate, place, Outcome, Placement, PlacementCfg, ReplayToken};
    pub use nalgebra::Vector2 as Vec2;
}
