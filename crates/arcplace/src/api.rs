//! Curated surface for downstream collaborators (rendering, persistence, CLI).
//!
//! Prefer these re-exports over reaching into module paths.

// Arc record and single-arc geometry
pub use crate::geometry::intersect::{ellipse_ellipse, line_ellipse, rect_ellipse, AxisEllipse};
pub use crate::geometry::{arc_length, integrate, Arc, ArcKind, Canvas, Subdivide};
// Constraint checks
pub use crate::bounds::{exact_out_of_bounds, fast_out_of_bounds};
pub use crate::distance::{
    collides, exact_min_distance, fast_collision, fast_min_distance, separation, Precision,
    Separation, COLLISION_SENTINEL,
};
// Construction and placement
pub use crate::factory::{ArcFactory, ArcSpec, CircularCfg, Ellipse, EllipticalCfg, Param};
pub use crate::placement::{
    generate, place, place_one, retry, violates, Outcome, Placement, PlacementCfg, ReplayToken,
};
pub use crate::ArcError;

/// Export row for one arc: `[index, kind label, field values…]` as strings,
/// matching `export_header`.
pub fn export_row(index: usize, arc: &Arc) -> Vec<String> {
    let mut row = vec![index.to_string(), arc.kind.label().to_string()];
    row.extend(arc.field_values().iter().map(|v| v.to_string()));
    row
}

/// Header for `export_row` on arcs of `kind`.
pub fn export_header(kind: ArcKind) -> Vec<&'static str> {
    let mut header = vec!["Index", "Type"];
    header.extend_from_slice(kind.field_names());
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn header_and_row_line_up() {
        let arc = Arc::circular(25.0, 0.5, 1.0, Canvas::default())
            .unwrap()
            .with_center(vector![10.0, 20.0]);
        let header = export_header(arc.kind);
        let row = export_row(3, &arc);
        assert_eq!(header.len(), row.len());
        assert_eq!(row[0], "3");
        assert_eq!(row[1], "Circular Arc");
        assert_eq!(row[2], "25");
        assert_eq!(header[2], "Radius");
    }
}
