//! Tabular view of an arc: kind label, field names and values in parameter order.

use nalgebra::Vector2;

use super::types::{Arc, ArcKind, Canvas};
use crate::error::ArcError;

const CIRCULAR_FIELDS: &[&str] = &["Radius", "Start Angle", "End Angle", "Center X", "Center Y"];
const ELLIPTICAL_FIELDS: &[&str] = &[
    "a",
    "b",
    "Start Angle",
    "End Angle",
    "Rotation",
    "Center X",
    "Center Y",
];

impl ArcKind {
    pub fn label(self) -> &'static str {
        match self {
            ArcKind::Circular => "Circular Arc",
            ArcKind::Elliptical => "Elliptical Arc",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Circular Arc" => Some(ArcKind::Circular),
            "Elliptical Arc" => Some(ArcKind::Elliptical),
            _ => None,
        }
    }

    /// Column names matching `Arc::field_values`.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            ArcKind::Circular => CIRCULAR_FIELDS,
            ArcKind::Elliptical => ELLIPTICAL_FIELDS,
        }
    }
}

impl Arc {
    pub fn field_names(&self) -> &'static [&'static str] {
        self.kind.field_names()
    }

    /// Values in the order of `field_names`.
    pub fn field_values(&self) -> Vec<f64> {
        match self.kind {
            ArcKind::Circular => vec![
                self.a,
                self.theta1,
                self.theta2,
                self.center.x,
                self.center.y,
            ],
            ArcKind::Elliptical => vec![
                self.a,
                self.b,
                self.theta1,
                self.theta2,
                self.rotation,
                self.center.x,
                self.center.y,
            ],
        }
    }

    /// Rebuild an arc from a row produced by `field_values`. The length is recomputed.
    pub fn from_fields(kind: ArcKind, values: &[f64], canvas: Canvas) -> Result<Self, ArcError> {
        let expected = kind.field_names().len();
        if values.len() != expected {
            return Err(ArcError::degenerate(format!(
                "{} row needs {expected} values, got {}",
                kind.label(),
                values.len()
            )));
        }
        let arc = match kind {
            ArcKind::Circular => Arc::circular(values[0], values[1], values[2], canvas)?
                .with_center(Vector2::new(values[3], values[4])),
            ArcKind::Elliptical => {
                Arc::elliptical(values[0], values[1], values[2], values[3], values[4], canvas)?
                    .with_center(Vector2::new(values[5], values[6]))
            }
        };
        Ok(arc)
    }
}
