//! Error taxonomy for arc construction and the analytic algorithms.
//!
//! A candidate that exhausts its retry budget is not an error; see
//! `placement::Outcome::Dropped`.

/// Errors surfaced by arc construction and the analytic algorithms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArcError {
    /// An exact algorithm was called on a rotated arc. Use the sampled variant instead.
    #[error("{op} requires an unrotated arc (rotation = {rotation}); use the sampled variant")]
    Rotated { op: &'static str, rotation: f64 },
    /// An exact algorithm that only supports circular arcs got an elliptical one.
    #[error("{op} requires circular arcs")]
    NotCircular { op: &'static str },
    /// Input that would otherwise propagate NaN or infinity.
    #[error("degenerate arc input: {0}")]
    Degenerate(String),
    #[error("invalid parameter {0:?}: expected a number or a range like \"lo-hi\"")]
    ParseParam(String),
}

impl ArcError {
    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        ArcError::Degenerate(msg.into())
    }
}
