use thiserror::Error;

use crate::grid::StaggerAxis;

/// Error type shared by the diagnostic and remapping functions
#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error(
        "shape mismatch: {left} has shape {left_shape:?} but {right} has shape {right_shape:?}"
    )]
    ShapeMismatch {
        left: &'static str,
        left_shape: Vec<usize>,
        right: &'static str,
        right_shape: Vec<usize>,
    },

    #[error("cannot de-stagger a {rank}-dimensional grid along the {axis:?} axis")]
    UnsupportedAxisRank { axis: StaggerAxis, rank: usize },

    #[error("unknown stagger axis name: {0} (expected X/U, Y/V or Z/W)")]
    UnknownAxisName(String),

    #[error("failed to create thread pool: {0}")]
    ThreadPool(String),
}

/// Fail fast when two fields that must align do not.
pub(crate) fn check_same_shape(
    left: &'static str,
    left_shape: &[usize],
    right: &'static str,
    right_shape: &[usize],
) -> Result<(), DiagnosticError> {
    if left_shape == right_shape {
        Ok(())
    } else {
        Err(DiagnosticError::ShapeMismatch {
            left,
            left_shape: left_shape.to_vec(),
            right,
            right_shape: right_shape.to_vec(),
        })
    }
}
