use ndarray::{Array, Axis, Dimension, Slice};

use crate::error::DiagnosticError;

/// Staggered dimension of an Arakawa C-grid array.
///
/// WRF names the staggered wind axes after the wind component that lives on
/// them, so the letter codes U, V and W are accepted as synonyms for X, Y
/// and Z when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaggerAxis {
    /// East-west axis (X / U)
    WestEast,
    /// North-south axis (Y / V)
    SouthNorth,
    /// Vertical axis (Z / W)
    BottomTop,
}

impl StaggerAxis {
    /// Parse the WRF letter codes X/U, Y/V and Z/W (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, DiagnosticError> {
        match name.to_ascii_uppercase().as_str() {
            "X" | "U" => Ok(Self::WestEast),
            "Y" | "V" => Ok(Self::SouthNorth),
            "Z" | "W" => Ok(Self::BottomTop),
            _ => Err(DiagnosticError::UnknownAxisName(name.to_string())),
        }
    }

    /// Index of this axis in a grid of the given rank.
    ///
    /// Follows the WRF dimension order (time, bottom_top, south_north,
    /// west_east): the horizontal axes always sit at the end, while the
    /// vertical axis shifts as leading dimensions are added. A 2-D (y, x)
    /// slab has no vertical axis.
    fn index_for_rank(self, rank: usize) -> Option<usize> {
        if !(2..=5).contains(&rank) {
            return None;
        }
        match self {
            Self::WestEast => Some(rank - 1),
            Self::SouthNorth => Some(rank - 2),
            Self::BottomTop => match rank {
                3 => Some(0),
                4 => Some(1),
                5 => Some(2),
                _ => None,
            },
        }
    }
}

/// De-stagger a staggered grid onto the mass-point grid along one axis.
///
/// Returns a new array one element shorter along the selected axis, where
/// each output element is the arithmetic mean of the two adjacent staggered
/// samples. Rank/axis combinations outside the WRF cases (X and Y on 2- to
/// 5-dimensional grids, Z on 3- to 5-dimensional grids) are rejected with
/// [`DiagnosticError::UnsupportedAxisRank`] instead of silently producing
/// an undefined result.
pub fn unstagger<D: Dimension>(
    grid: &Array<f64, D>,
    axis: StaggerAxis,
) -> Result<Array<f64, D>, DiagnosticError> {
    let rank = grid.ndim();
    let ax = axis
        .index_for_rank(rank)
        .ok_or(DiagnosticError::UnsupportedAxisRank { axis, rank })?;
    let n = grid.len_of(Axis(ax));
    if n < 2 {
        // a staggered axis holds dim+1 samples, so fewer than two cannot
        // be collapsed onto the mass grid
        return Err(DiagnosticError::UnsupportedAxisRank { axis, rank });
    }
    let lo = grid.slice_axis(Axis(ax), Slice::from(..n - 1));
    let hi = grid.slice_axis(Axis(ax), Slice::from(1..));
    Ok((&lo + &hi) * 0.5)
}
