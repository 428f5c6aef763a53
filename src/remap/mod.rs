use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{s, Array4, ArrayView1, ArrayViewMut1, Axis, Zip};
use num_traits::Float;

use crate::error::{check_same_shape, DiagnosticError};

/// Linear interpolation between two values by a precomputed factor.
pub fn lin_interp<T: Float>(v0: T, v1: T, fac: T) -> T {
    v0 + (v1 - v0) * fac
}

/// Interpolate one target value against a column, assuming the coordinate
/// column is monotonically increasing (caller contract, not verified).
/// Targets outside the column's extent yield NaN; no extrapolation.
fn interp_point(coord: &ArrayView1<f64>, values: &ArrayView1<f64>, target: f64) -> f64 {
    let n = coord.len();
    if n == 0 || target < coord[0] || target > coord[n - 1] {
        return f64::NAN;
    }
    if n == 1 {
        return values[0];
    }

    // binary search for the bracketing pair
    let mut left = 0;
    let mut right = n - 1;
    while right - left > 1 {
        let mid = (left + right) / 2;
        if coord[mid] <= target {
            left = mid;
        } else {
            right = mid;
        }
    }

    let span = coord[right] - coord[left];
    if span.abs() < f64::EPSILON {
        return values[left];
    }
    lin_interp(values[left], values[right], (target - coord[left]) / span)
}

/// Fill one output column by interpolating every target against the
/// coordinate column.
fn interp_column(
    out: &mut ArrayViewMut1<f64>,
    coord: &ArrayView1<f64>,
    values: &ArrayView1<f64>,
    targets: &[f64],
) {
    for (slot, &target) in out.iter_mut().zip(targets) {
        *slot = interp_point(coord, values, target);
    }
}

/// Remap a 4-D field onto target vertical-coordinate surfaces.
///
/// `field` and `coord` share the shape (time, bottom_top, south_north,
/// west_east); `coord` columns must be monotonically increasing (caller
/// contract). For every (time, y, x) column the field is linearly
/// interpolated at each value of `targets`; targets outside a column's
/// extent come back as NaN. Columns are independent and processed in
/// parallel, gathering into a pre-sized output of shape
/// (time, targets.len(), south_north, west_east).
pub fn remap(
    field: &Array4<f64>,
    coord: &Array4<f64>,
    targets: &[f64],
) -> Result<Array4<f64>, DiagnosticError> {
    check_same_shape("field", field.shape(), "coord", coord.shape())?;
    let (nt, _, ny, nx) = field.dim();
    let mut out = Array4::from_elem((nt, targets.len(), ny, nx), f64::NAN);

    // move the vertical axis last so each lane is one column
    let fv = field.view().permuted_axes([0, 2, 3, 1]);
    let cv = coord.view().permuted_axes([0, 2, 3, 1]);
    let mut ov = out.view_mut().permuted_axes([0, 2, 3, 1]);

    Zip::from(ov.lanes_mut(Axis(3)))
        .and(fv.lanes(Axis(3)))
        .and(cv.lanes(Axis(3)))
        .par_for_each(|mut out_col, f_col, c_col| {
            interp_column(&mut out_col, &c_col, &f_col, targets);
        });

    Ok(out)
}

/// Same as [`remap`] but runs inside a dedicated thread pool of the given
/// size instead of the global one.
pub fn remap_with_threads(
    field: &Array4<f64>,
    coord: &Array4<f64>,
    targets: &[f64],
    num_threads: usize,
) -> Result<Array4<f64>, DiagnosticError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| DiagnosticError::ThreadPool(e.to_string()))?;
    pool.install(|| remap(field, coord, targets))
}

/// Which interpolation path a potential-vorticity column took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPath {
    /// The truncated monotonic sub-column was found and used.
    SubColumn,
    /// Sub-column identification failed; the whole column was used.
    WholeColumn,
}

/// Result of a potential-vorticity remap.
#[derive(Debug, Clone)]
pub struct PvRemap {
    /// Interpolated values, shape (time, targets, south_north, west_east)
    pub data: Array4<f64>,
    /// Number of columns that fell back to whole-column interpolation
    pub degenerate_columns: usize,
}

/// Lower bound of the sub-column usable for PV interpolation: the last
/// index where the coordinate undercuts the first target, or failing that
/// the second target.
fn pv_column_start(coord: &ArrayView1<f64>, targets: &[f64]) -> Option<usize> {
    let &first = targets.first()?;
    coord
        .iter()
        .rposition(|&c| c < first)
        .or_else(|| {
            let &second = targets.get(1)?;
            coord.iter().rposition(|&c| c < second)
        })
}

fn strictly_increasing(col: &ArrayView1<f64>) -> bool {
    col.windows(2).into_iter().all(|w| w[0] < w[1])
}

/// Interpolate one PV column, preferring the truncated monotonic
/// sub-column and falling back to the whole column when the search or the
/// truncation comes up degenerate. Returns which path was taken.
pub fn remap_pv_column(
    out: &mut ArrayViewMut1<f64>,
    coord: &ArrayView1<f64>,
    values: &ArrayView1<f64>,
    targets: &[f64],
) -> ColumnPath {
    if let Some(start) = pv_column_start(coord, targets) {
        let sub_coord = coord.slice(s![start..]);
        let sub_values = values.slice(s![start..]);
        if sub_coord.len() >= 2 && strictly_increasing(&sub_coord) {
            interp_column(out, &sub_coord, &sub_values, targets);
            return ColumnPath::SubColumn;
        }
    }
    interp_column(out, coord, values, targets);
    ColumnPath::WholeColumn
}

/// Remap a 4-D field onto potential-vorticity surfaces.
///
/// PV is generally not monotonic with height, so each column is first
/// searched for the contiguous sub-column running from the last crossing
/// below the lowest (or second-lowest) target to the column top, and the
/// interpolation happens against that truncated segment. Columns where no
/// usable sub-column exists fall back to whole-column interpolation rather
/// than failing the call; how many did is reported in the result and
/// logged, since a fallback column may carry a degraded interpolation.
pub fn remap_pv(
    field: &Array4<f64>,
    coord: &Array4<f64>,
    targets: &[f64],
) -> Result<PvRemap, DiagnosticError> {
    check_same_shape("field", field.shape(), "coord", coord.shape())?;
    let (nt, _, ny, nx) = field.dim();
    let mut out = Array4::from_elem((nt, targets.len(), ny, nx), f64::NAN);

    let fv = field.view().permuted_axes([0, 2, 3, 1]);
    let cv = coord.view().permuted_axes([0, 2, 3, 1]);
    let mut ov = out.view_mut().permuted_axes([0, 2, 3, 1]);

    let degenerate = AtomicUsize::new(0);
    Zip::from(ov.lanes_mut(Axis(3)))
        .and(fv.lanes(Axis(3)))
        .and(cv.lanes(Axis(3)))
        .par_for_each(|mut out_col, f_col, c_col| {
            if remap_pv_column(&mut out_col, &c_col, &f_col, targets) == ColumnPath::WholeColumn {
                degenerate.fetch_add(1, Ordering::Relaxed);
            }
        });

    let degenerate_columns = degenerate.into_inner();
    if degenerate_columns > 0 {
        log::warn!(
            "{} of {} columns fell back to whole-column interpolation",
            degenerate_columns,
            nt * ny * nx
        );
    }

    Ok(PvRemap {
        data: out,
        degenerate_columns,
    })
}
