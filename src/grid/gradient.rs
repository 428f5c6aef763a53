use ndarray::{Array, Array2, Axis, Dimension, Slice};

/// Centered-difference gradient along one axis with unit spacing.
///
/// Interior points get the centered difference of their neighbors, the two
/// boundary points a one-sided difference, matching standard numerical
/// gradient semantics. An axis shorter than two samples yields zeros.
pub fn gradient_axis<D: Dimension>(field: &Array<f64, D>, axis: Axis) -> Array<f64, D> {
    let n = field.len_of(axis);
    let mut out = Array::zeros(field.raw_dim());
    if n < 2 {
        return out;
    }

    let first = &field.slice_axis(axis, Slice::from(1..2))
        - &field.slice_axis(axis, Slice::from(0..1));
    out.slice_axis_mut(axis, Slice::from(0..1)).assign(&first);

    let last = &field.slice_axis(axis, Slice::from(n - 1..n))
        - &field.slice_axis(axis, Slice::from(n - 2..n - 1));
    out.slice_axis_mut(axis, Slice::from(n - 1..n)).assign(&last);

    if n > 2 {
        let hi = field.slice_axis(axis, Slice::from(2..));
        let lo = field.slice_axis(axis, Slice::from(..n - 2));
        let centered = (&hi - &lo) * 0.5;
        out.slice_axis_mut(axis, Slice::from(1..n - 1))
            .assign(&centered);
    }

    out
}

/// Horizontal grid spacing together with the map-scale factor that corrects
/// it per cell.
///
/// WRF stores a single nominal spacing `dx` plus a 2-D map-scale factor on
/// the mass grid; on a projected grid the effective spacing differs from
/// cell to cell. The grid is square, so dy equals dx.
#[derive(Debug, Clone)]
pub struct GridSpacing {
    /// Nominal grid spacing (m)
    pub dx: f64,
    /// Map-scale factor on the mass grid, shape (south_north, west_east)
    pub map_factor: Array2<f64>,
}

impl GridSpacing {
    pub fn new(dx: f64, map_factor: Array2<f64>) -> Self {
        Self { dx, map_factor }
    }

    /// Spacing for an unprojected grid: map factor of one everywhere.
    pub fn uniform(dx: f64, ny: usize, nx: usize) -> Self {
        Self {
            dx,
            map_factor: Array2::ones((ny, nx)),
        }
    }

    /// Effective per-cell spacing `dx * map_factor` (m).
    pub fn effective_dx(&self) -> Array2<f64> {
        &self.map_factor * self.dx
    }
}
