use ndarray::{Array2, Array4, Axis};

use crate::error::{check_same_shape, DiagnosticError};
use crate::grid::gradient::gradient_axis;
use crate::grid::GridSpacing;

// Axis order of every 4-D diagnostic field:
// (time, bottom_top, south_north, west_east)
const LEVEL: Axis = Axis(1);
const SOUTH_NORTH: Axis = Axis(2);
const WEST_EAST: Axis = Axis(3);

// Gravity value used by the potential-vorticity formulation
const GRAV: f64 = 9.8;

/// Relative vorticity in s⁻¹ from de-staggered wind components in m/s and
/// the grid spacing in meters (dy equals dx on the square grid).
pub fn relative_vorticity(
    u: &Array4<f64>,
    v: &Array4<f64>,
    dx: f64,
) -> Result<Array4<f64>, DiagnosticError> {
    check_same_shape("U", u.shape(), "V", v.shape())?;
    let dv_dx = gradient_axis(v, WEST_EAST);
    let du_dy = gradient_axis(u, SOUTH_NORTH);
    Ok((dv_dx - du_dy) / dx)
}

/// Absolute vorticity in s⁻¹: relative vorticity plus the Coriolis
/// parameter, supplied as a 2-D (south_north, west_east) field and
/// broadcast over time and level.
pub fn absolute_vorticity(
    u: &Array4<f64>,
    v: &Array4<f64>,
    f: &Array2<f64>,
    dx: f64,
) -> Result<Array4<f64>, DiagnosticError> {
    let (_, _, ny, nx) = u.dim();
    check_same_shape("F", f.shape(), "U horizontal plane", &[ny, nx])?;
    let vort = relative_vorticity(u, v, dx)?;
    let fb = f
        .broadcast(u.raw_dim())
        .ok_or(DiagnosticError::ShapeMismatch {
            left: "F",
            left_shape: f.shape().to_vec(),
            right: "U",
            right_shape: u.shape().to_vec(),
        })?;
    Ok(vort + &fb)
}

/// Ertel potential vorticity in PVU (K·m²·kg⁻¹·s⁻¹ × 10⁶).
///
/// Takes de-staggered winds (m/s), the Coriolis field (s⁻¹), potential
/// temperature (K) and pressure (hPa) on identical 4-D grids, plus the
/// [`GridSpacing`] carrying the nominal spacing and map-scale factor.
/// Horizontal derivatives are scaled by the per-cell effective spacing;
/// vertical derivatives are taken against the pressure gradient.
pub fn potential_vorticity(
    u: &Array4<f64>,
    v: &Array4<f64>,
    f: &Array2<f64>,
    theta: &Array4<f64>,
    pres: &Array4<f64>,
    spacing: &GridSpacing,
) -> Result<Array4<f64>, DiagnosticError> {
    check_same_shape("U", u.shape(), "V", v.shape())?;
    check_same_shape("U", u.shape(), "THETA", theta.shape())?;
    check_same_shape("U", u.shape(), "PRES", pres.shape())?;
    let (_, _, ny, nx) = u.dim();
    check_same_shape("F", f.shape(), "U horizontal plane", &[ny, nx])?;
    check_same_shape(
        "MAPFAC_M",
        spacing.map_factor.shape(),
        "U horizontal plane",
        &[ny, nx],
    )?;

    let mismatch = |name: &'static str, shape: &[usize]| DiagnosticError::ShapeMismatch {
        left: name,
        left_shape: shape.to_vec(),
        right: "U",
        right_shape: u.shape().to_vec(),
    };

    let dim = u.raw_dim();
    let dx = spacing.effective_dx();
    let dx4 = dx
        .broadcast(dim.clone())
        .ok_or_else(|| mismatch("MAPFAC_M", spacing.map_factor.shape()))?;
    let fb = f
        .broadcast(dim)
        .ok_or_else(|| mismatch("F", f.shape()))?;

    // pressure arrives in hPa, the vertical derivative wants Pa
    let pres_pa = pres.mapv(|p| p * 100.0);

    let dv_dp = gradient_axis(v, LEVEL);
    let dv_dx = gradient_axis(v, WEST_EAST);
    let du_dp = gradient_axis(u, LEVEL);
    let du_dy = gradient_axis(u, SOUTH_NORTH);
    let dt_dp = gradient_axis(theta, LEVEL);
    let dt_dx = gradient_axis(theta, WEST_EAST);
    let dt_dy = gradient_axis(theta, SOUTH_NORTH);
    let dp = gradient_axis(&pres_pa, LEVEL);

    // dy equals dx on the square grid
    let abs_vort = (&dv_dx - &du_dy) / &dx4 + &fb;
    let inner = (&du_dp / &dp) * (&dt_dy / &dx4) - (&dv_dp / &dp) * (&dt_dx / &dx4)
        + abs_vort * (&dt_dp / &dp);

    Ok(inner * (-GRAV * 1.0e6))
}
