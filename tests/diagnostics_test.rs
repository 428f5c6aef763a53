use ndarray::{Array2, Array4};
use wrfdiag::config::Constants;
use wrfdiag::diagnostics::{
    absolute_vorticity, height, potential_vorticity, pressure, relative_vorticity, theta,
};
use wrfdiag::error::DiagnosticError;
use wrfdiag::grid::GridSpacing;

/// De-staggered winds for solid-body rotation with angular velocity omega:
/// U = -omega * y, V = omega * x on a uniform grid.
fn solid_body_winds(ny: usize, nx: usize, dx: f64, omega: f64) -> (Array4<f64>, Array4<f64>) {
    let u = Array4::from_shape_fn((1, 1, ny, nx), |(_, _, j, _)| -omega * (j as f64) * dx);
    let v = Array4::from_shape_fn((1, 1, ny, nx), |(_, _, _, i)| omega * (i as f64) * dx);
    (u, v)
}

#[test]
fn test_pressure_additivity() {
    let p = Array4::from_shape_fn((2, 3, 4, 5), |(t, k, j, i)| (t + k + j + i) as f64 * 7.0);
    let pb = Array4::from_shape_fn((2, 3, 4, 5), |(t, k, j, i)| (t * k + j * i) as f64 * 11.0);
    let pres = pressure(&p, &pb).unwrap();
    for (idx, &val) in pres.indexed_iter() {
        assert_eq!(val, (p[idx] + pb[idx]) * 0.01);
    }
}

#[test]
fn test_height_additivity() {
    let constants = Constants::default();
    let ph = Array4::from_shape_fn((1, 3, 2, 2), |(_, k, j, i)| (k * 100 + j * 10 + i) as f64);
    let phb = Array4::from_elem((1, 3, 2, 2), 50_000.0);
    let hght = height(&ph, &phb, &constants).unwrap();
    for (idx, &val) in hght.indexed_iter() {
        assert_eq!(val, (ph[idx] + phb[idx]) / 9.80665);
    }
}

#[test]
fn test_height_shape_mismatch() {
    let constants = Constants::default();
    let ph = Array4::<f64>::zeros((1, 3, 2, 2));
    let phb = Array4::<f64>::zeros((1, 4, 2, 2));
    let err = height(&ph, &phb, &constants).unwrap_err();
    assert!(matches!(err, DiagnosticError::ShapeMismatch { .. }));
}

#[test]
fn test_solid_body_rotation_vorticity() {
    let omega = 1.0e-4;
    let dx = 1000.0;
    let (u, v) = solid_body_winds(9, 9, dx, omega);

    let vort = relative_vorticity(&u, &v, dx).unwrap();
    // the wind field is linear in x and y, so the finite differences are exact
    for &val in vort.iter() {
        assert!((val - 2.0 * omega).abs() < 1e-15);
    }
}

#[test]
fn test_absolute_minus_relative_is_coriolis() {
    let omega = 1.0e-4;
    let dx = 1000.0;
    let (u, v) = solid_body_winds(7, 7, dx, omega);
    let f = Array2::from_shape_fn((7, 7), |(j, _)| 1.0e-4 + j as f64 * 1.0e-6);

    let rel = relative_vorticity(&u, &v, dx).unwrap();
    let abs = absolute_vorticity(&u, &v, &f, dx).unwrap();
    for (idx, &val) in abs.indexed_iter() {
        let expected = rel[idx] + f[[idx.2, idx.3]];
        assert!((val - expected).abs() < 1e-18);
    }
}

#[test]
fn test_potential_vorticity_shape_mismatch() {
    let u = Array4::<f64>::zeros((1, 3, 4, 4));
    let v = Array4::<f64>::zeros((1, 3, 4, 4));
    let th = Array4::<f64>::zeros((1, 4, 4, 4));
    let pres = Array4::<f64>::zeros((1, 3, 4, 4));
    let f = Array2::<f64>::zeros((4, 4));
    let spacing = GridSpacing::uniform(3000.0, 4, 4);

    let err = potential_vorticity(&u, &v, &f, &th, &pres, &spacing).unwrap_err();
    assert!(matches!(err, DiagnosticError::ShapeMismatch { .. }));
}

#[test]
fn test_potential_vorticity_map_factor_mismatch() {
    let u = Array4::<f64>::zeros((1, 3, 4, 4));
    let v = Array4::<f64>::zeros((1, 3, 4, 4));
    let th = Array4::<f64>::zeros((1, 3, 4, 4));
    let pres = Array4::from_elem((1, 3, 4, 4), 500.0);
    let f = Array2::<f64>::zeros((4, 4));
    let spacing = GridSpacing::uniform(3000.0, 5, 5);

    let err = potential_vorticity(&u, &v, &f, &th, &pres, &spacing).unwrap_err();
    assert!(matches!(err, DiagnosticError::ShapeMismatch { .. }));
}

#[test]
fn test_potential_vorticity_resting_atmosphere_is_zero() {
    // no wind and no Coriolis: PV must vanish whatever the stratification
    let nz = 5;
    let u = Array4::<f64>::zeros((1, nz, 4, 4));
    let v = Array4::<f64>::zeros((1, nz, 4, 4));
    let f = Array2::<f64>::zeros((4, 4));
    let th = Array4::from_shape_fn((1, nz, 4, 4), |(_, k, _, _)| 300.0 + k as f64 * 10.0);
    let pres = Array4::from_shape_fn((1, nz, 4, 4), |(_, k, _, _)| 1000.0 - k as f64 * 150.0);
    let spacing = GridSpacing::uniform(3000.0, 4, 4);

    let pv = potential_vorticity(&u, &v, &f, &th, &pres, &spacing).unwrap();
    for &val in pv.iter() {
        assert!(val.abs() < 1e-12);
    }
}

#[test]
fn test_potential_vorticity_sign_with_rotation() {
    // cyclonic (positive) vorticity with theta increasing upward gives
    // positive PV in this sign convention
    let nz = 5;
    let omega = 1.0e-4;
    let dx = 3000.0;
    let ny = 6;
    let nx = 6;
    let u = Array4::from_shape_fn((1, nz, ny, nx), |(_, _, j, _)| -omega * (j as f64) * dx);
    let v = Array4::from_shape_fn((1, nz, ny, nx), |(_, _, _, i)| omega * (i as f64) * dx);
    let f = Array2::from_elem((ny, nx), 1.0e-4);
    let th = Array4::from_shape_fn((1, nz, ny, nx), |(_, k, _, _)| 300.0 + k as f64 * 10.0);
    let pres = Array4::from_shape_fn((1, nz, ny, nx), |(_, k, _, _)| 1000.0 - k as f64 * 150.0);
    let spacing = GridSpacing::uniform(dx, ny, nx);

    let pv = potential_vorticity(&u, &v, &f, &th, &pres, &spacing).unwrap();
    for &val in pv.iter() {
        assert!(val > 0.0);
    }
}

#[test]
fn test_diagnostics_idempotent() {
    let constants = Constants::default();
    let t = Array4::from_shape_fn((2, 3, 4, 5), |(t, k, j, i)| {
        (t as f64) * 0.7 + (k as f64) * 1.3 + (j as f64) * 0.1 + (i as f64) * 0.01
    });
    let first = theta(&t, &constants);
    let second = theta(&t, &constants);
    assert_eq!(first, second);

    let (u, v) = solid_body_winds(5, 5, 1000.0, 2.0e-4);
    let first = relative_vorticity(&u, &v, 1000.0).unwrap();
    let second = relative_vorticity(&u, &v, 1000.0).unwrap();
    assert_eq!(first, second);
}
