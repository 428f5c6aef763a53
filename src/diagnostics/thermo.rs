use ndarray::{Array, Dimension, Zip};

use crate::config::Constants;
use crate::error::{check_same_shape, DiagnosticError};

/// Pressure in hPa from WRF perturbation pressure P and base-state
/// pressure PB, both in Pa.
pub fn pressure<D: Dimension>(
    p: &Array<f64, D>,
    pb: &Array<f64, D>,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("P", p.shape(), "PB", pb.shape())?;
    Ok(Zip::from(p).and(pb).map_collect(|&p, &pb| (p + pb) * 0.01))
}

/// Geopotential height in meters from perturbation geopotential PH and
/// base-state geopotential PHB.
pub fn height<D: Dimension>(
    ph: &Array<f64, D>,
    phb: &Array<f64, D>,
    constants: &Constants,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("PH", ph.shape(), "PHB", phb.shape())?;
    let g = constants.g;
    Ok(Zip::from(ph).and(phb).map_collect(|&ph, &phb| (ph + phb) / g))
}

/// Potential temperature in Kelvin from the WRF perturbation potential
/// temperature T (the base state of 300 K is added back).
pub fn theta<D: Dimension>(t: &Array<f64, D>, constants: &Constants) -> Array<f64, D> {
    t.mapv(|t| t + constants.base_theta)
}

/// Temperature in Kelvin from potential temperature (K) and pressure (hPa)
/// via the Poisson equation.
pub fn temperature<D: Dimension>(
    theta: &Array<f64, D>,
    pres: &Array<f64, D>,
    constants: &Constants,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("THETA", theta.shape(), "PRES", pres.shape())?;
    let rocp = constants.rocp;
    Ok(Zip::from(theta)
        .and(pres)
        .map_collect(|&th, &p| th * (p / 1000.0).powf(rocp)))
}

/// Saturation vapor pressure in mb by the Clausius-Clapeyron equation.
fn saturation_vapor_pressure(temp: f64, constants: &Constants) -> f64 {
    let k1 = constants.lv / constants.rv;
    constants.e0 * (k1 * (1.0 / constants.t0 - 1.0 / temp)).exp()
}

/// Saturation mixing ratio in kg/kg from saturation vapor pressure and
/// pressure, both in mb.
fn saturation_mixing_ratio(e_s: f64, pres: f64, constants: &Constants) -> f64 {
    constants.eps * e_s / (pres - e_s)
}

/// Relative humidity in percent from temperature (K), pressure (hPa) and
/// water-vapor mixing ratio (kg/kg).
pub fn relative_humidity<D: Dimension>(
    temp: &Array<f64, D>,
    pres: &Array<f64, D>,
    qvapor: &Array<f64, D>,
    constants: &Constants,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("TEMP", temp.shape(), "PRES", pres.shape())?;
    check_same_shape("TEMP", temp.shape(), "QVAPOR", qvapor.shape())?;
    Ok(Zip::from(temp)
        .and(pres)
        .and(qvapor)
        .map_collect(|&t, &p, &qv| {
            let e_s = saturation_vapor_pressure(t, constants);
            let w_s = saturation_mixing_ratio(e_s, p, constants);
            qv / w_s * 100.0
        }))
}

/// Dew-point temperature in Kelvin from temperature (K), pressure (hPa)
/// and water-vapor mixing ratio (kg/kg), by inverting the relative
/// humidity formula for temperature.
pub fn dew_point<D: Dimension>(
    temp: &Array<f64, D>,
    pres: &Array<f64, D>,
    qvapor: &Array<f64, D>,
    constants: &Constants,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("TEMP", temp.shape(), "PRES", pres.shape())?;
    check_same_shape("TEMP", temp.shape(), "QVAPOR", qvapor.shape())?;
    let k1_inv = constants.rv / constants.lv;
    let k2 = 1.0 / constants.t0;
    Ok(Zip::from(temp)
        .and(pres)
        .and(qvapor)
        .map_collect(|&t, &p, &qv| {
            let e_s = saturation_vapor_pressure(t, constants);
            let w_s = saturation_mixing_ratio(e_s, p, constants);
            let rh = qv / w_s * 100.0;
            // back out the vapor pressure, then solve for Td
            let e = rh / 100.0 * e_s;
            1.0 / (k2 - k1_inv * (e / constants.e0).ln())
        }))
}

/// Wind speed in m/s from de-staggered wind components.
pub fn wind_speed<D: Dimension>(
    u: &Array<f64, D>,
    v: &Array<f64, D>,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("U", u.shape(), "V", v.shape())?;
    Ok(Zip::from(u).and(v).map_collect(|&u, &v| (u * u + v * v).sqrt()))
}

/// Sea-level pressure in hPa reduced from 2-m temperature (K), terrain
/// height (m) and surface pressure (Pa).
pub fn sea_level_pressure<D: Dimension>(
    t2: &Array<f64, D>,
    hgt: &Array<f64, D>,
    psfc: &Array<f64, D>,
) -> Result<Array<f64, D>, DiagnosticError> {
    check_same_shape("T2", t2.shape(), "HGT", hgt.shape())?;
    check_same_shape("T2", t2.shape(), "PSFC", psfc.shape())?;
    // constants as used by the WRF SLP reduction
    const G: f64 = 9.81;
    const R_DRY: f64 = 287.0;
    Ok(Zip::from(t2)
        .and(hgt)
        .and(psfc)
        .map_collect(|&t2, &hgt, &psfc| {
            let stemp = t2 + 6.5 * hgt / 1000.0;
            psfc * (G / (R_DRY * stemp) * hgt).exp() * 0.01 + 6.7 * hgt / 1000.0
        }))
}
