/// Physical constants shared by the diagnostic formulas
#[derive(Clone, Debug)]
pub struct Constants {
    /// Gravitational acceleration (m/s²)
    pub g: f64,
    /// R over Cp, the Poisson equation exponent
    pub rocp: f64,
    /// Base-state potential temperature added to the WRF perturbation (K)
    pub base_theta: f64,
    /// Reference vapor pressure for the Clausius-Clapeyron equation (mb)
    pub e0: f64,
    /// Triple-point temperature (K)
    pub t0: f64,
    /// Latent heat of vaporization of water (J/kg)
    pub lv: f64,
    /// Gas constant of water vapor (J/(kg·K))
    pub rv: f64,
    /// Ratio of dry-air to water-vapor gas constants
    pub eps: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            g: 9.80665,
            rocp: 0.28571426,
            base_theta: 300.0,
            e0: 6.1173,   // mb
            t0: 273.16,   // K
            lv: 2.501e6,  // J/kg
            rv: 461.50,   // J/(kg·K)
            eps: 0.622,
        }
    }
}
