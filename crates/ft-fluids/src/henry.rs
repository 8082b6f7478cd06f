//! Henry's law constant for gas dissolution in water.
//!
//! Uses the Harvey correlation referenced to the saturation pressure of water.

use crate::error::{FluidError, FluidResult};
use crate::model::HenryDerivs;
use crate::species::HenryCoefficients;

/// Critical temperature of water [K]
const TC_WATER: f64 = 647.096;
/// Critical pressure of water [Pa]
const PC_WATER: f64 = 22.064e6;

/// Wagner-Pruss saturation pressure coefficients and exponents.
const SAT_COEFFS: [(f64, f64); 6] = [
    (-7.859_517_83, 1.0),
    (1.844_082_59, 1.5),
    (-11.786_649_7, 3.0),
    (22.680_741_1, 3.5),
    (-15.961_871_9, 4.0),
    (1.801_225_02, 7.5),
];

/// Saturation pressure of water [Pa] and `d ln(p_sat) / dT` [1/K].
pub fn water_saturation_pressure(t: f64) -> FluidResult<(f64, f64)> {
    if !t.is_finite() || t <= 0.0 || t >= TC_WATER {
        return Err(FluidError::OutOfRange {
            what: "temperature for water saturation pressure",
            value: t,
            min: 0.0,
            max: TC_WATER,
        });
    }

    let tau = 1.0 - t / TC_WATER;
    let (sum, dsum_dtau) = SAT_COEFFS
        .iter()
        .fold((0.0, 0.0), |(f, df), &(a, n)| {
            (f + a * tau.powf(n), df + a * n * tau.powf(n - 1.0))
        });

    let ln_p = PC_WATER.ln() + TC_WATER / t * sum;
    // dtau/dT = -1/Tc
    let dln_p_dt = -TC_WATER / (t * t) * sum - dsum_dtau / t;
    Ok((ln_p.exp(), dln_p_dt))
}

/// Henry's law constant [Pa] and its temperature derivative.
pub fn henry_constant(coeffs: &HenryCoefficients, t: f64) -> FluidResult<HenryDerivs> {
    let (p_sat, dln_psat_dt) = water_saturation_pressure(t)?;

    let tr = t / TC_WATER;
    let one_minus = 1.0 - tr;
    let HenryCoefficients { a, b, c } = *coeffs;

    let g = a / tr + b * one_minus.powf(0.355) / tr + c * one_minus.exp() * tr.powf(-0.41);
    let dg_dtr = -a / (tr * tr)
        + b * (-0.355 * one_minus.powf(-0.645) / tr - one_minus.powf(0.355) / (tr * tr))
        + c * one_minus.exp() * (-tr.powf(-0.41) - 0.41 * tr.powf(-1.41));

    let kh = p_sat * g.exp();
    Ok(HenryDerivs {
        kh,
        dkh_dt: kh * (dln_psat_dt + dg_dtr / TC_WATER),
    })
}
