//! Van der Waals real-gas model.
//!
//! Density at given (p, T) has no closed form, so every pressure-temperature
//! query runs a safeguarded Newton solve of the cubic equation of state. This
//! is the kind of model a property table is built to avoid calling in a hot loop.

use crate::error::{FluidError, FluidResult};
use crate::henry;
use crate::ideal_gas::Sutherland;
use crate::model::{HenryDerivs, PropertyDerivs, SinglePhaseFluid, ViscosityDerivs, validation};
use crate::species::{HenryCoefficients, Species};
use ft_core::Real;
use ft_core::units::constants::R_UNIVERSAL;
use tracing::debug;

const MAX_ITER: usize = 100;
const REL_TOL: Real = 1e-13;

/// Van der Waals fluid on a mass basis.
///
/// ```text
/// p = R T rho / (1 - b rho) - a rho^2
/// e = cv T - a rho
/// ```
///
/// with `a = 27 R² Tc² / (64 pc)` and `b = R Tc / (8 pc)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VanDerWaalsFluid {
    name: String,
    /// Molar mass [kg/mol]
    molar_mass: Real,
    /// Specific gas constant [J/(kg·K)]
    r_specific: Real,
    /// Attraction parameter [Pa·m⁶/kg²]
    a: Real,
    /// Co-volume [m³/kg]
    b: Real,
    /// Ideal-gas isochoric heat capacity [J/(kg·K)]
    cv: Real,
    /// Entropy reference temperature [K]
    t_ref: Real,
    /// Entropy reference pressure [Pa]
    p_ref: Real,
    sutherland: Sutherland,
    prandtl: Real,
    henry: Option<HenryCoefficients>,
}

/// Density solve result with the EOS slopes needed for derivatives.
#[derive(Debug, Clone, Copy)]
struct DensityState {
    rho: Real,
    /// (dp/drho) at constant T
    dp_drho: Real,
    /// (dp/dT) at constant rho
    dp_dt: Real,
}

impl VanDerWaalsFluid {
    pub fn from_species(species: Species) -> Self {
        let d = species.data();
        let r_specific = R_UNIVERSAL * 1000.0 / d.molar_mass;
        let tc = d.critical_temperature;
        let pc = d.critical_pressure;
        Self {
            name: species.display_name().to_string(),
            molar_mass: d.molar_mass / 1000.0,
            r_specific,
            a: 27.0 * r_specific * r_specific * tc * tc / (64.0 * pc),
            b: r_specific * tc / (8.0 * pc),
            cv: d.cp_ideal - r_specific,
            t_ref: 298.15,
            p_ref: 101_325.0,
            sutherland: Sutherland {
                mu_ref: d.mu_ref,
                t_ref: d.mu_ref_temperature,
                s: d.sutherland,
            },
            prandtl: d.prandtl,
            henry: d.henry,
        }
    }

    /// Equation-of-state parameters `(a, b)`.
    pub fn parameters(&self) -> (Real, Real) {
        (self.a, self.b)
    }

    /// Pressure from density and temperature (explicit form of the EOS).
    pub fn pressure(&self, rho: Real, t: Real) -> Real {
        self.r_specific * t * rho / (1.0 - self.b * rho) - self.a * rho * rho
    }

    fn slopes(&self, rho: Real, t: Real) -> (Real, Real) {
        let denom = 1.0 - self.b * rho;
        let dp_drho = self.r_specific * t / (denom * denom) - 2.0 * self.a * rho;
        let dp_dt = self.r_specific * rho / denom;
        (dp_drho, dp_dt)
    }

    /// Solve `pressure(rho, T) = p` for the vapour-like root.
    ///
    /// Newton iterations start from the ideal-gas density and fall back to
    /// bisection whenever a step leaves the bracket `(0, 1/b)`.
    fn solve_density(&self, p: Real, t: Real) -> FluidResult<DensityState> {
        validation::validate_pt(p, t)?;

        let mut lo = 0.0;
        let mut hi = 1.0 / self.b;
        let mut rho = (p / (self.r_specific * t)).min(0.5 * hi);

        for iter in 0..MAX_ITER {
            let residual = self.pressure(rho, t) - p;
            if residual < 0.0 {
                lo = rho;
            } else {
                hi = rho;
            }

            let (dp_drho, _) = self.slopes(rho, t);
            let newton = if dp_drho > 0.0 {
                rho - residual / dp_drho
            } else {
                Real::NAN
            };
            let next = if newton >= lo && newton <= hi {
                newton
            } else {
                0.5 * (lo + hi)
            };

            if (next - rho).abs() <= REL_TOL * rho {
                let (dp_drho, dp_dt) = self.slopes(next, t);
                if dp_drho <= 0.0 {
                    return Err(FluidError::ConvergenceFailed {
                        what: "van der Waals density (mechanically unstable root)",
                    });
                }
                if iter > 20 {
                    debug!(p, t, iter, "van der Waals density solve needed many iterations");
                }
                return Ok(DensityState {
                    rho: next,
                    dp_drho,
                    dp_dt,
                });
            }
            rho = next;
        }

        Err(FluidError::ConvergenceFailed {
            what: "van der Waals density",
        })
    }

    fn cp_from(&self, state: &DensityState, t: Real) -> Real {
        self.cv + t * state.dp_dt * state.dp_dt / (state.rho * state.rho * state.dp_drho)
    }

    fn henry_coeffs(&self) -> FluidResult<&HenryCoefficients> {
        self.henry.as_ref().ok_or(FluidError::NotSupported {
            what: "Henry's constant is not available for this gas",
        })
    }
}

impl SinglePhaseFluid for VanDerWaalsFluid {
    fn fluid_name(&self) -> &str {
        &self.name
    }

    fn molar_mass(&self) -> Real {
        self.molar_mass
    }

    fn rho(&self, p: Real, t: Real) -> FluidResult<Real> {
        Ok(self.solve_density(p, t)?.rho)
    }

    fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        let st = self.solve_density(p, t)?;
        Ok(PropertyDerivs::new(
            st.rho,
            1.0 / st.dp_drho,
            -st.dp_dt / st.dp_drho,
        ))
    }

    fn e(&self, p: Real, t: Real) -> FluidResult<Real> {
        let st = self.solve_density(p, t)?;
        Ok(self.cv * t - self.a * st.rho)
    }

    fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        let rho = self.rho_dpt(p, t)?;
        Ok(PropertyDerivs::new(
            self.cv * t - self.a * rho.value,
            -self.a * rho.d_dp,
            self.cv - self.a * rho.d_dt,
        ))
    }

    fn rho_e_dpt(&self, p: Real, t: Real) -> FluidResult<(PropertyDerivs, PropertyDerivs)> {
        // one density solve for both
        let rho = self.rho_dpt(p, t)?;
        let e = PropertyDerivs::new(
            self.cv * t - self.a * rho.value,
            -self.a * rho.d_dp,
            self.cv - self.a * rho.d_dt,
        );
        Ok((rho, e))
    }

    fn mu(&self, rho: Real, t: Real) -> FluidResult<Real> {
        validation::validate_density(rho)?;
        validation::validate_temperature(t)?;
        Ok(self.sutherland.mu(t))
    }

    fn mu_drho_t(&self, rho: Real, t: Real) -> FluidResult<ViscosityDerivs> {
        validation::validate_density(rho)?;
        validation::validate_temperature(t)?;
        let (mu, dmu_dt) = self.sutherland.mu_dt(t);
        Ok(ViscosityDerivs {
            mu,
            dmu_drho: 0.0,
            dmu_dt,
        })
    }

    fn cp(&self, p: Real, t: Real) -> FluidResult<Real> {
        let st = self.solve_density(p, t)?;
        Ok(self.cp_from(&st, t))
    }

    fn cv(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(self.cv)
    }

    fn c(&self, p: Real, t: Real) -> FluidResult<Real> {
        let st = self.solve_density(p, t)?;
        let gamma = self.cp_from(&st, t) / self.cv;
        Ok((gamma * st.dp_drho).sqrt())
    }

    fn k(&self, rho: Real, t: Real) -> FluidResult<Real> {
        let mu = self.mu(rho, t)?;
        Ok(mu * (self.cv + self.r_specific) / self.prandtl)
    }

    fn s(&self, p: Real, t: Real) -> FluidResult<Real> {
        let st = self.solve_density(p, t)?;
        let v = 1.0 / st.rho;
        let v_ref = self.r_specific * self.t_ref / self.p_ref;
        Ok(self.cv * (t / self.t_ref).ln()
            + self.r_specific * ((v - self.b) / (v_ref - self.b)).ln())
    }

    fn beta(&self, p: Real, t: Real) -> FluidResult<Real> {
        let d = self.rho_dpt(p, t)?;
        Ok(-d.d_dt / d.value)
    }

    fn henry_constant(&self, t: Real) -> FluidResult<Real> {
        Ok(henry::henry_constant(self.henry_coeffs()?, t)?.kh)
    }

    fn henry_constant_dt(&self, t: Real) -> FluidResult<HenryDerivs> {
        henry::henry_constant(self.henry_coeffs()?, t)
    }
}
