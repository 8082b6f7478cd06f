//! CoolProp-based fluid property model (feature `coolprop`).

use crate::error::{FluidError, FluidResult};
use crate::henry;
use crate::model::{HenryDerivs, PropertyDerivs, SinglePhaseFluid, ViscosityDerivs, validation};
use crate::species::Species;
use ft_core::Real;
use rfluids::prelude::*;
use rfluids::substance::Pure;

/// Relative step used for finite-difference derivatives.
const FD_REL_STEP: Real = 1e-6;

/// CoolProp backend for a pure fluid.
///
/// Derivatives wrt pressure and temperature are taken by central differences
/// of the backend's (p, T) state. Transport properties are not exposed by this
/// backend.
pub struct CoolPropModel {
    species: Species,
    pure: Pure,
}

impl CoolPropModel {
    /// Create a new CoolProp model for a species.
    pub fn new(species: Species) -> Self {
        Self {
            species,
            pure: species.rfluids_pure(),
        }
    }

    /// Create a Fluid instance at given P,T state.
    fn fluid_at_pt(&self, p_pa: f64, t_k: f64) -> FluidResult<Fluid> {
        validation::validate_pt(p_pa, t_k)?;
        Fluid::from(self.pure)
            .in_state(FluidInput::pressure(p_pa), FluidInput::temperature(t_k))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at P={} Pa, T={} K: {}", p_pa, t_k, e),
            })
    }

    fn density_at(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let rho = fluid.density().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting density: {}", e),
        })?;
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn internal_energy_at(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let rho = fluid.density().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting density: {}", e),
        })?;
        let h = fluid.enthalpy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting enthalpy: {}", e),
        })?;
        validation::validate_density(rho)?;
        Ok(h - p / rho)
    }

    fn enthalpy_at(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        fluid.enthalpy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting enthalpy: {}", e),
        })
    }

    /// Value and central-difference derivatives of `f` at (p, T).
    fn with_derivs(
        &self,
        p: Real,
        t: Real,
        f: impl Fn(Real, Real) -> FluidResult<Real>,
    ) -> FluidResult<PropertyDerivs> {
        let dp = p * FD_REL_STEP;
        let dt = t * FD_REL_STEP;
        Ok(PropertyDerivs {
            value: f(p, t)?,
            d_dp: (f(p + dp, t)? - f(p - dp, t)?) / (2.0 * dp),
            d_dt: (f(p, t + dt)? - f(p, t - dt)?) / (2.0 * dt),
        })
    }
}

impl SinglePhaseFluid for CoolPropModel {
    fn fluid_name(&self) -> &str {
        self.species.display_name()
    }

    fn molar_mass(&self) -> Real {
        self.species.molar_mass() / 1000.0
    }

    fn rho(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.density_at(p, t)
    }

    fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.with_derivs(p, t, |p, t| self.density_at(p, t))
    }

    fn e(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.internal_energy_at(p, t)
    }

    fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.with_derivs(p, t, |p, t| self.internal_energy_at(p, t))
    }

    fn h(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.enthalpy_at(p, t)
    }

    fn h_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.with_derivs(p, t, |p, t| self.enthalpy_at(p, t))
    }

    fn mu(&self, _rho: Real, _t: Real) -> FluidResult<Real> {
        Err(FluidError::NotSupported {
            what: "viscosity is not available from the CoolProp backend",
        })
    }

    fn mu_drho_t(&self, _rho: Real, _t: Real) -> FluidResult<ViscosityDerivs> {
        Err(FluidError::NotSupported {
            what: "viscosity is not available from the CoolProp backend",
        })
    }

    fn cp(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        fluid.specific_heat().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting specific heat: {}", e),
        })
    }

    fn cv(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let cp = fluid.specific_heat().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting cp: {}", e),
        })?;
        let rho = fluid.density().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting density: {}", e),
        })?;
        let r_specific = p / (rho * t);
        Ok(cp - r_specific)
    }

    fn c(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        fluid.sound_speed().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting sound speed: {}", e),
        })
    }

    fn k(&self, _rho: Real, _t: Real) -> FluidResult<Real> {
        Err(FluidError::NotSupported {
            what: "thermal conductivity is not available from the CoolProp backend",
        })
    }

    fn s(&self, p: Real, t: Real) -> FluidResult<Real> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        fluid.entropy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting entropy: {}", e),
        })
    }

    fn beta(&self, p: Real, t: Real) -> FluidResult<Real> {
        let d = self.rho_dpt(p, t)?;
        Ok(-d.d_dt / d.value)
    }

    fn henry_constant(&self, t: Real) -> FluidResult<Real> {
        Ok(self.henry_constant_dt(t)?.kh)
    }

    fn henry_constant_dt(&self, t: Real) -> FluidResult<HenryDerivs> {
        let coeffs = self.species.data().henry.ok_or(FluidError::NotSupported {
            what: "Henry's constant is not available for this gas",
        })?;
        henry::henry_constant(&coeffs, t)
    }
}
