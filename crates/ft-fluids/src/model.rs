//! Single-phase fluid property capability and validation helpers.

use crate::error::FluidResult;
use ft_core::Real;

/// A property value together with its partial derivatives with respect to
/// pressure (at constant temperature) and temperature (at constant pressure).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyDerivs {
    pub value: Real,
    pub d_dp: Real,
    pub d_dt: Real,
}

impl PropertyDerivs {
    pub fn new(value: Real, d_dp: Real, d_dt: Real) -> Self {
        Self { value, d_dp, d_dt }
    }
}

/// Dynamic viscosity [Pa·s] and its derivatives wrt density and temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViscosityDerivs {
    pub mu: Real,
    pub dmu_drho: Real,
    pub dmu_dt: Real,
}

/// Henry's law constant [Pa] and its derivative wrt temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HenryDerivs {
    pub kh: Real,
    pub dkh_dt: Real,
}

/// Fluid properties of a single-phase, single-component fluid in terms of
/// pressure [Pa] and temperature [K].
///
/// Implementations must be thread-safe (Send + Sync): once a property table is
/// built it is queried concurrently from many call sites.
///
/// Transport properties (`mu`, `k`) take density [kg/m³] instead of pressure.
pub trait SinglePhaseFluid: Send + Sync {
    /// Fluid name (for file headers and logging).
    fn fluid_name(&self) -> &str;

    /// Molar mass [kg/mol].
    fn molar_mass(&self) -> Real;

    /// Density [kg/m³].
    fn rho(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Density and its derivatives wrt pressure and temperature.
    fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs>;

    /// Specific internal energy [J/kg].
    fn e(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Specific internal energy and its derivatives wrt pressure and temperature.
    fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs>;

    /// Density and internal energy with their derivatives, in one call.
    fn rho_e_dpt(&self, p: Real, t: Real) -> FluidResult<(PropertyDerivs, PropertyDerivs)> {
        Ok((self.rho_dpt(p, t)?, self.e_dpt(p, t)?))
    }

    /// Specific enthalpy [J/kg].
    ///
    /// Defaults to `h = e + p / rho`.
    fn h(&self, p: Real, t: Real) -> FluidResult<Real> {
        let rho = self.rho(p, t)?;
        validation::validate_density(rho)?;
        Ok(self.e(p, t)? + p / rho)
    }

    /// Specific enthalpy and its derivatives wrt pressure and temperature.
    fn h_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        let (rho, e) = self.rho_e_dpt(p, t)?;
        validation::validate_density(rho.value)?;
        let pv = p / rho.value;
        Ok(PropertyDerivs {
            value: e.value + pv,
            d_dp: e.d_dp + 1.0 / rho.value - pv / rho.value * rho.d_dp,
            d_dt: e.d_dt - pv / rho.value * rho.d_dt,
        })
    }

    /// Dynamic viscosity [Pa·s] from density and temperature.
    fn mu(&self, rho: Real, t: Real) -> FluidResult<Real>;

    /// Dynamic viscosity and its derivatives wrt density and temperature.
    fn mu_drho_t(&self, rho: Real, t: Real) -> FluidResult<ViscosityDerivs>;

    /// Specific isobaric heat capacity [J/(kg·K)].
    fn cp(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Specific isochoric heat capacity [J/(kg·K)].
    fn cv(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Speed of sound [m/s].
    fn c(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Thermal conductivity [W/(m·K)] from density and temperature.
    fn k(&self, rho: Real, t: Real) -> FluidResult<Real>;

    /// Specific entropy [J/(kg·K)].
    fn s(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Volumetric thermal expansion coefficient [1/K].
    fn beta(&self, p: Real, t: Real) -> FluidResult<Real>;

    /// Henry's law constant [Pa] for dissolution in water.
    fn henry_constant(&self, t: Real) -> FluidResult<Real>;

    /// Henry's law constant and its derivative wrt temperature.
    fn henry_constant_dt(&self, t: Real) -> FluidResult<HenryDerivs>;
}

/// Validation helpers for fluid properties.
pub mod validation {
    use super::*;
    use ft_core::ensure_positive;

    /// Ensure pressure and temperature are positive and finite.
    pub fn validate_pt(p: Real, t: Real) -> FluidResult<()> {
        validate_pressure(p)?;
        validate_temperature(t)
    }

    pub fn validate_pressure(p: Real) -> FluidResult<()> {
        ensure_positive(p, "pressure")?;
        Ok(())
    }

    pub fn validate_temperature(t: Real) -> FluidResult<()> {
        ensure_positive(t, "temperature")?;
        Ok(())
    }

    pub fn validate_density(rho: Real) -> FluidResult<()> {
        ensure_positive(rho, "density")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use crate::error::FluidError;

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(101325.0).is_ok());
        assert!(validate_pressure(-100.0).is_err());
        assert!(validate_pressure(0.0).is_err());
        assert!(validate_pressure(Real::NAN).is_err());
    }

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(300.0).is_ok());
        assert!(validate_temperature(-10.0).is_err());
        assert!(validate_temperature(0.0).is_err());
    }

    #[test]
    fn validate_density_positive() {
        assert!(validate_density(1000.0).is_ok());
        assert!(validate_density(-1.0).is_err());
        assert!(validate_density(0.0).is_err());
    }

    /// Minimal model that only supplies rho and e, to exercise the enthalpy defaults.
    struct Linear;

    impl SinglePhaseFluid for Linear {
        fn fluid_name(&self) -> &str {
            "linear"
        }
        fn molar_mass(&self) -> Real {
            0.02
        }
        fn rho(&self, p: Real, t: Real) -> FluidResult<Real> {
            Ok(self.rho_dpt(p, t)?.value)
        }
        fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
            Ok(PropertyDerivs::new(1e-5 * p + 0.1 * t, 1e-5, 0.1))
        }
        fn e(&self, p: Real, t: Real) -> FluidResult<Real> {
            Ok(self.e_dpt(p, t)?.value)
        }
        fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
            Ok(PropertyDerivs::new(2.0 * p + 700.0 * t, 2.0, 700.0))
        }
        fn mu(&self, _rho: Real, _t: Real) -> FluidResult<Real> {
            Ok(1e-5)
        }
        fn mu_drho_t(&self, _rho: Real, _t: Real) -> FluidResult<ViscosityDerivs> {
            Ok(ViscosityDerivs {
                mu: 1e-5,
                dmu_drho: 0.0,
                dmu_dt: 0.0,
            })
        }
        fn cp(&self, _p: Real, _t: Real) -> FluidResult<Real> {
            Ok(1000.0)
        }
        fn cv(&self, _p: Real, _t: Real) -> FluidResult<Real> {
            Ok(700.0)
        }
        fn c(&self, _p: Real, _t: Real) -> FluidResult<Real> {
            Ok(340.0)
        }
        fn k(&self, _rho: Real, _t: Real) -> FluidResult<Real> {
            Ok(0.025)
        }
        fn s(&self, _p: Real, _t: Real) -> FluidResult<Real> {
            Ok(0.0)
        }
        fn beta(&self, _p: Real, t: Real) -> FluidResult<Real> {
            Ok(1.0 / t)
        }
        fn henry_constant(&self, _t: Real) -> FluidResult<Real> {
            Err(FluidError::NotSupported {
                what: "henry constant",
            })
        }
        fn henry_constant_dt(&self, _t: Real) -> FluidResult<HenryDerivs> {
            Err(FluidError::NotSupported {
                what: "henry constant",
            })
        }
    }

    #[test]
    fn default_enthalpy_uses_thermodynamic_identity() {
        let (p, t) = (2e5, 350.0);
        let rho = Linear.rho(p, t).unwrap();
        let e = Linear.e(p, t).unwrap();
        let h = Linear.h(p, t).unwrap();
        assert!((h - (e + p / rho)).abs() < 1e-9 * h.abs());
    }

    #[test]
    fn default_enthalpy_derivatives_match_finite_differences() {
        let (p, t) = (2e5, 350.0);
        let hd = Linear.h_dpt(p, t).unwrap();
        let dp = 1.0;
        let dt = 1e-3;
        let fd_p = (Linear.h(p + dp, t).unwrap() - Linear.h(p - dp, t).unwrap()) / (2.0 * dp);
        let fd_t = (Linear.h(p, t + dt).unwrap() - Linear.h(p, t - dt).unwrap()) / (2.0 * dt);
        assert!((hd.value - Linear.h(p, t).unwrap()).abs() < 1e-9 * hd.value.abs());
        assert!((hd.d_dp - fd_p).abs() < 1e-6 * fd_p.abs().max(1.0));
        assert!((hd.d_dt - fd_t).abs() < 1e-5 * fd_t.abs().max(1.0));
    }

    #[test]
    fn trait_is_object_safe() {
        let model: &dyn SinglePhaseFluid = &Linear;
        assert_eq!(model.fluid_name(), "linear");
        assert!(model.henry_constant(300.0).is_err());
    }
}
