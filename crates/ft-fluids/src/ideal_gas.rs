//! Calorically perfect ideal gas.

use crate::error::{FluidError, FluidResult};
use crate::henry;
use crate::model::{HenryDerivs, PropertyDerivs, SinglePhaseFluid, ViscosityDerivs, validation};
use crate::species::{HenryCoefficients, Species};
use ft_core::Real;
use ft_core::units::constants::R_UNIVERSAL;

/// Sutherland's law for dilute-gas viscosity.
///
/// ```text
/// mu(T) = mu_ref * (T / T_ref)^1.5 * (T_ref + S) / (T + S)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sutherland {
    pub mu_ref: Real,
    pub t_ref: Real,
    pub s: Real,
}

impl Sutherland {
    pub fn mu(&self, t: Real) -> Real {
        self.mu_ref * (t / self.t_ref).powf(1.5) * (self.t_ref + self.s) / (t + self.s)
    }

    /// Viscosity and `dmu/dT`.
    pub fn mu_dt(&self, t: Real) -> (Real, Real) {
        let mu = self.mu(t);
        (mu, mu * (1.5 / t - 1.0 / (t + self.s)))
    }
}

/// Ideal gas with constant specific heats.
///
/// ```text
/// rho = p / (R T),  e = cv T,  h = cp T
/// s = cp ln(T / T_ref) - R ln(p / p_ref)
/// ```
///
/// Viscosity follows Sutherland's law and conductivity a constant Prandtl number.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGas {
    name: String,
    /// Molar mass [kg/mol]
    molar_mass: Real,
    /// Specific gas constant [J/(kg·K)]
    r_specific: Real,
    /// Isobaric heat capacity [J/(kg·K)]
    cp: Real,
    /// Entropy reference temperature [K]
    t_ref: Real,
    /// Entropy reference pressure [Pa]
    p_ref: Real,
    sutherland: Sutherland,
    prandtl: Real,
    henry: Option<HenryCoefficients>,
}

impl IdealGas {
    /// Create an ideal gas from molar mass [kg/mol] and cp [J/(kg·K)].
    ///
    /// Transport properties default to those of nitrogen; no Henry correlation.
    pub fn new(name: impl Into<String>, molar_mass: Real, cp: Real) -> FluidResult<Self> {
        if !molar_mass.is_finite() || molar_mass <= 0.0 {
            return Err(FluidError::InvalidArg {
                what: "molar mass must be positive and finite",
            });
        }
        let r_specific = R_UNIVERSAL / molar_mass;
        if !cp.is_finite() || cp <= r_specific {
            return Err(FluidError::InvalidArg {
                what: "cp must exceed the specific gas constant",
            });
        }
        let n2 = Species::N2.data();
        Ok(Self {
            name: name.into(),
            molar_mass,
            r_specific,
            cp,
            t_ref: 298.15,
            p_ref: 101_325.0,
            sutherland: Sutherland {
                mu_ref: n2.mu_ref,
                t_ref: n2.mu_ref_temperature,
                s: n2.sutherland,
            },
            prandtl: n2.prandtl,
            henry: None,
        })
    }

    /// Ideal gas built from the species catalog.
    pub fn from_species(species: Species) -> Self {
        let d = species.data();
        Self {
            name: species.display_name().to_string(),
            molar_mass: d.molar_mass / 1000.0,
            r_specific: R_UNIVERSAL * 1000.0 / d.molar_mass,
            cp: d.cp_ideal,
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

    /// Specific gas constant [J/(kg·K)].
    pub fn r_specific(&self) -> Real {
        self.r_specific
    }

    fn cv_const(&self) -> Real {
        self.cp - self.r_specific
    }

    fn henry_coeffs(&self) -> FluidResult<&HenryCoefficients> {
        self.henry.as_ref().ok_or(FluidError::NotSupported {
            what: "Henry's constant is not available for this gas",
        })
    }
}

impl SinglePhaseFluid for IdealGas {
    fn fluid_name(&self) -> &str {
        &self.name
    }

    fn molar_mass(&self) -> Real {
        self.molar_mass
    }

    fn rho(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(p / (self.r_specific * t))
    }

    fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        let rho = self.rho(p, t)?;
        Ok(PropertyDerivs::new(
            rho,
            1.0 / (self.r_specific * t),
            -rho / t,
        ))
    }

    fn e(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(self.cv_const() * t)
    }

    fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        let e = self.e(p, t)?;
        Ok(PropertyDerivs::new(e, 0.0, self.cv_const()))
    }

    fn h(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(self.cp * t)
    }

    fn h_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        let h = self.h(p, t)?;
        Ok(PropertyDerivs::new(h, 0.0, self.cp))
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
        validation::validate_pt(p, t)?;
        Ok(self.cp)
    }

    fn cv(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(self.cv_const())
    }

    fn c(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        let gamma = self.cp / self.cv_const();
        Ok((gamma * self.r_specific * t).sqrt())
    }

    fn k(&self, rho: Real, t: Real) -> FluidResult<Real> {
        let mu = self.mu(rho, t)?;
        Ok(mu * self.cp / self.prandtl)
    }

    fn s(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(self.cp * (t / self.t_ref).ln() - self.r_specific * (p / self.p_ref).ln())
    }

    fn beta(&self, p: Real, t: Real) -> FluidResult<Real> {
        validation::validate_pt(p, t)?;
        Ok(1.0 / t)
    }

    fn henry_constant(&self, t: Real) -> FluidResult<Real> {
        Ok(henry::henry_constant(self.henry_coeffs()?, t)?.kh)
    }

    fn henry_constant_dt(&self, t: Real) -> FluidResult<HenryDerivs> {
        henry::henry_constant(self.henry_coeffs()?, t)
    }
}
