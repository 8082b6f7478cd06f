//! Tabulated stand-in for a slow fluid model.

use crate::axis::Axis;
use crate::bicubic::BicubicSpline;
use crate::codec;
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::generator;
use crate::property::{PropertySet, TabulatedProperty};
use crate::table::TableData;
use ft_core::timing::{Timer, table_timing};
use ft_core::{Density, Pressure, Real, Temperature, kg_per_m3};
use ft_fluids::{
    FluidError, FluidResult, HenryDerivs, PropertyDerivs, SinglePhaseFluid, ViscosityDerivs,
};
use std::path::Path;
use tracing::{debug, info, warn};
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

/// How the table behind a facade was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupMode {
    /// Every property came from the table file.
    Loaded,
    /// The whole table was generated from the slow model.
    Generated,
    /// The file was completed with generated properties and rewritten.
    Hybrid { generated: Vec<TabulatedProperty> },
}

/// Extent of the tabulated domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableBounds {
    pub pressure_min: Real,
    pub pressure_max: Real,
    pub temperature_min: Real,
    pub temperature_max: Real,
}

impl TableBounds {
    fn of(pressure: &Axis, temperature: &Axis) -> Self {
        Self {
            pressure_min: pressure.min(),
            pressure_max: pressure.max(),
            temperature_min: temperature.min(),
            temperature_max: temperature.max(),
        }
    }

    pub fn contains(&self, p: Real, t: Real) -> bool {
        (self.pressure_min..=self.pressure_max).contains(&p)
            && (self.temperature_min..=self.temperature_max).contains(&t)
    }
}

/// Density, internal energy and enthalpy with derivatives at one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoPropertyPack {
    pub p: Pressure,
    pub t: Temperature,
    pub rho: Density,
    /// Density [kg/m³] with derivatives wrt p [Pa] and T [K].
    pub density: PropertyDerivs,
    /// Specific internal energy [J/kg] with derivatives.
    pub internal_energy: PropertyDerivs,
    /// Specific enthalpy [J/kg] with derivatives.
    pub enthalpy: PropertyDerivs,
}

/// Interpolated density, internal energy and enthalpy over a (p, T) grid,
/// with every other property forwarded to the slow model.
///
/// Construction goes through [`initial_setup`](Self::initial_setup) or
/// [`from_table`](Self::from_table); the result is immutable and can be
/// queried from many threads at once.
pub struct TabulatedFluidProperties<'a> {
    fluid: &'a dyn SinglePhaseFluid,
    table: TableData,
    interpolators: PropertySet<BicubicSpline>,
    bounds: TableBounds,
    mode: SetupMode,
}

impl<'a> TabulatedFluidProperties<'a> {
    /// Load, complete, or generate the table described by `config`.
    ///
    /// - configured file present: parse it; generate absent properties at the
    ///   file's axes and rewrite the file if any were missing
    /// - configured file absent: generate the full table and write it there
    /// - no file configured: generate the full table in memory
    ///
    /// The generation range is only checked on the generating paths; a loaded
    /// file brings its own axes.
    pub fn initial_setup(
        config: &TableConfig,
        fluid: &'a dyn SinglePhaseFluid,
    ) -> TableResult<Self> {
        let (table, mode) = match config.file.as_deref() {
            Some(path) if path.exists() => Self::load(path, fluid)?,
            Some(path) => {
                warn!(
                    path = %path.display(),
                    "table file not found, generating from {}",
                    fluid.fluid_name()
                );
                let table = Self::generate(config, fluid)?;
                write_table(path, &table, fluid)?;
                (table, SetupMode::Generated)
            }
            None => (Self::generate(config, fluid)?, SetupMode::Generated),
        };
        Self::build(table, fluid, mode, config.clamp_boundaries)
    }

    /// Wrap an in-memory table, generating any properties it lacks.
    pub fn from_table(
        mut table: TableData,
        fluid: &'a dyn SinglePhaseFluid,
        clamp_boundaries: bool,
    ) -> TableResult<Self> {
        let generated = generator::generate_missing_tabulated_data(fluid, &mut table)?;
        let mode = if generated.is_empty() {
            SetupMode::Loaded
        } else {
            SetupMode::Hybrid { generated }
        };
        Self::build(table, fluid, mode, clamp_boundaries)
    }

    fn load(path: &Path, fluid: &dyn SinglePhaseFluid) -> TableResult<(TableData, SetupMode)> {
        let timer = Timer::start();
        let mut table = codec::read_table(path)?;
        info!(
            path = %path.display(),
            num_p = table.num_p(),
            num_t = table.num_t(),
            elapsed_s = timer.stop(),
            "loaded property table"
        );

        let generated = generator::generate_missing_tabulated_data(fluid, &mut table)?;
        if generated.is_empty() {
            return Ok((table, SetupMode::Loaded));
        }
        info!(?generated, "completed table from {}", fluid.fluid_name());
        write_table(path, &table, fluid)?;
        Ok((table, SetupMode::Hybrid { generated }))
    }

    fn generate(config: &TableConfig, fluid: &dyn SinglePhaseFluid) -> TableResult<TableData> {
        let timer = Timer::start();
        let table = generator::generate_all_tabulated_data(fluid, config)?;
        info!(
            num_p = table.num_p(),
            num_t = table.num_t(),
            elapsed_s = timer.stop(),
            "generated property table from {}",
            fluid.fluid_name()
        );
        Ok(table)
    }

    fn build(
        table: TableData,
        fluid: &'a dyn SinglePhaseFluid,
        mode: SetupMode,
        clamp_boundaries: bool,
    ) -> TableResult<Self> {
        let timer = Timer::start();
        let (pressure, temperature) = (table.pressure(), table.temperature());
        let interpolators = PropertySet::try_build(|prop| -> TableResult<BicubicSpline> {
            let matrix = table.property(prop).ok_or_else(|| TableError::Config {
                what: format!("table has no '{prop}' data"),
            })?;
            let boundary = if clamp_boundaries {
                Some(generator::boundary_derivatives(
                    fluid,
                    pressure,
                    temperature,
                    prop,
                )?)
            } else {
                None
            };
            BicubicSpline::new(
                pressure.clone(),
                temperature.clone(),
                matrix.clone(),
                boundary.as_ref(),
            )
        })?;
        let bounds = TableBounds::of(pressure, temperature);
        info!(
            ?mode,
            clamp_boundaries,
            elapsed_s = timer.stop(),
            "built property interpolators"
        );
        if let Some(summary) = table_timing::summary() {
            debug!("{summary}");
        }

        Ok(Self {
            fluid,
            table,
            interpolators,
            bounds,
            mode,
        })
    }

    /// Reject a state outside the tabulated domain. Bounds are inclusive.
    pub fn check_input_variables(&self, p: Real, t: Real) -> FluidResult<()> {
        let b = &self.bounds;
        if !(b.pressure_min..=b.pressure_max).contains(&p) {
            return Err(FluidError::OutOfRange {
                what: "pressure",
                value: p,
                min: b.pressure_min,
                max: b.pressure_max,
            });
        }
        if !(b.temperature_min..=b.temperature_max).contains(&t) {
            return Err(FluidError::OutOfRange {
                what: "temperature",
                value: t,
                min: b.temperature_min,
                max: b.temperature_max,
            });
        }
        Ok(())
    }

    /// Density, internal energy and enthalpy with derivatives behind one range check.
    pub fn property_pack(&self, p: Pressure, t: Temperature) -> FluidResult<ThermoPropertyPack> {
        let (p_pa, t_k) = (p.get::<pascal>(), t.get::<kelvin>());
        self.check_input_variables(p_pa, t_k)?;
        let density = self.interpolators.density.evaluate(p_pa, t_k);
        Ok(ThermoPropertyPack {
            p,
            t,
            rho: kg_per_m3(density.value),
            density,
            internal_energy: self.interpolators.internal_energy.evaluate(p_pa, t_k),
            enthalpy: self.interpolators.enthalpy.evaluate(p_pa, t_k),
        })
    }

    pub fn pressure_axis(&self) -> &Axis {
        self.table.pressure()
    }

    pub fn temperature_axis(&self) -> &Axis {
        self.table.temperature()
    }

    pub fn setup_mode(&self) -> &SetupMode {
        &self.mode
    }

    pub fn bounds(&self) -> TableBounds {
        self.bounds
    }

    /// The finalized table, with all three properties present.
    pub fn table(&self) -> &TableData {
        &self.table
    }

    /// The slow model behind the table.
    pub fn slow_model(&self) -> &'a dyn SinglePhaseFluid {
        self.fluid
    }

    fn interpolate(
        &self,
        prop: TabulatedProperty,
        p: Real,
        t: Real,
    ) -> FluidResult<PropertyDerivs> {
        self.check_input_variables(p, t)?;
        Ok(self.interpolators.get(prop).evaluate(p, t))
    }
}

fn write_table(path: &Path, table: &TableData, fluid: &dyn SinglePhaseFluid) -> TableResult<()> {
    codec::write_table(path, table, Some(fluid.fluid_name()))?;
    info!(path = %path.display(), "wrote property table");
    Ok(())
}

impl SinglePhaseFluid for TabulatedFluidProperties<'_> {
    fn fluid_name(&self) -> &str {
        self.fluid.fluid_name()
    }

    fn molar_mass(&self) -> Real {
        self.fluid.molar_mass()
    }

    fn rho(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.check_input_variables(p, t)?;
        Ok(self.interpolators.density.value(p, t))
    }

    fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.interpolate(TabulatedProperty::Density, p, t)
    }

    fn e(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.check_input_variables(p, t)?;
        Ok(self.interpolators.internal_energy.value(p, t))
    }

    fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.interpolate(TabulatedProperty::InternalEnergy, p, t)
    }

    fn rho_e_dpt(&self, p: Real, t: Real) -> FluidResult<(PropertyDerivs, PropertyDerivs)> {
        self.check_input_variables(p, t)?;
        Ok((
            self.interpolators.density.evaluate(p, t),
            self.interpolators.internal_energy.evaluate(p, t),
        ))
    }

    fn h(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.check_input_variables(p, t)?;
        Ok(self.interpolators.enthalpy.value(p, t))
    }

    fn h_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.interpolate(TabulatedProperty::Enthalpy, p, t)
    }

    fn mu(&self, rho: Real, t: Real) -> FluidResult<Real> {
        self.fluid.mu(rho, t)
    }

    fn mu_drho_t(&self, rho: Real, t: Real) -> FluidResult<ViscosityDerivs> {
        self.fluid.mu_drho_t(rho, t)
    }

    fn cp(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.fluid.cp(p, t)
    }

    fn cv(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.fluid.cv(p, t)
    }

    fn c(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.fluid.c(p, t)
    }

    fn k(&self, rho: Real, t: Real) -> FluidResult<Real> {
        self.fluid.k(rho, t)
    }

    fn s(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.fluid.s(p, t)
    }

    fn beta(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.fluid.beta(p, t)
    }

    fn henry_constant(&self, t: Real) -> FluidResult<Real> {
        self.fluid.henry_constant(t)
    }

    fn henry_constant_dt(&self, t: Real) -> FluidResult<HenryDerivs> {
        self.fluid.henry_constant_dt(t)
    }
}
