//! Filling property matrices from a slow fluid model.

use crate::axis::Axis;
use crate::bicubic::BoundaryDerivatives;
use crate::config::TableConfig;
use crate::error::TableResult;
use crate::matrix::PropertyMatrix;
use crate::property::TabulatedProperty;
use crate::table::TableData;
use ft_core::Real;
use ft_core::timing::table_timing;
use ft_fluids::{FluidResult, PropertyDerivs, SinglePhaseFluid};
use tracing::debug;

/// Density and internal energy at one grid point.
fn sample(fluid: &dyn SinglePhaseFluid, p: Real, t: Real) -> FluidResult<(Real, Real)> {
    table_timing::SLOW_MODEL_CALLS.time(|| -> FluidResult<(Real, Real)> {
        Ok((fluid.rho(p, t)?, fluid.e(p, t)?))
    })
}

/// Evaluate the slow model over the grid and return the requested properties.
///
/// Enthalpy is formed as `e + p / rho` from the same two calls.
fn sample_grid(
    fluid: &dyn SinglePhaseFluid,
    pressure: &Axis,
    temperature: &Axis,
    props: &[TabulatedProperty],
) -> TableResult<Vec<(TabulatedProperty, PropertyMatrix)>> {
    let (num_p, num_t) = (pressure.len(), temperature.len());
    let mut columns: Vec<Vec<Real>> = vec![Vec::with_capacity(num_p * num_t); props.len()];
    for &t in temperature.values() {
        for &p in pressure.values() {
            let (rho, e) = sample(fluid, p, t)?;
            for (values, prop) in columns.iter_mut().zip(props) {
                values.push(match prop {
                    TabulatedProperty::Density => rho,
                    TabulatedProperty::InternalEnergy => e,
                    TabulatedProperty::Enthalpy => e + p / rho,
                });
            }
        }
    }
    let mut out = Vec::with_capacity(props.len());
    for (&prop, values) in props.iter().zip(columns) {
        debug!(property = %prop, num_p, num_t, "generated from slow model");
        out.push((prop, PropertyMatrix::from_flat(num_t, num_p, values)?));
    }
    Ok(out)
}

/// Build axes from `config` and tabulate every property on them.
pub fn generate_all_tabulated_data(
    fluid: &dyn SinglePhaseFluid,
    config: &TableConfig,
) -> TableResult<TableData> {
    config.validate()?;
    let mut table = TableData::new(config.pressure_axis()?, config.temperature_axis()?);
    generate_missing_tabulated_data(fluid, &mut table)?;
    Ok(table)
}

/// Tabulate the properties `table` lacks on its existing axes.
///
/// Returns the properties that were generated, in file order.
pub fn generate_missing_tabulated_data(
    fluid: &dyn SinglePhaseFluid,
    table: &mut TableData,
) -> TableResult<Vec<TabulatedProperty>> {
    let missing = table.missing();
    if missing.is_empty() {
        return Ok(missing);
    }
    let generated = sample_grid(fluid, table.pressure(), table.temperature(), &missing)?;
    for (prop, matrix) in generated {
        table.set_property(prop, matrix)?;
    }
    Ok(missing)
}

fn slow_derivs(
    fluid: &dyn SinglePhaseFluid,
    prop: TabulatedProperty,
    p: Real,
    t: Real,
) -> FluidResult<PropertyDerivs> {
    table_timing::BOUNDARY_CALLS.time(|| match prop {
        TabulatedProperty::Density => fluid.rho_dpt(p, t),
        TabulatedProperty::InternalEnergy => fluid.e_dpt(p, t),
        TabulatedProperty::Enthalpy => fluid.h_dpt(p, t),
    })
}

/// Slow-model slopes of `prop` along the four edges of the grid.
pub fn boundary_derivatives(
    fluid: &dyn SinglePhaseFluid,
    pressure: &Axis,
    temperature: &Axis,
    prop: TabulatedProperty,
) -> TableResult<BoundaryDerivatives> {
    let along_t = |p: Real| -> FluidResult<Vec<Real>> {
        temperature
            .values()
            .iter()
            .map(|&t| slow_derivs(fluid, prop, p, t).map(|d| d.d_dp))
            .collect()
    };
    let along_p = |t: Real| -> FluidResult<Vec<Real>> {
        pressure
            .values()
            .iter()
            .map(|&p| slow_derivs(fluid, prop, p, t).map(|d| d.d_dt))
            .collect()
    };
    Ok(BoundaryDerivatives {
        dp_low: along_t(pressure.min())?,
        dp_high: along_t(pressure.max())?,
        dt_low: along_p(temperature.min())?,
        dt_high: along_p(temperature.max())?,
    })
}
