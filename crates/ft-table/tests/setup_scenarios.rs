use ft_core::Real;
use ft_fluids::{
    FluidError, FluidResult, HenryDerivs, IdealGas, PropertyDerivs, SinglePhaseFluid, Species,
    ViscosityDerivs,
};
use ft_table::codec::{parse_str, read_table};
use ft_table::{SetupMode, TableConfig, TableError, TabulatedFluidProperties, TabulatedProperty};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ideal gas that counts grid samples (`rho` calls).
struct CountingGas {
    inner: IdealGas,
    rho_calls: AtomicUsize,
}

impl CountingGas {
    fn new() -> Self {
        Self {
            inner: IdealGas::from_species(Species::N2),
            rho_calls: AtomicUsize::new(0),
        }
    }

    fn rho_calls(&self) -> usize {
        self.rho_calls.load(Ordering::Relaxed)
    }
}

impl SinglePhaseFluid for CountingGas {
    fn fluid_name(&self) -> &str {
        self.inner.fluid_name()
    }
    fn molar_mass(&self) -> Real {
        self.inner.molar_mass()
    }
    fn rho(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.rho_calls.fetch_add(1, Ordering::Relaxed);
        self.inner.rho(p, t)
    }
    fn rho_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.inner.rho_dpt(p, t)
    }
    fn e(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.inner.e(p, t)
    }
    fn e_dpt(&self, p: Real, t: Real) -> FluidResult<PropertyDerivs> {
        self.inner.e_dpt(p, t)
    }
    fn mu(&self, rho: Real, t: Real) -> FluidResult<Real> {
        self.inner.mu(rho, t)
    }
    fn mu_drho_t(&self, rho: Real, t: Real) -> FluidResult<ViscosityDerivs> {
        self.inner.mu_drho_t(rho, t)
    }
    fn cp(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.inner.cp(p, t)
    }
    fn cv(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.inner.cv(p, t)
    }
    fn c(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.inner.c(p, t)
    }
    fn k(&self, rho: Real, t: Real) -> FluidResult<Real> {
        self.inner.k(rho, t)
    }
    fn s(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.inner.s(p, t)
    }
    fn beta(&self, p: Real, t: Real) -> FluidResult<Real> {
        self.inner.beta(p, t)
    }
    fn henry_constant(&self, t: Real) -> FluidResult<Real> {
        self.inner.henry_constant(t)
    }
    fn henry_constant_dt(&self, t: Real) -> FluidResult<HenryDerivs> {
        self.inner.henry_constant_dt(t)
    }
}

const PRESSURES: [Real; 3] = [1e5, 2e5, 3e5];
const TEMPERATURES: [Real; 3] = [300.0, 350.0, 400.0];

/// Axes plus a density block holding the gas's own densities.
fn density_only_file(gas: &dyn SinglePhaseFluid) -> String {
    let mut text = String::from("# density only\npressure\n");
    for p in PRESSURES {
        text.push_str(&format!("{p}\n"));
    }
    text.push_str("\ntemperature\n");
    for t in TEMPERATURES {
        text.push_str(&format!("{t}\n"));
    }
    text.push_str("\ndensity\n");
    for t in TEMPERATURES {
        for p in PRESSURES {
            text.push_str(&format!("{}\n", gas.rho(p, t).unwrap()));
        }
    }
    text
}

fn config_for(path: &Path) -> TableConfig {
    TableConfig {
        file: Some(path.to_path_buf()),
        ..TableConfig::default()
    }
}

#[test]
fn density_query_lies_between_neighbours() {
    let gas = CountingGas::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("n2.txt");
    std::fs::write(&path, density_only_file(&gas)).unwrap();

    let table = TabulatedFluidProperties::initial_setup(&config_for(&path), &gas).unwrap();
    let rho = table.rho(1.5e5, 325.0).unwrap();
    let corners = [
        gas.inner.rho(1e5, 300.0).unwrap(),
        gas.inner.rho(2e5, 300.0).unwrap(),
        gas.inner.rho(1e5, 350.0).unwrap(),
        gas.inner.rho(2e5, 350.0).unwrap(),
    ];
    let lo = corners.iter().copied().fold(Real::INFINITY, Real::min);
    let hi = corners.iter().copied().fold(Real::NEG_INFINITY, Real::max);
    assert!(lo < rho && rho < hi, "{lo} < {rho} < {hi}");
}

#[test]
fn missing_properties_are_generated_and_written_back() {
    let gas = CountingGas::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("n2.txt");
    let original = density_only_file(&gas);
    std::fs::write(&path, &original).unwrap();
    let calls_before = gas.rho_calls();

    let table = TabulatedFluidProperties::initial_setup(&config_for(&path), &gas).unwrap();
    assert_eq!(
        table.setup_mode(),
        &SetupMode::Hybrid {
            generated: vec![TabulatedProperty::InternalEnergy, TabulatedProperty::Enthalpy]
        }
    );
    // one slow sample per grid point, at the file's axes
    assert_eq!(gas.rho_calls() - calls_before, 9);
    assert_eq!(table.pressure_axis().values(), &PRESSURES);

    let rewritten = read_table(&path).unwrap();
    assert!(rewritten.missing().is_empty());
    assert_eq!(
        rewritten.property(TabulatedProperty::Density),
        parse_str(&original).unwrap().property(TabulatedProperty::Density)
    );
    assert_eq!(&rewritten, table.table());

    // the completed file now loads without touching the slow model's grid path
    let calls_before = gas.rho_calls();
    let reloaded = TabulatedFluidProperties::initial_setup(&config_for(&path), &gas).unwrap();
    assert_eq!(reloaded.setup_mode(), &SetupMode::Loaded);
    assert_eq!(gas.rho_calls(), calls_before);
    assert_eq!(reloaded.e_dpt(2.5e5, 380.0), table.e_dpt(2.5e5, 380.0));
}

#[test]
fn out_of_range_query_is_rejected() {
    let gas = IdealGas::from_species(Species::N2);
    let config = TableConfig {
        num_p: 4,
        num_t: 4,
        ..TableConfig::default()
    };
    let table = TabulatedFluidProperties::initial_setup(&config, &gas).unwrap();
    let err = table.rho(-1.0, 300.0).unwrap_err();
    assert!(matches!(err, FluidError::OutOfRange { what: "pressure", .. }));
    assert!(err.to_string().contains("out of range"));

    // exact bounds are inside the domain
    let b = table.bounds();
    for (p, t) in [
        (b.pressure_min, b.temperature_min),
        (b.pressure_max, b.temperature_max),
        (b.pressure_min, b.temperature_max),
    ] {
        assert!(table.rho_dpt(p, t).is_ok());
        assert!(table.h(p, t).is_ok());
    }
    assert!(table.e(b.pressure_max, b.temperature_max + 1e-9).is_err());
}

#[test]
fn decreasing_pressure_axis_fails_setup() {
    let gas = IdealGas::from_species(Species::N2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    std::fs::write(&path, "pressure\n3e5\n2e5\n1e5\n\ntemperature\n300\n350\n400\n").unwrap();

    match TabulatedFluidProperties::initial_setup(&config_for(&path), &gas) {
        Err(TableError::Format { line, message }) => {
            assert_eq!(line, 3);
            assert!(message.contains("strictly increasing"));
        }
        Err(other) => panic!("expected a format error, got {other}"),
        Ok(_) => panic!("expected a format error"),
    }
    // a malformed table is never rewritten
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("density"));
}

#[test]
fn generated_table_is_cached_and_matches_slow_model() {
    let gas = CountingGas::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.txt");
    let config = TableConfig {
        file: Some(path.clone()),
        pressure_min: 1e5,
        pressure_max: 1e6,
        num_p: 7,
        temperature_min: 300.0,
        temperature_max: 450.0,
        num_t: 6,
        ..TableConfig::default()
    };

    let table = TabulatedFluidProperties::initial_setup(&config, &gas).unwrap();
    assert_eq!(table.setup_mode(), &SetupMode::Generated);
    assert_eq!(gas.rho_calls(), 7 * 6);
    assert!(path.exists());

    for &t in table.temperature_axis().values() {
        for &p in table.pressure_axis().values() {
            assert_eq!(table.rho(p, t).unwrap(), gas.inner.rho(p, t).unwrap());
            assert_eq!(table.e(p, t).unwrap(), gas.inner.e(p, t).unwrap());
            let h = gas.inner.h(p, t).unwrap();
            assert!((table.h(p, t).unwrap() - h).abs() < 1e-9 * h);
        }
    }

    let cached = TabulatedFluidProperties::initial_setup(&config, &gas).unwrap();
    assert_eq!(cached.setup_mode(), &SetupMode::Loaded);
    assert_eq!(gas.rho_calls(), 7 * 6);
    assert_eq!(cached.table(), table.table());
    assert_eq!(cached.h_dpt(4.4e5, 333.0), table.h_dpt(4.4e5, 333.0));
}

#[test]
fn unwritable_path_is_io_error() {
    let gas = IdealGas::from_species(Species::N2);
    let dir = tempfile::tempdir().unwrap();
    let config = TableConfig {
        file: Some(dir.path().join("no_such_dir").join("table.txt")),
        num_p: 3,
        num_t: 3,
        ..TableConfig::default()
    };
    assert!(matches!(
        TabulatedFluidProperties::initial_setup(&config, &gas),
        Err(TableError::Io { .. })
    ));
}
