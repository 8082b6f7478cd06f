use clap::{Parser, Subcommand};
use ft_core::timing::{enable_timing, table_timing};
use ft_core::{k, pa};
use ft_fluids::{FluidError, FluidResult, IdealGas, SinglePhaseFluid, Species, VanDerWaalsFluid};
use ft_table::codec::read_table;
use ft_table::{
    SetupMode, TableConfig, TableData, TableError, TabulatedFluidProperties, TabulatedProperty,
    load_config,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uom::si::mass_density::kilogram_per_cubic_meter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Unknown species '{name}': {reason}")]
    Species { name: String, reason: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg_attr(feature = "coolprop", allow(dead_code))]
    #[error("The '{0}' model requires building with the `coolprop` feature")]
    FeatureDisabled(&'static str),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ft-cli")]
#[command(about = "Tabulated fluid property generation and lookup", long_about = None)]
struct Cli {
    /// Print slow-model call timing after setup
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or complete the table file named in a config
    Generate {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
    },
    /// Query tabulated and pass-through properties at one state
    Query {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
        /// Pressure [Pa]
        #[arg(short, long)]
        pressure: f64,
        /// Temperature [K]
        #[arg(short, long)]
        temperature: f64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Parse a table file and summarize its contents
    Inspect {
        /// Path to the table file
        table_path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModelKind {
    #[default]
    IdealGas,
    VanDerWaals,
    Coolprop,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct FluidConfig {
    model: ModelKind,
    species: String,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::IdealGas,
            species: "N2".to_string(),
        }
    }
}

/// Config file layout: the slow model plus the table settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CliConfig {
    fluid: FluidConfig,
    table: TableConfig,
}

impl CliConfig {
    /// Load, resolving a relative table path against the config's directory.
    fn load(path: &Path) -> CliResult<Self> {
        let mut config: CliConfig = load_config(path)?;
        if let (Some(file), Some(dir)) = (config.table.file.as_mut(), path.parent())
            && file.is_relative()
        {
            *file = dir.join(&*file);
        }
        tracing::debug!(path = %path.display(), model = ?config.fluid.model, "loaded config");
        Ok(config)
    }
}

fn build_fluid(config: &FluidConfig) -> CliResult<Box<dyn SinglePhaseFluid>> {
    let species: Species = config.species.parse().map_err(|reason| CliError::Species {
        name: config.species.clone(),
        reason,
    })?;
    match config.model {
        ModelKind::IdealGas => Ok(Box::new(IdealGas::from_species(species))),
        ModelKind::VanDerWaals => Ok(Box::new(VanDerWaalsFluid::from_species(species))),
        #[cfg(feature = "coolprop")]
        ModelKind::Coolprop => Ok(Box::new(ft_fluids::CoolPropModel::new(species))),
        #[cfg(not(feature = "coolprop"))]
        ModelKind::Coolprop => Err(CliError::FeatureDisabled("coolprop")),
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.timing {
        enable_timing();
    }

    match cli.command {
        Commands::Generate { config_path } => cmd_generate(&config_path),
        Commands::Query {
            config_path,
            pressure,
            temperature,
            json,
        } => cmd_query(&config_path, pressure, temperature, json),
        Commands::Inspect { table_path } => cmd_inspect(&table_path),
    }
}

fn print_timing_summary() {
    if let Some(summary) = table_timing::summary() {
        println!();
        print!("{summary}");
    }
}

fn cmd_generate(config_path: &Path) -> CliResult<()> {
    let config = CliConfig::load(config_path)?;
    let fluid = build_fluid(&config.fluid)?;
    println!("Setting up tabulated properties for {}", fluid.fluid_name());

    let table = TabulatedFluidProperties::initial_setup(&config.table, fluid.as_ref())?;
    match table.setup_mode() {
        SetupMode::Loaded => println!("✓ Table file already complete"),
        SetupMode::Generated => println!("✓ Generated full table"),
        SetupMode::Hybrid { generated } => {
            let names: Vec<_> = generated.iter().map(|p| p.keyword()).collect();
            println!("✓ Completed table with: {}", names.join(", "));
        }
    }
    match &config.table.file {
        Some(path) => println!("  File: {}", path.display()),
        None => println!("  No table file configured; nothing written"),
    }
    print_grid(table.table());
    print_timing_summary();
    Ok(())
}

/// Render a pass-through result, showing unsupported properties as n/a.
fn optional(value: FluidResult<f64>) -> CliResult<Option<f64>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(FluidError::NotSupported { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn cmd_query(config_path: &Path, pressure: f64, temperature: f64, json: bool) -> CliResult<()> {
    let config = CliConfig::load(config_path)?;
    let fluid = build_fluid(&config.fluid)?;
    let table = TabulatedFluidProperties::initial_setup(&config.table, fluid.as_ref())?;

    let pack = table.property_pack(pa(pressure), k(temperature))?;
    let rho = pack.rho.get::<kilogram_per_cubic_meter>();
    let cp = optional(table.cp(pressure, temperature))?;
    let cv = optional(table.cv(pressure, temperature))?;
    let c = optional(table.c(pressure, temperature))?;
    let s = optional(table.s(pressure, temperature))?;
    let mu = optional(table.mu(rho, temperature))?;
    let cond = optional(table.k(rho, temperature))?;

    if json {
        let derivs = |d: ft_fluids::PropertyDerivs| {
            serde_json::json!({ "value": d.value, "d_dp": d.d_dp, "d_dt": d.d_dt })
        };
        let out = serde_json::json!({
            "fluid": table.fluid_name(),
            "pressure": pressure,
            "temperature": temperature,
            "density": derivs(pack.density),
            "internal_energy": derivs(pack.internal_energy),
            "enthalpy": derivs(pack.enthalpy),
            "cp": cp,
            "cv": cv,
            "speed_of_sound": c,
            "entropy": s,
            "viscosity": mu,
            "thermal_conductivity": cond,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let fmt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6e}"));
    println!("{} at p = {pressure} Pa, T = {temperature} K", table.fluid_name());
    println!("Tabulated:");
    for (name, unit, d) in [
        ("rho", "kg/m^3", pack.density),
        ("e", "J/kg", pack.internal_energy),
        ("h", "J/kg", pack.enthalpy),
    ] {
        println!(
            "  {name:<4} = {:>14.6e} {unit:<7} d/dp = {:>13.6e}  d/dT = {:>13.6e}",
            d.value, d.d_dp, d.d_dt
        );
    }
    println!("Slow model:");
    println!("  cp   = {}", fmt(cp));
    println!("  cv   = {}", fmt(cv));
    println!("  c    = {}", fmt(c));
    println!("  s    = {}", fmt(s));
    println!("  mu   = {}", fmt(mu));
    println!("  k    = {}", fmt(cond));
    print_timing_summary();
    Ok(())
}

fn print_grid(table: &TableData) {
    let (p, t) = (table.pressure(), table.temperature());
    println!(
        "  Pressure: {} points, [{:.6e}, {:.6e}] Pa",
        p.len(),
        p.min(),
        p.max()
    );
    println!(
        "  Temperature: {} points, [{:.3}, {:.3}] K",
        t.len(),
        t.min(),
        t.max()
    );
}

fn cmd_inspect(table_path: &Path) -> CliResult<()> {
    let table = read_table(table_path)?;
    println!("Table: {}", table_path.display());
    print_grid(&table);
    for prop in TabulatedProperty::ALL {
        match table.property(prop) {
            Some(matrix) => {
                let values = matrix.as_flat();
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                println!(
                    "  {:<16} [{:.6e}, {:.6e}] {}",
                    prop.keyword(),
                    min,
                    max,
                    prop.units()
                );
            }
            None => println!("  {:<16} missing (generated on setup)", prop.keyword()),
        }
    }
    Ok(())
}
