//! Species catalog for the built-in property models.

/// Coefficients of the Harvey correlation for Henry's law constant in water:
/// `ln(Kh / p_sat) = A / Tr + B (1 - Tr)^0.355 / Tr + C exp(1 - Tr) Tr^-0.41`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HenryCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Reference data for a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesData {
    /// Molar mass [kg/kmol]
    pub molar_mass: f64,
    /// Critical temperature [K]
    pub critical_temperature: f64,
    /// Critical pressure [Pa]
    pub critical_pressure: f64,
    /// Ideal-gas isobaric heat capacity near 300 K [J/(kg·K)]
    pub cp_ideal: f64,
    /// Sutherland reference viscosity [Pa·s]
    pub mu_ref: f64,
    /// Sutherland reference temperature [K]
    pub mu_ref_temperature: f64,
    /// Sutherland constant [K]
    pub sutherland: f64,
    /// Prandtl number used to derive thermal conductivity
    pub prandtl: f64,
    /// Henry's law coefficients, when the gas has a dissolution correlation
    pub henry: Option<HenryCoefficients>,
}

/// Gases with built-in reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Argon (Ar)
    Ar,
    /// Helium (He)
    He,
    /// Hydrogen (H₂)
    H2,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Methane (CH₄)
    CH4,
    /// Carbon monoxide (CO)
    CO,
    /// Water vapour (H₂O)
    H2O,
    /// Air (pseudo-pure)
    Air,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::N2,
        Species::O2,
        Species::Ar,
        Species::He,
        Species::H2,
        Species::CO2,
        Species::CH4,
        Species::CO,
        Species::H2O,
        Species::Air,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::Ar => "Ar",
            Species::He => "He",
            Species::H2 => "H2",
            Species::CO2 => "CO2",
            Species::CH4 => "CH4",
            Species::CO => "CO",
            Species::H2O => "H2O",
            Species::Air => "Air",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::N2 => "Nitrogen",
            Species::O2 => "Oxygen",
            Species::Ar => "Argon",
            Species::He => "Helium",
            Species::H2 => "Hydrogen",
            Species::CO2 => "Carbon Dioxide",
            Species::CH4 => "Methane",
            Species::CO => "Carbon Monoxide",
            Species::H2O => "Water",
            Species::Air => "Air",
        }
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> f64 {
        self.data().molar_mass
    }

    /// Reference data for this species.
    ///
    /// Critical constants from NIST; Sutherland parameters from White, Viscous Fluid Flow;
    /// Henry coefficients from the IAPWS guideline on gas solubility.
    pub fn data(&self) -> SpeciesData {
        let henry = |a, b, c| Some(HenryCoefficients { a, b, c });
        match self {
            Species::N2 => SpeciesData {
                molar_mass: 28.014,
                critical_temperature: 126.19,
                critical_pressure: 3.3958e6,
                cp_ideal: 1040.0,
                mu_ref: 1.663e-5,
                mu_ref_temperature: 273.15,
                sutherland: 107.0,
                prandtl: 0.71,
                henry: henry(-9.67578, 4.72162, 11.70585),
            },
            Species::O2 => SpeciesData {
                molar_mass: 31.999,
                critical_temperature: 154.58,
                critical_pressure: 5.043e6,
                cp_ideal: 918.0,
                mu_ref: 1.919e-5,
                mu_ref_temperature: 273.15,
                sutherland: 139.0,
                prandtl: 0.71,
                henry: henry(-9.44833, 4.43822, 11.42005),
            },
            Species::Ar => SpeciesData {
                molar_mass: 39.948,
                critical_temperature: 150.69,
                critical_pressure: 4.863e6,
                cp_ideal: 520.3,
                mu_ref: 2.125e-5,
                mu_ref_temperature: 273.15,
                sutherland: 144.0,
                prandtl: 0.67,
                henry: henry(-8.40954, 4.29587, 10.52779),
            },
            Species::He => SpeciesData {
                molar_mass: 4.003,
                critical_temperature: 5.195,
                critical_pressure: 0.2275e6,
                cp_ideal: 5193.0,
                mu_ref: 1.87e-5,
                mu_ref_temperature: 273.15,
                sutherland: 79.4,
                prandtl: 0.67,
                henry: henry(-3.52839, 7.12983, 4.47770),
            },
            Species::H2 => SpeciesData {
                molar_mass: 2.016,
                critical_temperature: 33.145,
                critical_pressure: 1.2964e6,
                cp_ideal: 14_300.0,
                mu_ref: 8.411e-6,
                mu_ref_temperature: 273.15,
                sutherland: 97.0,
                prandtl: 0.70,
                henry: henry(-4.73284, 6.08954, 6.06066),
            },
            Species::CO2 => SpeciesData {
                molar_mass: 44.010,
                critical_temperature: 304.13,
                critical_pressure: 7.3773e6,
                cp_ideal: 844.0,
                mu_ref: 1.370e-5,
                mu_ref_temperature: 273.15,
                sutherland: 222.0,
                prandtl: 0.76,
                henry: henry(-8.55445, 4.01195, 9.52345),
            },
            Species::CH4 => SpeciesData {
                molar_mass: 16.043,
                critical_temperature: 190.56,
                critical_pressure: 4.5992e6,
                cp_ideal: 2220.0,
                mu_ref: 1.03e-5,
                mu_ref_temperature: 273.15,
                sutherland: 198.0,
                prandtl: 0.74,
                henry: henry(-10.44708, 4.66491, 12.12986),
            },
            Species::CO => SpeciesData {
                molar_mass: 28.010,
                critical_temperature: 132.86,
                critical_pressure: 3.494e6,
                cp_ideal: 1040.0,
                mu_ref: 1.657e-5,
                mu_ref_temperature: 273.15,
                sutherland: 136.0,
                prandtl: 0.72,
                henry: None,
            },
            Species::H2O => SpeciesData {
                molar_mass: 18.015,
                critical_temperature: 647.096,
                critical_pressure: 22.064e6,
                cp_ideal: 1864.0,
                mu_ref: 1.12e-5,
                mu_ref_temperature: 350.0,
                sutherland: 1064.0,
                prandtl: 1.0,
                henry: None,
            },
            Species::Air => SpeciesData {
                molar_mass: 28.965,
                critical_temperature: 132.53,
                critical_pressure: 3.786e6,
                cp_ideal: 1005.0,
                mu_ref: 1.716e-5,
                mu_ref_temperature: 273.15,
                sutherland: 110.4,
                prandtl: 0.71,
                henry: None,
            },
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    #[cfg(feature = "coolprop")]
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::N2 => Pure::Nitrogen,
            Species::O2 => Pure::Oxygen,
            Species::Ar => Pure::Argon,
            Species::He => Pure::Helium,
            Species::H2 => Pure::Hydrogen,
            Species::CO2 => Pure::CarbonDioxide,
            Species::CH4 => Pure::Methane,
            Species::CO => Pure::CarbonMonoxide,
            Species::H2O => Pure::Water,
            Species::Air => Pure::Air,
        }
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N2" | "NITROGEN" => Ok(Species::N2),
            "O2" | "OXYGEN" => Ok(Species::O2),
            "AR" | "ARGON" => Ok(Species::Ar),
            "HE" | "HELIUM" => Ok(Species::He),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Species::CO),
            "H2O" | "WATER" | "STEAM" => Ok(Species::H2O),
            "AIR" => Ok(Species::Air),
            _ => Err("unknown species"),
        }
    }
}
