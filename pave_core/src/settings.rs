//! # Design Settings
//!
//! Constants of the design method that are not site inputs: the reliability
//! parameters (Z_R, S_o, C_d, ΔPSI) and the thickness solver configuration.
//! Defaults reproduce a 95% reliability design with the literal solver.
//!
//! ## Structure
//!
//! ```text
//! DesignSettings
//! ├── reliability: ReliabilityParameters (ZR, So, Cd, deltaPSI)
//! └── solver: SolverSettings (method, passes, bracketing limits)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pave_core::settings::{DesignSettings, ReliabilityParameters, ThicknessMethod};
//!
//! let settings = DesignSettings::default()
//!     .with_reliability(ReliabilityParameters::from_reliability_percent(90.0).unwrap())
//!     .with_method(ThicknessMethod::Converging);
//!
//! assert_eq!(settings.reliability.zr, -1.282);
//! assert!(settings.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Standard normal deviates for common reliability levels (AASHTO 1993 Table 4.1)
pub const RELIABILITY_TABLE: &[(f64, f64)] = &[
    (50.0, 0.000),
    (60.0, -0.253),
    (70.0, -0.524),
    (75.0, -0.674),
    (80.0, -0.841),
    (85.0, -1.037),
    (90.0, -1.282),
    (91.0, -1.340),
    (92.0, -1.405),
    (93.0, -1.476),
    (94.0, -1.555),
    (95.0, -1.645),
    (96.0, -1.751),
    (97.0, -1.881),
    (98.0, -2.054),
    (99.0, -2.327),
    (99.9, -3.090),
    (99.99, -3.750),
];

/// Reliability and serviceability constants of the design method.
///
/// The JSON names match the optional `"Reliability"` object of an input
/// file. Any omitted key keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityParameters {
    /// Standard normal deviate Z_R
    #[serde(rename = "ZR")]
    pub zr: f64,

    /// Combined standard error S_o
    #[serde(rename = "So")]
    pub so: f64,

    /// Load transfer coefficient C_d
    #[serde(rename = "Cd")]
    pub cd: f64,

    /// Design serviceability loss ΔPSI
    #[serde(rename = "deltaPSI")]
    pub delta_psi: f64,
}

impl Default for ReliabilityParameters {
    fn default() -> Self {
        ReliabilityParameters {
            zr: -1.645,
            so: 0.39,
            cd: 1.0,
            delta_psi: 2.0,
        }
    }
}

impl ReliabilityParameters {
    /// Default parameters with Z_R looked up for a reliability level in percent.
    pub fn from_reliability_percent(percent: f64) -> CalcResult<Self> {
        let zr = RELIABILITY_TABLE
            .iter()
            .find(|(level, _)| (level - percent).abs() < 1e-9)
            .map(|(_, zr)| *zr)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "reliability",
                    percent.to_string(),
                    "Reliability level is not in the AASHTO table (50, 60, 70, 75, 80, 85, 90-99, 99.9, 99.99)",
                )
            })?;
        Ok(Self {
            zr,
            ..Self::default()
        })
    }

    /// Validate the parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("ZR", self.zr),
            ("So", self.so),
            ("Cd", self.cd),
            ("deltaPSI", self.delta_psi),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a finite number"));
            }
        }
        if self.so <= 0.0 {
            return Err(CalcError::invalid_input(
                "So",
                self.so.to_string(),
                "Standard error must be positive",
            ));
        }
        if self.cd <= 0.0 {
            return Err(CalcError::invalid_input(
                "Cd",
                self.cd.to_string(),
                "Load transfer coefficient must be positive",
            ));
        }
        if self.delta_psi <= 0.0 {
            return Err(CalcError::invalid_input(
                "deltaPSI",
                self.delta_psi.to_string(),
                "Serviceability loss must be positive",
            ));
        }
        Ok(())
    }
}

/// How the slab thickness is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThicknessMethod {
    /// Closed-form expression re-evaluated a fixed number of times from the
    /// initial guess. The expression does not reference the current
    /// thickness, so every pass returns the same value.
    #[default]
    Literal,
    /// Full AASHTO 93 design equation solved for the thickness by
    /// bracketing and bisection. Uses the concrete elastic modulus.
    Converging,
}

impl ThicknessMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            ThicknessMethod::Literal => "literal (fixed passes)",
            ThicknessMethod::Converging => "converging (bisection)",
        }
    }
}

/// Thickness solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Which solver runs
    pub method: ThicknessMethod,

    /// Starting thickness for the literal passes (in)
    pub initial_guess_in: f64,

    /// Number of literal passes
    pub literal_passes: u32,

    /// Load transfer coefficient J (converging only)
    pub load_transfer_j: f64,

    /// Initial serviceability p0; terminal is p0 - ΔPSI (converging only)
    pub initial_serviceability: f64,

    /// Bracket width at which bisection stops (in)
    pub tolerance_in: f64,

    /// Bisection iteration cap
    pub max_iterations: u32,

    /// Lower end of the thickness search range (in)
    pub min_thickness_in: f64,

    /// Upper end of the thickness search range (in)
    pub max_thickness_in: f64,

    /// Step of the downward bracketing scan (in)
    pub scan_step_in: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            method: ThicknessMethod::default(),
            initial_guess_in: 7.0,
            literal_passes: 10,
            load_transfer_j: 3.2,
            initial_serviceability: 4.5,
            tolerance_in: 1e-4,
            max_iterations: 100,
            min_thickness_in: 1.0,
            max_thickness_in: 40.0,
            scan_step_in: 0.25,
        }
    }
}

impl SolverSettings {
    /// Validate solver configuration.
    pub fn validate(&self) -> CalcResult<()> {
        if self.literal_passes == 0 {
            return Err(CalcError::invalid_input(
                "literal_passes",
                "0",
                "At least one pass is required",
            ));
        }
        if self.load_transfer_j <= 0.0 {
            return Err(CalcError::invalid_input(
                "load_transfer_j",
                self.load_transfer_j.to_string(),
                "J must be positive",
            ));
        }
        if self.tolerance_in.is_nan() || self.tolerance_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "tolerance_in",
                self.tolerance_in.to_string(),
                "Tolerance must be positive",
            ));
        }
        if self.scan_step_in.is_nan() || self.scan_step_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "scan_step_in",
                self.scan_step_in.to_string(),
                "Scan step must be positive",
            ));
        }
        if self.min_thickness_in.is_nan()
            || self.min_thickness_in <= 0.0
            || self.min_thickness_in >= self.max_thickness_in
        {
            return Err(CalcError::invalid_input(
                "min_thickness_in",
                format!("{}..{}", self.min_thickness_in, self.max_thickness_in),
                "Search range must be positive and non-empty",
            ));
        }
        Ok(())
    }
}

/// All settings of one design run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignSettings {
    pub reliability: ReliabilityParameters,
    pub solver: SolverSettings,
}

impl DesignSettings {
    /// Replace the reliability parameters
    pub fn with_reliability(mut self, reliability: ReliabilityParameters) -> Self {
        self.reliability = reliability;
        self
    }

    /// Set the thickness method
    pub fn with_method(mut self, method: ThicknessMethod) -> Self {
        self.solver.method = method;
        self
    }

    /// Replace the solver settings
    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    /// Validate every part of the settings.
    pub fn validate(&self) -> CalcResult<()> {
        self.reliability.validate()?;
        self.solver.validate()?;
        if self.solver.method == ThicknessMethod::Converging
            && self.reliability.delta_psi >= self.solver.initial_serviceability
        {
            return Err(CalcError::invalid_input(
                "deltaPSI",
                self.reliability.delta_psi.to_string(),
                "Serviceability loss must be below the initial serviceability",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reliability() {
        let r = ReliabilityParameters::default();
        assert_eq!(r.zr, -1.645);
        assert_eq!(r.so, 0.39);
        assert_eq!(r.cd, 1.0);
        assert_eq!(r.delta_psi, 2.0);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_reliability_lookup() {
        let r = ReliabilityParameters::from_reliability_percent(95.0).unwrap();
        assert_eq!(r, ReliabilityParameters::default());

        let r = ReliabilityParameters::from_reliability_percent(99.0).unwrap();
        assert_eq!(r.zr, -2.327);

        assert!(ReliabilityParameters::from_reliability_percent(42.0).is_err());
    }

    #[test]
    fn test_partial_reliability_json() {
        let r: ReliabilityParameters = serde_json::from_str(r#"{"ZR": -1.282}"#).unwrap();
        assert_eq!(r.zr, -1.282);
        assert_eq!(r.so, 0.39);

        let json = serde_json::to_string(&ReliabilityParameters::default()).unwrap();
        assert!(json.contains("\"deltaPSI\":2.0"));
    }

    #[test]
    fn test_invalid_reliability() {
        let r = ReliabilityParameters { so: 0.0, ..Default::default() };
        assert!(r.validate().is_err());

        let r = ReliabilityParameters { delta_psi: f64::NAN, ..Default::default() };
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_default_solver() {
        let s = SolverSettings::default();
        assert_eq!(s.method, ThicknessMethod::Literal);
        assert_eq!(s.literal_passes, 10);
        assert_eq!(s.initial_guess_in, 7.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_invalid_solver() {
        let s = SolverSettings { literal_passes: 0, ..Default::default() };
        assert!(s.validate().is_err());

        let s = SolverSettings { min_thickness_in: 50.0, ..Default::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_converging_rejects_excess_serviceability_loss() {
        let settings = DesignSettings::default()
            .with_reliability(ReliabilityParameters { delta_psi: 4.5, ..Default::default() })
            .with_method(ThicknessMethod::Converging);
        assert!(settings.validate().is_err());

        // literal method does not use p0
        let settings = settings.with_method(ThicknessMethod::Literal);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&ThicknessMethod::Converging).unwrap();
        assert_eq!(json, "\"converging\"");
    }
}
