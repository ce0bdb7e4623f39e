//! # Rigid Slab Thickness
//!
//! Required concrete slab thickness per the AASHTO 1993 rigid pavement
//! design method.
//!
//! ## Methods
//!
//! - [`ThicknessMethod::Literal`] (default): evaluates
//!   D = ((A + B) / (D1 + D2))^(1/1.132) a fixed number of times starting
//!   from the initial guess. The right-hand side never references D, so
//!   every pass produces the same value and the pass count has no effect.
//! - [`ThicknessMethod::Converging`]: solves the full design equation
//!   log10 W18 = f(D) for D by bracketing and bisection. This variant uses
//!   the concrete elastic modulus E_c and the load transfer coefficient J.
//!
//! The two methods give different answers; the literal one is kept as the
//! default for compatibility with existing designs.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::slab::{calculate, SlabInput};
//! use pave_core::settings::DesignSettings;
//!
//! let input = SlabInput {
//!     esals: 1_000_000.0,
//!     flexural_strength_psi: 650.0,
//!     modulus_of_elasticity_psi: 4_000_000.0,
//!     k_pci: 13054.0,
//! };
//!
//! let result = calculate(&input, &DesignSettings::default()).unwrap();
//! assert_eq!(result.thickness_in, 0.04);
//! assert_eq!(result.iterations, 10);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{
    predicted_log_esals, reliability_term, round_hundredths, serviceability_term, slab_thickness,
    stiffness_term, strength_term, traffic_term, RigidDesignParams,
};
use crate::errors::{CalcError, CalcResult};
use crate::settings::{DesignSettings, ReliabilityParameters, SolverSettings, ThicknessMethod};

/// Input parameters for the slab stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabInput {
    /// 18-kip ESAL applications W18
    pub esals: f64,

    /// Concrete modulus of rupture S'c (psi)
    pub flexural_strength_psi: f64,

    /// Concrete elastic modulus E_c (psi); only the converging method uses it
    pub modulus_of_elasticity_psi: f64,

    /// Composite modulus of subgrade reaction k (psi/in)
    pub k_pci: f64,
}

impl SlabInput {
    /// Validate input parameters.
    pub fn validate(&self, method: ThicknessMethod) -> CalcResult<()> {
        if !self.esals.is_finite() || self.esals <= 0.0 {
            return Err(CalcError::domain_error(
                "ESALs",
                self.esals.to_string(),
                "ESALs must be positive (log10 is taken)",
            ));
        }
        if !self.flexural_strength_psi.is_finite() || self.flexural_strength_psi <= 0.0 {
            return Err(CalcError::domain_error(
                "FlexuralStrength",
                self.flexural_strength_psi.to_string(),
                "Flexural strength must be positive",
            ));
        }
        if !self.k_pci.is_finite() || self.k_pci <= 0.0 {
            return Err(CalcError::domain_error(
                "k",
                self.k_pci.to_string(),
                "Modulus of subgrade reaction must be positive (raised to a fractional power)",
            ));
        }
        if method == ThicknessMethod::Converging
            && (!self.modulus_of_elasticity_psi.is_finite() || self.modulus_of_elasticity_psi <= 0.0)
        {
            return Err(CalcError::domain_error(
                "ModulusOfElasticity",
                self.modulus_of_elasticity_psi.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        Ok(())
    }
}

/// Intermediate terms of the thickness expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessTerms {
    /// A = Z_R · S_o
    pub a: f64,
    /// B = 7.35 · log10(W18 + 1) − 0.06
    pub b: f64,
    /// C = S'c · C_d / k^0.25
    pub c: f64,
    /// D1 = (4.22 − 0.32 · ΔPSI) · log10(W18)
    pub d1: f64,
    /// D2 = 215.63 · √C − 18.42
    pub d2: f64,
}

impl ThicknessTerms {
    /// Evaluate all terms for a validated input.
    pub fn evaluate(input: &SlabInput, reliability: &ReliabilityParameters) -> CalcResult<Self> {
        let a = reliability_term(reliability.zr, reliability.so);
        let b = traffic_term(input.esals);
        let c = strength_term(input.flexural_strength_psi, reliability.cd, input.k_pci);
        if c < 0.0 {
            return Err(CalcError::domain_error(
                "C",
                c.to_string(),
                "Strength term is negative; its square root is undefined",
            ));
        }
        let d1 = serviceability_term(reliability.delta_psi, input.esals);
        let d2 = stiffness_term(c);

        let terms = ThicknessTerms { a, b, c, d1, d2 };
        for (name, value) in [("A", a), ("B", b), ("C", c), ("D1", d1), ("D2", d2)] {
            if !value.is_finite() {
                return Err(CalcError::domain_error(name, value.to_string(), "Term is not finite"));
            }
        }
        Ok(terms)
    }

    /// Ratio (A + B) / (D1 + D2) raised to 1/1.132 by the literal method
    pub fn ratio(&self) -> f64 {
        (self.a + self.b) / (self.d1 + self.d2)
    }
}

/// Results of the slab stage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness_in": 0.04,
///   "raw_thickness_in": 0.03947099096038383,
///   "method": "literal",
///   "terms": { "a": -0.64155, "b": 44.04, "c": 60.81, "d1": 21.48, "d2": 1663.08 },
///   "iterations": 10
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabResult {
    /// Required slab thickness D (in), rounded to 0.01
    pub thickness_in: f64,

    /// Unrounded thickness (in)
    pub raw_thickness_in: f64,

    /// Method that produced the thickness
    pub method: ThicknessMethod,

    /// Intermediate terms of the thickness expression
    pub terms: ThicknessTerms,

    /// Literal passes, or bisection steps for the converging method
    pub iterations: u32,
}

/// Calculate the required slab thickness.
///
/// # Arguments
///
/// * `input` - Traffic, concrete and support parameters
/// * `settings` - Reliability constants and solver configuration
///
/// # Returns
///
/// * `Ok(SlabResult)` - Thickness with its intermediate terms
/// * `Err(CalcError::DomainError)` - ESALs, S'c or k not positive, D1 + D2 = 0,
///   a negative base under the fractional exponent, or no root in the
///   converging search range
/// * `Err(CalcError::InvalidInput)` - Settings out of range
pub fn calculate(input: &SlabInput, settings: &DesignSettings) -> CalcResult<SlabResult> {
    settings.validate()?;
    input.validate(settings.solver.method)?;

    let terms = ThicknessTerms::evaluate(input, &settings.reliability)?;
    debug!(
        a = terms.a,
        b = terms.b,
        c = terms.c,
        d1 = terms.d1,
        d2 = terms.d2,
        "slab thickness terms"
    );

    let (raw_thickness, iterations) = match settings.solver.method {
        ThicknessMethod::Literal => solve_literal(&terms, &settings.solver)?,
        ThicknessMethod::Converging => solve_converging(input, settings)?,
    };

    debug!(
        method = ?settings.solver.method,
        thickness = raw_thickness,
        iterations,
        "slab thickness"
    );

    Ok(SlabResult {
        thickness_in: round_hundredths(raw_thickness),
        raw_thickness_in: raw_thickness,
        method: settings.solver.method,
        terms,
        iterations,
    })
}

/// Fixed-pass evaluation of the closed-form expression.
fn solve_literal(terms: &ThicknessTerms, solver: &SolverSettings) -> CalcResult<(f64, u32)> {
    let denominator = terms.d1 + terms.d2;
    if denominator == 0.0 {
        return Err(CalcError::domain_error(
            "D1 + D2",
            denominator.to_string(),
            "Denominator of the thickness expression is zero",
        ));
    }
    let ratio = terms.ratio();
    if ratio < 0.0 {
        return Err(CalcError::domain_error(
            "(A + B) / (D1 + D2)",
            ratio.to_string(),
            "Negative base cannot be raised to the fractional exponent 1/1.132",
        ));
    }

    // The expression does not depend on the current thickness: every pass
    // lands on the same value.
    let mut thickness = solver.initial_guess_in;
    for pass in 1..=solver.literal_passes {
        let previous = thickness;
        thickness = slab_thickness(terms.a, terms.b, terms.d1, terms.d2);
        debug!(pass, previous, thickness, "literal thickness pass");
    }

    if !thickness.is_finite() {
        return Err(CalcError::domain_error(
            "D",
            thickness.to_string(),
            "Slab thickness is not finite",
        ));
    }
    Ok((thickness, solver.literal_passes))
}

/// Solve the full design equation for the largest thickness carrying W18.
fn solve_converging(input: &SlabInput, settings: &DesignSettings) -> CalcResult<(f64, u32)> {
    let solver = &settings.solver;
    let reliability = &settings.reliability;
    let params = RigidDesignParams {
        zr: reliability.zr,
        so: reliability.so,
        sc: input.flexural_strength_psi,
        cd: reliability.cd,
        j: solver.load_transfer_j,
        ec: input.modulus_of_elasticity_psi,
        k: input.k_pci,
        delta_psi: reliability.delta_psi,
        terminal_psi: solver.initial_serviceability - reliability.delta_psi,
    };
    let target = input.esals.log10();
    let residual = |d: f64| predicted_log_esals(d, &params).map(|log_w18| log_w18 - target);

    let mut upper = solver.max_thickness_in;
    match residual(upper) {
        Some(r) if r >= 0.0 => {}
        _ => {
            return Err(CalcError::domain_error(
                "D",
                format!("> {}", solver.max_thickness_in),
                "Required slab thickness exceeds the search range",
            ));
        }
    }

    // Scan down until the residual turns negative.
    let mut lower = loop {
        if upper <= solver.min_thickness_in {
            return Err(CalcError::domain_error(
                "D",
                format!("< {}", solver.min_thickness_in),
                "Design equation has no root in the search range",
            ));
        }
        let candidate = (upper - solver.scan_step_in).max(solver.min_thickness_in);
        match residual(candidate) {
            Some(r) if r >= 0.0 => upper = candidate,
            Some(_) => break candidate,
            None => {
                return Err(CalcError::domain_error(
                    "D",
                    format!("{:.2}", candidate),
                    "Design equation is undefined before a root is bracketed (support too stiff for the concrete modulus)",
                ));
            }
        }
    };

    let mut iterations = 0;
    while upper - lower > solver.tolerance_in && iterations < solver.max_iterations {
        let mid = 0.5 * (lower + upper);
        match residual(mid) {
            Some(r) if r >= 0.0 => upper = mid,
            _ => lower = mid,
        }
        iterations += 1;
    }
    debug!(lower, upper, iterations, "bisection finished");

    Ok((upper, iterations))
}
