//! # Pavement Design Equations
//!
//! All formulas used by the calculators live here, in one place, so they can
//! be checked against the AASHTO 1993 guide and listed in generated docs.
//!
//! ## Modules
//!
//! - [`aashto93`] - Subgrade support and rigid slab formulas
//! - [`registry`] - Equation metadata and tracking for reports
//!
//! ## Rounding
//!
//! Reported values are rounded to two decimals with [`round_hundredths`],
//! which rounds the exact binary value of the input to the nearest
//! hundredth (ties to even), the same result a correctly-rounded decimal
//! formatter produces.

pub mod aashto93;
pub mod registry;

pub use aashto93::{
    base_reaction,
    predicted_log_esals,
    reliability_term,
    serviceability_term,
    slab_thickness,
    stiffness_term,
    strength_term,
    subgrade_reaction,
    subgrade_resilient_modulus,
    traffic_term,
    RigidDesignParams,
    THICKNESS_EXPONENT,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};

/// Round to two decimal places.
///
/// ```rust
/// use pave_core::equations::round_hundredths;
///
/// assert_eq!(round_hundredths(8065.5348), 8065.53);
/// assert_eq!(round_hundredths(0.039470), 0.04);
/// ```
pub fn round_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
