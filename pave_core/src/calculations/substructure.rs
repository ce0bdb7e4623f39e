//! # Composite Modulus of Subgrade Reaction
//!
//! Combines the subgrade resilient modulus with a granular base layer into a
//! single k-value for slab design.
//!
//! ## Assumptions
//!
//! - Subgrade share: k_sg = M_RSG / 10
//! - Base share: k_base = M_R / √h
//! - Shares add linearly; only the total is rounded
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::substructure::{calculate, SubstructureInput};
//!
//! let input = SubstructureInput {
//!     mrsg_psi: 8065.53,
//!     base_resilient_modulus_psi: 30000.0,
//!     base_thickness_in: 6.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.k_total_pci, 13054.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{base_reaction, round_hundredths, subgrade_reaction};
use crate::errors::{CalcError, CalcResult};

/// Input parameters for the substructure stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstructureInput {
    /// Subgrade resilient modulus M_RSG (psi)
    pub mrsg_psi: f64,

    /// Granular base resilient modulus M_R (psi)
    pub base_resilient_modulus_psi: f64,

    /// Granular base thickness h (in)
    pub base_thickness_in: f64,
}

impl SubstructureInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.mrsg_psi.is_finite() || self.mrsg_psi <= 0.0 {
            return Err(CalcError::domain_error(
                "MRSG",
                self.mrsg_psi.to_string(),
                "Subgrade modulus must be positive",
            ));
        }
        if !self.base_resilient_modulus_psi.is_finite() || self.base_resilient_modulus_psi <= 0.0 {
            return Err(CalcError::domain_error(
                "ResilientModulus",
                self.base_resilient_modulus_psi.to_string(),
                "Base resilient modulus must be positive",
            ));
        }
        if !self.base_thickness_in.is_finite() || self.base_thickness_in <= 0.0 {
            return Err(CalcError::domain_error(
                "LayerThickness",
                self.base_thickness_in.to_string(),
                "Base thickness must be positive (its square root divides the base modulus)",
            ));
        }
        Ok(())
    }
}

/// Results of the substructure stage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "k_subgrade_pci": 806.553,
///   "k_base_pci": 12247.448713915892,
///   "k_total_pci": 13054.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstructureResult {
    /// Subgrade share of k (psi/in), unrounded
    pub k_subgrade_pci: f64,

    /// Base share of k (psi/in), unrounded
    pub k_base_pci: f64,

    /// Composite k-value (psi/in), rounded to 0.01
    pub k_total_pci: f64,
}

/// Calculate the composite modulus of subgrade reaction.
///
/// # Returns
///
/// * `Ok(SubstructureResult)` - Both shares and the rounded total
/// * `Err(CalcError::DomainError)` - A modulus or the base thickness is not positive
pub fn calculate(input: &SubstructureInput) -> CalcResult<SubstructureResult> {
    input.validate()?;

    let k_subgrade = subgrade_reaction(input.mrsg_psi);
    let k_base = base_reaction(input.base_resilient_modulus_psi, input.base_thickness_in);
    let k_total = k_subgrade + k_base;

    debug!(
        mrsg = input.mrsg_psi,
        base_modulus = input.base_resilient_modulus_psi,
        base_thickness = input.base_thickness_in,
        k_subgrade,
        k_base,
        k_total,
        "composite modulus of subgrade reaction"
    );

    Ok(SubstructureResult {
        k_subgrade_pci: k_subgrade,
        k_base_pci: k_base,
        k_total_pci: round_hundredths(k_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn test_input() -> SubstructureInput {
        SubstructureInput {
            mrsg_psi: 8065.53,
            base_resilient_modulus_psi: 30000.0,
            base_thickness_in: 6.0,
        }
    }

    #[test]
    fn test_reference_case() {
        let result = calculate(&test_input()).unwrap();
        assert!(approx_eq(result.k_subgrade_pci, 806.553), "k_sg = {}", result.k_subgrade_pci);
        assert!(approx_eq(result.k_base_pci, 12247.448713915892), "k_base = {}", result.k_base_pci);
        assert_eq!(result.k_total_pci, 13054.0);
    }

    #[test]
    fn test_total_matches_formula() {
        let cases = [(1945.0, 15000.0, 4.0), (4123.54, 25000.0, 9.0), (15094.69, 40000.0, 12.0)];
        for (mrsg, mr, h) in cases {
            let input = SubstructureInput {
                mrsg_psi: mrsg,
                base_resilient_modulus_psi: mr,
                base_thickness_in: h,
            };
            let result = calculate(&input).unwrap();
            let expected = round_hundredths(mrsg / 10.0 + mr / f64::sqrt(h));
            assert_eq!(result.k_total_pci, expected);
        }
    }

    #[test]
    fn test_perfect_square_thickness() {
        let input = SubstructureInput {
            mrsg_psi: 1000.0,
            base_resilient_modulus_psi: 20000.0,
            base_thickness_in: 4.0,
        };
        // 100 + 20000 / 2
        assert_eq!(calculate(&input).unwrap().k_total_pci, 10100.0);
    }

    #[test]
    fn test_zero_thickness_is_domain_error() {
        let mut input = test_input();
        input.base_thickness_in = 0.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");

        input.base_thickness_in = -2.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_non_positive_moduli_are_domain_errors() {
        let mut input = test_input();
        input.base_resilient_modulus_psi = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.mrsg_psi = -1.0;
        assert!(calculate(&input).is_err());
    }
}
