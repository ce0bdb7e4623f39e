//! # Subgrade Modulus
//!
//! Estimates the subgrade resilient modulus from its California Bearing Ratio.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::subgrade::calculate;
//!
//! let result = calculate(8.0).unwrap();
//! assert_eq!(result.mrsg_psi, 8065.53);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{round_hundredths, subgrade_resilient_modulus};
use crate::errors::{CalcError, CalcResult};

/// Result of the subgrade stage.
///
/// ## JSON Example
///
/// ```json
/// { "cbr_percent": 8.0, "mrsg_psi": 8065.53 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubgradeResult {
    /// CBR the modulus was derived from (%)
    pub cbr_percent: f64,

    /// Subgrade resilient modulus M_RSG (psi), rounded to 0.01
    pub mrsg_psi: f64,
}

/// Calculate the subgrade resilient modulus, M_RSG = 1945 · CBR^0.684.
///
/// # Returns
///
/// * `Ok(SubgradeResult)` - Modulus rounded to two decimals
/// * `Err(CalcError::DomainError)` - CBR is zero, negative or not finite
pub fn calculate(cbr: f64) -> CalcResult<SubgradeResult> {
    if !cbr.is_finite() || cbr <= 0.0 {
        return Err(CalcError::domain_error(
            "CBR",
            cbr.to_string(),
            "CBR must be a positive number",
        ));
    }

    let mrsg = subgrade_resilient_modulus(cbr);
    debug!(cbr, mrsg, "subgrade resilient modulus");

    Ok(SubgradeResult {
        cbr_percent: cbr,
        mrsg_psi: round_hundredths(mrsg),
    })
}
