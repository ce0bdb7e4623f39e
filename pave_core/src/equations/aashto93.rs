//! # AASHTO 1993 Rigid Pavement Formulas
//!
//! Raw formulas for subgrade support and rigid slab design. These functions
//! do no validation; the calculators in [`crate::calculations`] check the
//! numeric domain before calling them.
//!
//! ## Notation
//!
//! - `CBR` = California Bearing Ratio (%)
//! - `M_RSG` = Subgrade resilient modulus (psi)
//! - `M_R` = Granular base resilient modulus (psi)
//! - `h` = Granular base thickness (in)
//! - `k` = Composite modulus of subgrade reaction (psi/in)
//! - `W18` = 18-kip ESAL applications
//! - `Z_R`, `S_o` = Standard normal deviate and combined standard error
//! - `S'c` = Concrete modulus of rupture (psi)
//! - `C_d` = Drainage / load transfer coefficient
//! - `E_c` = Concrete elastic modulus (psi)
//! - `J` = Load transfer coefficient
//! - `ΔPSI` = Design serviceability loss, `p_t` = terminal serviceability
//! - `D` = Slab thickness (in)
//!
//! ## References
//!
//! - AASHTO Guide for Design of Pavement Structures, 1993, Part II Ch. 3

/// Exponent on the normalized strength term in the slab thickness expression
pub const THICKNESS_EXPONENT: f64 = 1.132;

// =============================================================================
// SUBGRADE SUPPORT
// =============================================================================

/// Subgrade resilient modulus from CBR.
///
/// # Formula
/// - M_RSG = 1945 · CBR^0.684
#[inline]
pub fn subgrade_resilient_modulus(cbr: f64) -> f64 {
    1945.0 * cbr.powf(0.684)
}

/// Subgrade contribution to the composite k-value.
///
/// # Formula
/// - k_sg = M_RSG / 10
#[inline]
pub fn subgrade_reaction(mrsg: f64) -> f64 {
    mrsg / 10.0
}

/// Granular base contribution to the composite k-value.
///
/// # Formula
/// - k_base = M_R / √h
#[inline]
pub fn base_reaction(base_modulus: f64, base_thickness: f64) -> f64 {
    base_modulus / base_thickness.sqrt()
}

// =============================================================================
// SLAB THICKNESS TERMS
// =============================================================================

/// Reliability term A = Z_R · S_o
#[inline]
pub fn reliability_term(zr: f64, so: f64) -> f64 {
    zr * so
}

/// Traffic term B = 7.35 · log10(W18 + 1) − 0.06
#[inline]
pub fn traffic_term(esals: f64) -> f64 {
    7.35 * (esals + 1.0).log10() - 0.06
}

/// Strength term C = S'c · C_d / k^0.25
#[inline]
pub fn strength_term(sc: f64, cd: f64, k: f64) -> f64 {
    (sc * cd) / k.powf(0.25)
}

/// Serviceability term D1 = (4.22 − 0.32 · ΔPSI) · log10(W18)
#[inline]
pub fn serviceability_term(delta_psi: f64, esals: f64) -> f64 {
    (4.22 - 0.32 * delta_psi) * esals.log10()
}

/// Stiffness term D2 = 215.63 · √C − 18.42
#[inline]
pub fn stiffness_term(c: f64) -> f64 {
    215.63 * c.sqrt() - 18.42
}

/// Slab thickness from the combined terms.
///
/// # Formula
/// - D = ((A + B) / (D1 + D2))^(1/1.132)
#[inline]
pub fn slab_thickness(a: f64, b: f64, d1: f64, d2: f64) -> f64 {
    ((a + b) / (d1 + d2)).powf(1.0 / THICKNESS_EXPONENT)
}

// =============================================================================
// FULL DESIGN EQUATION
// =============================================================================

/// Parameters of the full AASHTO 93 rigid pavement design equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidDesignParams {
    pub zr: f64,
    pub so: f64,
    pub sc: f64,
    pub cd: f64,
    pub j: f64,
    pub ec: f64,
    pub k: f64,
    pub delta_psi: f64,
    pub terminal_psi: f64,
}

/// Predicted log10(W18) a slab of thickness `d` carries.
///
/// ```text
/// log10 W18 = Z_R·S_o + 7.35·log10(D+1) − 0.06
///           + log10(ΔPSI/3.0) / (1 + 1.624e7/(D+1)^8.46)
///           + (4.22 − 0.32·p_t)·log10[ S'c·C_d·(D^0.75 − 1.132)
///                                      / (215.63·J·(D^0.75 − 18.42/(E_c/k)^0.25)) ]
/// ```
///
/// Returns `None` where the strength ratio is not positive (thin slabs or
/// very stiff supports), since its logarithm is undefined there.
pub fn predicted_log_esals(d: f64, p: &RigidDesignParams) -> Option<f64> {
    let d_pow = d.powf(0.75);
    let numerator = p.sc * p.cd * (d_pow - THICKNESS_EXPONENT);
    let denominator = 215.63 * p.j * (d_pow - 18.42 / (p.ec / p.k).powf(0.25));
    if numerator <= 0.0 || denominator <= 0.0 {
        return None;
    }

    let serviceability = (p.delta_psi / 3.0).log10() / (1.0 + 1.624e7 / (d + 1.0).powf(8.46));
    let strength = (4.22 - 0.32 * p.terminal_psi) * (numerator / denominator).log10();

    Some(p.zr * p.so + 7.35 * (d + 1.0).log10() - 0.06 + serviceability + strength)
}
