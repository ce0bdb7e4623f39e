//! # Equation Registry
//!
//! Central registry of every formula a design run can apply. Each equation
//! carries its plain-text formula, reference, variables and the function that
//! implements it, so a report can list exactly what was evaluated.
//!
//! ## Usage
//!
//! ```rust
//! use pave_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::SubgradeResilientModulus, "Subgrade");
//!
//! let meta = Equation::SubgradeResilientModulus.metadata();
//! assert!(meta.formula_plain.contains("0.684"));
//! assert_eq!(tracker.equations(), vec![Equation::SubgradeResilientModulus]);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// AASHTO Guide for Design of Pavement Structures
    Aashto93 {
        part: &'static str,
        section: &'static str,
    },
    /// Empirical correlation without a governing code section
    Empirical { source: &'static str },
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Aashto93 { part, section } => {
                format!("AASHTO 1993 Part {} Section {}", part, section)
            }
            CodeReference::Empirical { source } => format!("Empirical ({})", source),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Aashto93 { .. } => "AASHTO 93",
            CodeReference::Empirical { .. } => "Empirical",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Subgrade and base support (M_RSG, k)
    SubgradeSupport,
    /// Intermediate terms of the slab thickness expression
    ThicknessTerms,
    /// Slab thickness results
    SlabThickness,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SubgradeSupport => "Subgrade Support",
            EquationCategory::ThicknessTerms => "Thickness Terms",
            EquationCategory::SlabThickness => "Slab Thickness",
        }
    }

    /// Sort order for documentation (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SubgradeSupport => 1,
            EquationCategory::ThicknessTerms => 2,
            EquationCategory::SlabThickness => 3,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "CBR", "k")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "psi", "psi/in")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a design equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used in a rigid pavement design run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// M_RSG = 1945 · CBR^0.684
    SubgradeResilientModulus,
    /// k_sg = M_RSG / 10
    SubgradeReaction,
    /// k_base = M_R / √h
    BaseReaction,
    /// k = k_sg + k_base
    CompositeReaction,
    /// A = Z_R · S_o
    ReliabilityTerm,
    /// B = 7.35 · log10(W18 + 1) − 0.06
    TrafficTerm,
    /// C = S'c · C_d / k^0.25
    StrengthTerm,
    /// D1 = (4.22 − 0.32 · ΔPSI) · log10(W18)
    ServiceabilityTerm,
    /// D2 = 215.63 · √C − 18.42
    StiffnessTerm,
    /// D = ((A + B) / (D1 + D2))^(1/1.132)
    SlabThickness,
    /// Full AASHTO 93 rigid design equation solved for D
    RigidDesignEquation,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::SubgradeResilientModulus => EquationMetadata {
                name: "Subgrade Resilient Modulus",
                description: "Resilient modulus of the subgrade estimated from its CBR",
                formula_plain: "M_RSG = 1945 * CBR^0.684",
                reference: CodeReference::Empirical { source: "CBR power-law correlation" },
                variables: vec![
                    Variable::new("CBR", "California Bearing Ratio", "%"),
                    Variable::new("M_RSG", "Subgrade resilient modulus", "psi"),
                ],
                assumptions: vec!["CBR > 0", "Result rounded to 0.01 psi"],
                category: EquationCategory::SubgradeSupport,
                source_module: "equations/aashto93.rs",
                source_function: "subgrade_resilient_modulus",
            },

            Equation::SubgradeReaction => EquationMetadata {
                name: "Subgrade Reaction",
                description: "Subgrade share of the composite modulus of subgrade reaction",
                formula_plain: "k_sg = M_RSG / 10",
                reference: CodeReference::Aashto93 { part: "II", section: "3.2.1" },
                variables: vec![
                    Variable::new("M_RSG", "Subgrade resilient modulus", "psi"),
                    Variable::new("k_sg", "Subgrade reaction", "psi/in"),
                ],
                assumptions: vec!["Fixed conversion factor of 10 in"],
                category: EquationCategory::SubgradeSupport,
                source_module: "equations/aashto93.rs",
                source_function: "subgrade_reaction",
            },

            Equation::BaseReaction => EquationMetadata {
                name: "Granular Base Reaction",
                description: "Granular base share of the composite modulus of subgrade reaction",
                formula_plain: "k_base = M_R / sqrt(h)",
                reference: CodeReference::Aashto93 { part: "II", section: "3.2.1" },
                variables: vec![
                    Variable::new("M_R", "Base resilient modulus", "psi"),
                    Variable::new("h", "Base layer thickness", "in"),
                    Variable::new("k_base", "Base reaction", "psi/in"),
                ],
                assumptions: vec!["h > 0"],
                category: EquationCategory::SubgradeSupport,
                source_module: "equations/aashto93.rs",
                source_function: "base_reaction",
            },

            Equation::CompositeReaction => EquationMetadata {
                name: "Composite Modulus of Subgrade Reaction",
                description: "Total k-value of the subgrade and base supporting the slab",
                formula_plain: "k = k_sg + k_base",
                reference: CodeReference::Aashto93 { part: "II", section: "3.2.1" },
                variables: vec![
                    Variable::new("k", "Composite modulus of subgrade reaction", "psi/in"),
                ],
                assumptions: vec!["Result rounded to 0.01 psi/in"],
                category: EquationCategory::SubgradeSupport,
                source_module: "calculations/substructure.rs",
                source_function: "calculate",
            },

            Equation::ReliabilityTerm => EquationMetadata {
                name: "Reliability Term",
                description: "Statistical allowance for the design reliability level",
                formula_plain: "A = Z_R * S_o",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3" },
                variables: vec![
                    Variable::new("Z_R", "Standard normal deviate", "-"),
                    Variable::new("S_o", "Combined standard error", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::ThicknessTerms,
                source_module: "equations/aashto93.rs",
                source_function: "reliability_term",
            },

            Equation::TrafficTerm => EquationMetadata {
                name: "Traffic Term",
                description: "Logarithmic traffic loading term",
                formula_plain: "B = 7.35 * log10(W18 + 1) - 0.06",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3" },
                variables: vec![Variable::new("W18", "18-kip ESAL applications", "-")],
                assumptions: vec!["W18 > 0"],
                category: EquationCategory::ThicknessTerms,
                source_module: "equations/aashto93.rs",
                source_function: "traffic_term",
            },

            Equation::StrengthTerm => EquationMetadata {
                name: "Strength Term",
                description: "Concrete strength normalized by support stiffness",
                formula_plain: "C = S'c * C_d / k^0.25",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3" },
                variables: vec![
                    Variable::new("S'c", "Concrete modulus of rupture", "psi"),
                    Variable::new("C_d", "Load transfer coefficient", "-"),
                    Variable::new("k", "Composite modulus of subgrade reaction", "psi/in"),
                ],
                assumptions: vec!["k > 0"],
                category: EquationCategory::ThicknessTerms,
                source_module: "equations/aashto93.rs",
                source_function: "strength_term",
            },

            Equation::ServiceabilityTerm => EquationMetadata {
                name: "Serviceability Term",
                description: "Serviceability loss scaled by traffic",
                formula_plain: "D1 = (4.22 - 0.32 * dPSI) * log10(W18)",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3" },
                variables: vec![
                    Variable::new("dPSI", "Design serviceability loss", "-"),
                    Variable::new("W18", "18-kip ESAL applications", "-"),
                ],
                assumptions: vec!["W18 > 0"],
                category: EquationCategory::ThicknessTerms,
                source_module: "equations/aashto93.rs",
                source_function: "serviceability_term",
            },

            Equation::StiffnessTerm => EquationMetadata {
                name: "Stiffness Term",
                description: "Square-root transform of the strength term",
                formula_plain: "D2 = 215.63 * sqrt(C) - 18.42",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3" },
                variables: vec![Variable::new("C", "Strength term", "-")],
                assumptions: vec!["C >= 0"],
                category: EquationCategory::ThicknessTerms,
                source_module: "equations/aashto93.rs",
                source_function: "stiffness_term",
            },

            Equation::SlabThickness => EquationMetadata {
                name: "Slab Thickness",
                description: "Required slab thickness from the combined terms",
                formula_plain: "D = ((A + B) / (D1 + D2))^(1/1.132)",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3" },
                variables: vec![Variable::new("D", "Slab thickness", "in")],
                assumptions: vec![
                    "D1 + D2 != 0",
                    "(A + B) / (D1 + D2) >= 0",
                    "Evaluated from an initial guess of 7.0 in for a fixed number of passes",
                    "Right-hand side does not depend on D, so every pass yields the same value",
                ],
                category: EquationCategory::SlabThickness,
                source_module: "equations/aashto93.rs",
                source_function: "slab_thickness",
            },

            Equation::RigidDesignEquation => EquationMetadata {
                name: "AASHTO 93 Rigid Design Equation",
                description: "Full design equation solved for the slab thickness carrying W18",
                formula_plain: "log10(W18) = Z_R*S_o + 7.35*log10(D+1) - 0.06 + log10(dPSI/3.0)/(1 + 1.624e7/(D+1)^8.46) + (4.22 - 0.32*p_t)*log10[S'c*C_d*(D^0.75 - 1.132)/(215.63*J*(D^0.75 - 18.42/(E_c/k)^0.25))]",
                reference: CodeReference::Aashto93 { part: "II", section: "3.3, Figure 3.7" },
                variables: vec![
                    Variable::new("D", "Slab thickness", "in"),
                    Variable::new("J", "Load transfer coefficient", "-"),
                    Variable::new("E_c", "Concrete elastic modulus", "psi"),
                    Variable::new("p_t", "Terminal serviceability", "-"),
                ],
                assumptions: vec![
                    "Largest root in the search range is reported",
                    "Solved by bracketing then bisection",
                ],
                category: EquationCategory::SlabThickness,
                source_module: "equations/aashto93.rs",
                source_function: "predicted_log_esals",
            },
        }
    }

    /// Get all equations in a specific category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in documentation order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SubgradeSupport, ThicknessTerms, SlabThickness];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// Every registered equation, in pipeline order.
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::SubgradeResilientModulus,
    Equation::SubgradeReaction,
    Equation::BaseReaction,
    Equation::CompositeReaction,
    Equation::ReliabilityTerm,
    Equation::TrafficTerm,
    Equation::StrengthTerm,
    Equation::ServiceabilityTerm,
    Equation::StiffnessTerm,
    Equation::SlabThickness,
    Equation::RigidDesignEquation,
];

// ============================================================================
// Equation Tracking
// ============================================================================

/// Record of an equation applied during a design run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where it was used (e.g., "Subgrade")
    pub context: String,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collects the equations applied during a design run, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// All recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Distinct equations in first-use order
    pub fn equations(&self) -> Vec<Equation> {
        let mut seen = Vec::new();
        for usage in &self.usages {
            if !seen.contains(&usage.equation) {
                seen.push(usage.equation);
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// ```rust
/// use pave_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Pavecalc Equations Reference"));
/// assert!(markdown.contains("Subgrade Support"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(r#"# Pavecalc Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula a Pavecalc design run can evaluate.
Each equation includes its formula, reference, source location, and assumptions.

## Units

| Quantity | Units |
|----------|-------|
| Moduli, strengths | psi |
| Modulus of subgrade reaction | psi/in |
| Thicknesses | in |
| Traffic | 18-kip ESAL applications |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 11);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }

        let mrsg = Equation::SubgradeResilientModulus.metadata();
        assert!(mrsg.formula_plain.contains("1945 * CBR^0.684"));
    }

    #[test]
    fn test_code_reference_citation() {
        let aashto = CodeReference::Aashto93 { part: "II", section: "3.3" };
        assert_eq!(aashto.citation(), "AASHTO 1993 Part II Section 3.3");
        assert_eq!(aashto.short_form(), "AASHTO 93");
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Equation::all_categories() {
            assert!(!Equation::in_category(category).is_empty(), "{:?} is empty", category);
        }
    }

    #[test]
    fn test_tracker_deduplicates_in_order() {
        let mut tracker = EquationTracker::new();
        assert!(tracker.is_empty());
        tracker.record(Equation::TrafficTerm, "Slab");
        tracker.record(Equation::SlabThickness, "Pass 1");
        tracker.record(Equation::SlabThickness, "Pass 2");
        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.equations(),
            vec![Equation::TrafficTerm, Equation::SlabThickness]
        );
    }

    #[test]
    fn test_markdown_lists_every_equation() {
        let markdown = generate_equations_markdown();
        for eq in ALL_EQUATIONS {
            assert!(markdown.contains(eq.metadata().name), "{:?} missing", eq);
        }
        assert!(markdown.contains("**Total Equations:** 11"));
    }
}
