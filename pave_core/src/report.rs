//! # Text Report
//!
//! Human-readable formatting of design inputs and stage results. The
//! calculators return plain data; this module turns it into the text the CLI
//! prints, one block per stage plus a final summary.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::subgrade;
//! use pave_core::report::format_subgrade;
//!
//! let result = subgrade::calculate(8.0).unwrap();
//! let text = format_subgrade(&result);
//! assert!(text.contains("MRSG: 8065.53 psi"));
//! ```

use crate::calculations::{SlabResult, Stage, SubgradeResult, SubstructureResult};
use crate::input::DesignInput;
use crate::pipeline::{DesignReport, StageOutput};
use crate::settings::{DesignSettings, ThicknessMethod};

const RULE: &str = "═══════════════════════════════════════";

/// Echo of the input file and the effective settings.
pub fn format_inputs(input: &DesignInput, settings: &DesignSettings) -> String {
    let mut out = String::new();
    let r = &settings.reliability;
    out.push_str("Input:\n");
    out.push_str(&format!("  ESALs:                 {}\n", input.traffic.esals));
    out.push_str(&format!("  Flexural strength:     {} psi\n", input.concrete.flexural_strength_psi));
    out.push_str(&format!("  Modulus of elasticity: {} psi\n", input.concrete.modulus_of_elasticity_psi));
    out.push_str(&format!("  CBR:                   {}%\n", input.subgrade.cbr));
    out.push_str(&format!("  Base modulus:          {} psi\n", input.structure.resilient_modulus_psi));
    out.push_str(&format!("  Base layer thickness:  {} in\n", input.structure.layer_thickness_in));
    out.push('\n');
    out.push_str("Design constants:\n");
    out.push_str(&format!("  ZR = {}, So = {}, Cd = {}, deltaPSI = {}\n", r.zr, r.so, r.cd, r.delta_psi));
    out.push_str(&format!("  Thickness method: {}\n", settings.solver.method.display_name()));
    out
}

/// Subgrade stage block.
pub fn format_subgrade(result: &SubgradeResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Calculating {}...\n", Stage::Subgrade.label()));
    out.push_str(&format!("  CBR: {:.2}%\n", result.cbr_percent));
    out.push_str(&format!("  MRSG: {:.2} psi\n", result.mrsg_psi));
    out
}

/// Substructure stage block.
pub fn format_substructure(result: &SubstructureResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Calculating {}...\n", Stage::Substructure.label()));
    out.push_str(&format!("  k subgrade:   {:.2} psi/in\n", result.k_subgrade_pci));
    out.push_str(&format!("  k base:       {:.2} psi/in\n", result.k_base_pci));
    out.push_str(&format!("  k total:      {:.2} psi/in\n", result.k_total_pci));
    out
}

/// Slab stage block.
pub fn format_slab(result: &SlabResult) -> String {
    let mut out = String::new();
    let t = &result.terms;
    out.push_str(&format!("Calculating {}...\n", Stage::Slab.label()));
    out.push_str(&format!("  A = {:.4}  B = {:.4}  C = {:.4}\n", t.a, t.b, t.c));
    out.push_str(&format!("  D1 = {:.4}  D2 = {:.4}\n", t.d1, t.d2));
    match result.method {
        ThicknessMethod::Literal => {
            out.push_str(&format!("  Passes: {}\n", result.iterations));
        }
        ThicknessMethod::Converging => {
            out.push_str(&format!("  Bisection steps: {}\n", result.iterations));
        }
    }
    out.push_str(&format!("  Slab thickness: {:.2} in\n", result.raw_thickness_in));
    out
}

/// Block for whichever stage just finished.
pub fn format_stage(stage: &StageOutput) -> String {
    match stage {
        StageOutput::Subgrade(result) => format_subgrade(result),
        StageOutput::Substructure(result) => format_substructure(result),
        StageOutput::Slab(result) => format_slab(result),
    }
}

/// Final summary block.
pub fn format_summary(report: &DesignReport) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("  FINAL RESULTS\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("  CBR:                  {}%\n", report.subgrade.cbr_percent));
    out.push_str(&format!("  Subgrade MRSG:        {:.2} psi\n", report.subgrade.mrsg_psi));
    out.push_str(&format!("  Substructure k total: {:.2} psi/in\n", report.substructure.k_total_pci));
    out.push_str(&format!("  Required slab:        {:.2} in\n", report.slab.thickness_in));
    out.push_str(RULE);
    out.push('\n');
    out
}

/// List of the equations the run applied.
pub fn format_equations(report: &DesignReport) -> String {
    let mut out = String::new();
    out.push_str("Equations applied:\n");
    for equation in &report.equations {
        let meta = equation.metadata();
        out.push_str(&format!("  {:<40} {}  [{}]\n", meta.name, meta.formula_plain, meta.reference.short_form()));
    }
    out
}

/// Full text report: inputs, each stage, equations and the summary.
pub fn render_text(report: &DesignReport) -> String {
    [
        format_inputs(&report.input, &report.settings),
        format_subgrade(&report.subgrade),
        format_substructure(&report.substructure),
        format_slab(&report.slab),
        format_equations(report),
        format_summary(report),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run;

    fn reference_report() -> DesignReport {
        let input = DesignInput::from_json_str(
            r#"{
                "Traffic": { "ESALs": 1000000 },
                "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
                "Subgrade": { "CBR": 8 },
                "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
            }"#,
        )
        .unwrap();
        run(&input, &DesignSettings::default()).unwrap()
    }

    #[test]
    fn test_substructure_block_has_two_decimals() {
        let text = format_substructure(&reference_report().substructure);
        assert!(text.contains("k subgrade:   806.55 psi/in"), "{}", text);
        assert!(text.contains("k base:       12247.45 psi/in"), "{}", text);
        assert!(text.contains("k total:      13054.00 psi/in"), "{}", text);
    }

    #[test]
    fn test_summary_block() {
        let text = format_summary(&reference_report());
        assert!(text.contains("CBR:                  8%"), "{}", text);
        assert!(text.contains("Subgrade MRSG:        8065.53 psi"), "{}", text);
        assert!(text.contains("Substructure k total: 13054.00 psi/in"), "{}", text);
        assert!(text.contains("Required slab:        0.04 in"), "{}", text);
    }

    #[test]
    fn test_full_report_order() {
        let text = render_text(&reference_report());
        let inputs = text.find("Input:").unwrap();
        let subgrade = text.find(Stage::Subgrade.label()).unwrap();
        let substructure = text.find(Stage::Substructure.label()).unwrap();
        let slab = text.find(Stage::Slab.label()).unwrap();
        let summary = text.find("FINAL RESULTS").unwrap();
        assert!(inputs < subgrade && subgrade < substructure && substructure < slab && slab < summary);
        assert!(text.contains("Slab Thickness"));
    }

    #[test]
    fn test_inputs_echo_constants() {
        let report = reference_report();
        let text = format_inputs(&report.input, &report.settings);
        assert!(text.contains("ZR = -1.645, So = 0.39, Cd = 1, deltaPSI = 2"), "{}", text);
        assert!(text.contains("literal"));
    }

    #[test]
    fn test_input_values_share_one_column() {
        let report = reference_report();
        let text = format_inputs(&report.input, &report.settings);
        assert!(text.contains("  Base modulus:          30000 psi"), "{}", text);

        let columns: Vec<usize> = text
            .lines()
            .skip(1)
            .take_while(|line| !line.is_empty())
            .map(|line| {
                let value = line.split_once(':').map(|(_, v)| v).unwrap_or("");
                line.len() - value.trim_start().len()
            })
            .collect();
        assert_eq!(columns.len(), 6);
        assert!(columns.iter().all(|c| *c == columns[0]), "{:?}\n{}", columns, text);
    }

    #[test]
    fn test_stage_block_dispatch() {
        let report = reference_report();
        let text = format_stage(&StageOutput::Substructure(report.substructure));
        assert_eq!(text, format_substructure(&report.substructure));
        assert!(format_stage(&StageOutput::Subgrade(report.subgrade)).contains("MRSG: 8065.53 psi"));
    }
}
