//! # Design Pipeline
//!
//! Runs the three calculation stages in order and collects their results
//! into a [`DesignReport`]. A failing stage stops the run; later stages are
//! never evaluated. [`run_with`] hands each stage result to a callback as
//! soon as it is computed, so results of the stages before a failure can
//! still be shown.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::input::DesignInput;
//! use pave_core::pipeline::run;
//! use pave_core::settings::DesignSettings;
//!
//! let input = DesignInput::from_json_str(r#"{
//!     "Traffic": { "ESALs": 1000000 },
//!     "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
//!     "Subgrade": { "CBR": 8 },
//!     "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
//! }"#).unwrap();
//!
//! let report = run(&input, &DesignSettings::default()).unwrap();
//! assert_eq!(report.subgrade.mrsg_psi, 8065.53);
//! assert_eq!(report.substructure.k_total_pci, 13054.0);
//! assert_eq!(report.slab.thickness_in, 0.04);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::{
    slab, subgrade, substructure, SlabInput, SlabResult, Stage, SubgradeResult, SubstructureInput,
    SubstructureResult,
};
use crate::equations::{Equation, EquationTracker};
use crate::errors::CalcResult;
use crate::input::DesignInput;
use crate::settings::{DesignSettings, ThicknessMethod};

/// Everything a design run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReport {
    /// The input the run was computed from
    pub input: DesignInput,

    /// Effective settings after all overrides
    pub settings: DesignSettings,

    pub subgrade: SubgradeResult,
    pub substructure: SubstructureResult,
    pub slab: SlabResult,

    /// Equations applied, in first-use order
    pub equations: Vec<Equation>,

    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

/// One completed stage, as passed to the [`run_with`] callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageOutput {
    Subgrade(SubgradeResult),
    Substructure(SubstructureResult),
    Slab(SlabResult),
}

impl StageOutput {
    pub fn stage(&self) -> Stage {
        match self {
            StageOutput::Subgrade(_) => Stage::Subgrade,
            StageOutput::Substructure(_) => Stage::Substructure,
            StageOutput::Slab(_) => Stage::Slab,
        }
    }
}

/// Settings for a run: `base`, with the input file's reliability override
/// applied when present.
pub fn effective_settings(input: &DesignInput, base: &DesignSettings) -> DesignSettings {
    match input.reliability {
        Some(reliability) => base.with_reliability(reliability),
        None => *base,
    }
}

/// Run all stages.
///
/// `settings` are used as given; apply [`effective_settings`] first to honour
/// a `"Reliability"` object in the input.
pub fn run(input: &DesignInput, settings: &DesignSettings) -> CalcResult<DesignReport> {
    run_with(input, settings, |_| {})
}

/// Run all stages, calling `on_stage` after each one succeeds.
///
/// On failure the callback has already seen every stage that completed.
pub fn run_with<F>(input: &DesignInput, settings: &DesignSettings, mut on_stage: F) -> CalcResult<DesignReport>
where
    F: FnMut(StageOutput),
{
    let mut tracker = EquationTracker::new();

    info!(stage = Stage::Subgrade.label(), cbr = input.subgrade.cbr, "running stage");
    let subgrade = subgrade::calculate(input.subgrade.cbr)?;
    tracker.record(Equation::SubgradeResilientModulus, "Subgrade");
    on_stage(StageOutput::Subgrade(subgrade));

    info!(stage = Stage::Substructure.label(), "running stage");
    let substructure = substructure::calculate(&SubstructureInput {
        mrsg_psi: subgrade.mrsg_psi,
        base_resilient_modulus_psi: input.structure.resilient_modulus_psi,
        base_thickness_in: input.structure.layer_thickness_in,
    })?;
    tracker.record(Equation::SubgradeReaction, "Substructure");
    tracker.record(Equation::BaseReaction, "Substructure");
    tracker.record(Equation::CompositeReaction, "Substructure");
    on_stage(StageOutput::Substructure(substructure));

    info!(stage = Stage::Slab.label(), method = ?settings.solver.method, "running stage");
    let slab = slab::calculate(
        &SlabInput {
            esals: input.traffic.esals,
            flexural_strength_psi: input.concrete.flexural_strength_psi,
            modulus_of_elasticity_psi: input.concrete.modulus_of_elasticity_psi,
            k_pci: substructure.k_total_pci,
        },
        settings,
    )?;
    for equation in [
        Equation::ReliabilityTerm,
        Equation::TrafficTerm,
        Equation::StrengthTerm,
        Equation::ServiceabilityTerm,
        Equation::StiffnessTerm,
    ] {
        tracker.record(equation, "Slab");
    }
    match slab.method {
        ThicknessMethod::Literal => tracker.record(Equation::SlabThickness, "Slab"),
        ThicknessMethod::Converging => tracker.record(Equation::RigidDesignEquation, "Slab"),
    }

    on_stage(StageOutput::Slab(slab));

    info!(thickness_in = slab.thickness_in, "design complete");

    Ok(DesignReport {
        input: *input,
        settings: *settings,
        subgrade,
        substructure,
        slab,
        equations: tracker.equations(),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CalcError, ErrorCategory};
    use crate::settings::ReliabilityParameters;

    fn reference_input() -> DesignInput {
        DesignInput::from_json_str(
            r#"{
                "Traffic": { "ESALs": 1000000 },
                "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
                "Subgrade": { "CBR": 8 },
                "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let report = run(&reference_input(), &DesignSettings::default()).unwrap();
        assert_eq!(report.subgrade.mrsg_psi, 8065.53);
        assert!((report.substructure.k_subgrade_pci - 806.553).abs() < 1e-6);
        assert!((report.substructure.k_base_pci - 12247.45).abs() < 0.005);
        assert_eq!(report.substructure.k_total_pci, 13054.0);
        assert_eq!(report.slab.thickness_in, 0.04);
    }

    #[test]
    fn test_equations_follow_method() {
        let report = run(&reference_input(), &DesignSettings::default()).unwrap();
        assert_eq!(report.equations.first(), Some(&Equation::SubgradeResilientModulus));
        assert_eq!(report.equations.last(), Some(&Equation::SlabThickness));
        assert!(!report.equations.contains(&Equation::RigidDesignEquation));
        assert_eq!(report.equations.len(), 10);
    }

    #[test]
    fn test_failure_stops_pipeline() {
        let mut input = reference_input();
        input.subgrade.cbr = 0.0;
        let err = run(&input, &DesignSettings::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DomainError);
        match err {
            CalcError::DomainError { quantity, .. } => assert_eq!(quantity, "CBR"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_layer_thickness_fails_in_substructure() {
        let mut input = reference_input();
        input.structure.layer_thickness_in = 0.0;
        match run(&input, &DesignSettings::default()).unwrap_err() {
            CalcError::DomainError { quantity, .. } => assert_eq!(quantity, "LayerThickness"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_esals_fails_in_slab() {
        let mut input = reference_input();
        input.traffic.esals = 0.0;
        match run(&input, &DesignSettings::default()).unwrap_err() {
            CalcError::DomainError { quantity, .. } => assert_eq!(quantity, "ESALs"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_completed_stages_reach_callback_before_failure() {
        let mut input = reference_input();
        input.reliability = Some(ReliabilityParameters { zr: -200.0, ..Default::default() });
        let settings = effective_settings(&input, &DesignSettings::default());

        let mut seen = Vec::new();
        let err = run_with(&input, &settings, |stage| seen.push(stage)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DomainError);
        assert_eq!(seen.len(), 2);
        match (&seen[0], &seen[1]) {
            (StageOutput::Subgrade(subgrade), StageOutput::Substructure(substructure)) => {
                assert_eq!(subgrade.mrsg_psi, 8065.53);
                assert_eq!(substructure.k_total_pci, 13054.0);
            }
            other => panic!("unexpected stages: {:?}", other),
        }
    }

    #[test]
    fn test_callback_sees_stages_in_order() {
        let mut stages = Vec::new();
        let report = run_with(&reference_input(), &DesignSettings::default(), |stage| stages.push(stage.stage())).unwrap();
        assert_eq!(stages, vec![Stage::Subgrade, Stage::Substructure, Stage::Slab]);
        assert_eq!(report.slab.thickness_in, 0.04);
    }

    #[test]
    fn test_effective_settings_apply_file_override() {
        let mut input = reference_input();
        assert_eq!(effective_settings(&input, &DesignSettings::default()), DesignSettings::default());

        let reliability = ReliabilityParameters { zr: -1.282, ..Default::default() };
        input.reliability = Some(reliability);
        let settings = effective_settings(&input, &DesignSettings::default());
        assert_eq!(settings.reliability.zr, -1.282);
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&reference_input(), &DesignSettings::default()).unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"mrsg_psi\": 8065.53"));
        assert!(json.contains("\"ESALs\""));
        assert!(json.contains("\"SlabThickness\""));
    }
}
