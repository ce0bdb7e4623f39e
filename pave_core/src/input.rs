//! # Design Input
//!
//! The site, material and traffic parameters of one design run, and loading
//! them from a JSON file.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "Traffic":   { "ESALs": 1000000 },
//!   "Concrete":  { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
//!   "Subgrade":  { "CBR": 8 },
//!   "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 },
//!   "Reliability": { "ZR": -1.645, "So": 0.39, "Cd": 1.0, "deltaPSI": 2.0 }
//! }
//! ```
//!
//! `Reliability` is optional, and so is each key inside it. Every other key
//! is required; the first one missing is reported by its dotted path.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::input::DesignInput;
//!
//! let input = DesignInput::from_json_str(r#"{
//!     "Traffic": { "ESALs": 1000000 },
//!     "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
//!     "Subgrade": { "CBR": 8 },
//!     "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
//! }"#).unwrap();
//!
//! assert_eq!(input.subgrade.cbr, 8.0);
//! assert!(input.reliability.is_none());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::settings::ReliabilityParameters;

/// Required key paths, in the order they are checked.
pub const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("Traffic", &["ESALs"]),
    ("Concrete", &["FlexuralStrength", "ModulusOfElasticity"]),
    ("Subgrade", &["CBR"]),
    ("Structure", &["ResilientModulus", "LayerThickness"]),
];

/// Traffic loading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficInput {
    /// 18-kip equivalent single-axle load applications over the design life
    #[serde(rename = "ESALs")]
    pub esals: f64,
}

/// Concrete slab material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteInput {
    /// Modulus of rupture S'c (psi)
    #[serde(rename = "FlexuralStrength")]
    pub flexural_strength_psi: f64,

    /// Elastic modulus E_c (psi)
    #[serde(rename = "ModulusOfElasticity")]
    pub modulus_of_elasticity_psi: f64,
}

/// Subgrade soil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubgradeInput {
    /// California Bearing Ratio (%)
    #[serde(rename = "CBR")]
    pub cbr: f64,
}

/// Granular base layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureInput {
    /// Base layer resilient modulus (psi)
    #[serde(rename = "ResilientModulus")]
    pub resilient_modulus_psi: f64,

    /// Base layer thickness (in)
    #[serde(rename = "LayerThickness")]
    pub layer_thickness_in: f64,
}

/// Complete input of one design run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    #[serde(rename = "Traffic")]
    pub traffic: TrafficInput,

    #[serde(rename = "Concrete")]
    pub concrete: ConcreteInput,

    #[serde(rename = "Subgrade")]
    pub subgrade: SubgradeInput,

    #[serde(rename = "Structure")]
    pub structure: StructureInput,

    /// Per-file override of the reliability constants
    #[serde(rename = "Reliability", default, skip_serializing_if = "Option::is_none")]
    pub reliability: Option<ReliabilityParameters>,
}

impl DesignInput {
    /// Parse and check an input document.
    ///
    /// # Returns
    ///
    /// * `Err(CalcError::SerializationError)` - Not valid JSON
    /// * `Err(CalcError::MissingField)` - A required key is absent
    /// * `Err(CalcError::InvalidInput)` - A required key is not a number
    pub fn from_json_str(contents: &str) -> CalcResult<Self> {
        let document: Value = serde_json::from_str(contents).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        Self::from_value(document)
    }

    /// Check required keys of an already parsed document, then deserialize it.
    pub fn from_value(document: Value) -> CalcResult<Self> {
        check_required_fields(&document)?;
        serde_json::from_value(document).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }
}

/// Walk the required key paths and report the first absent or non-numeric one.
fn check_required_fields(document: &Value) -> CalcResult<()> {
    if !document.is_object() {
        return Err(CalcError::invalid_input(
            "<root>",
            document.to_string(),
            "Expected a JSON object",
        ));
    }

    for (section, keys) in REQUIRED_FIELDS {
        let section_value = document
            .get(section)
            .ok_or_else(|| CalcError::missing_field(*section))?;
        if !section_value.is_object() {
            return Err(CalcError::invalid_input(
                *section,
                section_value.to_string(),
                "Expected a JSON object",
            ));
        }

        for key in *keys {
            let path = format!("{}.{}", section, key);
            let value = section_value
                .get(key)
                .ok_or_else(|| CalcError::missing_field(path.clone()))?;
            if !value.is_number() {
                return Err(CalcError::invalid_input(path, value.to_string(), "Expected a number"));
            }
        }
    }

    Ok(())
}

/// Load a design input file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file, relative paths resolve against the
///   working directory
///
/// # Returns
///
/// * `Ok(DesignInput)` - Successfully loaded input
/// * `Err(CalcError::InputNotFound)` - No file at `path`
/// * `Err(CalcError::FileError)` - The file could not be read
/// * any error of [`DesignInput::from_json_str`]
///
/// # Example
///
/// ```rust,no_run
/// use pave_core::input::load_design_input;
/// use std::path::Path;
///
/// let input = load_design_input(Path::new("design_input.json"))?;
/// println!("CBR: {}", input.subgrade.cbr);
/// # Ok::<(), pave_core::errors::CalcError>(())
/// ```
pub fn load_design_input(path: &Path) -> CalcResult<DesignInput> {
    if !path.exists() {
        let working_dir = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        return Err(CalcError::input_not_found(path.display().to_string(), working_dir));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "read design input");

    DesignInput::from_json_str(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;
    use std::env::temp_dir;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"{
        "Traffic": { "ESALs": 1000000 },
        "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
        "Subgrade": { "CBR": 8 },
        "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
    }"#;

    fn temp_input_path(name: &str) -> PathBuf {
        temp_dir().join(format!("pavecalc_test_{}.json", name))
    }

    #[test]
    fn test_parse_sample() {
        let input = DesignInput::from_json_str(SAMPLE).unwrap();
        assert_eq!(input.traffic.esals, 1.0e6);
        assert_eq!(input.concrete.flexural_strength_psi, 650.0);
        assert_eq!(input.concrete.modulus_of_elasticity_psi, 4.0e6);
        assert_eq!(input.subgrade.cbr, 8.0);
        assert_eq!(input.structure.resilient_modulus_psi, 30000.0);
        assert_eq!(input.structure.layer_thickness_in, 6.0);
        assert!(input.reliability.is_none());
    }

    #[test]
    fn test_missing_section_is_named() {
        let err = DesignInput::from_json_str(
            r#"{
                "Traffic": { "ESALs": 1000000 },
                "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
                "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
            }"#,
        )
        .unwrap_err();
        assert_eq!(err, CalcError::missing_field("Subgrade"));
    }

    #[test]
    fn test_missing_nested_key_has_full_path() {
        let err = DesignInput::from_json_str(
            r#"{
                "Traffic": { "ESALs": 1000000 },
                "Concrete": { "FlexuralStrength": 650 },
                "Subgrade": { "CBR": 8 },
                "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
            }"#,
        )
        .unwrap_err();
        assert_eq!(err, CalcError::missing_field("Concrete.ModulusOfElasticity"));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = DesignInput::from_json_str(&SAMPLE.replace("\"CBR\": 8", "\"CBR\": \"eight\"")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.category(), ErrorCategory::Unexpected);
    }

    #[test]
    fn test_malformed_json() {
        let err = DesignInput::from_json_str("{ \"Traffic\": ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_reliability_override() {
        let json = SAMPLE.replacen('{', r#"{ "Reliability": { "ZR": -1.282, "deltaPSI": 1.7 },"#, 1);
        let input = DesignInput::from_json_str(&json).unwrap();
        let reliability = input.reliability.unwrap();
        assert_eq!(reliability.zr, -1.282);
        assert_eq!(reliability.delta_psi, 1.7);
        assert_eq!(reliability.so, 0.39);
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_input_path("load");
        fs::write(&path, SAMPLE).unwrap();

        let input = load_design_input(&path).unwrap();
        assert_eq!(input.subgrade.cbr, 8.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_reports_working_dir() {
        let path = temp_input_path("does_not_exist");
        let _ = fs::remove_file(&path);

        let err = load_design_input(&path).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InputNotFound);
        match err {
            CalcError::InputNotFound { working_dir, .. } => {
                let cwd = std::env::current_dir().unwrap();
                assert_eq!(working_dir, cwd.display().to_string());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_file_names_path() {
        let path = temp_input_path("invalid_json");
        fs::write(&path, "not json").unwrap();

        let err = load_design_input(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));

        let _ = fs::remove_file(&path);
    }
}
