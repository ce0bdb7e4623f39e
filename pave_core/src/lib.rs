//! # pave_core - Rigid Pavement Design Engine
//!
//! `pave_core` computes the required thickness of a concrete (rigid) pavement
//! slab with the AASHTO 1993 design method. Inputs and results are
//! JSON-serializable, so a design can be read from a file, run, and reported
//! as text or JSON.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Each stage is a pure function from input to result
//! - **Checked domains**: Logarithms, roots and fractional powers are guarded
//!   and fail with a `DomainError` instead of producing NaN
//! - **Rich Errors**: Structured error types, not just strings
//! - **Presentation apart**: Calculators return data; [`report`] formats it
//!
//! ## Quick Start
//!
//! ```rust
//! use pave_core::{DesignInput, DesignSettings};
//!
//! let input = DesignInput::from_json_str(r#"{
//!     "Traffic": { "ESALs": 1000000 },
//!     "Concrete": { "FlexuralStrength": 650, "ModulusOfElasticity": 4000000 },
//!     "Subgrade": { "CBR": 8 },
//!     "Structure": { "ResilientModulus": 30000, "LayerThickness": 6 }
//! }"#).unwrap();
//!
//! let report = pave_core::pipeline::run(&input, &DesignSettings::default()).unwrap();
//! println!("Slab thickness: {} in", report.slab.thickness_in);
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Design input and JSON loading
//! - [`settings`] - Reliability constants and solver configuration
//! - [`calculations`] - Subgrade, substructure and slab stages
//! - [`equations`] - Formulas and the equation registry
//! - [`pipeline`] - Runs the stages in order
//! - [`report`] - Text formatting of results
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult, ErrorCategory};
pub use input::{load_design_input, DesignInput};
pub use pipeline::{effective_settings, DesignReport, StageOutput};
pub use settings::{DesignSettings, ReliabilityParameters, SolverSettings, ThicknessMethod};
