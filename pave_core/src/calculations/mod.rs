//! # Design Calculations
//!
//! The three stages of a rigid pavement design. Each stage follows the
//! pattern:
//!
//! - optional `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Stage results, including intermediate terms
//! - `calculate(...) -> CalcResult<*Result>` - Pure calculation function
//!
//! Stages print nothing; [`crate::report`] formats their results.
//!
//! ## Available Calculations
//!
//! - [`subgrade`] - Subgrade resilient modulus from CBR
//! - [`substructure`] - Composite modulus of subgrade reaction
//! - [`slab`] - Required slab thickness

pub mod slab;
pub mod subgrade;
pub mod substructure;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use slab::{SlabInput, SlabResult, ThicknessTerms};
pub use subgrade::SubgradeResult;
pub use substructure::{SubstructureInput, SubstructureResult};

/// The pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Subgrade resilient modulus
    Subgrade,
    /// Composite k-value
    Substructure,
    /// Slab thickness
    Slab,
}

impl Stage {
    /// Stage name for progress messages
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Subgrade => "subgrade resilient modulus (MRSG)",
            Stage::Substructure => "substructure k-value",
            Stage::Slab => "rigid slab thickness",
        }
    }
}
