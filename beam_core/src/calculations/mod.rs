//! # Beam Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Modules
//!
//! - [`beam_model`] - The closed-form single point load model
//! - [`beam`] - Validated analysis request and packaged result

pub mod beam;
pub mod beam_model;

pub use beam::{calculate, BeamInput, BeamResult};
pub use beam_model::{BeamModel, Diagram, Reactions, Stiffness, Support};
