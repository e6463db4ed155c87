//! # beam_core - Single Span Beam Analysis Engine
//!
//! `beam_core` computes support reactions, shear force, bending moment and
//! deflection for a prismatic beam carrying one concentrated load, either
//! simply supported or cantilevered. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All request and result types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every result lists the equations that produced it
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{BeamModel, Support};
//!
//! let beam = BeamModel::new(10.0, 500.0, None, Support::SimplySupported);
//! assert_eq!(beam.calculate_reactions().as_tuple(), (250.0, 250.0));
//!
//! let moment = beam.bending_moment();
//! assert_eq!(moment.len(), 100);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Beam model and validated analysis requests
//! - [`equations`] - Closed-form formulas and the equation registry
//! - [`project`] - Project container, metadata, and settings
//! - [`report`] - Markdown calculation reports
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON file operations with atomic saves

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, BeamInput, BeamModel, BeamResult, Diagram, Reactions, Stiffness, Support};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{DeflectionDisplay, GlobalSettings, Project, ProjectMetadata};
