//! # Beam Equations
//!
//! All closed-form mechanics used by the beam model live here, separate from
//! the sampling and result assembly in [`crate::calculations`].
//!
//! ## Modules
//!
//! - [`beam`] - Point load formulas for simply supported and cantilever beams
//! - [`registry`] - Equation metadata and usage tracking for reports
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward
//! - **Reactions**: Positive upward
//! - **Deflection**: Same sense as the load

pub mod beam;
pub mod registry;

pub use beam::{
    cantilever_point_deflection,
    cantilever_point_moment,
    cantilever_point_reactions,
    cantilever_point_shear,
    simple_point_deflection,
    simple_point_moment,
    simple_point_reactions,
    simple_point_shear,
};

pub use registry::{
    generate_equations_markdown,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
};
