//! # Beam Analysis Request
//!
//! Validated entry point around [`BeamModel`]. A [`BeamInput`] carries the
//! parameters a user supplies; [`calculate`] checks them, runs every model
//! query and packages reactions, extrema and diagrams into a [`BeamResult`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::{calculate, BeamInput};
//! use beam_core::calculations::beam_model::Support;
//!
//! let input = BeamInput::new("B-1", 10.0, 500.0, Some(5.0), Support::SimplySupported);
//! let result = calculate(&input).unwrap();
//!
//! assert_eq!(result.reactions.as_tuple(), (250.0, 250.0));
//! // Peak sampled moment sits just beside the exact PL/4 = 1250 N·m
//! assert!((result.max_moment_nm - 1250.0).abs() < 15.0);
//! println!("Max deflection: {:.3} mm", result.max_deflection_mm().0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculations::beam_model::{
    BeamModel, Diagram, Reactions, Stiffness, Support, DEFAULT_SAMPLE_POINTS, MAX_SAMPLE_POINTS,
    MIN_SAMPLE_POINTS,
};
use crate::equations::registry::{Equation, EquationTracker, EquationUsage};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, Millimeters};

fn default_sample_points() -> usize {
    DEFAULT_SAMPLE_POINTS
}

/// Input parameters for one beam analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "length_m": 10.0,
///   "load_n": 500.0,
///   "load_position_m": 5.0,
///   "support": "simply_supported",
///   "stiffness": { "youngs_modulus_pa": 200e9, "moment_of_inertia_m4": 1e-6 },
///   "sample_points": 100
/// }
/// ```
///
/// `load_position_m`, `stiffness` and `sample_points` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam (e.g., "B-1")
    #[serde(default)]
    pub label: String,

    /// Span length (m)
    pub length_m: f64,

    /// Point load (N), positive downward
    pub load_n: f64,

    /// Distance from the left end to the load (m). Midspan when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_position_m: Option<f64>,

    /// Boundary condition
    pub support: Support,

    /// E and I for the deflection curve
    #[serde(default)]
    pub stiffness: Stiffness,

    /// Samples per diagram
    #[serde(default = "default_sample_points")]
    pub sample_points: usize,
}

impl BeamInput {
    /// Create an input with default stiffness and sampling
    pub fn new(
        label: impl Into<String>,
        length_m: f64,
        load_n: f64,
        load_position_m: Option<f64>,
        support: Support,
    ) -> Self {
        BeamInput {
            label: label.into(),
            length_m,
            load_n,
            load_position_m,
            support,
            stiffness: Stiffness::default(),
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }

    /// Override E and I
    pub fn with_stiffness(mut self, stiffness: Stiffness) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Override the per-diagram sample count
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.sample_points = points;
        self
    }

    /// Load position after applying the midspan default
    pub fn resolved_load_position_m(&self) -> f64 {
        self.load_position_m.unwrap_or(self.length_m / 2.0)
    }

    /// Validate input parameters.
    ///
    /// These are the model's preconditions; [`BeamModel`] itself never checks
    /// them.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_m",
                self.length_m.to_string(),
                "Beam length must be a positive number",
            ));
        }

        if !self.load_n.is_finite() {
            return Err(CalcError::invalid_input(
                "load_n",
                self.load_n.to_string(),
                "Load must be a finite number",
            ));
        }

        let position = self.resolved_load_position_m();
        if !position.is_finite() || position < 0.0 || position > self.length_m {
            return Err(CalcError::invalid_input(
                "load_position_m",
                position.to_string(),
                "Load position must be within the length of the beam",
            ));
        }

        let e = self.stiffness.youngs_modulus_pa;
        if !e.is_finite() || e <= 0.0 {
            return Err(CalcError::invalid_input(
                "stiffness.youngs_modulus_pa",
                e.to_string(),
                "Young's modulus must be positive",
            ));
        }

        let i = self.stiffness.moment_of_inertia_m4;
        if !i.is_finite() || i <= 0.0 {
            return Err(CalcError::invalid_input(
                "stiffness.moment_of_inertia_m4",
                i.to_string(),
                "Moment of inertia must be positive",
            ));
        }

        if self.sample_points < MIN_SAMPLE_POINTS {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                format!("At least {} sample points are required", MIN_SAMPLE_POINTS),
            ));
        }

        if self.sample_points > MAX_SAMPLE_POINTS {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                format!("At most {} sample points are allowed", MAX_SAMPLE_POINTS),
            ));
        }

        Ok(())
    }

    /// Build the model for these parameters. Does not validate.
    pub fn to_model(&self) -> BeamModel {
        BeamModel::new(self.length_m, self.load_n, self.load_position_m, self.support)
            .with_sample_points(self.sample_points)
    }
}

impl Default for BeamInput {
    fn default() -> Self {
        BeamInput::new("", 10.0, 500.0, None, Support::SimplySupported)
    }
}

/// Results of a beam analysis.
///
/// Extrema are signed values at the sample with the largest magnitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamResult {
    /// Label copied from the input
    pub label: String,
    pub support: Support,
    pub length_m: f64,
    pub load_n: f64,
    /// Resolved load position (m)
    pub load_position_m: f64,

    pub reactions: Reactions,

    /// Shear with the largest magnitude (N)
    pub max_shear_n: f64,
    pub max_shear_position_m: f64,

    /// Moment with the largest magnitude (N·m)
    pub max_moment_nm: f64,
    pub max_moment_position_m: f64,

    /// Deflection with the largest magnitude (m)
    pub max_deflection_m: f64,
    pub max_deflection_position_m: f64,

    /// Sampled shear values along beam for plotting
    pub shear_diagram: Diagram,
    /// Sampled moment values along beam for plotting
    pub moment_diagram: Diagram,
    /// Sampled deflection values along beam for plotting (m)
    pub deflection_diagram: Diagram,

    /// Equations evaluated to produce this result
    pub equations: Vec<Equation>,
    /// Each application of an equation and what it produced
    pub equation_usages: Vec<EquationUsage>,
}

impl BeamResult {
    /// Peak deflection in millimetres, for display
    pub fn max_deflection_mm(&self) -> Millimeters {
        Meters(self.max_deflection_m).into()
    }

    /// Deflection diagram rescaled to millimetres, for display
    pub fn deflection_diagram_mm(&self) -> Diagram {
        self.deflection_diagram
            .iter()
            .map(|&(x, d)| (x, Millimeters::from(Meters(d)).0))
            .collect()
    }
}

/// Sample with the largest |value|; the first one wins ties.
fn peak(diagram: &[(f64, f64)]) -> (f64, f64) {
    diagram
        .iter()
        .fold((0.0_f64, 0.0_f64), |(best_value, best_x), &(x, v)| {
            if v.abs() > best_value.abs() {
                (v, x)
            } else {
                (best_value, best_x)
            }
        })
}

/// Run a full analysis.
///
/// # Errors
///
/// [`CalcError::InvalidInput`] when a precondition of the model is violated.
pub fn calculate(input: &BeamInput) -> CalcResult<BeamResult> {
    if let Err(e) = input.validate() {
        warn!(label = %input.label, error = %e, "beam input rejected");
        return Err(e);
    }

    let model = input.to_model();
    let context = if input.label.is_empty() { "beam" } else { input.label.as_str() };
    let [reaction_eq, shear_eq, moment_eq, deflection_eq] = Equation::for_support(model.support());
    let mut tracker = EquationTracker::new();

    let reactions = model.calculate_reactions();
    tracker.record(reaction_eq, format!("{}: support reactions", context));

    let shear_diagram = model.shear_force();
    tracker.record(shear_eq, format!("{}: shear diagram", context));

    let moment_diagram = model.bending_moment();
    tracker.record(moment_eq, format!("{}: moment diagram", context));

    let deflection_diagram = model.deflection(input.stiffness);
    tracker.record(deflection_eq, format!("{}: deflection curve", context));

    let (max_shear_n, max_shear_position_m) = peak(&shear_diagram);
    let (max_moment_nm, max_moment_position_m) = peak(&moment_diagram);
    let (max_deflection_m, max_deflection_position_m) = peak(&deflection_diagram);

    info!(
        label = %input.label,
        support = %model.support(),
        max_moment_nm,
        max_deflection_m,
        "beam analysis complete"
    );

    Ok(BeamResult {
        label: input.label.clone(),
        support: model.support(),
        length_m: model.length_m(),
        load_n: model.load_n(),
        load_position_m: model.load_position_m(),
        reactions,
        max_shear_n,
        max_shear_position_m,
        max_moment_nm,
        max_moment_position_m,
        max_deflection_m,
        max_deflection_position_m,
        shear_diagram,
        moment_diagram,
        deflection_diagram,
        equations: tracker.unique_equations(),
        equation_usages: tracker.usages().to_vec(),
    })
}
