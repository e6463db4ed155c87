//! Single-Span Point Load Beam Model
//!
//! Evaluates reactions, shear, bending moment and deflection for a beam that
//! is either simply supported or cantilevered, carrying one point load.
//!
//! A [`BeamModel`] is built once from a fixed parameter set and never mutated.
//! Every query recomputes from the stored parameters, so a model can be shared
//! freely across threads.
//!
//! ## Preconditions
//!
//! The model is a formula evaluator and does not validate its inputs. Callers
//! must ensure `length > 0`, `0 <= load_position <= length`, and `E`, `I`
//! strictly positive before querying deflection. Violations produce NaN or
//! infinite values rather than an error. See
//! [`BeamInput::validate`](crate::calculations::beam::BeamInput::validate)
//! for the checked entry point.
//!
//! ## Example
//! ```rust
//! use beam_core::calculations::beam_model::{BeamModel, Reactions, Stiffness, Support};
//!
//! // 10 m beam, 500 N at midspan
//! let beam = BeamModel::new(10.0, 500.0, None, Support::SimplySupported);
//!
//! assert_eq!(
//!     beam.calculate_reactions(),
//!     Reactions::SimplySupported { left_n: 250.0, right_n: 250.0 }
//! );
//!
//! let shear = beam.shear_force();
//! assert_eq!(shear.len(), 100);
//!
//! let deflection = beam.deflection(Stiffness::default());
//! assert_eq!(deflection.last().map(|&(x, _)| x), Some(10.0));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::beam::{
    cantilever_point_deflection, cantilever_point_moment, cantilever_point_reactions,
    cantilever_point_shear, simple_point_deflection, simple_point_moment, simple_point_reactions,
    simple_point_shear,
};
use crate::errors::CalcError;

/// Default number of evenly spaced samples per diagram
pub const DEFAULT_SAMPLE_POINTS: usize = 100;

/// Fewest samples a diagram may use
pub const MIN_SAMPLE_POINTS: usize = 50;

/// Most samples a diagram may use. Each diagram allocates one pair per sample.
pub const MAX_SAMPLE_POINTS: usize = 100_000;

/// Default Young's modulus (Pa), structural steel
pub const DEFAULT_YOUNGS_MODULUS_PA: f64 = 200e9;

/// Default second moment of area (m⁴)
pub const DEFAULT_MOMENT_OF_INERTIA_M4: f64 = 1e-6;

/// Sampled curve: `(x, value)` pairs ordered by position
pub type Diagram = Vec<(f64, f64)>;

// =============================================================================
// SUPPORT
// =============================================================================

/// Boundary condition of the beam.
///
/// Serialized as `"simply_supported"` or `"cantilever"`. Any other name is
/// rejected with [`CalcError::UnsupportedConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Support {
    /// Pin at x = 0, roller at x = L
    #[default]
    SimplySupported,

    /// Fixed at x = 0, free at x = L
    Cantilever,
}

impl Support {
    /// All supported boundary conditions, for selection lists
    pub const ALL: [Support; 2] = [Support::SimplySupported, Support::Cantilever];

    /// Identifier used in JSON and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Support::SimplySupported => "simply_supported",
            Support::Cantilever => "cantilever",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Support::SimplySupported => "Simply Supported",
            Support::Cantilever => "Cantilever",
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Support {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simply_supported" => Ok(Support::SimplySupported),
            "cantilever" => Ok(Support::Cantilever),
            _ => Err(CalcError::unsupported_configuration(
                s,
                "Unsupported support type. Expected 'simply_supported' or 'cantilever'",
            )),
        }
    }
}

impl TryFrom<String> for Support {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// STIFFNESS
// =============================================================================

/// Flexural stiffness inputs for deflection queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stiffness {
    /// Young's modulus E (Pa)
    pub youngs_modulus_pa: f64,
    /// Second moment of area I (m⁴)
    pub moment_of_inertia_m4: f64,
}

impl Stiffness {
    pub fn new(youngs_modulus_pa: f64, moment_of_inertia_m4: f64) -> Self {
        Stiffness {
            youngs_modulus_pa,
            moment_of_inertia_m4,
        }
    }

    /// Flexural rigidity E·I (N·m²)
    pub fn ei(&self) -> f64 {
        self.youngs_modulus_pa * self.moment_of_inertia_m4
    }
}

impl Default for Stiffness {
    fn default() -> Self {
        Stiffness::new(DEFAULT_YOUNGS_MODULUS_PA, DEFAULT_MOMENT_OF_INERTIA_M4)
    }
}

// =============================================================================
// REACTIONS
// =============================================================================

/// Support reactions, shaped by the boundary condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "support", rename_all = "snake_case")]
pub enum Reactions {
    /// Vertical reactions at the pin (left) and roller (right), positive upward
    SimplySupported { left_n: f64, right_n: f64 },

    /// Vertical reaction and fixing moment at the clamped end
    Cantilever { force_n: f64, moment_nm: f64 },
}

impl Reactions {
    /// `(R1, R2)` for simply supported beams, `(R, M)` for cantilevers
    pub fn as_tuple(&self) -> (f64, f64) {
        match *self {
            Reactions::SimplySupported { left_n, right_n } => (left_n, right_n),
            Reactions::Cantilever { force_n, moment_nm } => (force_n, moment_nm),
        }
    }

    /// Sum of vertical reaction forces (N)
    pub fn total_vertical_n(&self) -> f64 {
        match *self {
            Reactions::SimplySupported { left_n, right_n } => left_n + right_n,
            Reactions::Cantilever { force_n, .. } => force_n,
        }
    }
}

// =============================================================================
// BEAM MODEL
// =============================================================================

/// Immutable single-span beam under one point load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamModel {
    length_m: f64,
    load_n: f64,
    load_position_m: f64,
    support: Support,
    sample_points: usize,
}

impl BeamModel {
    /// Create a beam model.
    ///
    /// `load_position_m` defaults to midspan when `None`. The value is resolved
    /// here once and stored.
    pub fn new(length_m: f64, load_n: f64, load_position_m: Option<f64>, support: Support) -> Self {
        let load_position_m = load_position_m.unwrap_or(length_m / 2.0);
        debug!(length_m, load_n, load_position_m, %support, "beam model created");

        BeamModel {
            length_m,
            load_n,
            load_position_m,
            support,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }

    /// Set the number of sample points for diagrams, clamped to
    /// [`MIN_SAMPLE_POINTS`]..=[`MAX_SAMPLE_POINTS`]
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.sample_points = points.clamp(MIN_SAMPLE_POINTS, MAX_SAMPLE_POINTS);
        self
    }

    /// Span length (m)
    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    /// Point load magnitude (N), positive downward
    pub fn load_n(&self) -> f64 {
        self.load_n
    }

    /// Distance from the left (fixed) end to the load (m)
    pub fn load_position_m(&self) -> f64 {
        self.load_position_m
    }

    pub fn support(&self) -> Support {
        self.support
    }

    pub fn sample_points(&self) -> usize {
        self.sample_points
    }

    /// Support reactions from static equilibrium
    pub fn calculate_reactions(&self) -> Reactions {
        let (p, a, l) = (self.load_n, self.load_position_m, self.length_m);
        match self.support {
            Support::SimplySupported => {
                let (left_n, right_n) = simple_point_reactions(p, a, l);
                Reactions::SimplySupported { left_n, right_n }
            }
            Support::Cantilever => {
                let (force_n, moment_nm) = cantilever_point_reactions(p, a, l);
                Reactions::Cantilever { force_n, moment_nm }
            }
        }
    }

    /// Shear force at position x (N)
    pub fn shear_at(&self, x_m: f64) -> f64 {
        let (p, a, l) = (self.load_n, self.load_position_m, self.length_m);
        match self.support {
            Support::SimplySupported => simple_point_shear(p, a, l, x_m),
            Support::Cantilever => cantilever_point_shear(p, a, x_m),
        }
    }

    /// Bending moment at position x (N·m)
    pub fn moment_at(&self, x_m: f64) -> f64 {
        let (p, a, l) = (self.load_n, self.load_position_m, self.length_m);
        match self.support {
            Support::SimplySupported => simple_point_moment(p, a, l, x_m),
            Support::Cantilever => cantilever_point_moment(p, a, l, x_m),
        }
    }

    /// Deflection at position x (m)
    pub fn deflection_at(&self, x_m: f64, stiffness: Stiffness) -> f64 {
        let (p, a, l) = (self.load_n, self.load_position_m, self.length_m);
        let (e, i) = (stiffness.youngs_modulus_pa, stiffness.moment_of_inertia_m4);
        match self.support {
            Support::SimplySupported => simple_point_deflection(p, a, l, x_m, e, i),
            Support::Cantilever => cantilever_point_deflection(p, a, l, x_m, e, i),
        }
    }

    /// Evenly spaced positions from 0 to L inclusive.
    ///
    /// The final position is exactly `length_m`.
    pub fn sample_positions(&self) -> Vec<f64> {
        let n = self.sample_points;
        let step = self.length_m / (n - 1) as f64;

        (0..n)
            .map(|i| if i == n - 1 { self.length_m } else { i as f64 * step })
            .collect()
    }

    /// Sampled shear force diagram `(x, V)`
    pub fn shear_force(&self) -> Diagram {
        self.sample(|x| self.shear_at(x))
    }

    /// Sampled bending moment diagram `(x, M)`
    pub fn bending_moment(&self) -> Diagram {
        self.sample(|x| self.moment_at(x))
    }

    /// Sampled deflection curve `(x, δ)` in metres
    pub fn deflection(&self, stiffness: Stiffness) -> Diagram {
        self.sample(|x| self.deflection_at(x, stiffness))
    }

    fn sample(&self, f: impl Fn(f64) -> f64) -> Diagram {
        self.sample_positions().into_iter().map(|x| (x, f(x))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn simple(length: f64, load: f64, position: f64) -> BeamModel {
        BeamModel::new(length, load, Some(position), Support::SimplySupported)
    }

    fn cantilever(length: f64, load: f64, position: f64) -> BeamModel {
        BeamModel::new(length, load, Some(position), Support::Cantilever)
    }

    #[test]
    fn test_load_position_defaults_to_midspan() {
        let beam = BeamModel::new(8.0, 100.0, None, Support::Cantilever);
        assert_eq!(beam.load_position_m(), 4.0);
        assert_eq!(beam.sample_points(), DEFAULT_SAMPLE_POINTS);
    }

    #[test]
    fn test_support_parsing() {
        assert_eq!("simply_supported".parse::<Support>().unwrap(), Support::SimplySupported);
        assert_eq!(" Cantilever ".parse::<Support>().unwrap(), Support::Cantilever);

        let err = "fixed_fixed".parse::<Support>().unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_CONFIGURATION");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_support_serde() {
        assert_eq!(serde_json::to_string(&Support::Cantilever).unwrap(), "\"cantilever\"");
        let parsed: Support = serde_json::from_str("\"simply_supported\"").unwrap();
        assert_eq!(parsed, Support::SimplySupported);

        let err = serde_json::from_str::<Support>("\"fixed_fixed\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported configuration"));
    }

    #[test]
    fn test_equilibrium_simply_supported() {
        for &(l, p, a) in &[(10.0, 500.0, 5.0), (6.0, 1234.5, 0.0), (6.0, 1234.5, 6.0), (3.3, -75.0, 1.1), (12.0, 0.0, 7.0)] {
            let reactions = simple(l, p, a).calculate_reactions();
            let (r1, r2) = reactions.as_tuple();
            assert!(approx_eq(r1 + r2, p, TOL), "L={} P={} a={}", l, p, a);
            assert!(approx_eq(reactions.total_vertical_n(), p, TOL));
        }
    }

    #[test]
    fn test_equilibrium_cantilever() {
        for &(l, p, a) in &[(10.0, 500.0, 10.0), (4.0, -80.0, 1.5), (7.5, 0.0, 0.0)] {
            let reactions = cantilever(l, p, a).calculate_reactions();
            assert_eq!(reactions.total_vertical_n(), p);
            // Fixing moment balances the load about the clamped end
            assert!(approx_eq(reactions.as_tuple().1, p * (l - a), TOL));
        }
    }

    #[test]
    fn test_midspan_scenario() {
        let beam = simple(10.0, 500.0, 5.0);

        assert_eq!(
            beam.calculate_reactions(),
            Reactions::SimplySupported { left_n: 250.0, right_n: 250.0 }
        );
        assert_eq!(beam.shear_at(4.0), 250.0);
        assert_eq!(beam.shear_at(6.0), -250.0);

        // Both moment branches agree at the load point
        let (r1, _) = beam.calculate_reactions().as_tuple();
        assert!(approx_eq(r1 * 5.0, 1250.0, TOL));
        assert!(approx_eq(beam.moment_at(5.0), 1250.0, TOL));
    }

    #[test]
    fn test_cantilever_tip_load_scenario() {
        let beam = cantilever(10.0, 500.0, 10.0);

        assert_eq!(
            beam.calculate_reactions(),
            Reactions::Cantilever { force_n: 500.0, moment_nm: 0.0 }
        );
        assert_eq!(beam.shear_at(5.0), 500.0);
        assert_eq!(beam.shear_at(10.0), 0.0);

        // The sampled diagram ends exactly on the load point
        let shear = beam.shear_force();
        assert_eq!(shear.last(), Some(&(10.0, 0.0)));
        assert_eq!(shear[0], (0.0, 500.0));
    }

    #[test]
    fn test_shear_jump_equals_load() {
        let beam = simple(10.0, 500.0, 3.0);
        let eps = 1e-6;
        let jump = beam.shear_at(3.0 - eps) - beam.shear_at(3.0 + eps);
        assert!(approx_eq(jump, 500.0, TOL));

        let beam = simple(10.0, 500.0, 5.0);
        assert_eq!(beam.shear_at(4.999) - beam.shear_at(5.001), 500.0);
    }

    #[test]
    fn test_load_point_on_sample_uses_right_branch() {
        // Step of exactly 1 m: sample 40 lands on the load
        let beam = simple(99.0, 990.0, 40.0);
        let shear = beam.shear_force();
        let (x, v) = shear[40];
        assert_eq!(x, 40.0);

        let (r1, _) = beam.calculate_reactions().as_tuple();
        assert!(approx_eq(v, r1 - 990.0, TOL));
        assert!(approx_eq(shear[39].1, r1, TOL));

        let beam = cantilever(99.0, 990.0, 40.0);
        assert_eq!(beam.bending_moment()[40], (40.0, 0.0));
        assert!(approx_eq(beam.bending_moment()[39].1, 990.0 * 60.0, TOL));
    }

    #[test]
    fn test_deflection_load_point_uses_left_branch() {
        let beam = simple(99.0, 990.0, 40.0);
        let stiffness = Stiffness::default();
        let (e, i) = (stiffness.youngs_modulus_pa, stiffness.moment_of_inertia_m4);
        let (p, a, l) = (990.0, 40.0, 99.0);
        let b = l - a;
        let left_branch = p * b * a * (l * l - b * b - a * a) / (6.0 * (e * i * l));

        let (x, d) = beam.deflection(stiffness)[40];
        assert_eq!(x, 40.0);
        assert!(approx_eq(d, left_branch, 1e-9));
    }

    #[test]
    fn test_moment_continuity() {
        let eps = 1e-9;

        let beam = simple(10.0, 500.0, 3.0);
        let before = beam.moment_at(3.0 - eps);
        let at = beam.moment_at(3.0);
        assert!(approx_eq(before, at, 1e-4));

        // Cantilever drops by P(L-a) at the load point
        let beam = cantilever(10.0, 500.0, 3.0);
        let before = beam.moment_at(3.0 - eps);
        let at = beam.moment_at(3.0);
        assert!(approx_eq(before - at, 500.0 * 7.0, 1e-4));
    }

    #[test]
    fn test_deflection_boundary_conditions() {
        let stiffness = Stiffness::default();

        for a in [0.0, 2.5, 5.0, 7.5, 10.0] {
            let curve = simple(10.0, 500.0, a).deflection(stiffness);
            let (x0, d0) = curve[0];
            let (xl, dl) = curve[curve.len() - 1];
            assert_eq!(x0, 0.0);
            assert_eq!(xl, 10.0);
            assert!(approx_eq(d0, 0.0, 1e-15), "a={} d(0)={}", a, d0);
            assert!(approx_eq(dl, 0.0, 1e-15), "a={} d(L)={}", a, dl);
        }

        let curve = cantilever(10.0, 500.0, 6.0).deflection(stiffness);
        assert_eq!(curve[0], (0.0, 0.0));
    }

    #[test]
    fn test_midspan_deflection_symmetric() {
        let beam = simple(10.0, 500.0, 5.0);
        let stiffness = Stiffness::default();

        for x in beam.sample_positions() {
            let left = beam.deflection_at(x, stiffness);
            let right = beam.deflection_at(10.0 - x, stiffness);
            assert!(approx_eq(left, right, 1e-12), "x={} {} vs {}", x, left, right);
        }

        // Peak PL³/(48EI) at midspan
        let peak = beam.deflection_at(5.0, stiffness);
        assert!(approx_eq(peak, 500.0 * 1000.0 / (48.0 * stiffness.ei()), 1e-12));
    }

    #[test]
    fn test_deflection_stiffness_override() {
        let beam = simple(10.0, 500.0, 5.0);
        let default = beam.deflection_at(5.0, Stiffness::default());
        let stiffer = beam.deflection_at(5.0, Stiffness::new(400e9, 1e-6));
        assert!(approx_eq(stiffer, default / 2.0, 1e-12));
    }

    #[test]
    fn test_sample_positions() {
        let beam = simple(10.0, 500.0, 5.0);
        let xs = beam.sample_positions();
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 10.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));

        let dense = beam.clone().with_sample_points(201);
        assert_eq!(dense.sample_positions().len(), 201);

        let clamped = beam.clone().with_sample_points(3);
        assert_eq!(clamped.sample_points(), MIN_SAMPLE_POINTS);

        let capped = beam.with_sample_points(usize::MAX);
        assert_eq!(capped.sample_points(), MAX_SAMPLE_POINTS);
    }

    #[test]
    fn test_zero_and_negative_load() {
        let beam = simple(10.0, 0.0, 4.0);
        assert!(beam.shear_force().iter().all(|&(_, v)| v == 0.0));
        assert!(beam.bending_moment().iter().all(|&(_, m)| m == 0.0));

        let up = simple(10.0, -500.0, 5.0);
        let down = simple(10.0, 500.0, 5.0);
        let stiffness = Stiffness::default();
        assert!(approx_eq(up.deflection_at(5.0, stiffness), -down.deflection_at(5.0, stiffness), 1e-15));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let beam = cantilever(4.0, 250.0, 1.0);
        let snapshot = beam.clone();
        let _ = beam.calculate_reactions();
        let _ = beam.shear_force();
        let _ = beam.bending_moment();
        let _ = beam.deflection(Stiffness::default());
        assert_eq!(beam, snapshot);
        assert_eq!(beam.shear_force(), snapshot.shear_force());
    }
}
