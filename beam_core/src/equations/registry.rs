//! # Equation Registry
//!
//! Central registry of every formula the beam model evaluates. Each equation
//! carries metadata (plain-text formula, variables, category, source function)
//! so reports and generated docs can show exactly which mathematics produced
//! a result.
//!
//! ## Usage
//!
//! ```rust
//! use beam_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::SimplePointReactions, "Support reactions");
//!
//! let meta = Equation::SimplePointReactions.metadata();
//! assert!(meta.formula_plain.contains("R1 = P(L-a)/L"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::calculations::beam_model::Support;

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Support reactions (R1, R2 or R, M)
    Reactions,
    /// Internal forces (shear, moment)
    InternalForces,
    /// Elastic deflection
    Deflections,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Reactions => "Reactions",
            EquationCategory::InternalForces => "Internal Forces",
            EquationCategory::Deflections => "Deflections",
        }
    }

    /// Sort order in reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Reactions => 1,
            EquationCategory::InternalForces => 2,
            EquationCategory::Deflections => 3,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "P", "L", "a")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "N", "m", "Pa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Metadata describing one registered equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Function implementing the equation in `equations::beam`
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations evaluated by the beam model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// R1 = P(L-a)/L, R2 = Pa/L
    SimplePointReactions,
    /// V(x) step at the load point
    SimplePointShear,
    /// M(x), continuous at the load point
    SimplePointMoment,
    /// Elastic curve, two branches split at x = a
    SimplePointDeflection,
    /// R = P, M = P(L-a)
    CantileverPointReactions,
    /// V(x) = P before the load, 0 after
    CantileverPointShear,
    /// M(x) = P(L-x) before the load, 0 after
    CantileverPointMoment,
    /// Elastic curve, two branches split at x = a
    CantileverPointDeflection,
}

/// Every registered equation, in report order.
pub const ALL_EQUATIONS: [Equation; 8] = [
    Equation::SimplePointReactions,
    Equation::SimplePointShear,
    Equation::SimplePointMoment,
    Equation::SimplePointDeflection,
    Equation::CantileverPointReactions,
    Equation::CantileverPointShear,
    Equation::CantileverPointMoment,
    Equation::CantileverPointDeflection,
];

const LOAD: Variable = Variable::new("P", "Point load magnitude (positive downward)", "N");
const POSITION: Variable = Variable::new("a", "Distance from left end to load", "m");
const SPAN: Variable = Variable::new("L", "Span length", "m");
const STATION: Variable = Variable::new("x", "Position along beam", "m");
const MODULUS: Variable = Variable::new("E", "Modulus of elasticity", "Pa");
const INERTIA: Variable = Variable::new("I", "Second moment of area", "m^4");

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::SimplePointReactions => EquationMetadata {
                name: "Simply Supported Point Load Reactions",
                description: "Pin and roller reactions for a concentrated load at distance a",
                formula_plain: "R1 = P(L-a)/L, R2 = Pa/L",
                variables: vec![
                    LOAD,
                    POSITION,
                    SPAN,
                    Variable::new("R1", "Left reaction", "N"),
                    Variable::new("R2", "Right reaction", "N"),
                ],
                assumptions: vec!["Static equilibrium", "Load perpendicular to beam axis"],
                category: EquationCategory::Reactions,
                source_function: "simple_point_reactions",
            },

            Equation::SimplePointShear => EquationMetadata {
                name: "Simply Supported Point Load Shear",
                description: "Shear force at position x",
                formula_plain: "V(x) = R1 for x < a, V(x) = R1 - P for x >= a",
                variables: vec![LOAD, POSITION, STATION, Variable::new("V", "Shear force", "N")],
                assumptions: vec!["Exact load point takes the right-hand value"],
                category: EquationCategory::InternalForces,
                source_function: "simple_point_shear",
            },

            Equation::SimplePointMoment => EquationMetadata {
                name: "Simply Supported Point Load Moment",
                description: "Bending moment at position x",
                formula_plain: "M(x) = R1*x for x < a, M(x) = R1*x - P(x-a) for x >= a",
                variables: vec![LOAD, POSITION, STATION, Variable::new("M", "Bending moment", "N*m")],
                assumptions: vec!["Continuous at x = a", "Positive moment: sagging"],
                category: EquationCategory::InternalForces,
                source_function: "simple_point_moment",
            },

            Equation::SimplePointDeflection => EquationMetadata {
                name: "Simply Supported Point Load Deflection",
                description: "Elastic deflection at position x",
                formula_plain: "delta(x) = Pbx(L^2 - b^2 - x^2)/(6EIL) for x <= a, \
                                delta(x) = Pb(L-x)(2Lx - x^2 - b^2)/(6EIL) for x > a",
                variables: vec![
                    LOAD,
                    POSITION,
                    SPAN,
                    STATION,
                    MODULUS,
                    INERTIA,
                    Variable::new("b", "L - a", "m"),
                ],
                assumptions: vec!["Linear elastic material", "Small deflections", "E, I, L > 0"],
                category: EquationCategory::Deflections,
                source_function: "simple_point_deflection",
            },

            Equation::CantileverPointReactions => EquationMetadata {
                name: "Cantilever Point Load Reactions",
                description: "Reaction force and fixing moment at the clamped end",
                formula_plain: "R = P, M = P(L-a)",
                variables: vec![
                    LOAD,
                    POSITION,
                    SPAN,
                    Variable::new("R", "Vertical reaction", "N"),
                    Variable::new("M", "Fixing moment", "N*m"),
                ],
                assumptions: vec!["Fixed at x = 0, free at x = L"],
                category: EquationCategory::Reactions,
                source_function: "cantilever_point_reactions",
            },

            Equation::CantileverPointShear => EquationMetadata {
                name: "Cantilever Point Load Shear",
                description: "Shear force at position x",
                formula_plain: "V(x) = P for x < a, V(x) = 0 for x >= a",
                variables: vec![LOAD, POSITION, STATION, Variable::new("V", "Shear force", "N")],
                assumptions: vec!["Exact load point takes the right-hand value"],
                category: EquationCategory::InternalForces,
                source_function: "cantilever_point_shear",
            },

            Equation::CantileverPointMoment => EquationMetadata {
                name: "Cantilever Point Load Moment",
                description: "Bending moment at position x",
                formula_plain: "M(x) = P(L-x) for x < a, M(x) = 0 for x >= a",
                variables: vec![LOAD, POSITION, SPAN, STATION, Variable::new("M", "Bending moment", "N*m")],
                assumptions: vec!["Drops to zero at x = a (jump of P(L-a))"],
                category: EquationCategory::InternalForces,
                source_function: "cantilever_point_moment",
            },

            Equation::CantileverPointDeflection => EquationMetadata {
                name: "Cantilever Point Load Deflection",
                description: "Elastic deflection at position x",
                formula_plain: "delta(x) = P(L-a)x^2/(2EI) for x <= a, \
                                delta(x) = P(L-a)(2x(L-x) - (L-a)^2)/(2EI) for x > a",
                variables: vec![LOAD, POSITION, SPAN, STATION, MODULUS, INERTIA],
                assumptions: vec!["Linear elastic material", "Small deflections", "E, I > 0"],
                category: EquationCategory::Deflections,
                source_function: "cantilever_point_deflection",
            },
        }
    }

    /// The four equations evaluated for a beam with the given support.
    pub fn for_support(support: Support) -> [Equation; 4] {
        match support {
            Support::SimplySupported => [
                Equation::SimplePointReactions,
                Equation::SimplePointShear,
                Equation::SimplePointMoment,
                Equation::SimplePointDeflection,
            ],
            Support::Cantilever => [
                Equation::CantileverPointReactions,
                Equation::CantileverPointShear,
                Equation::CantileverPointMoment,
                Equation::CantileverPointDeflection,
            ],
        }
    }

    /// Get all equations in a category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .copied()
            .filter(|eq| eq.metadata().category == category)
            .collect()
    }

    /// All categories, sorted for display
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories = vec![
            EquationCategory::Reactions,
            EquationCategory::InternalForces,
            EquationCategory::Deflections,
        ];
        categories.sort_by_key(|c| c.sort_order());
        categories
    }
}

// ============================================================================
// Usage Tracking
// ============================================================================

/// Record of an equation being applied during a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// What the equation was used for (e.g., "Shear diagram")
    pub context: String,
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage {
            equation,
            context: context.into(),
        });
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, sorted by category order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Render one equation as a Markdown section (H3 heading and body).
pub fn equation_markdown(equation: Equation) -> String {
    let meta = equation.metadata();
    let mut output = String::new();

    output.push_str(&format!("### {}\n\n", meta.name));
    output.push_str(&format!("{}\n\n", meta.description));
    output.push_str(&format!("```text\n{}\n```\n\n", meta.formula_plain));

    output.push_str("| Symbol | Description | Units |\n|--------|-------------|-------|\n");
    for var in &meta.variables {
        output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
    }
    output.push('\n');

    if !meta.assumptions.is_empty() {
        output.push_str("**Assumptions:**\n\n");
        for assumption in &meta.assumptions {
            output.push_str(&format!("- {}\n", assumption));
        }
        output.push('\n');
    }

    output.push_str(&format!("**Source:** `equations::beam::{}`\n\n", meta.source_function));
    output
}

/// Generate the complete EQUATIONS.md reference document.
///
/// ```rust
/// use beam_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("BeamViz Equations Reference"));
/// assert!(markdown.contains("## Deflections"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# BeamViz Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Every formula evaluated by the beam model, grouped by category.

## Sign Conventions

| Quantity | Positive Direction |
|----------|-------------------|
| Loads | Downward |
| Reactions | Upward |
| Deflection | Same sense as the load |

---

"#,
    );

    for category in Equation::all_categories() {
        let equations = Equation::in_category(category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));
        for equation in equations {
            output.push_str(&equation_markdown(equation));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }

        assert!(Equation::CantileverPointReactions
            .metadata()
            .formula_plain
            .contains("M = P(L-a)"));
    }

    #[test]
    fn test_for_support_matches_category_layout() {
        for support in [Support::SimplySupported, Support::Cantilever] {
            let eqs = Equation::for_support(support);
            assert_eq!(eqs[0].metadata().category, EquationCategory::Reactions);
            assert_eq!(eqs[1].metadata().category, EquationCategory::InternalForces);
            assert_eq!(eqs[2].metadata().category, EquationCategory::InternalForces);
            assert_eq!(eqs[3].metadata().category, EquationCategory::Deflections);
        }
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::SimplePointShear, "Shear diagram");
        tracker.record(Equation::SimplePointReactions, "Reactions");
        tracker.record(Equation::SimplePointShear, "Max shear");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.unique_equations(),
            vec![Equation::SimplePointShear, Equation::SimplePointReactions]
        );
    }

    #[test]
    fn test_by_category_sorted() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::CantileverPointDeflection, "test");
        tracker.record(Equation::CantileverPointReactions, "test");

        let by_cat = tracker.by_category();
        assert_eq!(by_cat.len(), 2);
        assert_eq!(by_cat[0].0, EquationCategory::Reactions);
        assert_eq!(by_cat[1].0, EquationCategory::Deflections);
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();
        for eq in ALL_EQUATIONS {
            assert!(markdown.contains(eq.metadata().name), "{:?} missing from markdown", eq);
        }
        assert!(markdown.contains("`equations::beam::simple_point_deflection`"));
    }
}
