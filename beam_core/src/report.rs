//! # Calculation Reports
//!
//! Renders analysis results as Markdown calculation sheets: inputs, support
//! reactions, extrema with their positions and an appendix of every
//! equation the analysis evaluated.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::{calculate, BeamInput};
//! use beam_core::project::DeflectionDisplay;
//! use beam_core::report::render_beam_report;
//!
//! let input = BeamInput::default();
//! let result = calculate(&input).unwrap();
//! let markdown = render_beam_report(&input, &result, DeflectionDisplay::Millimeters);
//!
//! assert!(markdown.contains("## Support Reactions"));
//! ```

use chrono::Utc;

use crate::calculations::beam::{calculate, BeamInput, BeamResult};
use crate::calculations::beam_model::Reactions;
use crate::equations::registry::{equation_markdown, EquationTracker};
use crate::errors::CalcResult;
use crate::project::{DeflectionDisplay, Project};
use crate::units::{Gigapascals, Pascals};

fn beam_title(label: &str) -> &str {
    if label.is_empty() {
        "Beam"
    } else {
        label
    }
}

fn push_beam_sections(output: &mut String, input: &BeamInput, result: &BeamResult, display: DeflectionDisplay) {
    let unit = display.suffix();

    output.push_str("## Inputs\n\n");
    output.push_str("| Parameter | Value |\n|-----------|-------|\n");
    output.push_str(&format!("| Support | {} |\n", result.support.display_name()));
    output.push_str(&format!("| Span length L | {:.3} m |\n", result.length_m));
    output.push_str(&format!("| Point load P | {:.1} N |\n", result.load_n));
    output.push_str(&format!("| Load position a | {:.3} m |\n", result.load_position_m));
    output.push_str(&format!(
        "| Young's modulus E | {:.1} GPa |\n",
        Gigapascals::from(Pascals(input.stiffness.youngs_modulus_pa)).0
    ));
    output.push_str(&format!("| Moment of inertia I | {:.3e} m⁴ |\n", input.stiffness.moment_of_inertia_m4));
    output.push_str(&format!("| Samples per diagram | {} |\n\n", input.sample_points));

    output.push_str("## Support Reactions\n\n");
    match result.reactions {
        Reactions::SimplySupported { left_n, right_n } => {
            output.push_str(&format!("- R1 (left) = {:.2} N\n", left_n));
            output.push_str(&format!("- R2 (right) = {:.2} N\n\n", right_n));
        }
        Reactions::Cantilever { force_n, moment_nm } => {
            output.push_str(&format!("- R (fixed end) = {:.2} N\n", force_n));
            output.push_str(&format!("- M (fixed end) = {:.2} N·m\n\n", moment_nm));
        }
    }

    output.push_str("## Extrema\n\n");
    output.push_str("| Quantity | Value | At x |\n|----------|-------|------|\n");
    output.push_str(&format!(
        "| Shear V | {:.2} N | {:.3} m |\n",
        result.max_shear_n, result.max_shear_position_m
    ));
    output.push_str(&format!(
        "| Moment M | {:.2} N·m | {:.3} m |\n",
        result.max_moment_nm, result.max_moment_position_m
    ));
    output.push_str(&format!(
        "| Deflection δ | {:.4} {} | {:.3} m |\n\n",
        display.scale(result.max_deflection_m),
        unit,
        result.max_deflection_position_m
    ));
}

fn record_usages(tracker: &mut EquationTracker, result: &BeamResult) {
    for usage in &result.equation_usages {
        tracker.record(usage.equation, usage.context.clone());
    }
}

/// Equations grouped by category, each followed by what it was used for
fn push_appendix(output: &mut String, tracker: &EquationTracker) {
    output.push_str("## Appendix: Equations Used\n\n");
    for (category, equations) in tracker.by_category() {
        output.push_str(&format!("**{}**\n\n", category.display_name()));
        for eq in equations {
            output.push_str(&equation_markdown(eq));
            output.push_str("Used for:\n\n");
            for usage in tracker.usages().iter().filter(|u| u.equation == eq) {
                output.push_str(&format!("- {}\n", usage.context));
            }
            output.push('\n');
        }
    }
}

/// Render a single analysis as a Markdown report.
pub fn render_beam_report(input: &BeamInput, result: &BeamResult, display: DeflectionDisplay) -> String {
    let mut output = String::with_capacity(4_000);

    output.push_str(&format!("# Beam Calculation: {}\n\n", beam_title(&result.label)));
    output.push_str(&format!("_Generated {}_\n\n", Utc::now().format("%Y-%m-%d")));
    push_beam_sections(&mut output, input, result, display);

    let mut tracker = EquationTracker::new();
    record_usages(&mut tracker, result);
    push_appendix(&mut output, &tracker);

    output
}

/// Render every beam in a project as one Markdown calculation package.
///
/// Beams appear in label order. The appendix lists each equation once.
///
/// # Errors
///
/// The first beam whose input fails validation aborts the report.
pub fn render_project_report(project: &Project) -> CalcResult<String> {
    let display = project.settings.deflection_display;
    let mut output = String::with_capacity(4_000 * (project.item_count() + 1));

    output.push_str("# Structural Calculation Package\n\n");
    output.push_str("| Job | Client | Engineer | Date |\n|-----|--------|----------|------|\n");
    output.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        project.meta.job_id,
        project.meta.client,
        project.meta.engineer,
        Utc::now().format("%Y-%m-%d")
    ));

    let mut tracker = EquationTracker::new();
    for (_, input) in project.items_by_label() {
        let result = calculate(input)?;

        output.push_str(&format!("---\n\n# {}\n\n", beam_title(&result.label)));
        push_beam_sections(&mut output, input, &result, display);
        record_usages(&mut tracker, &result);
    }

    if tracker.usages().is_empty() {
        output.push_str("_No beams in project._\n");
    } else {
        output.push_str("---\n\n");
        push_appendix(&mut output, &tracker);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::beam_model::Support;
    use crate::equations::registry::Equation;

    #[test]
    fn test_report_lists_every_equation_used() {
        let input = BeamInput::new("B-1", 10.0, 500.0, Some(3.0), Support::SimplySupported);
        let result = calculate(&input).unwrap();
        let report = render_beam_report(&input, &result, DeflectionDisplay::Millimeters);

        assert!(report.starts_with("# Beam Calculation: B-1"));
        assert!(report.contains("| Young's modulus E | 200.0 GPa |"));
        assert_eq!(result.equations.len(), 4);
        for eq in &result.equations {
            assert!(report.contains(&format!("### {}", eq.metadata().name)));
        }
        assert!(report.contains("**Reactions**"));
        assert!(report.contains("- B-1: deflection curve"));
    }

    #[test]
    fn test_report_reactions_by_support() {
        let input = BeamInput::new("C-1", 10.0, 500.0, Some(10.0), Support::Cantilever);
        let result = calculate(&input).unwrap();
        let report = render_beam_report(&input, &result, DeflectionDisplay::Meters);

        assert!(report.contains("R (fixed end) = 500.00 N"));
        assert!(report.contains("M (fixed end) = 0.00 N·m"));
        assert!(report.contains("| Moment M | 5000.00 N·m | 0.000 m |"));
        assert!(!report.contains("R1 (left)"));
    }

    #[test]
    fn test_report_deflection_unit() {
        let input = BeamInput::default();
        let result = calculate(&input).unwrap();

        let mm = render_beam_report(&input, &result, DeflectionDisplay::Millimeters);
        let m = render_beam_report(&input, &result, DeflectionDisplay::Meters);
        assert!(mm.contains(" mm |"));
        assert!(!m.contains(" mm |"));
    }

    #[test]
    fn test_project_report() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        project.add_item(BeamInput::new("B-2", 6.0, 800.0, None, Support::Cantilever));
        project.add_item(BeamInput::new("B-1", 10.0, 500.0, None, Support::SimplySupported));

        let report = render_project_report(&project).unwrap();
        let first = report.find("# B-1").unwrap();
        let second = report.find("# B-2").unwrap();
        assert!(first < second);

        for eq in Support::ALL.iter().flat_map(|s| Equation::for_support(*s)) {
            assert_eq!(report.matches(&format!("### {}\n", eq.metadata().name)).count(), 1);
        }
        assert!(report.contains("- B-1: moment diagram"));
        assert!(report.contains("- B-2: moment diagram"));

        // Categories appear in report order
        let reactions = report.find("**Reactions**").unwrap();
        let deflections = report.find("**Deflections**").unwrap();
        assert!(reactions < deflections);
    }

    #[test]
    fn test_project_report_propagates_invalid_beam() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        project.add_item(BeamInput::new("B-1", 10.0, 500.0, Some(20.0), Support::SimplySupported));

        let err = render_project_report(&project).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_project_report() {
        let report = render_project_report(&Project::new("Engineer", "25-001", "Client")).unwrap();
        assert!(report.contains("No beams in project"));
        assert!(!report.contains("Appendix"));
    }
}
