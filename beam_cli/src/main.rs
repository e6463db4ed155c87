//! # BeamViz CLI
//!
//! Command-line front end for single span beam analysis.
//!
//! Usage:
//!     beamviz analyze --length 10 --load 500 --support cantilever
//!     beamviz diagram moment --position 3
//!     beamviz diagram deflection --units m
//!     beamviz report --input beam.json > B-1.md
//!     beamviz project new job.bvz --engineer "J. Doe" --job 25-001 --client ACME
//!     beamviz project add job.bvz --label B-1 --length 6
//!     beamviz project run job.bvz --json
//!     beamviz project remove job.bvz 2c9f0f6e-8a2b-4d7e-9b1a-0c3e5f7a9d11

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use beam_core::calculations::{calculate, BeamInput, BeamResult, Diagram, Reactions, Support};
use beam_core::errors::{CalcError, CalcResult};
use beam_core::file_io::{load_input_with_settings, load_project, load_settings, save_project};
use beam_core::project::{DeflectionDisplay, GlobalSettings, Project};
use beam_core::report::{render_beam_report, render_project_report};

const DEFAULT_LENGTH_M: f64 = 10.0;
const DEFAULT_LOAD_N: f64 = 500.0;

/// BeamViz - shear, moment and deflection for a single point load
#[derive(Parser, Debug)]
#[command(name = "beamviz")]
#[command(version)]
#[command(about = "Simply supported and cantilever beam analysis", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings JSON supplying defaults for unspecified beam args
    #[arg(long, global = true, value_name = "SETTINGS_JSON")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one beam and print reactions and extrema
    Analyze {
        #[command(flatten)]
        beam: BeamArgs,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one diagram as CSV (x,value)
    Diagram {
        /// Which curve to print
        #[arg(value_enum)]
        curve: Curve,

        #[command(flatten)]
        beam: BeamArgs,

        /// Deflection unit [default: from settings]. Only valid for the deflection curve.
        #[arg(long, value_enum)]
        units: Option<DeflectionUnits>,
    },

    /// Print a Markdown calculation report
    Report {
        #[command(flatten)]
        beam: BeamArgs,
    },

    /// Work with multi-beam project files
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// Create an empty project file
    New {
        path: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        /// Job number
        #[arg(long, default_value = "")]
        job: String,

        #[arg(long, default_value = "")]
        client: String,
    },

    /// Add a beam to a project
    Add {
        path: PathBuf,

        #[command(flatten)]
        beam: BeamArgs,
    },

    /// Remove a beam from a project by id
    Remove { path: PathBuf, id: Uuid },

    /// Analyze every beam in a project
    Run {
        path: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a Markdown calculation package for a project
    Report { path: PathBuf },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Curve {
    Shear,
    Moment,
    Deflection,
}

impl Curve {
    fn as_str(&self) -> &'static str {
        match self {
            Curve::Shear => "shear",
            Curve::Moment => "moment",
            Curve::Deflection => "deflection",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DeflectionUnits {
    M,
    Mm,
}

impl From<DeflectionUnits> for DeflectionDisplay {
    fn from(units: DeflectionUnits) -> Self {
        match units {
            DeflectionUnits::M => DeflectionDisplay::Meters,
            DeflectionUnits::Mm => DeflectionDisplay::Millimeters,
        }
    }
}

/// Display unit for a diagram: `--units` wins over the configured default
fn diagram_display(
    curve: Curve,
    units: Option<DeflectionUnits>,
    settings: &GlobalSettings,
) -> CalcResult<DeflectionDisplay> {
    match units {
        Some(_) if curve != Curve::Deflection => Err(CalcError::invalid_input(
            "units",
            curve.as_str(),
            "Units can only be chosen for the deflection curve",
        )),
        Some(units) => Ok(units.into()),
        None => Ok(settings.deflection_display),
    }
}

/// Beam parameters. Flags override values from `--input`.
#[derive(Args, Debug, Default)]
struct BeamArgs {
    /// Beam label
    #[arg(long)]
    label: Option<String>,

    /// Span length in metres [default: 10]
    #[arg(long, allow_negative_numbers = true)]
    length: Option<f64>,

    /// Point load in newtons [default: 500]
    #[arg(long, allow_negative_numbers = true)]
    load: Option<f64>,

    /// Load position from the left end in metres [default: midspan]
    #[arg(long, allow_negative_numbers = true)]
    position: Option<f64>,

    /// Support condition: simply_supported or cantilever
    #[arg(long)]
    support: Option<String>,

    /// Young's modulus in pascals [default: 200e9]
    #[arg(long, allow_negative_numbers = true)]
    youngs_modulus: Option<f64>,

    /// Second moment of area in m^4 [default: 1e-6]
    #[arg(long, allow_negative_numbers = true)]
    inertia: Option<f64>,

    /// Samples per diagram [default: 100]
    #[arg(long)]
    samples: Option<usize>,

    /// JSON file holding a beam input
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

impl BeamArgs {
    /// Build a beam input: file (or settings defaults), then flag overrides
    fn to_input(&self, settings: &GlobalSettings) -> CalcResult<BeamInput> {
        let mut input = match &self.input {
            Some(path) => load_input_with_settings(path, settings)?,
            None => settings.beam_input("", DEFAULT_LENGTH_M, DEFAULT_LOAD_N, None, Support::default()),
        };

        if let Some(label) = &self.label {
            input.label = label.clone();
        }
        if let Some(length) = self.length {
            input.length_m = length;
        }
        if let Some(load) = self.load {
            input.load_n = load;
        }
        if let Some(position) = self.position {
            input.load_position_m = Some(position);
        }
        if let Some(support) = &self.support {
            input.support = support.parse()?;
        }
        if let Some(e) = self.youngs_modulus {
            input.stiffness.youngs_modulus_pa = e;
        }
        if let Some(i) = self.inertia {
            input.stiffness.moment_of_inertia_m4 = i;
        }
        if let Some(samples) = self.samples {
            input.sample_points = samples;
        }

        input.validate()?;
        Ok(input)
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> CalcResult<GlobalSettings> {
    match path {
        Some(path) => {
            let settings = load_settings(path)?;
            debug!(path = %path.display(), "settings loaded");
            Ok(settings)
        }
        None => Ok(GlobalSettings::default()),
    }
}

fn format_summary(result: &BeamResult, display: DeflectionDisplay) -> String {
    let label = if result.label.is_empty() { "Beam" } else { result.label.as_str() };
    let rule = "═══════════════════════════════════════";
    let mut out = String::new();

    out.push_str(&format!("{}\n  {} ({})\n{}\n\n", rule, label, result.support.display_name(), rule));
    out.push_str("Input:\n");
    out.push_str(&format!("  Span:     {:.3} m\n", result.length_m));
    out.push_str(&format!("  Load:     {:.1} N at x = {:.3} m\n\n", result.load_n, result.load_position_m));

    out.push_str("Reactions:\n");
    match result.reactions {
        Reactions::SimplySupported { left_n, right_n } => {
            out.push_str(&format!("  R1 = {:.2} N\n  R2 = {:.2} N\n\n", left_n, right_n));
        }
        Reactions::Cantilever { force_n, moment_nm } => {
            out.push_str(&format!("  R  = {:.2} N\n  M  = {:.2} N·m\n\n", force_n, moment_nm));
        }
    }

    out.push_str("Extrema:\n");
    out.push_str(&format!(
        "  V_max = {:.2} N at x = {:.3} m\n",
        result.max_shear_n, result.max_shear_position_m
    ));
    out.push_str(&format!(
        "  M_max = {:.2} N·m at x = {:.3} m\n",
        result.max_moment_nm, result.max_moment_position_m
    ));
    out.push_str(&format!(
        "  δ_max = {:.4} {} at x = {:.3} m\n",
        display.scale(result.max_deflection_m),
        display.suffix(),
        result.max_deflection_position_m
    ));
    out
}

fn format_csv(diagram: &Diagram, header: &str) -> String {
    let mut out = format!("x_m,{}\n", header);
    for (x, value) in diagram {
        out.push_str(&format!("{},{}\n", x, value));
    }
    out
}

fn diagram_csv(result: &BeamResult, curve: Curve, display: DeflectionDisplay) -> String {
    match (curve, display) {
        (Curve::Shear, _) => format_csv(&result.shear_diagram, "shear_n"),
        (Curve::Moment, _) => format_csv(&result.moment_diagram, "moment_nm"),
        (Curve::Deflection, DeflectionDisplay::Millimeters) => {
            format_csv(&result.deflection_diagram_mm(), "deflection_mm")
        }
        (Curve::Deflection, DeflectionDisplay::Meters) => format_csv(&result.deflection_diagram, "deflection_m"),
    }
}

fn run_project(path: &Path, as_json: bool) -> CalcResult<()> {
    let project = load_project(path)?;
    let display = project.settings.deflection_display;
    let results = project.analyze_all();
    let mut first_error: Option<CalcError> = None;

    if as_json {
        let entries: Vec<_> = results
            .iter()
            .map(|(id, outcome)| match outcome {
                Ok(result) => json!({ "id": id, "result": result }),
                Err(e) => json!({ "id": id, "error": e }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    for (id, outcome) in results {
        match outcome {
            Ok(result) if !as_json => println!("{}", format_summary(&result, display)),
            Ok(_) => {}
            Err(e) => {
                let label = project.get_item(&id).map(|b| b.label.as_str()).unwrap_or("");
                eprintln!("Error in beam '{}' ({}): {}", label, id, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let settings = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { beam, json } => {
            let result = calculate(&beam.to_input(&settings)?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_summary(&result, settings.deflection_display));
            }
        }
        Commands::Diagram { curve, beam, units } => {
            let display = diagram_display(curve, units, &settings)?;
            let result = calculate(&beam.to_input(&settings)?)?;
            print!("{}", diagram_csv(&result, curve, display));
        }
        Commands::Report { beam } => {
            let input = beam.to_input(&settings)?;
            let result = calculate(&input)?;
            print!("{}", render_beam_report(&input, &result, settings.deflection_display));
        }
        Commands::Project { command } => match command {
            ProjectCommand::New { path, engineer, job, client } => {
                let mut project = Project::new(engineer, job, client);
                if cli.config.is_some() {
                    project.settings = settings;
                }
                save_project(&project, &path)?;
                println!("Created {}", path.display());
            }
            ProjectCommand::Add { path, beam } => {
                let mut project = load_project(&path)?;
                let input = beam.to_input(&project.settings)?;
                let label = input.label.clone();
                let id = project.add_item(input);
                save_project(&project, &path)?;
                info!(%id, label = %label, "beam added");
                println!("{}", id);
            }
            ProjectCommand::Remove { path, id } => {
                let mut project = load_project(&path)?;
                let removed = project.remove_item(&id).ok_or_else(|| {
                    CalcError::invalid_input("id", id.to_string(), "No beam with this id in the project")
                })?;
                save_project(&project, &path)?;
                info!(%id, label = %removed.label, "beam removed");
                println!("Removed {}", id);
            }
            ProjectCommand::Run { path, json } => run_project(&path, json)?,
            ProjectCommand::Report { path } => {
                let project = load_project(&path)?;
                print!("{}", render_project_report(&project)?);
            }
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn beam_args(cli: Cli) -> BeamArgs {
        match cli.command {
            Commands::Analyze { beam, .. } | Commands::Report { beam } | Commands::Diagram { beam, .. } => beam,
            other => panic!("no beam args in {:?}", other),
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "beamviz", "-vv", "analyze", "--length", "6", "--load", "-300", "--support", "cantilever", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        match cli.command {
            Commands::Analyze { beam, json } => {
                assert!(json);
                assert_eq!(beam.length, Some(6.0));
                assert_eq!(beam.load, Some(-300.0));
                assert_eq!(beam.support.as_deref(), Some("cantilever"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_diagram_curve() {
        let cli = Cli::try_parse_from(["beamviz", "diagram", "deflection", "--units", "mm"]).unwrap();
        match cli.command {
            Commands::Diagram { curve, units, .. } => {
                assert_eq!(curve, Curve::Deflection);
                assert_eq!(units, Some(DeflectionUnits::Mm));
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Cli::try_parse_from(["beamviz", "diagram", "torsion"]).is_err());
    }

    #[test]
    fn test_parse_project_new() {
        let cli = Cli::try_parse_from([
            "beamviz", "project", "new", "job.bvz", "--engineer", "J. Doe", "--job", "25-001",
        ])
        .unwrap();
        match cli.command {
            Commands::Project { command: ProjectCommand::New { path, engineer, job, client } } => {
                assert_eq!(path, PathBuf::from("job.bvz"));
                assert_eq!(engineer, "J. Doe");
                assert_eq!(job, "25-001");
                assert_eq!(client, "");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_defaults_to_input() {
        let cli = Cli::try_parse_from(["beamviz", "analyze"]).unwrap();
        let input = beam_args(cli).to_input(&GlobalSettings::default()).unwrap();

        assert_eq!(input.length_m, 10.0);
        assert_eq!(input.load_n, 500.0);
        assert_eq!(input.resolved_load_position_m(), 5.0);
        assert_eq!(input.support, Support::SimplySupported);
        assert_eq!(input.sample_points, 100);
    }

    #[test]
    fn test_unknown_support_is_configuration_error() {
        let cli = Cli::try_parse_from(["beamviz", "analyze", "--support", "fixed_fixed"]).unwrap();
        let err = beam_args(cli).to_input(&GlobalSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_CONFIGURATION");
    }

    #[test]
    fn test_position_outside_span_rejected() {
        let cli = Cli::try_parse_from(["beamviz", "analyze", "--position", "-1"]).unwrap();
        let err = beam_args(cli).to_input(&GlobalSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_flags_override_input_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beam.json");
        std::fs::write(&path, r#"{ "label": "F-1", "length_m": 4.0, "load_n": 250.0, "support": "cantilever" }"#)
            .unwrap();

        let args = BeamArgs {
            input: Some(path),
            load: Some(1000.0),
            ..BeamArgs::default()
        };
        let input = args.to_input(&GlobalSettings::default()).unwrap();

        assert_eq!(input.label, "F-1");
        assert_eq!(input.length_m, 4.0);
        assert_eq!(input.load_n, 1000.0);
        assert_eq!(input.support, Support::Cantilever);
    }

    #[test]
    fn test_settings_supply_defaults() {
        let settings = GlobalSettings {
            sample_points: 200,
            ..GlobalSettings::default()
        };
        let input = BeamArgs::default().to_input(&settings).unwrap();
        assert_eq!(input.sample_points, 200);
    }

    #[test]
    fn test_diagram_csv() {
        let result = calculate(&BeamInput::default()).unwrap();

        let shear = diagram_csv(&result, Curve::Shear, DeflectionDisplay::Millimeters);
        let mut lines = shear.lines();
        assert_eq!(lines.next(), Some("x_m,shear_n"));
        assert_eq!(lines.next(), Some("0,250"));
        assert_eq!(shear.lines().count(), 101);

        let meters = diagram_csv(&result, Curve::Deflection, DeflectionDisplay::Meters);
        let millis = diagram_csv(&result, Curve::Deflection, DeflectionDisplay::Millimeters);
        assert!(meters.starts_with("x_m,deflection_m\n"));
        assert!(millis.starts_with("x_m,deflection_mm\n"));
    }

    #[test]
    fn test_diagram_display_follows_settings() {
        let settings = GlobalSettings {
            deflection_display: DeflectionDisplay::Meters,
            ..GlobalSettings::default()
        };
        assert_eq!(
            diagram_display(Curve::Deflection, None, &settings).unwrap(),
            DeflectionDisplay::Meters
        );
        assert_eq!(
            diagram_display(Curve::Deflection, Some(DeflectionUnits::Mm), &settings).unwrap(),
            DeflectionDisplay::Millimeters
        );
        assert_eq!(
            diagram_display(Curve::Deflection, None, &GlobalSettings::default()).unwrap(),
            DeflectionDisplay::Millimeters
        );
    }

    #[test]
    fn test_units_rejected_for_force_curves() {
        for curve in [Curve::Shear, Curve::Moment] {
            let err = diagram_display(curve, Some(DeflectionUnits::Mm), &GlobalSettings::default()).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
        assert!(diagram_display(Curve::Shear, None, &GlobalSettings::default()).is_ok());
    }

    #[test]
    fn test_config_supplies_input_file_defaults() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("settings.json");
        let input_path = dir.path().join("beam.json");
        std::fs::write(&settings_path, r#"{ "sample_points": 300, "deflection_display": "meters" }"#).unwrap();
        std::fs::write(&input_path, r#"{ "length_m": 4.0, "load_n": 250.0, "support": "cantilever" }"#).unwrap();

        let cli = Cli::try_parse_from([
            "beamviz",
            "--config",
            settings_path.to_str().unwrap(),
            "analyze",
            "--input",
            input_path.to_str().unwrap(),
        ])
        .unwrap();
        let settings = load_config(cli.config.as_deref()).unwrap();
        let input = beam_args(cli).to_input(&settings).unwrap();

        assert_eq!(input.sample_points, 300);
        assert_eq!(input.length_m, 4.0);

        // Explicit flags still win over both
        let args = BeamArgs {
            input: Some(input_path),
            samples: Some(80),
            ..BeamArgs::default()
        };
        assert_eq!(args.to_input(&settings).unwrap().sample_points, 80);
    }

    #[test]
    fn test_summary_lists_reactions() {
        let input = BeamInput::new("C-1", 10.0, 500.0, Some(10.0), Support::Cantilever);
        let result = calculate(&input).unwrap();
        let summary = format_summary(&result, DeflectionDisplay::Millimeters);

        assert!(summary.contains("C-1 (Cantilever)"));
        assert!(summary.contains("R  = 500.00 N"));
        assert!(summary.contains("M_max = 5000.00 N·m at x = 0.000 m"));
        assert!(summary.contains(" mm at x = "));
    }

    #[test]
    fn test_project_add_and_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.bvz");

        run(Cli::try_parse_from(["beamviz", "project", "new", path.to_str().unwrap()]).unwrap()).unwrap();
        run(Cli::try_parse_from([
            "beamviz", "project", "add", path.to_str().unwrap(), "--label", "B-1", "--length", "6",
        ])
        .unwrap())
        .unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.item_count(), 1);
        assert!(run_project(&path, true).is_ok());

        let id = project.items.keys().next().unwrap().to_string();
        run(Cli::try_parse_from(["beamviz", "project", "remove", path.to_str().unwrap(), id.as_str()]).unwrap()).unwrap();
        assert_eq!(load_project(&path).unwrap().item_count(), 0);

        let err = run(Cli::try_parse_from(["beamviz", "project", "remove", path.to_str().unwrap(), id.as_str()]).unwrap())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
