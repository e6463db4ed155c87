//! # File I/O Module
//!
//! JSON file operations for projects, single beam inputs, settings and
//! results:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure project schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{save_project, load_project};
//! use beam_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("myproject.bvz");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), beam_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::calculations::beam::{BeamInput, BeamResult};
use crate::errors::{CalcError, CalcResult};
use crate::project::{GlobalSettings, Project, SCHEMA_VERSION};

/// Temp file used while saving `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write `contents` to `path` with atomic write semantics.
///
/// The save process:
/// 1. Write to a temporary file next to the target (`<path>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

/// Serialize `value` as pretty JSON and save it atomically
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, &json)
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Save a project to a file with atomic write semantics.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    save_json(project, path)?;
    info!(path = %path.display(), items = project.item_count(), "project saved");
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let project: Project = load_json(path)?;
    validate_version(&project.meta.version)?;
    debug!(path = %path.display(), items = project.item_count(), "project loaded");
    Ok(project)
}

/// Load a single beam input (one analysis request)
pub fn load_input(path: &Path) -> CalcResult<BeamInput> {
    load_json(path)
}

/// Load a single beam input, taking omitted stiffness and sampling fields
/// from `settings` instead of the built-in defaults.
pub fn load_input_with_settings(path: &Path, settings: &GlobalSettings) -> CalcResult<BeamInput> {
    let mut value: Value = load_json(path)?;

    if let Some(fields) = value.as_object_mut() {
        fields
            .entry("sample_points")
            .or_insert_with(|| json!(settings.sample_points));

        let stiffness = fields.entry("stiffness").or_insert_with(|| json!({}));
        if let Some(stiffness) = stiffness.as_object_mut() {
            let defaults = settings.default_stiffness;
            stiffness
                .entry("youngs_modulus_pa")
                .or_insert_with(|| json!(defaults.youngs_modulus_pa));
            stiffness
                .entry("moment_of_inertia_m4")
                .or_insert_with(|| json!(defaults.moment_of_inertia_m4));
        }
    }

    serde_json::from_value(value).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Load standalone settings. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> CalcResult<GlobalSettings> {
    load_json(path)
}

/// Save an analysis result as pretty JSON
pub fn save_result(result: &BeamResult, path: &Path) -> CalcResult<()> {
    save_json(result, path)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. While the schema is 0.x the file's minor
/// version must not be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major {
        return Err(mismatch());
    }

    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }

    Ok(())
}
