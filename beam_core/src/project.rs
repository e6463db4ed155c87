//! # Project Data Structures
//!
//! A `Project` groups several beam analyses with shared settings. Projects
//! serialize to `.bvz` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (sampling, default stiffness, display units)
//! └── items: HashMap<Uuid, BeamInput> (all beams)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::project::Project;
//! use beam_core::calculations::{BeamInput, Support};
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let id = project.add_item(BeamInput::new("B-1", 6.0, 1200.0, Some(2.0), Support::SimplySupported));
//!
//! assert!(project.get_item(&id).is_some());
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("B-1"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::beam::{calculate, BeamInput, BeamResult};
use crate::calculations::beam_model::{Stiffness, Support, DEFAULT_SAMPLE_POINTS};
use crate::errors::CalcResult;
use crate::units::{Meters, Millimeters};

/// Current schema version for .bvz files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Settings shared by every beam in the project
    #[serde(default)]
    pub settings: GlobalSettings,

    /// All beams, keyed by UUID
    pub items: HashMap<Uuid, BeamInput>,
}

impl Project {
    /// Create a new empty project.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a beam to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: BeamInput) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a beam by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<BeamInput> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a beam by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&BeamInput> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items sorted by label, for stable listings
    pub fn items_by_label(&self) -> Vec<(&Uuid, &BeamInput)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        items
    }

    /// Analyze every beam, in label order.
    ///
    /// Each beam is analyzed independently; one failing input does not stop
    /// the others.
    pub fn analyze_all(&self) -> Vec<(Uuid, CalcResult<BeamResult>)> {
        self.items_by_label()
            .into_iter()
            .map(|(id, input)| (*id, calculate(input)))
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global settings.
///
/// Values act as defaults for new beams. Missing fields in JSON fall back to
/// the values in [`GlobalSettings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Samples per diagram
    pub sample_points: usize,

    /// E and I used when a beam does not specify its own
    pub default_stiffness: Stiffness,

    /// Unit for showing deflection
    pub deflection_display: DeflectionDisplay,
}

impl GlobalSettings {
    /// Create a beam input that takes stiffness and sampling from these settings
    pub fn beam_input(
        &self,
        label: impl Into<String>,
        length_m: f64,
        load_n: f64,
        load_position_m: Option<f64>,
        support: Support,
    ) -> BeamInput {
        BeamInput::new(label, length_m, load_n, load_position_m, support)
            .with_stiffness(self.default_stiffness)
            .with_sample_points(self.sample_points)
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            sample_points: DEFAULT_SAMPLE_POINTS,
            default_stiffness: Stiffness::default(),
            deflection_display: DeflectionDisplay::default(),
        }
    }
}

/// Display unit for deflection values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeflectionDisplay {
    Meters,
    #[default]
    Millimeters,
}

impl DeflectionDisplay {
    /// Unit suffix for labels
    pub fn suffix(&self) -> &'static str {
        match self {
            DeflectionDisplay::Meters => "m",
            DeflectionDisplay::Millimeters => "mm",
        }
    }

    /// Convert a deflection in metres to this display unit
    pub fn scale(&self, deflection_m: f64) -> f64 {
        match self {
            DeflectionDisplay::Meters => deflection_m,
            DeflectionDisplay::Millimeters => Millimeters::from(Meters(deflection_m)).0,
        }
    }
}
