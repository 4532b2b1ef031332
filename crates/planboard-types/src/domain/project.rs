use crate::error::{Error, Result};
use crate::record::{Record, RecordFields};
use crate::time;
use crate::util::scrub;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned numeric identity of a project
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A project as the remote store returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: ProjectId,
    pub name: String,
    pub description: String,
    #[serde(with = "time::wire")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "time::wire_opt", default)]
    pub end_at: Option<DateTime<Utc>>,
    /// Server-assigned, never transmitted by the client
    #[serde(with = "time::wire")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "time::wire")]
    pub updated_at: DateTime<Utc>,
}

/// The client-mutable subset of a project: edit draft and write body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    #[serde(with = "time::wire")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "time::wire_opt", default)]
    pub end_at: Option<DateTime<Utc>>,
}

impl ProjectFields {
    /// An empty draft for a create form: starting now, open-ended.
    pub fn draft() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_at: Utc::now(),
            end_at: None,
        }
    }
}

impl Record for Project {
    type Id = ProjectId;
    type Fields = ProjectFields;

    const ENTITY: &'static str = "projects";
    const LABEL: &'static str = "Project";

    fn id(&self) -> ProjectId {
        self.project_id
    }

    fn fields(&self) -> ProjectFields {
        ProjectFields {
            name: self.name.clone(),
            description: self.description.clone(),
            start_at: self.start_at,
            end_at: self.end_at,
        }
    }
}

impl RecordFields for ProjectFields {
    fn sanitize(&mut self) {
        self.name = scrub(&self.name);
        self.description = scrub(&self.description);
    }

    fn normalize_timestamps(&mut self) {
        self.start_at = time::wire_trunc(self.start_at);
        self.end_at = self.end_at.map(time::wire_trunc);
    }
}

/// Foreign-key selector scoping the task view to a parent project.
///
/// "Nothing selected" is its own variant, never an empty string or a
/// sentinel id, so selection handling cannot be confused with a valid
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSelection {
    /// No project chosen; every task is in view
    #[default]
    All,
    /// Only tasks belonging to one project
    Project(ProjectId),
}

impl ProjectSelection {
    /// Parse a raw selector: empty means `All`, digits select a project.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(ProjectSelection::All);
        }
        trimmed
            .parse::<u64>()
            .map(|id| ProjectSelection::Project(ProjectId::new(id)))
            .map_err(|_| Error::Selection(raw.to_string()))
    }

    /// Optional project id for filtering
    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            ProjectSelection::All => None,
            ProjectSelection::Project(id) => Some(*id),
        }
    }

    /// Whether a task under `id` is in view under this selection
    pub fn matches(&self, id: ProjectId) -> bool {
        match self {
            ProjectSelection::All => true,
            ProjectSelection::Project(selected) => *selected == id,
        }
    }
}

impl fmt::Display for ProjectSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectSelection::All => write!(f, "all projects"),
            ProjectSelection::Project(id) => write!(f, "project {}", id),
        }
    }
}
