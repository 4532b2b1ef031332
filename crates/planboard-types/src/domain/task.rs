use crate::domain::project::ProjectId;
use crate::record::{Record, RecordFields};
use crate::time;
use crate::util::scrub;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned numeric identity of a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a task.
///
/// The wire contract carries this as the `unfinished`/`completed`
/// boolean pair; internally only the two legal states exist, so a
/// draft can never hold both flags true. Decode is strict: a payload
/// where the flags agree is corrupt and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Unfinished,
    Completed,
}

impl TaskStatus {
    pub fn is_unfinished(&self) -> bool {
        matches!(self, TaskStatus::Unfinished)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Unfinished => write!(f, "unfinished"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Wire projection of [`TaskStatus`]; the pair the store stores.
#[derive(Serialize, Deserialize)]
struct StatusFlags {
    unfinished: bool,
    completed: bool,
}

impl Serialize for TaskStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        StatusFlags {
            unfinished: self.is_unfinished(),
            completed: self.is_completed(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let flags = StatusFlags::deserialize(deserializer)?;
        match (flags.unfinished, flags.completed) {
            (true, false) => Ok(TaskStatus::Unfinished),
            (false, true) => Ok(TaskStatus::Completed),
            (unfinished, completed) => Err(serde::de::Error::custom(format!(
                "status flags must disagree (unfinished={unfinished}, completed={completed})"
            ))),
        }
    }
}

/// A task as the remote store returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: TaskId,
    pub name: String,
    pub description: String,
    #[serde(with = "time::wire")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "time::wire_opt", default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub status: TaskStatus,
    /// Required parent project reference
    pub project_id: ProjectId,
    /// Server-assigned, never transmitted by the client
    #[serde(with = "time::wire")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "time::wire")]
    pub updated_at: DateTime<Utc>,
}

/// The client-mutable subset of a task: edit draft and write body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    #[serde(with = "time::wire")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "time::wire_opt", default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub status: TaskStatus,
    pub project_id: ProjectId,
}

impl TaskFields {
    /// An empty draft for a create form: starting now, unfinished, no
    /// parent selected yet. The unset parent reference is transmitted
    /// as-is and rejected by the store's field validation.
    pub fn draft() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_at: Utc::now(),
            end_at: None,
            status: TaskStatus::Unfinished,
            project_id: ProjectId::default(),
        }
    }

    /// Flip toward or away from the unfinished state in one transition.
    pub fn set_unfinished(&mut self, unfinished: bool) {
        self.status = if unfinished {
            TaskStatus::Unfinished
        } else {
            TaskStatus::Completed
        };
    }

    /// Flip toward or away from the completed state in one transition.
    pub fn set_completed(&mut self, completed: bool) {
        self.status = if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Unfinished
        };
    }
}

impl Record for Task {
    type Id = TaskId;
    type Fields = TaskFields;

    const ENTITY: &'static str = "tasks";
    const LABEL: &'static str = "Task";

    fn id(&self) -> TaskId {
        self.task_id
    }

    fn fields(&self) -> TaskFields {
        TaskFields {
            name: self.name.clone(),
            description: self.description.clone(),
            start_at: self.start_at,
            end_at: self.end_at,
            status: self.status,
            project_id: self.project_id,
        }
    }
}

impl RecordFields for TaskFields {
    fn sanitize(&mut self) {
        self.name = scrub(&self.name);
        self.description = scrub(&self.description);
    }

    fn normalize_timestamps(&mut self) {
        self.start_at = time::wire_trunc(self.start_at);
        self.end_at = self.end_at.map(time::wire_trunc);
    }
}
