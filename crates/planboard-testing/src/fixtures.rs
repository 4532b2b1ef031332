//! Sample records and field drafts on a fixed clock.

use chrono::{DateTime, TimeZone, Utc};
use planboard_types::{Project, ProjectFields, ProjectId, Task, TaskFields, TaskId, TaskStatus};

/// The epoch every fixture hangs off; the in-memory store's write
/// clock starts here too.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

pub fn project(id: u64, name: &str) -> Project {
    Project {
        project_id: ProjectId::new(id),
        name: name.to_string(),
        description: format!("{} description", name),
        start_at: base_time() + chrono::Duration::hours(1),
        end_at: None,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn project_fields(name: &str) -> ProjectFields {
    ProjectFields {
        name: name.to_string(),
        description: format!("{} description", name),
        start_at: base_time() + chrono::Duration::hours(1),
        end_at: None,
    }
}

pub fn task(id: u64, project: u64, name: &str) -> Task {
    Task {
        task_id: TaskId::new(id),
        name: name.to_string(),
        description: format!("{} description", name),
        start_at: base_time() + chrono::Duration::hours(1),
        end_at: None,
        status: TaskStatus::Unfinished,
        project_id: ProjectId::new(project),
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn task_fields(project: u64, name: &str) -> TaskFields {
    TaskFields {
        name: name.to_string(),
        description: format!("{} description", name),
        start_at: base_time() + chrono::Duration::hours(1),
        end_at: None,
        status: TaskStatus::Unfinished,
        project_id: ProjectId::new(project),
    }
}
