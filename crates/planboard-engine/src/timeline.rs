use crate::cache::CollectionCache;
use chrono::{DateTime, Utc};
use planboard_types::{ProjectSelection, Task, TaskId};

/// Phase of a task on the timeline, derived from the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelinePhase {
    /// Has an end date
    Completed,
    /// Still open-ended
    Ongoing,
}

/// One task as the timeline renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub task_id: TaskId,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub phase: TimelinePhase,
}

impl TimelineEntry {
    fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.task_id,
            name: task.name.clone(),
            description: task.description.clone(),
            start_at: task.start_at,
            end_at: task.end_at,
            phase: match task.end_at {
                Some(_) => TimelinePhase::Completed,
                None => TimelinePhase::Ongoing,
            },
        }
    }
}

/// Project the task cache onto timeline entries, selection-filtered,
/// in cache order.
pub fn build_timeline(
    cache: &CollectionCache<Task>,
    selection: ProjectSelection,
) -> Vec<TimelineEntry> {
    cache
        .iter()
        .filter(|task| selection.matches(task.project_id))
        .map(TimelineEntry::from_task)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use planboard_types::{ProjectId, TaskStatus};

    fn task(id: u64, project: u64, ended: bool) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Task {
            task_id: TaskId::new(id),
            name: format!("task {}", id),
            description: String::new(),
            start_at: at,
            end_at: ended.then(|| Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()),
            status: TaskStatus::Unfinished,
            project_id: ProjectId::new(project),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_phase_follows_end_date() {
        let mut cache = CollectionCache::new();
        cache.load(vec![task(1, 7, true), task(2, 7, false)]);

        let entries = build_timeline(&cache, ProjectSelection::All);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].phase, TimelinePhase::Completed);
        assert_eq!(entries[1].phase, TimelinePhase::Ongoing);
        assert!(entries[1].end_at.is_none());
    }

    #[test]
    fn test_timeline_is_selection_filtered() {
        let mut cache = CollectionCache::new();
        cache.load(vec![task(1, 7, false), task(2, 9, false), task(3, 7, true)]);

        let entries = build_timeline(&cache, ProjectSelection::Project(ProjectId::new(7)));
        let ids: Vec<_> = entries.iter().map(|e| e.task_id.value()).collect();
        assert_eq!(ids, [1, 3]);
    }
}
