use crate::cache::CollectionCache;
use planboard_types::{ProjectSelection, Record, Task};
use std::fmt;

/// Derived, read-only view of the task cache keyed by the project
/// selection.
///
/// The filter holds only the selection; the visible subsequence is
/// recomputed from the cache on every read, so no stale result can
/// survive a cache mutation or a selection change.
#[derive(Debug, Clone, Default)]
pub struct RelationFilter {
    selection: ProjectSelection,
}

impl RelationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, selection: ProjectSelection) {
        self.selection = selection;
    }

    pub fn selection(&self) -> ProjectSelection {
        self.selection
    }

    /// Tasks in view under the current selection, in cache order.
    /// `All` yields every record; a selection with no matches yields
    /// the empty vec.
    pub fn compute<'a>(&self, cache: &'a CollectionCache<Task>) -> Vec<&'a Task> {
        cache
            .iter()
            .filter(|task| self.selection.matches(task.project_id))
            .collect()
    }
}

/// Substring search against the rendered identity, the project table's
/// search-box behavior. An empty term keeps every record in view.
#[derive(Debug, Clone, Default)]
pub struct IdSearch {
    term: String,
}

impl IdSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches<Id: fmt::Display>(&self, id: Id) -> bool {
        id.to_string().contains(&self.term)
    }

    pub fn compute<'a, R: Record>(&self, cache: &'a CollectionCache<R>) -> Vec<&'a R> {
        cache.iter().filter(|record| self.matches(record.id())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use planboard_types::{ProjectId, TaskId, TaskStatus};

    fn task(id: u64, project: u64) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Task {
            task_id: TaskId::new(id),
            name: format!("task {}", id),
            description: String::new(),
            start_at: at,
            end_at: None,
            status: TaskStatus::Unfinished,
            project_id: ProjectId::new(project),
            created_at: at,
            updated_at: at,
        }
    }

    fn task_cache(entries: &[(u64, u64)]) -> CollectionCache<Task> {
        let mut cache = CollectionCache::new();
        cache.load(entries.iter().map(|&(id, project)| task(id, project)).collect());
        cache
    }

    #[test]
    fn test_compute_matches_selected_project_only() {
        let cache = task_cache(&[(1, 7), (2, 9), (3, 7)]);
        let mut filter = RelationFilter::new();

        filter.select(ProjectSelection::Project(ProjectId::new(7)));
        let visible: Vec<_> = filter.compute(&cache).iter().map(|t| t.task_id.value()).collect();
        assert_eq!(visible, [1, 3]);
    }

    #[test]
    fn test_compute_all_and_no_match() {
        let cache = task_cache(&[(1, 7), (2, 9)]);
        let mut filter = RelationFilter::new();

        assert_eq!(filter.compute(&cache).len(), 2);

        filter.select(ProjectSelection::Project(ProjectId::new(4)));
        assert!(filter.compute(&cache).is_empty());

        let empty = CollectionCache::new();
        filter.select(ProjectSelection::All);
        assert!(filter.compute(&empty).is_empty());
    }

    #[test]
    fn test_compute_single_task_scenario() {
        let cache = task_cache(&[(1, 7)]);
        let mut filter = RelationFilter::new();

        filter.select(ProjectSelection::Project(ProjectId::new(7)));
        let visible = filter.compute(&cache);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].task_id, TaskId::new(1));

        filter.select(ProjectSelection::Project(ProjectId::new(9)));
        assert!(filter.compute(&cache).is_empty());
    }

    #[test]
    fn test_id_search_substring_semantics() {
        let mut search = IdSearch::new();
        assert!(search.matches(TaskId::new(12)));

        search.set_term("2");
        assert!(search.matches(TaskId::new(12)));
        assert!(search.matches(TaskId::new(2)));
        assert!(search.matches(TaskId::new(203)));
        assert!(!search.matches(TaskId::new(45)));
    }

    #[test]
    fn test_id_search_compute_keeps_cache_order() {
        let cache = task_cache(&[(12, 1), (7, 1), (21, 1)]);
        let mut search = IdSearch::new();
        search.set_term("1");
        let visible: Vec<_> = search.compute(&cache).iter().map(|t| t.task_id.value()).collect();
        assert_eq!(visible, [12, 21]);
    }
}
