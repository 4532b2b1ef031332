use planboard_types::Record;
use std::fmt;

/// Error types for cache apply operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A create arrived for an identity the cache already holds
    Duplicate { id: String },
    /// An update or delete arrived for an identity the cache lacks
    Missing { id: String },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Duplicate { id } => write!(f, "record {} already present in cache", id),
            CacheError::Missing { id } => write!(f, "record {} not present in cache", id),
        }
    }
}

impl std::error::Error for CacheError {}

/// Local authoritative mirror of one entity's records for the active
/// view.
///
/// Insertion order is server list order; locally confirmed creates go
/// to the end. Every mutation is a synchronous in-memory operation, so
/// no partial state is ever observable, and replaying the same
/// apply-log against an empty cache reproduces the same contents.
///
/// A cache is owned by the controller that created it and lives as
/// long as that view; navigating away drops it.
#[derive(Debug, Clone)]
pub struct CollectionCache<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for CollectionCache<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Record> CollectionCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale replacement after a full list fetch.
    pub fn load(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Append a confirmed create. The identity must be new.
    pub fn apply_create(&mut self, record: R) -> Result<(), CacheError> {
        if self.contains(record.id()) {
            return Err(CacheError::Duplicate {
                id: record.id().to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace the entry matching a confirmed update, in place.
    pub fn apply_update(&mut self, record: R) -> Result<(), CacheError> {
        match self
            .records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
        {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(CacheError::Missing {
                id: record.id().to_string(),
            }),
        }
    }

    /// Remove and return the entry for a confirmed delete.
    pub fn apply_delete(&mut self, id: R::Id) -> Result<R, CacheError> {
        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => Ok(self.records.remove(index)),
            None => Err(CacheError::Missing { id: id.to_string() }),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: R::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use planboard_types::{Project, ProjectId};

    fn project(id: u64, name: &str) -> Project {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Project {
            project_id: ProjectId::new(id),
            name: name.to_string(),
            description: String::new(),
            start_at: at,
            end_at: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let mut cache = CollectionCache::new();
        cache.load(vec![project(1, "old")]);
        cache.load(vec![project(2, "a"), project(3, "b")]);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(ProjectId::new(1)));
        assert_eq!(cache.records()[0].project_id, ProjectId::new(2));
    }

    #[test]
    fn test_apply_create_appends_and_rejects_duplicates() {
        let mut cache = CollectionCache::new();
        cache.load(vec![project(1, "a")]);
        cache.apply_create(project(2, "b")).unwrap();
        assert_eq!(cache.records()[1].project_id, ProjectId::new(2));

        let err = cache.apply_create(project(1, "again")).unwrap_err();
        assert_eq!(err, CacheError::Duplicate { id: "1".to_string() });
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_apply_update_replaces_exactly_one_entry() {
        let mut cache = CollectionCache::new();
        cache.load(vec![project(1, "a"), project(2, "b"), project(3, "c")]);

        cache.apply_update(project(2, "renamed")).unwrap();

        assert_eq!(cache.records()[0].name, "a");
        assert_eq!(cache.records()[1].name, "renamed");
        assert_eq!(cache.records()[2].name, "c");

        let err = cache.apply_update(project(9, "ghost")).unwrap_err();
        assert_eq!(err, CacheError::Missing { id: "9".to_string() });
    }

    #[test]
    fn test_apply_delete_removes_and_returns() {
        let mut cache = CollectionCache::new();
        cache.load(vec![project(1, "a"), project(2, "b")]);

        let removed = cache.apply_delete(ProjectId::new(1)).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(cache.len(), 1);

        let err = cache.apply_delete(ProjectId::new(1)).unwrap_err();
        assert_eq!(err, CacheError::Missing { id: "1".to_string() });
    }

    #[test]
    fn test_replaying_apply_log_reproduces_contents() {
        let mut live = CollectionCache::new();
        live.load(vec![project(1, "a"), project(2, "b")]);
        live.apply_create(project(3, "c")).unwrap();
        live.apply_update(project(1, "a2")).unwrap();
        live.apply_delete(ProjectId::new(2)).unwrap();
        live.apply_create(project(4, "d")).unwrap();

        let mut replayed = CollectionCache::new();
        replayed.load(vec![project(1, "a"), project(2, "b")]);
        replayed.apply_create(project(3, "c")).unwrap();
        replayed.apply_update(project(1, "a2")).unwrap();
        replayed.apply_delete(ProjectId::new(2)).unwrap();
        replayed.apply_create(project(4, "d")).unwrap();

        assert_eq!(live.records(), replayed.records());
        let order: Vec<_> = live.iter().map(|p| p.project_id.value()).collect();
        assert_eq!(order, [1, 3, 4]);
    }
}
