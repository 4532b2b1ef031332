//! In-memory stand-in for the remote store.
//!
//! Behaves like the real endpoint as the client observes it: assigns
//! identities and timestamps, returns canonical records, and fails on
//! request with scripted responses. Every call lands in a log so tests
//! can assert what went over the wire.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use planboard_client::{RecordClient, RemoteError, Result};
use planboard_types::{
    Project, ProjectFields, ProjectId, Task, TaskFields, TaskId, ValidationErrors,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Server-side materialization of a record from a write body.
pub trait Materialize: planboard_types::Record {
    /// Build a full record from the body plus server-assigned identity
    /// and timestamps.
    fn materialize(fields: &Self::Fields, id: u64, now: DateTime<Utc>) -> Self;

    /// Apply the body onto an existing record, refreshing the update
    /// timestamp.
    fn refresh(&mut self, fields: &Self::Fields, now: DateTime<Utc>);

    fn numeric_id(id: Self::Id) -> u64;
}

impl Materialize for Project {
    fn materialize(fields: &ProjectFields, id: u64, now: DateTime<Utc>) -> Self {
        Project {
            project_id: ProjectId::new(id),
            name: fields.name.clone(),
            description: fields.description.clone(),
            start_at: fields.start_at,
            end_at: fields.end_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn refresh(&mut self, fields: &ProjectFields, now: DateTime<Utc>) {
        self.name = fields.name.clone();
        self.description = fields.description.clone();
        self.start_at = fields.start_at;
        self.end_at = fields.end_at;
        self.updated_at = now;
    }

    fn numeric_id(id: ProjectId) -> u64 {
        id.value()
    }
}

impl Materialize for Task {
    fn materialize(fields: &TaskFields, id: u64, now: DateTime<Utc>) -> Self {
        Task {
            task_id: TaskId::new(id),
            name: fields.name.clone(),
            description: fields.description.clone(),
            start_at: fields.start_at,
            end_at: fields.end_at,
            status: fields.status,
            project_id: fields.project_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn refresh(&mut self, fields: &TaskFields, now: DateTime<Utc>) {
        self.name = fields.name.clone();
        self.description = fields.description.clone();
        self.start_at = fields.start_at;
        self.end_at = fields.end_at;
        self.status = fields.status;
        self.project_id = fields.project_id;
        self.updated_at = now;
    }

    fn numeric_id(id: TaskId) -> u64 {
        id.value()
    }
}

/// One remote operation, for scripting failures and reading the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A failure the store returns instead of performing the next call.
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    NotFound,
    /// A field-error body, e.g. `json!({ "name": ["required"] })`
    Validation(serde_json::Value),
    Remote {
        status: u16,
        message: String,
    },
}

impl ScriptedFailure {
    fn into_error(self, entity: &'static str, id: Option<String>) -> RemoteError {
        match self {
            ScriptedFailure::NotFound => RemoteError::NotFound {
                entity,
                id: id.unwrap_or_default(),
            },
            ScriptedFailure::Validation(body) => match ValidationErrors::from_value(&body) {
                Some(errors) => RemoteError::Validation(errors),
                None => RemoteError::Remote {
                    status: 400,
                    message: body.to_string(),
                },
            },
            ScriptedFailure::Remote { status, message } => {
                RemoteError::Remote { status, message }
            }
        }
    }
}

struct RemoteState<R> {
    records: Vec<R>,
    next_id: u64,
    clock: DateTime<Utc>,
    failures: HashMap<Op, VecDeque<ScriptedFailure>>,
    calls: Vec<Op>,
}

impl<R> RemoteState<R> {
    fn take_failure(&mut self, op: Op) -> Option<ScriptedFailure> {
        self.failures.get_mut(&op).and_then(VecDeque::pop_front)
    }

    /// Advance the write clock; every confirmed write gets a fresh
    /// timestamp, one second apart, deterministically.
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock = self.clock + Duration::seconds(1);
        self.clock
    }
}

/// In-memory `RecordClient` backed by a vec and a deterministic clock.
#[derive(Clone)]
pub struct InMemoryRemote<R: Materialize> {
    state: Arc<Mutex<RemoteState<R>>>,
}

impl<R: Materialize> Default for InMemoryRemote<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Materialize> InMemoryRemote<R> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start with existing records; fresh identities continue above
    /// the highest seeded one.
    pub fn seeded(records: Vec<R>) -> Self {
        let next_id = records
            .iter()
            .map(|record| R::numeric_id(record.id()))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Arc::new(Mutex::new(RemoteState {
                records,
                next_id,
                clock: crate::fixtures::base_time(),
                failures: HashMap::new(),
                calls: Vec::new(),
            })),
        }
    }

    /// Script the next call of `op` to fail instead of executing.
    /// Repeated scripts queue in order.
    pub fn fail_next(&self, op: Op, failure: ScriptedFailure) {
        self.state
            .lock()
            .unwrap()
            .failures
            .entry(op)
            .or_default()
            .push_back(failure);
    }

    /// Snapshot of the stored records, in insertion order.
    pub fn records(&self) -> Vec<R> {
        self.state.lock().unwrap().records.clone()
    }

    /// Every operation attempted so far, scripted failures included.
    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn contains(&self, id: R::Id) -> bool {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .any(|record| record.id() == id)
    }

    /// Drop a record out-of-band, as another writer would.
    pub fn remove(&self, id: R::Id) {
        let mut state = self.state.lock().unwrap();
        state.records.retain(|record| record.id() != id);
    }
}

#[async_trait]
impl<R: Materialize> RecordClient<R> for InMemoryRemote<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Op::List);
        if let Some(failure) = state.take_failure(Op::List) {
            return Err(failure.into_error(R::ENTITY, None));
        }
        Ok(state.records.clone())
    }

    async fn get(&self, id: R::Id) -> Result<R> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Op::Get);
        if let Some(failure) = state.take_failure(Op::Get) {
            return Err(failure.into_error(R::ENTITY, Some(id.to_string())));
        }
        state
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(RemoteError::NotFound {
                entity: R::ENTITY,
                id: id.to_string(),
            })
    }

    async fn create(&self, fields: &R::Fields) -> Result<R> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Op::Create);
        if let Some(failure) = state.take_failure(Op::Create) {
            return Err(failure.into_error(R::ENTITY, None));
        }
        let id = state.next_id;
        state.next_id += 1;
        let now = state.tick();
        let record = R::materialize(fields, id, now);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: R::Id, fields: &R::Fields) -> Result<R> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Op::Update);
        if let Some(failure) = state.take_failure(Op::Update) {
            return Err(failure.into_error(R::ENTITY, Some(id.to_string())));
        }
        let now = state.tick();
        match state.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                record.refresh(fields, now);
                Ok(record.clone())
            }
            None => Err(RemoteError::NotFound {
                entity: R::ENTITY,
                id: id.to_string(),
            }),
        }
    }

    async fn delete(&self, id: R::Id) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Op::Delete);
        if let Some(failure) = state.take_failure(Op::Delete) {
            return Err(failure.into_error(R::ENTITY, Some(id.to_string())));
        }
        match state.records.iter().position(|record| record.id() == id) {
            Some(index) => {
                state.records.remove(index);
                Ok(())
            }
            None => Err(RemoteError::NotFound {
                entity: R::ENTITY,
                id: id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_identity_and_timestamps() {
        let remote: InMemoryRemote<Task> = InMemoryRemote::new();

        let first = remote.create(&fixtures::task_fields(7, "one")).await.unwrap();
        let second = remote.create(&fixtures::task_fields(7, "two")).await.unwrap();

        assert_eq!(first.task_id, TaskId::new(1));
        assert_eq!(second.task_id, TaskId::new(2));
        assert!(second.created_at > first.created_at);
        assert_eq!(remote.records().len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_identities_continue_above_the_seed() {
        let remote = InMemoryRemote::seeded(vec![fixtures::task(5, 7, "seeded")]);
        let created = remote.create(&fixtures::task_fields(7, "next")).await.unwrap();
        assert_eq!(created.task_id, TaskId::new(6));
    }

    #[tokio::test]
    async fn test_scripted_failure_consumes_once() {
        let remote: InMemoryRemote<Task> = InMemoryRemote::new();
        remote.fail_next(Op::Create, ScriptedFailure::Validation(json!({ "name": ["required"] })));

        let err = remote.create(&fixtures::task_fields(7, "")).await.unwrap_err();
        assert!(matches!(err, RemoteError::Validation(_)));
        assert!(remote.records().is_empty());

        remote.create(&fixtures::task_fields(7, "fine")).await.unwrap();
        assert_eq!(remote.records().len(), 1);
        assert_eq!(remote.calls(), [Op::Create, Op::Create]);
    }

    #[tokio::test]
    async fn test_update_refreshes_in_place() {
        let remote = InMemoryRemote::seeded(vec![fixtures::task(3, 7, "before")]);
        let mut fields = fixtures::task_fields(7, "after");
        fields.set_completed(true);

        let updated = remote.update(TaskId::new(3), &fields).await.unwrap();
        assert_eq!(updated.name, "after");
        assert!(updated.status.is_completed());
        assert!(updated.updated_at > updated.created_at);
        assert_eq!(remote.records().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_of_missing_record_is_not_found() {
        let remote: InMemoryRemote<Project> = InMemoryRemote::new();
        let err = remote.delete(ProjectId::new(9)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
