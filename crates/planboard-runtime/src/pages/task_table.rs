use crate::coordinator::{Mutation, MutationCoordinator, SubmitOutcome};
use crate::error::{Error, Result};
use crate::flight::FlightTable;
use crate::notify::{NoticeLevel, Notifier};
use crate::view::ViewInstance;
use planboard_client::RecordClient;
use planboard_engine::{
    CacheError, CollectionCache, EditError, EditPolicy, FieldErrors, RelationFilter,
    RowEditSession, TimelineEntry, build_timeline,
};
use planboard_types::{Project, ProjectSelection, Task, TaskFields, TaskId};
use std::sync::Arc;

/// The task table page: the task cache filtered by the project
/// selection, a mirror of the project collection for the selector and
/// for resolving parent references, one inline row edit, and a staged
/// draft for the new-task row.
pub struct TaskTableController {
    client: Arc<dyn RecordClient<Task>>,
    projects_client: Arc<dyn RecordClient<Project>>,
    coordinator: MutationCoordinator<Task>,
    notifier: Arc<dyn Notifier>,
    cache: CollectionCache<Task>,
    projects: CollectionCache<Project>,
    filter: RelationFilter,
    session: RowEditSession<Task>,
    staged: TaskFields,
    errors: FieldErrors,
}

impl TaskTableController {
    pub(crate) fn new(
        client: Arc<dyn RecordClient<Task>>,
        projects_client: Arc<dyn RecordClient<Project>>,
        notifier: Arc<dyn Notifier>,
        flights: FlightTable,
        policy: EditPolicy,
    ) -> Self {
        let coordinator = MutationCoordinator::new(
            client.clone(),
            notifier.clone(),
            ViewInstance::new(),
            flights,
        );
        Self {
            client,
            projects_client,
            coordinator,
            notifier,
            cache: CollectionCache::new(),
            projects: CollectionCache::new(),
            filter: RelationFilter::new(),
            session: RowEditSession::with_policy(policy),
            staged: TaskFields::draft(),
            errors: FieldErrors::default(),
        }
    }

    /// Fetch both collections and replace the caches.
    ///
    /// The fetches are independent, as on the page: a failure on one
    /// side signals its own notice and leaves that cache as it was,
    /// while the other side still loads. Renews the view generation
    /// first.
    pub async fn load(&mut self) -> Result<()> {
        self.coordinator.view().renew();
        let token = self.coordinator.view().token();
        let projects = self.projects_client.list().await;
        let tasks = self.client.list().await;
        if !self.coordinator.view().is_current(token) {
            return Ok(());
        }

        let mut failure = None;
        match projects {
            Ok(records) => self.projects.load(records),
            Err(err) => {
                self.notifier.notify(NoticeLevel::Error, "Error fetching projects");
                failure = Some(Error::Remote(err));
            }
        }
        match tasks {
            Ok(records) => self.cache.load(records),
            Err(err) => {
                self.notifier.notify(NoticeLevel::Error, "Error fetching tasks");
                if failure.is_none() {
                    failure = Some(Error::Remote(err));
                }
            }
        }
        match failure {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    pub fn records(&self) -> &[Task] {
        self.cache.records()
    }

    /// Scope the view to one parent project, or back to all.
    pub fn select(&mut self, selection: ProjectSelection) {
        self.filter.select(selection);
    }

    pub fn selection(&self) -> ProjectSelection {
        self.filter.selection()
    }

    /// Tasks in view under the current selection, in cache order.
    pub fn visible(&self) -> Vec<&Task> {
        self.filter.compute(&self.cache)
    }

    /// The selection-filtered timeline projection of the task cache.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        build_timeline(&self.cache, self.filter.selection())
    }

    /// The parent project of `task`, or `None` while the reference
    /// dangles. Dangling tasks stay in view, unattributed.
    pub fn resolve_project(&self, task: &Task) -> Option<&Project> {
        self.projects.get(task.project_id)
    }

    /// Projects for the selector, in server list order.
    pub fn project_options(&self) -> &[Project] {
        self.projects.records()
    }

    /// Start an inline edit of `id`, seeding the draft from the cache.
    pub fn begin_edit(&mut self, id: TaskId) -> Result<()> {
        match self.cache.get(id) {
            Some(record) => self.session.begin(record)?,
            None => {
                return Err(Error::Cache(CacheError::Missing { id: id.to_string() }));
            }
        }
        self.errors.clear();
        Ok(())
    }

    /// Apply one field mutation to the active draft. Status flips go
    /// through `TaskFields::set_unfinished`/`set_completed`, one
    /// transition each.
    pub fn edit(&mut self, id: TaskId, mutate: impl FnOnce(&mut TaskFields)) -> Result<()> {
        self.session.edit(id, mutate)?;
        Ok(())
    }

    /// Discard the draft; the cache entry is untouched.
    pub fn cancel_edit(&mut self) -> Option<TaskId> {
        self.errors.clear();
        self.session.cancel()
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.session.active()
    }

    pub fn draft(&self) -> Option<&TaskFields> {
        self.session.draft()
    }

    /// Push the active draft to the store. The session retires only on
    /// a confirmed write; rejection and failure keep the draft intact.
    pub async fn save_edit(&mut self, id: TaskId) -> Result<SubmitOutcome<Task>> {
        let fields = match self.session.draft_for(id) {
            Some(draft) => draft.clone(),
            None => {
                return Err(Error::Edit(EditError::NotEditing {
                    requested: id.to_string(),
                }));
            }
        };
        let outcome = self
            .submit(Mutation::Update { id, fields }, "Error updating task")
            .await?;
        match &outcome {
            SubmitOutcome::Applied(_) => {
                self.session.complete(id);
                self.errors.clear();
            }
            SubmitOutcome::Rejected(errors) => self.errors = errors.clone(),
            SubmitOutcome::Stale => {}
        }
        Ok(outcome)
    }

    /// Mutate the staged new-task draft.
    pub fn stage(&mut self, mutate: impl FnOnce(&mut TaskFields)) {
        mutate(&mut self.staged);
    }

    pub fn staged(&self) -> &TaskFields {
        &self.staged
    }

    /// Create from the staged draft; a confirmed create resets the
    /// stage for the next entry.
    pub async fn create_staged(&mut self) -> Result<SubmitOutcome<Task>> {
        let fields = self.staged.clone();
        let outcome = self
            .submit(Mutation::Create(fields), "Error creating task")
            .await?;
        match &outcome {
            SubmitOutcome::Applied(_) => {
                self.staged = TaskFields::draft();
                self.errors.clear();
            }
            SubmitOutcome::Rejected(errors) => self.errors = errors.clone(),
            SubmitOutcome::Stale => {}
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: TaskId) -> Result<SubmitOutcome<Task>> {
        let outcome = self
            .submit(Mutation::Delete(id), "Error deleting task")
            .await?;
        if matches!(outcome, SubmitOutcome::Applied(_)) && self.session.is_editing(id) {
            self.session.cancel();
        }
        Ok(outcome)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    async fn submit(
        &mut self,
        mutation: Mutation<Task>,
        failure: &str,
    ) -> Result<SubmitOutcome<Task>> {
        let token = self.coordinator.view().token();
        match self.coordinator.submit(token, &mut self.cache, mutation).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                if matches!(err, Error::Remote(_)) {
                    self.notifier.notify(NoticeLevel::Error, failure);
                }
                Err(err)
            }
        }
    }
}
