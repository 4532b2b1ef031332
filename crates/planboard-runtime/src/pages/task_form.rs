use crate::coordinator::{Mutation, MutationCoordinator, SubmitOutcome};
use crate::error::{Error, Result};
use crate::flight::FlightTable;
use crate::notify::{NoticeLevel, Notifier};
use crate::view::ViewInstance;
use planboard_client::RecordClient;
use planboard_engine::{CollectionCache, FieldErrors};
use planboard_types::{Project, ProjectId, Record, Task, TaskFields, TaskId, time};
use std::sync::Arc;

/// The standalone task form: creates a new task, or edits an existing
/// one loaded by id. Carries a mirror of the project collection for
/// the parent selector and its detail panel.
pub struct TaskFormController {
    client: Arc<dyn RecordClient<Task>>,
    projects_client: Arc<dyn RecordClient<Project>>,
    coordinator: MutationCoordinator<Task>,
    notifier: Arc<dyn Notifier>,
    projects: CollectionCache<Project>,
    fields: TaskFields,
    editing: Option<TaskId>,
    errors: FieldErrors,
}

impl TaskFormController {
    pub(crate) fn new(
        client: Arc<dyn RecordClient<Task>>,
        projects_client: Arc<dyn RecordClient<Project>>,
        notifier: Arc<dyn Notifier>,
        flights: FlightTable,
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
            projects: CollectionCache::new(),
            fields: TaskFields::draft(),
            editing: None,
            errors: FieldErrors::default(),
        }
    }

    /// Fetch the project collection for the parent selector.
    pub async fn load_options(&mut self) -> Result<()> {
        match self.projects_client.list().await {
            Ok(records) => {
                self.projects.load(records);
                Ok(())
            }
            Err(err) => Err(Error::Remote(err)),
        }
    }

    /// Load an existing task into the form for editing. Renews the
    /// view generation, so an earlier load still in flight cannot
    /// clobber these fields when it lands.
    pub async fn load(&mut self, id: TaskId) -> Result<()> {
        self.coordinator.view().renew();
        let token = self.coordinator.view().token();
        match self.client.get(id).await {
            Ok(record) => {
                if self.coordinator.view().is_current(token) {
                    self.fields = record.fields();
                    self.editing = Some(id);
                    self.errors.clear();
                }
                Ok(())
            }
            Err(err) => Err(Error::Remote(err)),
        }
    }

    pub fn edit(&mut self, mutate: impl FnOnce(&mut TaskFields)) {
        mutate(&mut self.fields);
    }

    pub fn fields(&self) -> &TaskFields {
        &self.fields
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Projects for the parent selector, in server list order.
    pub fn project_options(&self) -> &[Project] {
        self.projects.records()
    }

    pub fn select_project(&mut self, id: ProjectId) {
        self.fields.project_id = id;
    }

    /// The project the form currently points at, for the detail panel
    /// under the selector. `None` while nothing valid is selected.
    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.fields.project_id)
    }

    /// Start date at the minute-precision input boundary.
    pub fn start_input(&self) -> String {
        time::to_input(self.fields.start_at)
    }

    /// End date at the input boundary, if set.
    pub fn end_input(&self) -> Option<String> {
        self.fields.end_at.map(time::to_input)
    }

    /// Push the form to the store: create when no record is loaded,
    /// update otherwise. A confirmed write registers its own notice
    /// and, for a create, resets the form for the next entry.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<Task>> {
        let token = self.coordinator.view().token();
        let mutation = match self.editing {
            Some(id) => Mutation::Update {
                id,
                fields: self.fields.clone(),
            },
            None => Mutation::Create(self.fields.clone()),
        };
        let outcome = self.coordinator.dispatch(token, mutation).await?;
        match &outcome {
            SubmitOutcome::Applied(_) => {
                self.errors.clear();
                if self.editing.is_some() {
                    self.notifier.notify(NoticeLevel::Success, "Task updated");
                } else {
                    self.notifier.notify(NoticeLevel::Success, "New task added");
                    self.fields = TaskFields::draft();
                }
            }
            SubmitOutcome::Rejected(errors) => self.errors = errors.clone(),
            SubmitOutcome::Stale => {}
        }
        Ok(outcome)
    }
}
