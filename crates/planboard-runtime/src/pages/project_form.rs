use crate::coordinator::{Mutation, MutationCoordinator, SubmitOutcome};
use crate::error::{Error, Result};
use crate::flight::FlightTable;
use crate::notify::{NoticeLevel, Notifier};
use crate::view::ViewInstance;
use planboard_client::RecordClient;
use planboard_engine::FieldErrors;
use planboard_types::{Project, ProjectFields, ProjectId, Record, time};
use std::sync::Arc;

/// The standalone project form: creates a new project, or edits an
/// existing one loaded by id. The form owns its fields directly; there
/// is no table cache behind it, and field errors from a rejected
/// submission land here for display next to their inputs.
pub struct ProjectFormController {
    client: Arc<dyn RecordClient<Project>>,
    coordinator: MutationCoordinator<Project>,
    notifier: Arc<dyn Notifier>,
    fields: ProjectFields,
    editing: Option<ProjectId>,
    errors: FieldErrors,
}

impl ProjectFormController {
    pub(crate) fn new(
        client: Arc<dyn RecordClient<Project>>,
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
            coordinator,
            notifier,
            fields: ProjectFields::draft(),
            editing: None,
            errors: FieldErrors::default(),
        }
    }

    /// Load an existing project into the form for editing. Renews the
    /// view generation, so an earlier load still in flight cannot
    /// clobber these fields when it lands.
    pub async fn load(&mut self, id: ProjectId) -> Result<()> {
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

    pub fn edit(&mut self, mutate: impl FnOnce(&mut ProjectFields)) {
        mutate(&mut self.fields);
    }

    pub fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    pub fn editing(&self) -> Option<ProjectId> {
        self.editing
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
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
    pub async fn submit(&mut self) -> Result<SubmitOutcome<Project>> {
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
                    self.notifier.notify(NoticeLevel::Success, "Project updated");
                } else {
                    self.notifier.notify(NoticeLevel::Success, "New project added");
                    self.fields = ProjectFields::draft();
                }
            }
            SubmitOutcome::Rejected(errors) => self.errors = errors.clone(),
            SubmitOutcome::Stale => {}
        }
        Ok(outcome)
    }
}
