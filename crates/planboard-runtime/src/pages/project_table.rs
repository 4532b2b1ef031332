use crate::coordinator::{Mutation, MutationCoordinator, SubmitOutcome};
use crate::error::{Error, Result};
use crate::flight::FlightTable;
use crate::notify::{NoticeLevel, Notifier};
use crate::view::ViewInstance;
use planboard_client::RecordClient;
use planboard_engine::{
    CacheError, CollectionCache, EditError, EditPolicy, FieldErrors, IdSearch, RowEditSession,
};
use planboard_types::{Project, ProjectFields, ProjectId};
use std::sync::Arc;

/// The project table page: collection cache, id search, one inline
/// row edit, and a staged draft for the new-project row.
pub struct ProjectTableController {
    client: Arc<dyn RecordClient<Project>>,
    coordinator: MutationCoordinator<Project>,
    notifier: Arc<dyn Notifier>,
    cache: CollectionCache<Project>,
    search: IdSearch,
    session: RowEditSession<Project>,
    staged: ProjectFields,
    errors: FieldErrors,
}

impl ProjectTableController {
    pub(crate) fn new(
        client: Arc<dyn RecordClient<Project>>,
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
            coordinator,
            notifier,
            cache: CollectionCache::new(),
            search: IdSearch::new(),
            session: RowEditSession::with_policy(policy),
            staged: ProjectFields::draft(),
            errors: FieldErrors::default(),
        }
    }

    /// Replace the cache from a full list fetch.
    ///
    /// Renews the view generation first, so any response still in
    /// flight from before the reload is discarded instead of applied.
    pub async fn load(&mut self) -> Result<()> {
        self.coordinator.view().renew();
        let token = self.coordinator.view().token();
        match self.client.list().await {
            Ok(records) => {
                if self.coordinator.view().is_current(token) {
                    self.cache.load(records);
                }
                Ok(())
            }
            Err(err) => {
                self.notifier.notify(NoticeLevel::Error, "Error fetching projects");
                Err(Error::Remote(err))
            }
        }
    }

    pub fn records(&self) -> &[Project] {
        self.cache.records()
    }

    /// Records in view under the current id search, in cache order.
    pub fn visible(&self) -> Vec<&Project> {
        self.search.compute(&self.cache)
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.search.set_term(term);
    }

    pub fn search_term(&self) -> &str {
        self.search.term()
    }

    /// Start an inline edit of `id`, seeding the draft from the cache.
    pub fn begin_edit(&mut self, id: ProjectId) -> Result<()> {
        match self.cache.get(id) {
            Some(record) => self.session.begin(record)?,
            None => {
                return Err(Error::Cache(CacheError::Missing { id: id.to_string() }));
            }
        }
        self.errors.clear();
        Ok(())
    }

    /// Apply one field mutation to the active draft.
    pub fn edit(&mut self, id: ProjectId, mutate: impl FnOnce(&mut ProjectFields)) -> Result<()> {
        self.session.edit(id, mutate)?;
        Ok(())
    }

    /// Discard the draft; the cache entry is untouched.
    pub fn cancel_edit(&mut self) -> Option<ProjectId> {
        self.errors.clear();
        self.session.cancel()
    }

    pub fn editing(&self) -> Option<ProjectId> {
        self.session.active()
    }

    pub fn draft(&self) -> Option<&ProjectFields> {
        self.session.draft()
    }

    /// Push the active draft to the store. The session retires only on
    /// a confirmed write; rejection and failure keep the draft intact.
    pub async fn save_edit(&mut self, id: ProjectId) -> Result<SubmitOutcome<Project>> {
        let fields = match self.session.draft_for(id) {
            Some(draft) => draft.clone(),
            None => {
                return Err(Error::Edit(EditError::NotEditing {
                    requested: id.to_string(),
                }));
            }
        };
        let outcome = self
            .submit(Mutation::Update { id, fields }, "Error updating project")
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

    /// Mutate the staged new-project draft.
    pub fn stage(&mut self, mutate: impl FnOnce(&mut ProjectFields)) {
        mutate(&mut self.staged);
    }

    pub fn staged(&self) -> &ProjectFields {
        &self.staged
    }

    /// Create from the staged draft; a confirmed create resets the
    /// stage for the next entry.
    pub async fn create_staged(&mut self) -> Result<SubmitOutcome<Project>> {
        let fields = self.staged.clone();
        let outcome = self
            .submit(Mutation::Create(fields), "Error creating project")
            .await?;
        match &outcome {
            SubmitOutcome::Applied(_) => {
                self.staged = ProjectFields::draft();
                self.errors.clear();
            }
            SubmitOutcome::Rejected(errors) => self.errors = errors.clone(),
            SubmitOutcome::Stale => {}
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: ProjectId) -> Result<SubmitOutcome<Project>> {
        let outcome = self
            .submit(Mutation::Delete(id), "Error deleting project")
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
        mutation: Mutation<Project>,
        failure: &str,
    ) -> Result<SubmitOutcome<Project>> {
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
