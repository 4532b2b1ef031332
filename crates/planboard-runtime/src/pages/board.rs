use crate::config::Config;
use crate::flight::FlightTable;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::pages::{
    ProjectFormController, ProjectTableController, TaskFormController, TaskTableController,
};
use planboard_client::{HttpRecordClient, RecordClient};
use planboard_engine::EditPolicy;
use planboard_types::{Project, Task};
use std::sync::Arc;

/// Entry point handing out page controllers over one remote store.
///
/// Each call constructs a fresh controller owning its own cache, edit
/// session, and view generation: controller lifetime is one mounted
/// page, and navigation away is a drop. The single-flight registry is
/// shared, so a submission in one page blocks a duplicate against the
/// same record anywhere else.
pub struct Planboard {
    projects: Arc<dyn RecordClient<Project>>,
    tasks: Arc<dyn RecordClient<Task>>,
    notifier: Arc<dyn Notifier>,
    flights: FlightTable,
    edit_policy: EditPolicy,
    config: Config,
}

impl Planboard {
    /// Connect to the configured store, reporting notices to stderr.
    pub fn open(config: Config) -> anyhow::Result<Self> {
        Self::open_with(config, Arc::new(ConsoleNotifier))
    }

    pub fn open_with(config: Config, notifier: Arc<dyn Notifier>) -> anyhow::Result<Self> {
        let base_url = config.effective_base_url();
        let projects: HttpRecordClient<Project> =
            HttpRecordClient::new(base_url.as_str(), config.request_timeout())?;
        // Both entity clients share one connection pool.
        let tasks: HttpRecordClient<Task> =
            HttpRecordClient::with_client(projects.http_client(), base_url.as_str());
        Ok(Self {
            edit_policy: config.edit_policy,
            projects: Arc::new(projects),
            tasks: Arc::new(tasks),
            notifier,
            flights: FlightTable::new(),
            config,
        })
    }

    /// Wire the controllers onto explicit collaborators.
    pub fn assemble(
        projects: Arc<dyn RecordClient<Project>>,
        tasks: Arc<dyn RecordClient<Task>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            projects,
            tasks,
            notifier,
            flights: FlightTable::new(),
            edit_policy: EditPolicy::default(),
            config: Config::default(),
        }
    }

    pub fn with_edit_policy(mut self, policy: EditPolicy) -> Self {
        self.edit_policy = policy;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project_table(&self) -> ProjectTableController {
        ProjectTableController::new(
            self.projects.clone(),
            self.notifier.clone(),
            self.flights.clone(),
            self.edit_policy,
        )
    }

    pub fn task_table(&self) -> TaskTableController {
        TaskTableController::new(
            self.tasks.clone(),
            self.projects.clone(),
            self.notifier.clone(),
            self.flights.clone(),
            self.edit_policy,
        )
    }

    pub fn project_form(&self) -> ProjectFormController {
        ProjectFormController::new(
            self.projects.clone(),
            self.notifier.clone(),
            self.flights.clone(),
        )
    }

    pub fn task_form(&self) -> TaskFormController {
        TaskFormController::new(
            self.tasks.clone(),
            self.projects.clone(),
            self.notifier.clone(),
            self.flights.clone(),
        )
    }
}
