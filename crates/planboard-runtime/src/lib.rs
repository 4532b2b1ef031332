//! Page controllers and orchestration for the planboard client.
//!
//! This crate is the embedding surface of the planboard workspace: it
//! wires the engine's table-state logic and the HTTP record client
//! into page-scoped controllers behind the [`Planboard`] facade. A
//! controller owns its caches and edit state for the lifetime of one
//! mounted page; presentation stays with the embedding application,
//! which renders controller state and forwards operator input.
//!
//! # Quickstart
//!
//! ```no_run
//! use planboard_runtime::{Config, Planboard};
//! use planboard_types::ProjectSelection;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let board = Planboard::open(Config::default())?;
//!
//! // Mount the task table: one controller per page visit.
//! let mut tasks = board.task_table();
//! tasks.load().await?;
//!
//! // Scope the view to one parent project.
//! tasks.select(ProjectSelection::parse("7")?);
//! for task in tasks.visible() {
//!     println!("#{} {}", task.task_id, task.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! A facade over:
//! - `planboard-types`: record domain model and wire contract
//! - `planboard-engine`: caches, filters, edit sessions (no IO)
//! - `planboard-client`: the HTTP boundary to the remote store

pub mod config;
pub mod coordinator;
pub mod error;
pub mod flight;
pub mod notify;
pub mod pages;
pub mod view;

// Re-export the types embedders handle through this crate's API
pub use planboard_client::RemoteError;
pub use planboard_engine::{EditPolicy, FieldErrors, TimelineEntry, TimelinePhase};

pub use config::{BASE_URL_ENV, Config};
pub use coordinator::{Applied, Mutation, MutationCoordinator, SubmitOutcome};
pub use error::{Error, Result};
pub use flight::{FlightGuard, FlightTable};
pub use notify::{ConsoleNotifier, NoticeLevel, Notifier, NullNotifier};
pub use pages::{
    Planboard, ProjectFormController, ProjectTableController, TaskFormController,
    TaskTableController,
};
pub use view::{ViewInstance, ViewToken};
