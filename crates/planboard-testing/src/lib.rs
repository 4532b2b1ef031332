//! Testing infrastructure for planboard integration tests.
//!
//! - `remote`: in-memory `RecordClient` with scriptable failures and
//!   a call log
//! - `notify`: a notifier that records every notice for assertion
//! - `fixtures`: sample records and field drafts on a fixed clock

pub mod fixtures;
pub mod notify;
pub mod remote;

pub use notify::RecordingNotifier;
pub use remote::{InMemoryRemote, Materialize, Op, ScriptedFailure};
