// Engine module - Pure table-state logic (caches, filters, edit sessions)
// This layer sits between the record domain (types) and the runtime's
// remote orchestration; nothing here performs IO.

pub mod cache;
pub mod filter;
pub mod form;
pub mod session;
pub mod timeline;

pub use cache::{CacheError, CollectionCache};
pub use filter::{IdSearch, RelationFilter};
pub use form::FieldErrors;
pub use session::{EditError, EditPolicy, RowEditSession};
pub use timeline::{TimelineEntry, TimelinePhase, build_timeline};
