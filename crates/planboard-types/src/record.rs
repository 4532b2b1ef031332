use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::hash::Hash;

/// One synchronized entity kind.
///
/// Implementations pair a server-assigned identity with the
/// client-mutable field subset (`Fields`) that edit drafts shadow and
/// write bodies carry. `ENTITY` is the URL path segment of the
/// entity's collection; `LABEL` is the capitalized noun used in
/// operator-facing notices.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync;
    type Fields: RecordFields;

    const ENTITY: &'static str;
    const LABEL: &'static str;

    /// Server-assigned identity of this record
    fn id(&self) -> Self::Id;

    /// Deep copy of the client-mutable fields, the seed for edit drafts
    fn fields(&self) -> Self::Fields;
}

/// The client-mutable subset of a record: identity and server-assigned
/// timestamps are never part of this type, so they can never be
/// transmitted by a write.
pub trait RecordFields: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Strip query-injection metacharacters from free-text fields
    fn sanitize(&mut self);

    /// Truncate date-valued fields below wire precision
    fn normalize_timestamps(&mut self);
}
