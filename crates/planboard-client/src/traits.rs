use crate::error::Result;
use async_trait::async_trait;
use planboard_types::Record;

/// Remote CRUD access to one entity's collection
///
/// Responsibilities:
/// - Carry the canonical wire representation in both directions
/// - Map unsuccessful responses onto the remote error taxonomy
/// - Never interpret payloads beyond decoding them
///
/// One instance serves one entity; implementations must be shareable
/// behind `Arc`.
#[async_trait]
pub trait RecordClient<R: Record>: Send + Sync {
    /// Fetch the full collection, in server list order
    async fn list(&self) -> Result<Vec<R>>;

    /// Fetch one record by identity
    async fn get(&self, id: R::Id) -> Result<R>;

    /// Create a record from client-mutable fields; the response
    /// carries the server-assigned identity and timestamps
    async fn create(&self, fields: &R::Fields) -> Result<R>;

    /// Replace a record's client-mutable fields; the response is the
    /// canonical updated record
    async fn update(&self, id: R::Id, fields: &R::Fields) -> Result<R>;

    /// Delete by identity; success carries no content
    async fn delete(&self, id: R::Id) -> Result<()>;
}
