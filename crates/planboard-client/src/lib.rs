// Client module - The remote record boundary
// Wire-level CRUD over HTTP; decodes failures into the remote error
// taxonomy and never interprets payloads beyond that.

pub mod error;
pub mod http;
pub mod traits;

pub use error::{RemoteError, Result};
pub use http::HttpRecordClient;
pub use traits::RecordClient;
