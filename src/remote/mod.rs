pub mod memory;

use tokio::sync::broadcast;

use crate::record::ProgressRecord;

/// Remote document store failure.
#[derive(Debug)]
pub enum RemoteError {
    /// Document encode/decode failure.
    Serde(serde_json::Error),
    /// The backing store could not be reached.
    Unavailable(String),
    /// Any other failure.
    Message(String),
}

impl From<serde_json::Error> for RemoteError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for remote document operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Capability interface over a remote document store: one progress document
/// per authenticated user, point read, full-overwrite point write, and a
/// change subscription.
///
/// Writes carry no transaction or lock; concurrent writers resolve by last
/// write wins and readers converge through [`RemoteDocs::watch`]. Any
/// document database can sit behind this trait. Implementations are
/// synchronous and driven via `spawn_blocking` from the session runtime.
pub trait RemoteDocs: Send {
    /// Reads the document for `user_id`, if one exists.
    fn get(&mut self, user_id: &str) -> RemoteResult<Option<ProgressRecord>>;
    /// Overwrites the document for `user_id` with `record`.
    fn set(&mut self, user_id: &str, record: &ProgressRecord) -> RemoteResult<()>;
    /// Subscribes to subsequent overwrites of `user_id`'s document.
    fn watch(&mut self, user_id: &str) -> RemoteResult<broadcast::Receiver<ProgressRecord>>;
}
