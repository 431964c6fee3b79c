pub mod sqlite;

/// Local storage failure.
#[derive(Debug)]
pub enum LocalError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Payload encode/decode failure.
    Serde(serde_json::Error),
    /// Any other failure.
    Message(String),
}

impl From<rusqlite::Error> for LocalError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for LocalError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for local storage operations.
pub type LocalResult<T> = Result<T, LocalError>;

/// Durable string key-value store mirroring the active progress document.
///
/// Keys are `"<namespace>-<user-id-or-guest>"`; payloads are full JSON
/// documents. Implementations are driven from the session loop through
/// `spawn_blocking`, one call at a time, so writes observe update order.
pub trait LocalStore: Send {
    /// Reads the payload stored under `key`, if any.
    fn read(&mut self, key: &str) -> LocalResult<Option<String>>;
    /// Writes `payload` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, payload: &str) -> LocalResult<()>;
}
