//! Session event stream payloads.

/// Events emitted from the single-writer session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A record finished loading for the active identity.
    Loaded,
    /// A local mutation was applied and mirrored to local storage.
    Updated,
    /// A remote-originated snapshot replaced the in-memory record.
    RemoteApplied,
    /// A debounced remote push left the session.
    SyncStarted,
    /// The remote document reached the last pushed state.
    Synced,
    /// A remote push failed; the session continues local-only.
    SyncFailed,
}
