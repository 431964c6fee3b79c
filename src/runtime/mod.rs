//! Single-writer session runtime and event stream APIs.

/// Event stream types emitted by the session loop.
pub mod events;
/// Handle and session loop implementation.
pub mod handle;
