//! In-memory progress store and calendar helpers.

/// Day arithmetic shared by the store and its callers.
pub mod calendar;
/// Authoritative progress record store.
pub mod store;
