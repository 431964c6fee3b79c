//! Local-first progress tracking with debounced remote replication.
//!
//! A session owns one [`record::ProgressRecord`] — lectures completed, DSA
//! question statuses, per-day activity counters, notes, and todos. Every
//! mutation is mirrored synchronously to durable local storage; authenticated
//! sessions additionally replicate the record to a remote document store with
//! a debounced, last-write-wins push and apply remote-originated snapshots
//! through a live subscription.
//!
//! # Examples
//!
//! Guest session, local storage only:
//! ```
//! use preptrack::{
//!     persist::sqlite::SqliteLocalStore,
//!     runtime::handle::{SessionConfig, spawn_session},
//!     types::Identity,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let local = SqliteLocalStore::open_in_memory().expect("open sqlite");
//! let session = spawn_session(Box::new(local), None, SessionConfig::default());
//!
//! session.set_identity(Identity::Guest).await.expect("load");
//! session.toggle_lecture(1).await.expect("toggle");
//! assert!(session.lecture_completed(1).await.expect("query"));
//!
//! session.shutdown().await.expect("shutdown");
//! # }
//! ```
//!
//! Authenticated session replicating to a remote document store:
//! ```
//! use preptrack::{
//!     persist::sqlite::SqliteLocalStore,
//!     remote::memory::MemoryRemote,
//!     runtime::handle::{SessionConfig, spawn_session},
//!     types::{DsaStatus, Identity, UserProfile},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let local = SqliteLocalStore::open_in_memory().expect("open sqlite");
//! let remote = MemoryRemote::new();
//! let session = spawn_session(
//!     Box::new(local),
//!     Some(Box::new(remote.clone())),
//!     SessionConfig::default(),
//! );
//!
//! let ada = UserProfile::new("u-1", "Ada", "ada@example.com");
//! session.set_identity(Identity::User(ada)).await.expect("load");
//! session.update_dsa_status(7, DsaStatus::Solved).await.expect("update");
//! session.sync_now().await.expect("sync");
//!
//! let doc = remote.document("u-1").expect("document");
//! assert_eq!(doc.dsa_progress.get(&7), Some(&DsaStatus::Solved));
//!
//! session.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Static lecture and question catalogs.
pub mod catalog;
/// In-memory progress store and calendar helpers.
pub mod core;
/// Durable local key-value storage and SQLite implementation.
pub mod persist;
/// Progress record document and JSON codec.
pub mod record;
/// Remote document store interface and in-memory implementation.
pub mod remote;
/// Single-writer session runtime and event stream.
pub mod runtime;
/// Shared primitive types, status, and identity.
pub mod types;
