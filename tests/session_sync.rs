use std::time::Duration;

use tokio::sync::broadcast;

use preptrack::{
    persist::{LocalStore, sqlite::SqliteLocalStore},
    record::{ProgressRecord, encode_record},
    remote::{RemoteDocs, RemoteError, RemoteResult, memory::MemoryRemote},
    runtime::{
        events::SessionEvent,
        handle::{SessionConfig, SessionHandle, spawn_session},
    },
    types::{DsaStatus, Identity, UserProfile},
};

fn user(id: &str) -> Identity {
    Identity::User(UserProfile::new(id, "Test User", "test@example.com"))
}

fn fast_config() -> SessionConfig {
    SessionConfig {
        debounce_ms: 100,
        ..SessionConfig::default()
    }
}

fn session_with(remote: &MemoryRemote, config: SessionConfig) -> SessionHandle {
    let local = SqliteLocalStore::open_in_memory().expect("open sqlite");
    spawn_session(Box::new(local), Some(Box::new(remote.clone())), config)
}

async fn wait_for_event(
    sub: &mut broadcast::Receiver<SessionEvent>,
    wanted: SessionEvent,
) -> bool {
    for _ in 0..32 {
        let recv = tokio::time::timeout(Duration::from_secs(2), sub.recv()).await;
        match recv {
            Ok(Ok(event)) if event == wanted => return true,
            Ok(Ok(_)) => {}
            Ok(Err(broadcast::error::RecvError::Lagged(_))) => {}
            _ => return false,
        }
    }
    false
}

/// Remote store that is always unreachable.
struct DownRemote;

impl RemoteDocs for DownRemote {
    fn get(&mut self, _user_id: &str) -> RemoteResult<Option<ProgressRecord>> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }

    fn set(&mut self, _user_id: &str, _record: &ProgressRecord) -> RemoteResult<()> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }

    fn watch(
        &mut self,
        _user_id: &str,
    ) -> RemoteResult<broadcast::Receiver<ProgressRecord>> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }
}

/// Remote store whose writes take a while, for observing the syncing flag.
struct SlowRemote {
    inner: MemoryRemote,
    delay: Duration,
}

impl RemoteDocs for SlowRemote {
    fn get(&mut self, user_id: &str) -> RemoteResult<Option<ProgressRecord>> {
        self.inner.get(user_id)
    }

    fn set(&mut self, user_id: &str, record: &ProgressRecord) -> RemoteResult<()> {
        std::thread::sleep(self.delay);
        self.inner.set(user_id, record)
    }

    fn watch(
        &mut self,
        user_id: &str,
    ) -> RemoteResult<broadcast::Receiver<ProgressRecord>> {
        self.inner.watch(user_id)
    }
}

#[tokio::test]
async fn guest_session_never_touches_remote() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());

    session.set_identity(Identity::Guest).await.expect("load");
    session.toggle_lecture(1).await.expect("toggle");
    session.update_dsa_status(2, DsaStatus::Solved).await.expect("update");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(remote.write_count("guest"), 0);
    assert!(remote.document("guest").is_none());

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn rapid_updates_coalesce_into_one_push() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());
    session.set_identity(user("u1")).await.expect("load");

    // Fresh account: the load itself wrote the initial document.
    assert_eq!(remote.write_count("u1"), 1);

    session.toggle_lecture(1).await.expect("u1 toggle");
    session.toggle_lecture(2).await.expect("u2 toggle");
    session.update_dsa_status(3, DsaStatus::Solved).await.expect("u3 update");

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(remote.write_count("u1"), 2);

    let doc = remote.document("u1").expect("document");
    assert_eq!(doc, session.record().await.expect("record"));
    assert!(doc.completed_lectures.contains(&1));
    assert!(doc.completed_lectures.contains(&2));
    assert_eq!(doc.dsa_progress.get(&3), Some(&DsaStatus::Solved));

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn first_sign_in_migrates_guest_progress() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());

    session.set_identity(Identity::Guest).await.expect("guest load");
    session.toggle_lecture(1).await.expect("toggle");
    session.toggle_lecture(2).await.expect("toggle");
    let guest_record = session.record().await.expect("record");

    session.set_identity(user("u1")).await.expect("user load");

    assert_eq!(session.record().await.expect("record"), guest_record);
    assert_eq!(remote.document("u1").expect("document"), guest_record);
    assert_eq!(remote.write_count("u1"), 1);

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn first_sign_in_without_guest_progress_starts_fresh() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());

    session.set_identity(Identity::Guest).await.expect("guest load");
    // A note alone is not migration-worthy progress.
    session
        .update_daily_note("2026-08-28".parse().expect("date"), "just notes")
        .await
        .expect("note");

    session.set_identity(user("u1")).await.expect("user load");

    assert_eq!(remote.document("u1").expect("document"), ProgressRecord::default());
    assert_eq!(session.record().await.expect("record"), ProgressRecord::default());

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn existing_remote_document_wins_over_guest_data() {
    let remote = MemoryRemote::new();
    let mut cloud = ProgressRecord::default();
    cloud.completed_lectures.insert(9);
    remote.publish("u1", cloud.clone());

    let session = session_with(&remote, fast_config());
    session.set_identity(Identity::Guest).await.expect("guest load");
    session.toggle_lecture(1).await.expect("toggle");

    session.set_identity(user("u1")).await.expect("user load");
    assert_eq!(session.record().await.expect("record"), cloud);

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn unreachable_remote_degrades_to_local_session() {
    let mut local = SqliteLocalStore::open_in_memory().expect("open sqlite");
    let mut seeded = ProgressRecord::default();
    seeded.completed_lectures.insert(4);
    local
        .write("preptrack-u1", &encode_record(&seeded).expect("encode"))
        .expect("seed");

    let session = spawn_session(Box::new(local), Some(Box::new(DownRemote)), fast_config());
    let mut events = session.subscribe();

    session.set_identity(user("u1")).await.expect("load");
    assert_eq!(session.record().await.expect("record"), seeded);

    // Local mutations keep working; the failed push surfaces as an event,
    // never as a command error.
    session.toggle_lecture(5).await.expect("toggle");
    session.sync_now().await.expect("sync_now");
    assert!(wait_for_event(&mut events, SessionEvent::SyncFailed).await);
    assert!(session.lecture_completed(5).await.expect("query"));

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn remote_changes_propagate_to_other_sessions() {
    let remote = MemoryRemote::new();

    let writer = session_with(&remote, fast_config());
    writer.set_identity(user("u1")).await.expect("writer load");

    let reader = session_with(&remote, fast_config());
    reader.set_identity(user("u1")).await.expect("reader load");
    let mut reader_events = reader.subscribe();

    writer.toggle_lecture(11).await.expect("toggle");
    writer.sync_now().await.expect("sync");

    assert!(wait_for_event(&mut reader_events, SessionEvent::RemoteApplied).await);
    assert_eq!(
        reader.record().await.expect("record"),
        writer.record().await.expect("record")
    );

    writer.shutdown().await.expect("shutdown");
    reader.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn identity_switch_swaps_records_and_cancels_pending_push() {
    let remote = MemoryRemote::new();
    let mut cloud = ProgressRecord::default();
    cloud.completed_lectures.insert(9);
    remote.publish("u1", cloud.clone());

    let session = session_with(&remote, fast_config());
    session.set_identity(Identity::Guest).await.expect("guest load");
    session.toggle_lecture(1).await.expect("toggle");

    session.set_identity(user("u1")).await.expect("user load");
    assert_eq!(session.record().await.expect("record"), cloud);

    // Mutate as the user, then switch away before the debounce fires.
    session.toggle_lecture(10).await.expect("toggle");
    session.set_identity(Identity::Guest).await.expect("guest reload");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(remote.write_count("u1"), 1);

    let guest = session.record().await.expect("record");
    assert!(guest.completed_lectures.contains(&1));
    assert!(!guest.completed_lectures.contains(&9));

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn shutdown_flushes_pending_push() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());
    session.set_identity(user("u1")).await.expect("load");

    session.toggle_lecture(3).await.expect("toggle");
    let record = session.record().await.expect("record");
    session.shutdown().await.expect("shutdown");

    assert_eq!(remote.document("u1").expect("document"), record);
    assert_eq!(remote.write_count("u1"), 2);
}

#[tokio::test]
async fn syncing_flag_tracks_in_flight_push() {
    let remote = MemoryRemote::new();
    let slow = SlowRemote {
        inner: remote.clone(),
        delay: Duration::from_millis(300),
    };
    let local = SqliteLocalStore::open_in_memory().expect("open sqlite");
    let session = spawn_session(Box::new(local), Some(Box::new(slow)), fast_config());
    let mut events = session.subscribe();

    session.set_identity(user("u1")).await.expect("load");
    session.toggle_lecture(1).await.expect("toggle");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(session.syncing().await.expect("syncing"));

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!session.syncing().await.expect("syncing"));
    assert!(wait_for_event(&mut events, SessionEvent::Synced).await);

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn load_and_update_emit_events() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());
    let mut events = session.subscribe();

    session.set_identity(Identity::Guest).await.expect("load");
    assert!(wait_for_event(&mut events, SessionEvent::Loaded).await);

    session.toggle_lecture(1).await.expect("toggle");
    assert!(wait_for_event(&mut events, SessionEvent::Updated).await);

    session.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn reset_clears_record_and_replicates() {
    let remote = MemoryRemote::new();
    let session = session_with(&remote, fast_config());
    session.set_identity(user("u1")).await.expect("load");

    session.toggle_lecture(1).await.expect("toggle");
    session.update_dsa_status(2, DsaStatus::Solved).await.expect("update");
    session.sync_now().await.expect("sync");
    assert!(remote.document("u1").expect("document").has_progress());

    session.reset().await.expect("reset");
    session.sync_now().await.expect("sync");

    assert_eq!(session.record().await.expect("record"), ProgressRecord::default());
    assert_eq!(remote.document("u1").expect("document"), ProgressRecord::default());

    session.shutdown().await.expect("shutdown");
}
