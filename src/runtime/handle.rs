use std::sync::Arc;

use chrono::NaiveDate;
use tokio::{
    sync::{Mutex, broadcast, mpsc, oneshot},
    time::{Duration, Instant, sleep_until},
};
use tracing::warn;

use crate::{
    core::store::{DayActivity, ProgressStore},
    persist::LocalStore,
    record::{ProgressRecord, decode_record, encode_record},
    remote::{RemoteDocs, RemoteError, RemoteResult},
    types::{DsaStatus, Identity, LectureId, QuestionId, TodoId},
};

use super::events::SessionEvent;

/// Session runtime failure surfaced to callers.
///
/// Storage and remote failures never appear here: they degrade to local-only
/// semantics inside the loop. The only caller-visible failure is a torn-down
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session loop is gone.
    ChannelClosed,
}

/// Tuning knobs for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Local key prefix; documents live under `"<namespace>-<identity>"`.
    pub namespace: String,
    /// Quiet period after the last mutation before the remote push is issued.
    pub debounce_ms: u64,
    /// Capacity of the session event stream.
    pub event_capacity: usize,
    /// Bound of the remote push queue.
    pub push_queue_bound: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            namespace: "preptrack".to_string(),
            debounce_ms: 1000,
            event_capacity: 256,
            push_queue_bound: 16,
        }
    }
}

/// Cloneable handle to a spawned session loop.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl Clone for SessionHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

type Transform = Box<dyn FnOnce(ProgressRecord) -> ProgressRecord + Send>;

enum Command {
    SetIdentity {
        identity: Identity,
        resp: oneshot::Sender<()>,
    },
    Update {
        transform: Transform,
        resp: oneshot::Sender<()>,
    },
    SetStartDate {
        date: Option<NaiveDate>,
        resp: oneshot::Sender<()>,
    },
    ToggleLecture {
        id: LectureId,
        resp: oneshot::Sender<()>,
    },
    UpdateDsaStatus {
        question: QuestionId,
        status: DsaStatus,
        resp: oneshot::Sender<()>,
    },
    Reset {
        resp: oneshot::Sender<()>,
    },
    UpdateDailyNote {
        date: NaiveDate,
        text: String,
        resp: oneshot::Sender<()>,
    },
    AddDailyTodo {
        date: NaiveDate,
        text: String,
        resp: oneshot::Sender<TodoId>,
    },
    ToggleDailyTodo {
        date: NaiveDate,
        todo: TodoId,
        resp: oneshot::Sender<()>,
    },
    DeleteDailyTodo {
        date: NaiveDate,
        todo: TodoId,
        resp: oneshot::Sender<()>,
    },
    Record {
        resp: oneshot::Sender<ProgressRecord>,
    },
    LectureCompleted {
        id: LectureId,
        resp: oneshot::Sender<bool>,
    },
    DsaStatusOf {
        question: QuestionId,
        resp: oneshot::Sender<DsaStatus>,
    },
    SolvedCount {
        resp: oneshot::Sender<usize>,
    },
    WeeklyActivity {
        resp: oneshot::Sender<Vec<DayActivity>>,
    },
    Syncing {
        resp: oneshot::Sender<bool>,
    },
    SyncNow {
        resp: oneshot::Sender<()>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

enum PushMsg {
    Write {
        user_id: String,
        record: ProgressRecord,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

enum PushOutcome {
    Synced,
    Failed,
}

struct SessionState {
    store: ProgressStore,
    identity: Identity,
    ready: bool,
    dirty_remote: bool,
    push_deadline: Instant,
    in_flight: u32,
}

struct LoopCtx {
    local: Arc<Mutex<Box<dyn LocalStore>>>,
    remote: Option<Arc<Mutex<Box<dyn RemoteDocs>>>>,
    push_tx: Option<mpsc::Sender<PushMsg>>,
    events_tx: broadcast::Sender<SessionEvent>,
    config: SessionConfig,
    idle_tx: broadcast::Sender<ProgressRecord>,
}

/// Spawns the single-writer session loop and returns its handle.
///
/// The loop owns the [`ProgressStore`]; every mutation mirrors the record to
/// `local` in call order, and — for authenticated identities once loading has
/// finished — schedules a debounced push to `remote`. Passing `None` for
/// `remote` yields a purely local session.
pub fn spawn_session(
    local: Box<dyn LocalStore>,
    remote: Option<Box<dyn RemoteDocs>>,
    config: SessionConfig,
) -> SessionHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(256);
    let (events_tx, _) = broadcast::channel::<SessionEvent>(config.event_capacity);

    let local = Arc::new(Mutex::new(local));
    let remote = remote.map(|r| Arc::new(Mutex::new(r)));

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<PushOutcome>();
    let push_tx = remote.as_ref().map(|remote| {
        let (push_tx, push_rx) = mpsc::channel::<PushMsg>(config.push_queue_bound);
        spawn_push_worker(Arc::clone(remote), push_rx, outcome_tx.clone());
        push_tx
    });
    drop(outcome_tx);

    // Receiver parked here between subscriptions; the sender stays alive in
    // the ctx so an unsubscribed session pends instead of spinning on Closed.
    let (idle_tx, idle_rx) = broadcast::channel::<ProgressRecord>(1);

    let ctx = LoopCtx {
        local,
        remote,
        push_tx,
        events_tx: events_tx.clone(),
        config,
        idle_tx,
    };

    tokio::spawn(async move {
        let mut state = SessionState {
            store: ProgressStore::new(),
            identity: Identity::Anonymous,
            ready: false,
            dirty_remote: false,
            push_deadline: Instant::now(),
            in_flight: 0,
        };
        let mut sub_rx = idle_rx;
        let has_worker = ctx.push_tx.is_some();

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    let done = handle_command(cmd, &mut state, &mut sub_rx, &mut outcome_rx, &ctx).await;
                    if done {
                        break;
                    }
                }
                outcome = outcome_rx.recv(), if has_worker && state.in_flight > 0 => {
                    if let Some(outcome) = outcome {
                        note_outcome(&mut state, outcome, &ctx.events_tx);
                    }
                }
                _ = sleep_until(state.push_deadline), if state.dirty_remote => {
                    flush_remote(&mut state, &ctx).await;
                }
                changed = sub_rx.recv() => {
                    match changed {
                        Ok(record) => apply_remote(record, &mut state, &ctx).await,
                        Err(broadcast::error::RecvError::Lagged(_)) => {}
                        Err(broadcast::error::RecvError::Closed) => {
                            sub_rx = ctx.idle_tx.subscribe();
                        }
                    }
                }
            }
        }
    });

    SessionHandle { cmd_tx, events_tx }
}

impl SessionHandle {
    /// Subscribes to the session event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Switches the active identity and loads its record. Resolves once the
    /// session is ready; any pending remote push for the previous identity is
    /// discarded.
    pub async fn set_identity(&self, identity: Identity) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::SetIdentity { identity, resp })
            .await
    }

    /// Applies an arbitrary record transform.
    pub async fn update<F>(&self, transform: F) -> Result<(), SessionError>
    where
        F: FnOnce(ProgressRecord) -> ProgressRecord + Send + 'static,
    {
        self.roundtrip(|resp| Command::Update {
            transform: Box::new(transform),
            resp,
        })
        .await
    }

    /// Overwrites the program start date.
    pub async fn set_start_date(&self, date: Option<NaiveDate>) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::SetStartDate { date, resp })
            .await
    }

    /// Flips completion of a lecture.
    pub async fn toggle_lecture(&self, id: LectureId) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::ToggleLecture { id, resp })
            .await
    }

    /// Sets the status of a question.
    pub async fn update_dsa_status(
        &self,
        question: QuestionId,
        status: DsaStatus,
    ) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::UpdateDsaStatus {
            question,
            status,
            resp,
        })
        .await
    }

    /// Replaces the record with defaults everywhere the identity persists.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::Reset { resp }).await
    }

    /// Overwrites the note for a day.
    pub async fn update_daily_note(
        &self,
        date: NaiveDate,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        let text = text.into();
        self.roundtrip(|resp| Command::UpdateDailyNote { date, text, resp })
            .await
    }

    /// Appends a todo to a day's list and returns its id.
    pub async fn add_daily_todo(
        &self,
        date: NaiveDate,
        text: impl Into<String>,
    ) -> Result<TodoId, SessionError> {
        let text = text.into();
        self.roundtrip(|resp| Command::AddDailyTodo { date, text, resp })
            .await
    }

    /// Flips the completed flag of a todo; no-op when absent.
    pub async fn toggle_daily_todo(
        &self,
        date: NaiveDate,
        todo: TodoId,
    ) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::ToggleDailyTodo { date, todo, resp })
            .await
    }

    /// Removes a todo; no-op when absent.
    pub async fn delete_daily_todo(
        &self,
        date: NaiveDate,
        todo: TodoId,
    ) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::DeleteDailyTodo { date, todo, resp })
            .await
    }

    /// Snapshot of the current record.
    pub async fn record(&self) -> Result<ProgressRecord, SessionError> {
        self.roundtrip(|resp| Command::Record { resp }).await
    }

    /// True when the lecture is marked done.
    pub async fn lecture_completed(&self, id: LectureId) -> Result<bool, SessionError> {
        self.roundtrip(|resp| Command::LectureCompleted { id, resp })
            .await
    }

    /// Status of a question, unsolved when absent.
    pub async fn dsa_status(&self, question: QuestionId) -> Result<DsaStatus, SessionError> {
        self.roundtrip(|resp| Command::DsaStatusOf { question, resp })
            .await
    }

    /// Number of questions currently solved.
    pub async fn solved_count(&self) -> Result<usize, SessionError> {
        self.roundtrip(|resp| Command::SolvedCount { resp }).await
    }

    /// Activity for the seven days of the current week, Monday first.
    pub async fn weekly_activity(&self) -> Result<Vec<DayActivity>, SessionError> {
        self.roundtrip(|resp| Command::WeeklyActivity { resp }).await
    }

    /// True while a remote push is in flight.
    pub async fn syncing(&self) -> Result<bool, SessionError> {
        self.roundtrip(|resp| Command::Syncing { resp }).await
    }

    /// Forces any pending debounced push and waits for it to settle.
    pub async fn sync_now(&self) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::SyncNow { resp }).await
    }

    /// Flushes pending remote work and stops the session loop.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.roundtrip(|resp| Command::Shutdown { resp }).await
    }

    async fn roundtrip<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| SessionError::ChannelClosed)?;
        rx.await.map_err(|_| SessionError::ChannelClosed)
    }
}

async fn handle_command(
    cmd: Command,
    state: &mut SessionState,
    sub_rx: &mut broadcast::Receiver<ProgressRecord>,
    outcome_rx: &mut mpsc::UnboundedReceiver<PushOutcome>,
    ctx: &LoopCtx,
) -> bool {
    match cmd {
        Command::SetIdentity { identity, resp } => {
            load_identity(identity, state, sub_rx, ctx).await;
            let _ = resp.send(());
        }
        Command::Update { transform, resp } => {
            state.store.update(transform);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::SetStartDate { date, resp } => {
            state.store.set_start_date(date);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::ToggleLecture { id, resp } => {
            state.store.toggle_lecture(id);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::UpdateDsaStatus {
            question,
            status,
            resp,
        } => {
            state.store.update_dsa_status(question, status);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::Reset { resp } => {
            state.store.reset();
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::UpdateDailyNote { date, text, resp } => {
            state.store.update_daily_note(date, text);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::AddDailyTodo { date, text, resp } => {
            let id = state.store.add_daily_todo(date, text);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(id);
        }
        Command::ToggleDailyTodo { date, todo, resp } => {
            state.store.toggle_daily_todo(date, todo);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::DeleteDailyTodo { date, todo, resp } => {
            state.store.delete_daily_todo(date, todo);
            commit_if_dirty(state, ctx).await;
            let _ = resp.send(());
        }
        Command::Record { resp } => {
            let _ = resp.send(state.store.record().clone());
        }
        Command::LectureCompleted { id, resp } => {
            let _ = resp.send(state.store.lecture_completed(id));
        }
        Command::DsaStatusOf { question, resp } => {
            let _ = resp.send(state.store.dsa_status(question));
        }
        Command::SolvedCount { resp } => {
            let _ = resp.send(state.store.solved_count());
        }
        Command::WeeklyActivity { resp } => {
            let _ = resp.send(state.store.weekly_activity());
        }
        Command::Syncing { resp } => {
            let _ = resp.send(state.in_flight > 0);
        }
        Command::SyncNow { resp } => {
            drain_pushes(state, outcome_rx, ctx).await;
            let _ = resp.send(());
        }
        Command::Shutdown { resp } => {
            drain_pushes(state, outcome_rx, ctx).await;
            if let Some(push_tx) = ctx.push_tx.as_ref() {
                let (done_tx, done_rx) = oneshot::channel();
                if push_tx
                    .send(PushMsg::Shutdown { resp: done_tx })
                    .await
                    .is_ok()
                {
                    let _ = done_rx.await;
                }
            }
            let _ = resp.send(());
            return true;
        }
    }

    false
}

/// Loads the record for `identity`: guest identities read local storage only;
/// authenticated identities reconcile with the remote document, migrating
/// guest progress into a first-time account and falling back to the local
/// mirror when the remote store is unreachable.
async fn load_identity(
    identity: Identity,
    state: &mut SessionState,
    sub_rx: &mut broadcast::Receiver<ProgressRecord>,
    ctx: &LoopCtx,
) {
    state.ready = false;
    state.dirty_remote = false;
    // Drop the previous identity's subscription before anything else so a
    // stale-identity snapshot can never land in the new session.
    *sub_rx = ctx.idle_tx.subscribe();
    state.identity = identity;

    let key = local_key(&ctx.config.namespace, &state.identity);
    match (&state.identity, ctx.remote.as_ref()) {
        (Identity::User(profile), Some(remote)) => {
            let user_id = profile.id.clone();
            match remote_get(remote, &user_id).await {
                Ok(Some(record)) => {
                    write_local(&ctx.local, &key, &record).await;
                    state.store.adopt(record);
                    attach_watch(remote, &user_id, sub_rx).await;
                }
                Ok(None) => {
                    // First sign-in for this account: carry guest progress
                    // over once, otherwise start the document fresh.
                    let guest_key = format!("{}-guest", ctx.config.namespace);
                    let guest = read_local(&ctx.local, &guest_key).await;
                    let adopted = if guest.has_progress() {
                        guest
                    } else {
                        ProgressRecord::default()
                    };
                    if let Err(err) = remote_set(remote, &user_id, &adopted).await {
                        warn!(user = %user_id, error = ?err, "initial remote write failed; continuing local-only");
                    }
                    write_local(&ctx.local, &key, &adopted).await;
                    state.store.adopt(adopted);
                    attach_watch(remote, &user_id, sub_rx).await;
                }
                Err(err) => {
                    warn!(user = %user_id, error = ?err, "remote read failed; falling back to local record");
                    let record = read_local(&ctx.local, &key).await;
                    state.store.adopt(record);
                }
            }
        }
        _ => {
            let record = read_local(&ctx.local, &key).await;
            state.store.adopt(record);
        }
    }

    state.ready = true;
    let _ = ctx.events_tx.send(SessionEvent::Loaded);
}

async fn commit_if_dirty(state: &mut SessionState, ctx: &LoopCtx) {
    if !state.store.take_dirty() {
        return;
    }

    let key = local_key(&ctx.config.namespace, &state.identity);
    write_local(&ctx.local, &key, state.store.record()).await;
    let _ = ctx.events_tx.send(SessionEvent::Updated);

    if state.ready && state.identity.is_user() && ctx.push_tx.is_some() {
        state.dirty_remote = true;
        state.push_deadline = Instant::now() + Duration::from_millis(ctx.config.debounce_ms);
    }
}

async fn flush_remote(state: &mut SessionState, ctx: &LoopCtx) {
    if !state.dirty_remote {
        return;
    }
    state.dirty_remote = false;

    let (Identity::User(profile), Some(push_tx)) = (&state.identity, ctx.push_tx.as_ref()) else {
        return;
    };

    let msg = PushMsg::Write {
        user_id: profile.id.clone(),
        record: state.store.record().clone(),
    };
    if push_tx.send(msg).await.is_ok() {
        state.in_flight += 1;
        let _ = ctx.events_tx.send(SessionEvent::SyncStarted);
    }
}

async fn drain_pushes(
    state: &mut SessionState,
    outcome_rx: &mut mpsc::UnboundedReceiver<PushOutcome>,
    ctx: &LoopCtx,
) {
    flush_remote(state, ctx).await;
    while state.in_flight > 0 {
        match outcome_rx.recv().await {
            Some(outcome) => note_outcome(state, outcome, &ctx.events_tx),
            None => break,
        }
    }
}

fn note_outcome(
    state: &mut SessionState,
    outcome: PushOutcome,
    events_tx: &broadcast::Sender<SessionEvent>,
) {
    state.in_flight = state.in_flight.saturating_sub(1);
    let event = match outcome {
        PushOutcome::Synced => SessionEvent::Synced,
        PushOutcome::Failed => SessionEvent::SyncFailed,
    };
    let _ = events_tx.send(event);
}

async fn apply_remote(record: ProgressRecord, state: &mut SessionState, ctx: &LoopCtx) {
    // Gate: nothing applies before the initial load finished, and local
    // mutations awaiting their push win over incoming snapshots; the next
    // flush re-converges the remote copy.
    if !state.ready || !state.identity.is_user() {
        return;
    }
    if state.dirty_remote || state.in_flight > 0 {
        return;
    }
    if *state.store.record() == record {
        return;
    }

    let key = local_key(&ctx.config.namespace, &state.identity);
    write_local(&ctx.local, &key, &record).await;
    state.store.adopt(record);
    let _ = ctx.events_tx.send(SessionEvent::RemoteApplied);
}

fn spawn_push_worker(
    remote: Arc<Mutex<Box<dyn RemoteDocs>>>,
    mut rx: mpsc::Receiver<PushMsg>,
    outcome_tx: mpsc::UnboundedSender<PushOutcome>,
) {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg {
                PushMsg::Write { user_id, record } => {
                    let remote_ref = Arc::clone(&remote);
                    let pushed = tokio::task::spawn_blocking(move || {
                        remote_ref.blocking_lock().set(&user_id, &record)
                    })
                    .await;
                    let outcome = match pushed {
                        Ok(Ok(())) => PushOutcome::Synced,
                        Ok(Err(err)) => {
                            warn!(error = ?err, "remote push failed");
                            PushOutcome::Failed
                        }
                        Err(err) => {
                            warn!(error = %err, "remote push task failed");
                            PushOutcome::Failed
                        }
                    };
                    let _ = outcome_tx.send(outcome);
                }
                PushMsg::Shutdown { resp } => {
                    let _ = resp.send(());
                    break;
                }
            }
        }
    });
}

fn local_key(namespace: &str, identity: &Identity) -> String {
    format!("{namespace}-{}", identity.key_segment())
}

async fn read_local(local: &Arc<Mutex<Box<dyn LocalStore>>>, key: &str) -> ProgressRecord {
    let local = Arc::clone(local);
    let key_owned = key.to_string();
    let read = tokio::task::spawn_blocking(move || local.blocking_lock().read(&key_owned)).await;

    match read {
        Ok(Ok(Some(payload))) => match decode_record(&payload) {
            Ok(record) => record,
            Err(err) => {
                warn!(%key, error = %err, "stored record failed to decode; starting from defaults");
                ProgressRecord::default()
            }
        },
        Ok(Ok(None)) => ProgressRecord::default(),
        Ok(Err(err)) => {
            warn!(%key, error = ?err, "local read failed; starting from defaults");
            ProgressRecord::default()
        }
        Err(err) => {
            warn!(%key, error = %err, "local read task failed; starting from defaults");
            ProgressRecord::default()
        }
    }
}

async fn write_local(local: &Arc<Mutex<Box<dyn LocalStore>>>, key: &str, record: &ProgressRecord) {
    let payload = match encode_record(record) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(%key, error = %err, "record encode failed; skipping local write");
            return;
        }
    };

    let local = Arc::clone(local);
    let key_owned = key.to_string();
    let written =
        tokio::task::spawn_blocking(move || local.blocking_lock().write(&key_owned, &payload))
            .await;

    match written {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(%key, error = ?err, "local write failed"),
        Err(err) => warn!(%key, error = %err, "local write task failed"),
    }
}

async fn remote_get(
    remote: &Arc<Mutex<Box<dyn RemoteDocs>>>,
    user_id: &str,
) -> RemoteResult<Option<ProgressRecord>> {
    let remote = Arc::clone(remote);
    let user_id = user_id.to_string();
    match tokio::task::spawn_blocking(move || remote.blocking_lock().get(&user_id)).await {
        Ok(result) => result,
        Err(err) => Err(RemoteError::Message(format!("join error: {err}"))),
    }
}

async fn remote_set(
    remote: &Arc<Mutex<Box<dyn RemoteDocs>>>,
    user_id: &str,
    record: &ProgressRecord,
) -> RemoteResult<()> {
    let remote = Arc::clone(remote);
    let user_id = user_id.to_string();
    let record = record.clone();
    match tokio::task::spawn_blocking(move || remote.blocking_lock().set(&user_id, &record)).await {
        Ok(result) => result,
        Err(err) => Err(RemoteError::Message(format!("join error: {err}"))),
    }
}

async fn attach_watch(
    remote: &Arc<Mutex<Box<dyn RemoteDocs>>>,
    user_id: &str,
    sub_rx: &mut broadcast::Receiver<ProgressRecord>,
) {
    let remote_ref = Arc::clone(remote);
    let owned = user_id.to_string();
    let watched =
        tokio::task::spawn_blocking(move || remote_ref.blocking_lock().watch(&owned)).await;

    match watched {
        Ok(Ok(rx)) => *sub_rx = rx,
        Ok(Err(err)) => {
            warn!(user = %user_id, error = ?err, "remote watch failed; live updates disabled");
        }
        Err(err) => {
            warn!(user = %user_id, error = %err, "remote watch task failed; live updates disabled");
        }
    }
}
