//! Test doubles for the workflow controller.
//!
//! Run from workspace root: `cargo test -p docshade-core --test workflow_test`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use docshade_core::{
    ChannelConnector, ChannelEvent, ClientError, ClientResult, DocumentBackend, DownloadSink,
    KeyValueStore, Ledger, MemoryStore, Notification, NotificationId, Notifier, PdfFile,
    ScheduledNotification, Scheduler, SessionChannel, SessionId, UploadController,
};

pub fn pdf(name: &str) -> PdfFile {
    PdfFile::new(name, "application/pdf", b"%PDF-1.7\n".to_vec())
}

/// Backend that hands out scripted session ids and serves fixed artifact bytes.
#[derive(Default)]
pub struct FakeBackend {
    pub session_ids: Mutex<VecDeque<String>>,
    pub fail_submit: AtomicBool,
    pub fail_fetch: AtomicBool,
    pub submitted: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_sessions(ids: &[&str]) -> Self {
        Self {
            session_ids: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl DocumentBackend for FakeBackend {
    async fn submit(&self, file: &PdfFile) -> ClientResult<SessionId> {
        self.submitted.lock().unwrap().push(file.file_name.clone());
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("503 Service Unavailable".into()));
        }
        let id = self
            .session_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "session".to_string());
        Ok(SessionId::new(id))
    }

    async fn fetch_artifact(&self, url: &str) -> ClientResult<Bytes> {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("404 Not Found".into()));
        }
        Ok(Bytes::from_static(b"%PDF-anonymized"))
    }
}

/// Channel that replays a fixed list of events. A stalled channel never
/// yields again once its script is exhausted.
pub struct ScriptedChannel {
    events: VecDeque<ChannelEvent>,
    stall: bool,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionChannel for ScriptedChannel {
    async fn next_event(&mut self) -> Option<ChannelEvent> {
        match self.events.pop_front() {
            Some(event) => Some(event),
            None if self.stall => std::future::pending().await,
            None => None,
        }
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Connector that hands out one scripted channel per connect, in order.
#[derive(Default)]
pub struct ScriptedConnector {
    pub scripts: Mutex<VecDeque<Vec<ChannelEvent>>>,
    pub connected: Mutex<Vec<String>>,
    pub closed: Arc<AtomicUsize>,
    pub fail_connect: AtomicBool,
    /// The next channel handed out stalls after its script.
    pub stall_next: AtomicBool,
}

impl ScriptedConnector {
    pub fn new(scripts: Vec<Vec<ChannelEvent>>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            ..Self::default()
        }
    }

    pub fn frames(frames: &[&str]) -> Self {
        let mut events = vec![ChannelEvent::Opened];
        events.extend(frames.iter().map(|f| ChannelEvent::from_text(f)));
        Self::new(vec![events])
    }
}

#[async_trait]
impl ChannelConnector for ScriptedConnector {
    async fn connect(&self, session_id: &SessionId) -> ClientResult<Box<dyn SessionChannel>> {
        self.connected
            .lock()
            .unwrap()
            .push(session_id.as_str().to_string());
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ClientError::Channel("connection refused".into()));
        }
        let events = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        Ok(Box::new(ScriptedChannel {
            events: events.into(),
            stall: self.stall_next.swap(false, Ordering::SeqCst),
            closed: self.closed.clone(),
        }))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<(NotificationId, Notification)>>,
    pub dismissed: Mutex<Vec<NotificationId>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(_, n)| n.message.clone())
            .collect()
    }

    pub fn id_of(&self, message: &str) -> Option<NotificationId> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .find(|(_, n)| n.message == message)
            .map(|(id, _)| *id)
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notification: Notification) -> NotificationId {
        let id = NotificationId::new();
        self.shown.lock().unwrap().push((id, notification));
        id
    }

    fn dismiss(&self, id: NotificationId) {
        self.dismissed.lock().unwrap().push(id);
    }
}

#[derive(Default)]
pub struct RecordingScheduler {
    pub scheduled: Mutex<Vec<(Duration, Notification)>>,
}

impl Scheduler for RecordingScheduler {
    fn schedule(&self, delay: Duration, notification: Notification) -> ScheduledNotification {
        self.scheduled.lock().unwrap().push((delay, notification));
        ScheduledNotification::detached()
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl DownloadSink for MemorySink {
    fn save(&self, file_name: &str, data: &[u8]) -> ClientResult<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), data.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

/// Store that reads as empty and refuses every write.
#[derive(Default)]
pub struct FailingStore {
    pub writes: AtomicUsize,
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> ClientResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> ClientResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(ClientError::Storage("disk full".into()))
    }
}

/// Controller wired to doubles, with handles to inspect each one.
pub struct Harness {
    pub controller: UploadController,
    pub backend: Arc<FakeBackend>,
    pub connector: Arc<ScriptedConnector>,
    pub notifier: Arc<RecordingNotifier>,
    pub scheduler: Arc<RecordingScheduler>,
    pub sink: Arc<MemorySink>,
    pub ledger: Ledger,
}

pub fn harness(backend: FakeBackend, connector: ScriptedConnector) -> Harness {
    harness_with_store(backend, connector, Arc::new(MemoryStore::new()))
}

pub fn harness_with_store(
    backend: FakeBackend,
    connector: ScriptedConnector,
    store: Arc<dyn KeyValueStore>,
) -> Harness {
    let backend = Arc::new(backend);
    let connector = Arc::new(connector);
    let notifier = Arc::new(RecordingNotifier::default());
    let scheduler = Arc::new(RecordingScheduler::default());
    let sink = Arc::new(MemorySink::default());
    let ledger = Ledger::new(store);

    let controller = UploadController::new(
        backend.clone(),
        connector.clone(),
        ledger.clone(),
        notifier.clone(),
        scheduler.clone(),
        sink.clone(),
    );

    Harness {
        controller,
        backend,
        connector,
        notifier,
        scheduler,
        sink,
        ledger,
    }
}
