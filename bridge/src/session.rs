//! Streaming Session Manager — bridges push-style runtime streams to
//! pull-style consumers with bounded buffering
//!
//! A session owns its backing stream through a pump task. The pump feeds a
//! bounded channel; when the consumer stops pulling, the channel fills and
//! the pump stops polling the runtime, which is the flow control. The pump
//! exiting (end of stream, error, cancel, abort) drops the backing stream,
//! and that drop is the single release of the runtime-side handle.

use crate::config::StreamingConfig;
use crate::runtime::ByteStream;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

/// Opaque session token handed to callers. Random per process lifetime,
/// never reused after closure.
pub type SessionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Pump still attached to the backing stream.
    Open,
    /// Backing stream finished; buffered chunks remain to be pulled.
    Draining,
    /// Unknown to the table. Closed sessions are indistinguishable from
    /// ids that never existed.
    Closed,
}

/// One pull from a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadChunk {
    Data(Bytes),
    EndOfStream,
}

struct ReadState {
    rx: mpsc::Receiver<Bytes>,
    leftover: Bytes,
}

struct SessionEntry {
    owner: Uuid,
    cancel: CancellationToken,
    pump: JoinHandle<()>,
    read: Arc<Mutex<ReadState>>,
}

pub struct SessionManager {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    window: usize,
    max_chunk: usize,
    grace: Duration,
}

impl SessionManager {
    pub fn new(config: &StreamingConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            window: config.chunk_window.max(1),
            max_chunk: config.chunk_bytes.max(1),
            grace: Duration::from_millis(config.close_grace_ms),
        }
    }

    /// Take ownership of a backing stream and hand back its session token.
    /// `owner` ties the session to the request that opened it so the
    /// dispatcher can reap sessions of a cancelled request.
    pub async fn open(&self, owner: Uuid, stream: ByteStream) -> SessionId {
        let session_id = Uuid::new_v4().simple().to_string();
        let (tx, rx) = mpsc::channel(self.window);
        let cancel = CancellationToken::new();
        let pump = tokio::spawn(pump_stream(
            stream,
            tx,
            cancel.clone(),
            session_id.clone(),
        ));
        let entry = SessionEntry {
            owner,
            cancel,
            pump,
            read: Arc::new(Mutex::new(ReadState {
                rx,
                leftover: Bytes::new(),
            })),
        };
        self.sessions.lock().await.insert(session_id.clone(), entry);
        debug!("session {session_id}: opened");
        session_id
    }

    /// Pull the next chunk, at most `max_bytes` (capped by the configured
    /// chunk size). Suspends while the session is open and no data is
    /// buffered; never blocks once the session is closed.
    pub async fn read_chunk(&self, session_id: &str, max_bytes: Option<usize>) -> ReadChunk {
        let read = {
            let sessions = self.sessions.lock().await;
            match sessions.get(session_id) {
                Some(entry) => Arc::clone(&entry.read),
                // Unknown ids read as closed.
                None => return ReadChunk::EndOfStream,
            }
        };
        let limit = max_bytes.unwrap_or(self.max_chunk).clamp(1, self.max_chunk);

        let mut state = read.lock().await;
        if state.leftover.is_empty() {
            match state.rx.recv().await {
                Some(chunk) => state.leftover = chunk,
                None => {
                    // Stream finished and buffer fully drained; retire the
                    // entry so the table only holds live sessions.
                    drop(state);
                    self.sessions.lock().await.remove(session_id);
                    return ReadChunk::EndOfStream;
                }
            }
        }
        let take = state.leftover.len().min(limit);
        ReadChunk::Data(state.leftover.split_to(take))
    }

    /// Close a session. Idempotent; the first call releases the backing
    /// handle, later calls and unknown ids are no-ops.
    pub async fn close(&self, session_id: &str) {
        let entry = self.sessions.lock().await.remove(session_id);
        if let Some(entry) = entry {
            shutdown_entry(session_id, entry, self.grace).await;
        }
    }

    /// Close every session opened under the given request correlation id.
    pub async fn close_owned(&self, owner: Uuid) {
        let drained: Vec<(SessionId, SessionEntry)> = {
            let mut sessions = self.sessions.lock().await;
            let ids: Vec<SessionId> = sessions
                .iter()
                .filter(|(_, entry)| entry.owner == owner)
                .map(|(id, _)| id.clone())
                .collect();
            ids.into_iter()
                .filter_map(|id| sessions.remove(&id).map(|entry| (id, entry)))
                .collect()
        };
        for (session_id, entry) in drained {
            shutdown_entry(&session_id, entry, self.grace).await;
        }
    }

    /// Process teardown: close all open sessions.
    pub async fn shutdown(&self) {
        let drained: Vec<(SessionId, SessionEntry)> =
            self.sessions.lock().await.drain().collect();
        for (session_id, entry) in drained {
            shutdown_entry(&session_id, entry, self.grace).await;
        }
    }

    pub async fn status(&self, session_id: &str) -> SessionStatus {
        let sessions = self.sessions.lock().await;
        match sessions.get(session_id) {
            Some(entry) if entry.pump.is_finished() => SessionStatus::Draining,
            Some(_) => SessionStatus::Open,
            None => SessionStatus::Closed,
        }
    }

    /// Number of sessions currently in the table (open or draining).
    pub async fn open_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

async fn shutdown_entry(session_id: &str, entry: SessionEntry, grace: Duration) {
    entry.cancel.cancel();
    let mut pump = entry.pump;
    if tokio::time::timeout(grace, &mut pump).await.is_err() {
        warn!("session {session_id}: pump exceeded close grace period, aborting");
        pump.abort();
    }
    debug!("session {session_id}: closed");
}

/// Forward chunks from the backing stream into the bounded channel until
/// the stream ends, the consumer goes away, or the session is cancelled.
/// The stream is owned here, so every exit path drops it exactly once.
async fn pump_stream(
    mut stream: ByteStream,
    tx: mpsc::Sender<Bytes>,
    cancel: CancellationToken,
    session_id: String,
) {
    loop {
        let item = tokio::select! {
            _ = cancel.cancelled() => break,
            item = stream.next() => item,
        };
        match item {
            Some(Ok(chunk)) => {
                if chunk.is_empty() {
                    continue;
                }
                let sent = tokio::select! {
                    _ = cancel.cancelled() => break,
                    sent = tx.send(chunk) => sent,
                };
                if sent.is_err() {
                    break;
                }
            }
            Some(Err(err)) => {
                warn!("session {session_id}: backing stream failed: {err}");
                break;
            }
            None => break,
        }
    }
    debug!("session {session_id}: pump finished");
}
