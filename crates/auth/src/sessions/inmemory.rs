//! In-memory session storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shopkeep_core::auth::{Result, SessionId, SessionRecord, SessionRepository};

/// Map size at which a write first sweeps out stale records.
const SWEEP_THRESHOLD: usize = 1024;

/// In-memory session store.
///
/// Stores session records in a HashMap wrapped in `Arc<RwLock<_>>`. Records
/// not written for longer than the TTL are treated as gone: a read that hits
/// one removes it, and writes sweep the whole map once it grows past a
/// watermark. Data is not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    ttl: chrono::Duration,
    /// Map size that triggers the next sweep on write.
    sweep_at: Arc<AtomicUsize>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }
}

impl SessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            sweep_at: Arc::new(AtomicUsize::new(SWEEP_THRESHOLD)),
        }
    }

    fn is_stale(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        match record.updated_at.checked_add_signed(self.ttl) {
            Some(deadline) => deadline <= now,
            None => false,
        }
    }

    /// Removes stale records and moves the watermark to twice what is left.
    fn sweep(&self, sessions: &mut HashMap<String, SessionRecord>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, record| !self.is_stale(record, now));
        self.sweep_at.store(
            (sessions.len() * 2).max(SWEEP_THRESHOLD),
            Ordering::Relaxed,
        );
        before - sessions.len()
    }

    /// Drops every record older than the TTL. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, now)
    }

    /// Number of records currently held, stale or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn get_session(&self, id: &SessionId) -> Result<Option<SessionRecord>> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id.as_str()) {
                None => return Ok(None),
                Some(record) if !self.is_stale(record, now) => return Ok(Some(record.clone())),
                Some(_) => {}
            }
        }

        // Stale: re-check under the write lock, a concurrent put may have refreshed it.
        let mut sessions = self.sessions.write().await;
        match sessions.get(id.as_str()) {
            Some(record) if !self.is_stale(record, now) => Ok(Some(record.clone())),
            Some(_) => {
                sessions.remove(id.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put_session(&self, id: &SessionId, record: &SessionRecord) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.as_str().to_string(), record.clone());
        if sessions.len() >= self.sweep_at.load(Ordering::Relaxed) {
            self.sweep(&mut sessions, Utc::now());
        }
        Ok(())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id.as_str());
        Ok(())
    }
}
