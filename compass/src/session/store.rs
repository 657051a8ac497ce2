use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::SessionState;
use crate::error::{CompassError, Result};
use crate::models::AnalysisRequest;
use crate::services::{AnalysisService, CredentialStore, Outcome};

/// One live session: its state plus the in-flight flag.
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: Mutex<SessionState>,
    busy: AtomicBool,
    last_active_ms: AtomicI64,
}

/// Clears the busy flag when dropped, so a cancelled submission never
/// leaves the session locked.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl SessionHandle {
    fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            state: Mutex::new(SessionState::new()),
            busy: AtomicBool::new(false),
            last_active_ms: AtomicI64::new(now.timestamp_millis()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_active_ms.load(Ordering::Relaxed))
            .unwrap_or(self.created_at)
    }

    pub fn touch(&self) {
        self.last_active_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Mark the session busy. Fails with `CompassError::Busy` when another
    /// submission is still in flight.
    pub fn try_begin(&self) -> Result<SubmissionGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                CompassError::Busy("An analysis is already in progress for this session".into())
            })?;
        Ok(SubmissionGuard { busy: &self.busy })
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Validate, analyze and record one submission.
    ///
    /// A concurrent submission is rejected with `Busy` and leaves the state
    /// untouched. Every other outcome, including validation failures, is
    /// recorded before it is returned.
    pub async fn submit(
        &self,
        service: &AnalysisService,
        request: &AnalysisRequest,
        credentials: &dyn CredentialStore,
    ) -> Outcome {
        let _guard = self.try_begin()?;
        self.touch();

        let outcome = match request.validate() {
            Ok(()) => service.analyze(request, credentials).await,
            Err(error) => Err(error),
        };

        if let Err(error) = &outcome {
            tracing::warn!(session_id = %self.id, error = %error, "Submission failed");
        }

        self.state.lock().await.record(&outcome, Utc::now());
        self.touch();
        outcome
    }

    /// Record a submission rejected before analysis, such as one whose
    /// recommendation counts are out of range. The report is cleared like
    /// any other failure; a busy session is left untouched.
    pub async fn reject(&self, error: CompassError) -> CompassError {
        let _guard = match self.try_begin() {
            Ok(guard) => guard,
            Err(busy) => return busy,
        };
        self.touch();

        tracing::warn!(session_id = %self.id, error = %error, "Submission rejected");
        self.state.lock().await.record_failure(&error);
        error
    }
}

/// In-memory registry of sessions. Nothing is persisted; a restart starts
/// every session over with an empty history.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<SessionHandle>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Arc<SessionHandle> {
        let handle = Arc::new(SessionHandle::new(Uuid::new_v4()));
        self.sessions
            .write()
            .await
            .insert(handle.id(), Arc::clone(&handle));
        tracing::debug!(session_id = %handle.id(), "Session created");
        handle
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<SessionHandle>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| CompassError::NotFound(format!("Session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        if self.sessions.write().await.remove(&id).is_none() {
            return Err(CompassError::NotFound(format!("Session {id} not found")));
        }
        tracing::debug!(session_id = %id, "Session ended");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than the TTL as of `now`. Busy sessions
    /// are always kept. Returns how many were removed.
    pub async fn sweep_idle(&self, now: DateTime<Utc>) -> usize {
        let ttl = chrono::Duration::from_std(self.idle_ttl)
            .unwrap_or_else(|_| chrono::Duration::days(365));
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| handle.is_busy() || now - handle.last_active() <= ttl);
        before - sessions.len()
    }
}
