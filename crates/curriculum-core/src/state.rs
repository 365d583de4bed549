//! Process lifecycle state.
//!
//! A [`Lifecycle`] records when the process started and whether the
//! curriculum store has finished loading. The bootstrap creates one and hands
//! clones to whatever needs to report readiness; there is no global instance.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Coarse process phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Store is loading
    Starting,
    /// Store is loaded and serving
    Ready,
    /// Store failed to load; the message is the reported error
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    started_at: DateTime<Utc>,
    phase: RwLock<Phase>,
}

/// Shared handle to the process lifecycle.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    inner: Arc<Inner>,
}

impl Lifecycle {
    /// Start tracking a process that begins now.
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    /// Start tracking a process that began at `started_at`.
    pub fn started_at(started_at: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(Inner {
                started_at,
                phase: RwLock::new(Phase::Starting),
            }),
        }
    }

    /// Record that the store finished loading.
    pub fn mark_ready(&self) {
        *self.inner.phase.write() = Phase::Ready;
    }

    /// Record that the store failed to load.
    pub fn mark_failed(&self, reason: impl Into<String>) {
        *self.inner.phase.write() = Phase::Failed(reason.into());
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.inner.phase.read().clone()
    }

    /// Whether the store is loaded and serving.
    pub fn is_ready(&self) -> bool {
        matches!(*self.inner.phase.read(), Phase::Ready)
    }

    /// When the process started.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.inner.started_at
    }

    /// Time elapsed since start.
    pub fn uptime(&self) -> Duration {
        Utc::now().signed_duration_since(self.inner.started_at)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
