use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::errors::ErrorKind;

/// Lifecycle of the data a poller holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// No cycle has completed yet.
    Loading,
    /// The last cycle succeeded.
    Ready,
    /// The last cycle failed. Any earlier data is still held.
    Failed(ErrorKind),
}

/// The latest result of a poller, shared read-only with views.
///
/// Cloning is cheap: the payload sits behind an `Arc` and is never mutated.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: Option<Arc<T>>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub status: SnapshotStatus,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            fetched_at: self.fetched_at,
            status: self.status,
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> Snapshot<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            fetched_at: None,
            status: SnapshotStatus::Loading,
        }
    }

    pub fn ready(data: T, fetched_at: DateTime<Utc>) -> Self {
        Self {
            data: Some(Arc::new(data)),
            fetched_at: Some(fetched_at),
            status: SnapshotStatus::Ready,
        }
    }

    /// Same data, marked failed. Keeps the last good payload for display.
    #[must_use]
    pub fn failed(&self, kind: ErrorKind) -> Self {
        Self {
            data: self.data.clone(),
            fetched_at: self.fetched_at,
            status: SnapshotStatus::Failed(kind),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == SnapshotStatus::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.status == SnapshotStatus::Ready
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }
}
