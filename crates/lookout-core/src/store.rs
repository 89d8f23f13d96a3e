//! Alert Store — the bounded, mutex-guarded rolling history plus its
//! snapshot file.
//!
//! The store is the single source of truth for the running process; disk is
//! best-effort durability. All operations take the same lock for their full
//! duration, including the synchronous snapshot write — readers never see a
//! torn state, and concurrent ingestions serialize on the disk write. That
//! is a deliberate simplicity choice for a small alert stream, not an
//! oversight.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::Alert;

/// Default rolling-window capacity: keeps memory predictable under a
/// long-running alert stream.
pub const DEFAULT_CAPACITY: usize = 500;

/// Errors from the store's file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("history file error: {0}")]
    Io(#[from] io::Error),
    #[error("history snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// On-disk form: the full record sequence plus the next identifier.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    alerts: Vec<Alert>,
    #[serde(default)]
    next_id: u64,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    alerts: &'a [Alert],
    next_id: u64,
}

struct Inner {
    alerts: Vec<Alert>,
    next_id: u64,
    data_file: PathBuf,
}

/// Bounded in-memory sequence of [`Alert`] records with disk snapshotting.
///
/// Constructed once at startup and shared by handle; a single mutex guards
/// the sequence, the id counter, and the backing-file path together.
pub struct AlertStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl AlertStore {
    pub fn new(data_file: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                alerts: Vec::new(),
                next_id: 1,
                data_file: data_file.into(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record: evict the single oldest entry when at capacity,
    /// assign the next id, and persist the snapshot.
    ///
    /// A persistence failure is logged and does not roll back the in-memory
    /// append. Returns the assigned id.
    pub fn append(&self, mut alert: Alert) -> u64 {
        let mut inner = self.lock();
        if inner.alerts.len() >= self.capacity {
            inner.alerts.remove(0);
        }
        let id = inner.next_id;
        alert.id = id;
        inner.next_id += 1;
        inner.alerts.push(alert);
        if let Err(err) = persist(&inner) {
            tracing::warn!(
                file = %inner.data_file.display(),
                "failed to persist history: {err}"
            );
        }
        id
    }

    /// A fully-consistent copy of the current sequence, in insertion order.
    pub fn snapshot(&self) -> Vec<Alert> {
        self.lock().alerts.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().alerts.is_empty()
    }

    /// Replace the in-memory sequence and counter from the backing file,
    /// discarding anything not yet flushed.
    ///
    /// A missing file is "no history yet": the call succeeds and the current
    /// state stays untouched. A counter recorded as zero or absent is
    /// recomputed as `len + 1`. Returns the record count after the reload.
    pub fn reload(&self) -> Result<usize, StoreError> {
        let mut inner = self.lock();
        let data = match std::fs::read(&inner.data_file) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(inner.alerts.len()),
            Err(err) => return Err(err.into()),
        };
        let snapshot: Snapshot = serde_json::from_slice(&data)?;
        inner.alerts = snapshot.alerts;
        inner.next_id = if snapshot.next_id > 0 {
            snapshot.next_id
        } else {
            inner.alerts.len() as u64 + 1
        };
        Ok(inner.alerts.len())
    }

    /// Archive the current sequence to a timestamped file beside the backing
    /// file, then start a fresh page: clear the sequence, reset the counter
    /// to 1, and rewrite the backing file empty.
    ///
    /// The archive write happens before any in-memory mutation, so a failed
    /// rotation preserves the pre-rotation state and surfaces the error. Two
    /// rotations within the same second collide on the archive name; the
    /// second overwrites the first.
    pub fn rotate(&self) -> Result<String, StoreError> {
        let mut inner = self.lock();

        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let file_name = format!("alerts_history_{stamp}.json");
        let archive = match inner.data_file.parent() {
            Some(dir) => dir.join(&file_name),
            None => PathBuf::from(&file_name),
        };

        let data = serde_json::to_vec_pretty(&SnapshotRef {
            alerts: &inner.alerts,
            next_id: inner.next_id,
        })?;
        std::fs::write(&archive, data)?;

        inner.alerts.clear();
        inner.next_id = 1;
        if let Err(err) = persist(&inner) {
            tracing::warn!(
                file = %inner.data_file.display(),
                "failed to persist fresh history after rotation: {err}"
            );
        }
        Ok(file_name)
    }

    /// The backing-file path this store persists to.
    pub fn data_file(&self) -> PathBuf {
        self.lock().data_file.clone()
    }
}

/// Whole-file snapshot rewrite, pretty-printed for hand inspection.
fn persist(inner: &Inner) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(&SnapshotRef {
        alerts: &inner.alerts,
        next_id: inner.next_id,
    })?;
    std::fs::write(&inner.data_file, data)?;
    Ok(())
}

/// Read a snapshot file directly, outside any store. Used to inspect
/// rotation archives.
pub fn read_snapshot(path: &Path) -> Result<(Vec<Alert>, u64), StoreError> {
    let data = std::fs::read(path)?;
    let snapshot: Snapshot = serde_json::from_slice(&data)?;
    let next_id = if snapshot.next_id > 0 {
        snapshot.next_id
    } else {
        snapshot.alerts.len() as u64 + 1
    };
    Ok((snapshot.alerts, next_id))
}
