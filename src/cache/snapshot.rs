//! Snapshot Module
//!
//! Persists cached listings to a versioned JSON file so a restart does not
//! start cold. Entries keep their original `storedAt`, so freshness carries over.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cache::{CacheEntry, CacheKey, CacheStore};
use crate::error::{Result, ServiceError};
use crate::upstream::Bill;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout: one record per cached listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub sessions: Vec<SnapshotRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub key: CacheKey,
    pub bills: Vec<Bill>,
    pub stored_at: DateTime<Utc>,
}

/// Writes every entry of `store` to `path` (atomic write via tmp + rename).
///
/// Returns the number of records written.
pub fn save_snapshot(store: &CacheStore, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ServiceError::Internal(format!(
                "failed to create snapshot dir {}: {e}",
                parent.display()
            ))
        })?;
    }

    let mut sessions: Vec<SnapshotRecord> = store
        .entries()
        .map(|entry| SnapshotRecord {
            key: entry.key.clone(),
            bills: entry.payload.clone(),
            stored_at: entry.stored_at,
        })
        .collect();
    sessions.sort_by(|a, b| a.key.cmp(&b.key));
    let count = sessions.len();

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        sessions,
    };
    let json = serde_json::to_string(&snapshot)
        .map_err(|e| ServiceError::Internal(format!("failed to serialize snapshot: {e}")))?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(|e| {
        ServiceError::Internal(format!(
            "failed to write snapshot {}: {e}",
            tmp_path.display()
        ))
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        ServiceError::Internal(format!(
            "failed to rename snapshot {} to {}: {e}",
            tmp_path.display(),
            path.display()
        ))
    })?;

    Ok(count)
}

/// Reads a snapshot from disk.
///
/// Returns `None` on a missing, unreadable, corrupt or unsupported file
/// (logs a warning unless the file is simply missing).
pub fn load_snapshot(path: &Path) -> Option<Vec<CacheEntry>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read cache snapshot");
            return None;
        }
    };

    let snapshot: Snapshot = match serde_json::from_str(&content) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt cache snapshot");
            return None;
        }
    };

    if snapshot.version != SNAPSHOT_VERSION {
        warn!(
            path = %path.display(),
            version = snapshot.version,
            "unsupported cache snapshot version"
        );
        return None;
    }

    Some(
        snapshot
            .sessions
            .into_iter()
            .map(|record| CacheEntry::new(record.key, record.bills, record.stored_at))
            .collect(),
    )
}

/// Loads a snapshot into `store`. Returns the number of restored entries.
pub fn restore_snapshot(store: &mut CacheStore, path: &Path) -> usize {
    let Some(entries) = load_snapshot(path) else {
        return 0;
    };

    let count = entries.len();
    for entry in entries {
        store.insert_entry(entry);
    }
    info!(path = %path.display(), entries = count, "restored cache snapshot");
    count
}
