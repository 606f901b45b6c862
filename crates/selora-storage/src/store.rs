use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use selora_core::keys::{self, RecordKind};

use crate::error::StorageError;

/// Typed record store. The memory layer always holds the latest records;
/// the durable layer is a JSON file per record under the data directory.
/// When no durable directory is usable the store degrades to memory-only
/// with no behavior change visible to callers.
pub struct SessionStore {
    memory: RwLock<HashMap<(RecordKind, String), serde_json::Value>>,
    durable: Option<PathBuf>,
}

impl SessionStore {
    /// A store with no durable backend. Records live only for the life of
    /// the process.
    pub fn in_memory() -> Self {
        Self {
            memory: RwLock::new(HashMap::new()),
            durable: None,
        }
    }

    /// Open a store rooted at `data_dir`, or at the platform data
    /// directory when `None`. Falls back to memory-only if the directory
    /// cannot be prepared.
    pub fn open(data_dir: Option<PathBuf>) -> Self {
        let root = data_dir.or_else(|| dirs::data_dir().map(|d| d.join("selora")));
        let durable = match root {
            Some(root) => match prepare_dirs(&root) {
                Ok(()) => Some(root),
                Err(e) => {
                    warn!(error = %e, "durable storage unavailable, falling back to memory");
                    None
                }
            },
            None => {
                warn!("no platform data directory, falling back to memory");
                None
            }
        };
        Self {
            memory: RwLock::new(HashMap::new()),
            durable,
        }
    }

    pub fn is_durable(&self) -> bool {
        self.durable.is_some()
    }

    /// Save a record, generating an id when none is given. The memory
    /// layer is updated first, so a durable write failure never loses the
    /// record for the running process.
    pub async fn save<T: Serialize>(
        &self,
        kind: RecordKind,
        value: &T,
        id: Option<String>,
    ) -> Result<String, StorageError> {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let json = serde_json::to_value(value)?;
        let bytes = serde_json::to_vec_pretty(&json)?;

        self.memory
            .write()
            .await
            .insert((kind, id.clone()), json);

        if let Some(root) = &self.durable {
            let path = root.join(keys::record_path(kind, &id));
            write_with_retry(&path, &bytes, kind, &id).await?;
        }
        Ok(id)
    }

    /// Load a record by id. Absent records are `Ok(None)`, not an error.
    pub async fn get<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        id: &str,
    ) -> Result<Option<T>, StorageError> {
        if let Some(json) = self.memory.read().await.get(&(kind, id.to_string())) {
            return Ok(Some(serde_json::from_value(json.clone())?));
        }

        let Some(root) = &self.durable else {
            return Ok(None);
        };
        let key = keys::record_path(kind, id);
        let path = root.join(&key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::LoadFailed {
                    key,
                    reason: e.to_string(),
                });
            }
        };
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::LoadFailed {
                key,
                reason: e.to_string(),
            })?;
        let value = serde_json::from_value(json.clone())?;
        self.memory
            .write()
            .await
            .insert((kind, id.to_string()), json);
        Ok(Some(value))
    }

    /// All records of a kind. Unreadable individual records are skipped
    /// with a warning rather than failing the whole listing.
    pub async fn get_by_kind<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
    ) -> Result<Vec<T>, StorageError> {
        let mut records: HashMap<String, serde_json::Value> = HashMap::new();

        if let Some(root) = &self.durable {
            let dir = root.join(kind.dir());
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Ok(Vec::new());
                }
                Err(e) => {
                    return Err(StorageError::LoadFailed {
                        key: kind.dir().to_string(),
                        reason: e.to_string(),
                    });
                }
            };
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                let Some(id) = record_id(&path) else {
                    continue;
                };
                match tokio::fs::read(&path).await {
                    Ok(bytes) => match serde_json::from_slice(&bytes) {
                        Ok(json) => {
                            records.insert(id, json);
                        }
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "skipping unreadable record");
                        }
                    },
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable record");
                    }
                }
            }
        }

        // Memory wins over durable: it holds the most recent writes.
        for ((k, id), json) in self.memory.read().await.iter() {
            if *k == kind {
                records.insert(id.clone(), json.clone());
            }
        }

        let mut out = Vec::with_capacity(records.len());
        for (id, json) in records {
            match serde_json::from_value(json) {
                Ok(value) => out.push(value),
                Err(e) => {
                    warn!(record_id = %id, error = %e, "skipping record with unexpected shape");
                }
            }
        }
        Ok(out)
    }

    /// Delete one record. Returns whether anything was deleted.
    pub async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool, StorageError> {
        let in_memory = self
            .memory
            .write()
            .await
            .remove(&(kind, id.to_string()))
            .is_some();

        let Some(root) = &self.durable else {
            return Ok(in_memory);
        };
        let key = keys::record_path(kind, id);
        match tokio::fs::remove_file(root.join(&key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(in_memory),
            Err(e) => Err(StorageError::DeleteFailed {
                key,
                reason: e.to_string(),
            }),
        }
    }

    /// Delete all records of a kind. Returns the number deleted.
    pub async fn delete_by_kind(&self, kind: RecordKind) -> Result<usize, StorageError> {
        let mut ids: Vec<String> = {
            let mut memory = self.memory.write().await;
            let ids: Vec<String> = memory
                .keys()
                .filter(|(k, _)| *k == kind)
                .map(|(_, id)| id.clone())
                .collect();
            memory.retain(|(k, _), _| *k != kind);
            ids
        };

        if let Some(root) = &self.durable {
            let dir = root.join(kind.dir());
            if let Ok(mut entries) = tokio::fs::read_dir(&dir).await {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    let path = entry.path();
                    let Some(id) = record_id(&path) else {
                        continue;
                    };
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => {
                            if !ids.contains(&id) {
                                ids.push(id);
                            }
                        }
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "failed to delete record file");
                        }
                    }
                }
            }
        }
        Ok(ids.len())
    }
}

fn prepare_dirs(root: &std::path::Path) -> std::io::Result<()> {
    for kind in [RecordKind::Session, RecordKind::Result] {
        std::fs::create_dir_all(root.join(kind.dir()))?;
    }
    Ok(())
}

fn record_id(path: &std::path::Path) -> Option<String> {
    if path.extension()? != "json" {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().into_owned())
}

/// Write a record file, retrying once before surfacing the failure. The
/// memory layer already holds the record, so the caller may retry later
/// without losing state.
async fn write_with_retry(
    path: &std::path::Path,
    bytes: &[u8],
    kind: RecordKind,
    id: &str,
) -> Result<(), StorageError> {
    let first = match tokio::fs::write(path, bytes).await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    warn!(path = %path.display(), error = %first, "durable write failed, retrying once");
    match tokio::fs::write(path, bytes).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::StorageFull => Err(StorageError::QuotaExceeded {
            key: keys::record_path(kind, id),
        }),
        Err(e) => Err(StorageError::SaveFailed {
            key: keys::record_path(kind, id),
            reason: e.to_string(),
        }),
    }
}
