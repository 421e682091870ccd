//! JSON file implementation of DocumentStore
//!
//! The file holds either an array of document objects or an object that
//! maps collection names to such arrays. A document's key is its `id`
//! field when present. Documents without one are keyed `#<index>`.
//! Keys must be unique within the collection. Fields other than
//! `embedding` are left as they are.
//!
//! Updates are written to a sibling temp file that is renamed over the
//! original, so the file on disk is always a complete document set.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use textlens::{Document, DocumentId, DocumentStore, DomainError, EmbeddingVector};

/// File-backed document store
pub struct JsonFileDocumentStore {
    path: PathBuf,
    collection: String,
    root: Mutex<Value>,
}

impl JsonFileDocumentStore {
    /// Read the file into memory
    pub async fn open(path: impl AsRef<Path>, collection: &str) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DomainError::Store(format!("Failed to read {:?}: {}", path, e)))?;
        let root: Value = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Store(format!("Invalid JSON in {:?}: {}", path, e)))?;

        let store = Self {
            path,
            collection: collection.to_string(),
            root: Mutex::new(root),
        };
        // Fail early when the collection is missing
        store.with_documents(|_| ()).await?;
        Ok(store)
    }

    async fn with_documents<T>(
        &self,
        f: impl FnOnce(&mut Vec<Value>) -> T,
    ) -> Result<T, DomainError> {
        let mut root = self.root.lock().await;
        let docs = match &mut *root {
            Value::Array(docs) => docs,
            Value::Object(map) => match map.get_mut(&self.collection) {
                Some(Value::Array(docs)) => docs,
                _ => {
                    return Err(DomainError::Store(format!(
                        "Collection '{}' not found in {:?}",
                        self.collection, self.path
                    )))
                }
            },
            _ => {
                return Err(DomainError::Store(format!(
                    "{:?} must contain an array or an object of arrays",
                    self.path
                )))
            }
        };
        Ok(f(docs))
    }

    async fn persist(&self) -> Result<(), DomainError> {
        let bytes = {
            let root = self.root.lock().await;
            serde_json::to_vec_pretty(&*root).map_err(|e| DomainError::Store(e.to_string()))?
        };
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
            .await
            .map_err(|e| DomainError::Store(format!("Write task failed: {}", e)))?
    }
}

/// Write `bytes` next to `path`, then rename over it
fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    let write_error = |e: std::io::Error| {
        DomainError::Store(format!("Failed to write {:?}: {}", path, e))
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_error)?;
    }
    tmp.write_all(bytes).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}

/// Key of every entry, `None` for entries that are not objects.
/// Fails when two documents resolve to the same key.
fn document_keys(docs: &[Value]) -> Result<Vec<Option<String>>, DomainError> {
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(docs.len());

    for (index, doc) in docs.iter().enumerate() {
        if !doc.is_object() {
            keys.push(None);
            continue;
        }
        let key = match doc.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => format!("#{}", index),
        };
        if !seen.insert(key.clone()) {
            return Err(DomainError::Store(format!(
                "Duplicate document key '{}' at index {}",
                key, index
            )));
        }
        keys.push(Some(key));
    }

    Ok(keys)
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn find_all(&self) -> Result<Vec<Document>, DomainError> {
        self.with_documents(|docs| -> Result<Vec<Document>, DomainError> {
            let keys = document_keys(docs)?;
            Ok(docs
                .iter()
                .zip(keys)
                .enumerate()
                .filter_map(|(index, (doc, key))| match key {
                    Some(key) => {
                        let text = doc.get("text").and_then(Value::as_str).map(str::to_string);
                        Some(Document::new(key, text))
                    }
                    None => {
                        tracing::warn!("Ignoring non-object entry at index {}", index);
                        None
                    }
                })
                .collect())
        })
        .await?
    }

    async fn update_embedding(
        &self,
        id: &DocumentId,
        embedding: &EmbeddingVector,
    ) -> Result<(), DomainError> {
        let vector = serde_json::to_value(embedding).map_err(|e| DomainError::Store(e.to_string()))?;

        let found = self
            .with_documents(|docs| -> Result<bool, DomainError> {
                let keys = document_keys(docs)?;
                let position = keys
                    .iter()
                    .position(|key| key.as_deref() == Some(id.as_str()));

                Ok(position
                    .and_then(|index| docs[index].as_object_mut())
                    .map(|doc| doc.insert("embedding".to_string(), vector))
                    .is_some())
            })
            .await??;

        if !found {
            return Err(DomainError::Store(format!("Document {} not found", id)));
        }

        self.persist().await
    }
}
