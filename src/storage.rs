use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::Item;

/// Persistence seam for the item collection.
///
/// The whole collection is the unit of persistence: `load` returns the full
/// stored collection, `save` overwrites it in full. Handlers only ever see
/// this trait, so tests substitute an in-memory fake.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the full item collection.
    ///
    /// Implementations are fail-open on read: a missing or unparsable store
    /// is "no items yet", not an error.
    async fn load(&self) -> Result<Vec<Item>>;

    /// Overwrite the full item collection.
    async fn save(&self, items: &[Item]) -> Result<()>;

    /// Verify the backing store is reachable.
    async fn health(&self) -> Result<()>;
}

/// File-backed storage: one pretty-printed JSON document holding the whole
/// item collection.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    /// Read and parse the backing document.
    ///
    /// A missing, unreadable, or corrupt document logs a warning and yields
    /// an empty collection. The first successful `save` rewrites it.
    async fn load(&self) -> Result<Vec<Item>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    "could not read {}: {}; treating store as empty",
                    self.path.display(),
                    err
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(
                    "could not parse {}: {}; treating store as empty",
                    self.path.display(),
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    /// Serialize the collection with 2-space indentation and overwrite the
    /// backing document in full. Write failures propagate to the caller.
    async fn save(&self, items: &[Item]) -> Result<()> {
        let body = serde_json::to_string_pretty(items)
            .context("failed to serialize the item collection")?;

        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        tracing::debug!("persisted {} items to {}", items.len(), self.path.display());
        Ok(())
    }

    /// The store is healthy when the document is a readable regular file, or
    /// absent with an accessible parent directory (the first save creates it).
    async fn health(&self) -> Result<()> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(anyhow::anyhow!(
                "{} exists but is not a regular file",
                self.path.display()
            )),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let parent = self
                    .path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                tokio::fs::metadata(parent)
                    .await
                    .with_context(|| format!("data directory {} is not accessible", parent.display()))?;
                Ok(())
            }
            Err(err) => {
                Err(err).with_context(|| format!("cannot stat {}", self.path.display()))
            }
        }
    }
}

/// In-memory storage fake for tests.
#[cfg(test)]
pub struct MemoryStorage {
    items: std::sync::Mutex<Vec<Item>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: std::sync::Mutex::new(items),
        }
    }

    /// Current stored collection, for asserting side effects (or their
    /// absence) after a request.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Item>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn save(&self, items: &[Item]) -> Result<()> {
        *self.items.lock().unwrap() = items.to_vec();
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}
