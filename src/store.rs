use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{Item, ItemDraft};
use crate::storage::Storage;

/// Shareable item store for use across async handlers.
///
/// Every operation is a read-modify-write cycle against the injected
/// [`Storage`]: load the full collection, mutate it in memory, save it back.
/// Mutating operations hold a single async mutex for the whole cycle so two
/// concurrent writers cannot silently drop each other's change.
#[derive(Clone)]
pub struct ItemStore {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl ItemStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All stored items, in insertion order.
    pub async fn list(&self) -> Result<Vec<Item>> {
        self.storage.load().await
    }

    /// Look up one item by id.
    pub async fn get(&self, id: u64) -> Result<Option<Item>> {
        let items = self.storage.load().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    /// Append a new item, assigning `id = current count + 1`.
    ///
    /// Ids are derived from the collection length, not a monotonic counter,
    /// so deleting and re-creating can reuse an id held by a surviving item.
    pub async fn create(&self, draft: ItemDraft) -> Result<Item> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.storage.load().await?;
        let item = draft.into_item(items.len() as u64 + 1);
        items.push(item.clone());
        self.storage.save(&items).await?;

        tracing::debug!("created item {}", item.id);
        Ok(item)
    }

    /// Shallow-merge a validated payload into the item with the given id.
    ///
    /// Returns `Ok(None)` when no stored item matches.
    pub async fn update(&self, id: u64, draft: ItemDraft) -> Result<Option<Item>> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.storage.load().await?;
        let Some(position) = items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };

        items[position].apply(draft);
        let updated = items[position].clone();
        self.storage.save(&items).await?;

        tracing::debug!("updated item {}", id);
        Ok(Some(updated))
    }

    /// Remove the item with the given id by position.
    ///
    /// Returns `Ok(false)` when no stored item matches.
    pub async fn delete(&self, id: u64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.storage.load().await?;
        let Some(position) = items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        items.remove(position);
        self.storage.save(&items).await?;

        tracing::debug!("deleted item {}", id);
        Ok(true)
    }

    pub async fn health(&self) -> Result<()> {
        self.storage.health().await
    }
}
