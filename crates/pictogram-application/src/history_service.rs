//! History service.
//!
//! Keeps the bounded, deduplicated history in memory and writes the whole
//! list back to storage under [`HISTORY_STORAGE_KEY`] after each mutation.

use std::sync::Arc;

use pictogram_core::Result;
use pictogram_core::history::{HISTORY_STORAGE_KEY, History, HistoryItem, HistoryStorage};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub struct HistoryService {
    storage: Arc<dyn HistoryStorage>,
    history: RwLock<History>,
}

impl HistoryService {
    /// Rehydrates the history from storage.
    ///
    /// A missing, unreadable or corrupt payload starts an empty history.
    pub async fn load(storage: Arc<dyn HistoryStorage>) -> Self {
        let history = match storage.read(HISTORY_STORAGE_KEY).await {
            Ok(Some(payload)) => History::from_json(&payload).unwrap_or_else(|err| {
                warn!("[History] Discarding stored history: {}", err);
                History::default()
            }),
            Ok(None) => History::default(),
            Err(err) => {
                warn!("[History] Failed to read stored history: {}", err);
                History::default()
            }
        };
        debug!("[History] Loaded {} items", history.len());

        Self {
            storage,
            history: RwLock::new(history),
        }
    }

    /// Records a generated icon and persists the list.
    ///
    /// The in-memory list only changes once the write has succeeded.
    pub async fn add(&self, prompt: &str, svg: &str) -> Result<HistoryItem> {
        let item = HistoryItem::now(prompt, svg);
        let mut history = self.history.write().await;
        let mut next = history.clone();
        next.add(item.clone());
        self.storage
            .write(HISTORY_STORAGE_KEY, &next.to_json()?)
            .await?;
        *history = next;
        Ok(item)
    }

    /// Removes the storage key, then empties the history.
    pub async fn clear(&self) -> Result<()> {
        let mut history = self.history.write().await;
        self.storage.remove(HISTORY_STORAGE_KEY).await?;
        history.clear();
        Ok(())
    }

    /// Items, most recent first.
    pub async fn list(&self) -> Vec<HistoryItem> {
        self.history.read().await.items().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pictogram_core::PictogramError;
    use pictogram_core::history::MAX_HISTORY_ITEMS;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStorage {
        values: Mutex<HashMap<String, String>>,
    }

    impl MemoryStorage {
        fn with_value(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            storage
        }

        fn get(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl HistoryStorage for MemoryStorage {
        async fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.get(key))
        }

        async fn write(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct BrokenStorage;

    #[async_trait]
    impl HistoryStorage for BrokenStorage {
        async fn read(&self, _key: &str) -> Result<Option<String>> {
            Err(PictogramError::io("disk on fire"))
        }

        async fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(PictogramError::storage("read-only"))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_add_persists_under_fixed_key() {
        let storage = Arc::new(MemoryStorage::default());
        let service = HistoryService::load(storage.clone()).await;

        service.add("mail", "<svg>a</svg>").await.unwrap();

        let stored = History::from_json(&storage.get(HISTORY_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.items()[0].prompt, "mail");
    }

    #[tokio::test]
    async fn test_duplicate_svg_moves_to_front() {
        let service = HistoryService::load(Arc::new(MemoryStorage::default())).await;
        service.add("p1", "<svg>a</svg>").await.unwrap();
        service.add("other", "<svg>b</svg>").await.unwrap();
        service.add("p2", "<svg>a</svg>").await.unwrap();

        let items = service.list().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].prompt, "p2");
        assert_eq!(items[1].prompt, "other");
    }

    #[tokio::test]
    async fn test_bounded_and_rehydrated() {
        let storage = Arc::new(MemoryStorage::default());
        let service = HistoryService::load(storage.clone()).await;
        for i in 0..25 {
            service.add(&format!("p{i}"), &format!("<svg>{i}</svg>")).await.unwrap();
        }
        assert_eq!(service.list().await.len(), MAX_HISTORY_ITEMS);

        let reloaded = HistoryService::load(storage).await;
        let items = reloaded.list().await;
        assert_eq!(items.len(), MAX_HISTORY_ITEMS);
        assert_eq!(items[0].prompt, "p24");
    }

    #[tokio::test]
    async fn test_clear_removes_key() {
        let storage = Arc::new(MemoryStorage::default());
        let service = HistoryService::load(storage.clone()).await;
        service.add("mail", "<svg/>").await.unwrap();

        service.clear().await.unwrap();

        assert!(service.list().await.is_empty());
        assert!(storage.get(HISTORY_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_corrupt_payload_starts_empty() {
        let storage = Arc::new(MemoryStorage::with_value(HISTORY_STORAGE_KEY, "{not json"));
        let service = HistoryService::load(storage).await;
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_storage_starts_empty_and_surfaces_write_errors() {
        let service = HistoryService::load(Arc::new(BrokenStorage)).await;
        assert!(service.list().await.is_empty());
        assert!(service.add("mail", "<svg/>").await.is_err());
        assert!(service.list().await.is_empty());
    }
}
