//! HistoryService over the file-backed storage.

use std::sync::Arc;

use pictogram_application::HistoryService;
use pictogram_core::history::HistoryStorage;
use pictogram_infrastructure::FileHistoryStorage;
use tempfile::TempDir;

#[tokio::test]
async fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn HistoryStorage> = Arc::new(FileHistoryStorage::in_dir(dir.path()));

    let service = HistoryService::load(storage.clone()).await;
    service.add("mail", "<svg>mail</svg>").await.unwrap();
    service.add("star", "<svg>star</svg>").await.unwrap();
    assert!(dir.path().join("icons.json").exists());

    let restarted = HistoryService::load(storage).await;
    let prompts: Vec<String> = restarted.list().await.into_iter().map(|i| i.prompt).collect();
    assert_eq!(prompts, vec!["star", "mail"]);
}

#[tokio::test]
async fn test_corrupt_file_is_tolerated_and_clear_removes_it() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("icons.json"), "[{\"prompt\": 1}").unwrap();
    let storage: Arc<dyn HistoryStorage> = Arc::new(FileHistoryStorage::in_dir(dir.path()));

    let service = HistoryService::load(storage).await;
    assert!(service.list().await.is_empty());

    service.add("mail", "<svg/>").await.unwrap();
    service.clear().await.unwrap();
    assert!(!dir.path().join("icons.json").exists());
}
