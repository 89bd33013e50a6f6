pub mod model;
pub mod repository;

pub use model::{History, HistoryItem, MAX_HISTORY_ITEMS};
pub use repository::{HISTORY_STORAGE_KEY, HistoryStorage};
