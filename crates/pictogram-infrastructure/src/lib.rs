//! Infrastructure layer of Pictogram: platform paths, atomic file storage,
//! configuration and secret loading, and file-backed history storage.

pub mod config_service;
pub mod file_history_storage;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use config_service::ConfigService;
pub use file_history_storage::FileHistoryStorage;
pub use paths::{PathError, PictogramPaths};
pub use secret_service::SecretServiceImpl;
pub use storage::AtomicFile;
