pub mod context;
pub mod export;
pub mod format;
pub mod generate;
pub mod history;
pub mod output;
pub mod search;
pub mod trace;
