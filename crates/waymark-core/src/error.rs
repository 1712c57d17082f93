//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("History error: {0}")]
    History(#[from] waymark_history::HistoryError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
