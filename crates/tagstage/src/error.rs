use crate::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Usage error: an edit event arrived for an item nobody started editing.
    #[error("No open edit session for item {0}")]
    NoOpenSession(ItemId),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),

    #[error("Tag '{0}' already exists")]
    TagExists(String),

    #[error("Tag '{0}' not found")]
    TagNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StageError>;
