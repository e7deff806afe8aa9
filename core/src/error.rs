use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PanelResult<T> = Result<T, PanelError>;
