use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NestnoteError {
    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Block not found: {0}")]
    BlockNotFound(Uuid),

    #[error("Cannot move document {document} under {target}: it would become its own ancestor")]
    Cycle { document: Uuid, target: Uuid },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NestnoteError>;
