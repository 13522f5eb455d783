use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Document ingestion failed: {0}")]
    Ingestion(String),

    #[error("Index persistence failed: {0}")]
    Persistence(String),

    #[error("Search failed: {0}")]
    Search(String),
}

pub type Result<T> = std::result::Result<T, Error>;
