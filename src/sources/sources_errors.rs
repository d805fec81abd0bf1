use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid source data: {0}")]
    InvalidData(String),

    #[error("Transaction source not found: {0}")]
    NotFound(String),
}
