use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no such entry: {0}")]
    NotFound(String),

    #[error("store operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
