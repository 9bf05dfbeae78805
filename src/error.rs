use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),
    #[error("invalid land patch: {0}")]
    InvalidPatch(String),
    #[error("image error: {0}")]
    Image(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;
