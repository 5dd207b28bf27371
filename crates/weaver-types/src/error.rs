use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WeaverError {
    #[error("Chat service error: {0}")]
    Chat(String),

    #[error("Generation service error: {0}")]
    Codegen(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preview error: {0}")]
    Preview(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for WeaverError {
    fn from(e: serde_json::Error) -> Self {
        WeaverError::Serialization(e.to_string())
    }
}
