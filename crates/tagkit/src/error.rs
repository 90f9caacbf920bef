use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagkitError {
    #[error("Object must have an id property or a configured id property")]
    MissingIdentifier,

    #[error("Item not found: {0}")]
    UnknownItem(String),

    #[error("Tag not found: {0}")]
    UnknownTag(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TagkitError>;
