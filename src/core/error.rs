

use thiserror::Error;


#[derive(Error, Debug)]
pub enum CentroGuiaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}


pub type Result<T> = std::result::Result<T, CentroGuiaError>;
