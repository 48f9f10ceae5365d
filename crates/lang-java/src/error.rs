use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("JImage error: {0}")]
    JImage(String),
    #[error("Malformed class file {name}: {reason}")]
    ClassFormat { name: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid classpath entry: {0}")]
    InvalidClasspathEntry(PathBuf),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, JavaError>;
