#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid import declaration: {0}")]
    InvalidImport(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
