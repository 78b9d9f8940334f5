use thiserror::Error;

#[derive(Error, Debug)]
pub enum RucheckError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("无效的配置: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for RucheckError {
    fn from(err: anyhow::Error) -> Self {
        RucheckError::Other(err.to_string())
    }
}

// Add conversion from parser::ParseError
impl From<crate::parser::ParseError> for RucheckError {
    fn from(err: crate::parser::ParseError) -> Self {
        RucheckError::ParseError(err.to_string())
    }
}

/// Result type for rucheck crate
pub type Result<T> = std::result::Result<T, RucheckError>;
