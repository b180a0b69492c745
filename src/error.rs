use thiserror::Error;

use crate::schema::SchemaViolation;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("无效的请求路径: {0}")]
    InvalidPath(String),

    #[error("无效的请求头: {0}")]
    InvalidHeader(String),

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("查询注册错误: {0}")]
    RegistryError(String),

    #[error("契约校验失败: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ContractError {
    fn from(err: anyhow::Error) -> Self {
        ContractError::Other(err.to_string())
    }
}

/// Result type for rucontract crate
pub type Result<T> = std::result::Result<T, ContractError>;
