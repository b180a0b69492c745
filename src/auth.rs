use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{ContractError, Result};

/// 存放测试 JWT 的环境变量
pub const TOKEN_ENV: &str = "TEST_JWT";

/// 认证请求头来源
///
/// 只约定返回形状：空映射表示匿名请求，否则恰好包含一个 `Authorization`。
pub trait AuthSource: Send + Sync {
    fn auth_headers(&self) -> Result<HeaderMap>;
}

/// 每次调用都重新读取 `TEST_JWT`，不做缓存
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvTokenSource;

impl AuthSource for EnvTokenSource {
    fn auth_headers(&self) -> Result<HeaderMap> {
        let token = std::env::var(TOKEN_ENV).ok();
        auth_headers(token.as_deref())
    }
}

/// 固定 token（来自配置文件或测试）
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl AuthSource for StaticToken {
    fn auth_headers(&self) -> Result<HeaderMap> {
        auth_headers(self.0.as_deref())
    }
}

/// 根据 token 生成认证头；空 token 视为未配置
pub fn auth_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(headers);
    };

    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| ContractError::InvalidHeader(format!("Authorization: {}", e)))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// 从环境读取认证头
pub fn get_auth_headers() -> Result<HeaderMap> {
    EnvTokenSource.auth_headers()
}

/// 本地运行（非 CI）
pub fn is_local_environment() -> bool {
    std::env::var_os("CI").is_none()
}
