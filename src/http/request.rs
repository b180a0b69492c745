use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{ContractError, Result};

/// REST 调用选项
///
/// `headers` 为 `None` 时客户端不会注入任何默认请求头，用于匿名访问场景。
/// 唯一的例外是带 `data` 的请求：调用方没有给 `Content-Type` 时补上
/// `application/json`，让请求体能被正确解析。`Authorization` 永远不会被补上。
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Option<HeaderMap>,
    pub data: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.headers.get_or_insert_with(HeaderMap::new)
    }

    /// 追加单个请求头
    pub fn header(mut self, key: &str, value: &str) -> Result<Self> {
        let name: HeaderName = key
            .parse()
            .map_err(|_| ContractError::InvalidHeader(key.to_string()))?;
        let value: HeaderValue = value
            .parse()
            .map_err(|_| ContractError::InvalidHeader(format!("{}: {}", key, value)))?;
        self.headers_mut().insert(name, value);
        Ok(self)
    }

    /// 合并一组请求头，同名覆盖，其余保留
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let target = self.headers_mut();
        for (name, value) in headers.iter() {
            target.insert(name.clone(), value.clone());
        }
        self
    }

    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.data = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .as_ref()
            .is_some_and(|headers| headers.contains_key(name))
    }
}

/// GraphQL 请求体 `{query, variables?}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphqlRequest {
    /// 空变量等同于未提供，不会序列化出 `variables` 字段
    pub fn new(query: impl Into<String>, variables: Option<Map<String, Value>>) -> Self {
        Self {
            query: query.into(),
            variables: variables.filter(|vars| !vars.is_empty()),
        }
    }
}

pub(crate) fn json_content_type() -> (HeaderName, HeaderValue) {
    (CONTENT_TYPE, HeaderValue::from_static("application/json"))
}
