use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use serde_json::{Map, Value};
use tracing::debug;

use crate::auth::{AuthSource, EnvTokenSource};
use crate::http::request::{GraphqlRequest, RequestOptions, json_content_type};
use crate::http::response::Response;
use crate::http::types::Method;
use crate::{ContractError, Result};

/// REST 与 GraphQL 共用的传输客户端
///
/// 每个测试用例各自构造一个实例，再注入到领域 API 对象中。
/// 客户端不解释状态码、不重试、不吞掉网络错误。
#[derive(Clone)]
pub struct TransportClient {
    inner: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthSource>,
}

impl TransportClient {
    /// 使用 `TEST_JWT` 作为认证来源
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.into(),
            auth: Arc::new(EnvTokenSource),
        }
    }

    pub fn with_auth_source(mut self, auth: Arc<dyn AuthSource>) -> Self {
        self.auth = auth;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 默认请求头：认证头（可能为空）+ JSON Content-Type
    pub fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = self.auth.auth_headers()?;
        let (name, value) = json_content_type();
        headers.insert(name, value);
        Ok(headers)
    }

    /// 拼接相对路径；空路径指向 base URL 本身
    pub fn url_for(&self, path: &str) -> Result<reqwest::Url> {
        if !path.is_empty() && (!path.starts_with('/') || path.contains("://")) {
            return Err(ContractError::InvalidPath(path.to_string()));
        }
        let full = if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        };
        Ok(reqwest::Url::parse(&full)?)
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Response> {
        self.send(Method::Get, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Response> {
        self.send(Method::Post, path, options).await
    }

    pub async fn send(&self, method: Method, path: &str, options: RequestOptions) -> Result<Response> {
        let url = self.url_for(path)?;
        let authenticated = options.has_header(AUTHORIZATION.as_str());
        let mut req = self.inner.request(method.to_reqwest(), url.clone());

        if let Some(headers) = options.headers.as_ref() {
            req = req.headers(headers.clone());
        }

        if let Some(data) = options.data.as_ref() {
            if !options.has_header(CONTENT_TYPE.as_str()) {
                let (name, value) = json_content_type();
                req = req.header(name, value);
            }
            req = req.body(serde_json::to_vec(data)?);
        }

        debug!(method = %method, url = %url, authenticated, "Sending request");

        let start = Instant::now();
        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        let duration = start.elapsed();

        debug!(
            method = %method,
            url = %url,
            status,
            elapsed_ms = duration.as_millis() as u64,
            "Received response"
        );

        Ok(Response::new(status, headers, body, duration))
    }

    /// 向 base URL 发送 GraphQL POST，始终带默认请求头
    pub async fn graphql_request(
        &self,
        document: &str,
        variables: Option<Map<String, Value>>,
    ) -> Result<Response> {
        let envelope = GraphqlRequest::new(document, variables);
        let options = RequestOptions::new()
            .headers(self.default_headers()?)
            .json(&envelope)?;
        self.post("", options).await
    }
}
