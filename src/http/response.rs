use crate::Result;
use crate::http::types::Status;
use reqwest::header::HeaderMap as Headers;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// 响应信封：状态码、响应头、原始 body，未经任何解释
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub headers: Headers,
    pub body: String,
    pub duration: Duration,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: String, duration: Duration) -> Self {
        Self {
            status: Status::new(status),
            headers,
            body,
            duration,
        }
    }

    pub fn status(&self) -> u16 {
        self.status.code()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// 响应头的字符串值；非 UTF-8 的值视为不存在
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// 将 body 解码为任意 JSON 值
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
