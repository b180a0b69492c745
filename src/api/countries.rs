use serde_json::{Map, Value};

use crate::Result;
use crate::graphql::{country_queries, country_query};
use crate::http::{Response, TransportClient};

/// Countries GraphQL API
///
/// 查询文本全部来自注册表，这里只负责选择文档和变量。
pub struct CountriesApi {
    client: TransportClient,
}

impl CountriesApi {
    pub fn new(client: TransportClient) -> Self {
        Self { client }
    }

    pub async fn get_countries(&self) -> Result<Response> {
        let query = country_queries().document(country_query::LIST)?;
        self.client.graphql_request(query, None).await
    }

    pub async fn get_country_by_code(&self, code: &str) -> Result<Response> {
        let query = country_queries().document(country_query::BY_CODE)?;
        let mut variables = Map::new();
        variables.insert("code".to_string(), Value::String(code.to_string()));
        self.client.graphql_request(query, Some(variables)).await
    }

    /// 发送语法错误的查询，用于验证服务端的错误契约
    pub async fn send_invalid_query(&self) -> Result<Response> {
        let query = country_queries().document(country_query::INVALID_SYNTAX)?;
        self.client.graphql_request(query, None).await
    }
}
