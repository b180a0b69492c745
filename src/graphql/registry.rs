use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::graphql::document::{Fragment, QueryDocument};
use crate::{ContractError, Result};

/// 名称到 GraphQL 文档的只读表，启动时构建一次
#[derive(Debug, Clone, Default)]
pub struct QueryRegistry {
    documents: BTreeMap<String, QueryDocument>,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册文档，名称重复视为错误
    pub fn register(mut self, document: QueryDocument) -> Result<Self> {
        if self.documents.contains_key(document.name()) {
            return Err(ContractError::RegistryError(format!(
                "duplicate query name: {}",
                document.name()
            )));
        }
        self.documents.insert(document.name().to_string(), document);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&QueryDocument> {
        self.documents.get(name)
    }

    /// 按名称取文档文本，找不到时返回错误
    pub fn document(&self, name: &str) -> Result<&str> {
        self.get(name)
            .map(QueryDocument::text)
            .ok_or_else(|| ContractError::RegistryError(format!("unknown query: {}", name)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryDocument> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Countries API 的操作名
pub mod country_query {
    pub const LIST: &str = "list";
    pub const BY_CODE: &str = "byCode";
    /// 故意写错的语法，用于验证服务端的错误契约，不要修复
    pub const INVALID_SYNTAX: &str = "invalidSyntax";
}

pub const COUNTRY_CORE_FIELDS: Fragment = Fragment {
    name: "CountryCoreFields",
    type_condition: "Country",
    selection: "
        code
        name
        capital
        currency
    ",
    dependencies: &[],
};

const LIST_COUNTRIES: &str = "
query ListCountries {
  countries {
    ...CountryCoreFields
  }
}
";

const GET_COUNTRY: &str = "
query GetCountry($code: ID!) {
  country(code: $code) {
    ...CountryCoreFields
    languages {
      name
    }
    continent {
      name
    }
  }
}
";

const INVALID_SYNTAX: &str = "{ countries ??? }";

fn build_country_queries() -> Result<QueryRegistry> {
    QueryRegistry::new()
        .register(QueryDocument::compose(
            country_query::LIST,
            LIST_COUNTRIES,
            &[&COUNTRY_CORE_FIELDS],
        )?)?
        .register(QueryDocument::compose(
            country_query::BY_CODE,
            GET_COUNTRY,
            &[&COUNTRY_CORE_FIELDS],
        )?)?
        .register(QueryDocument::raw(country_query::INVALID_SYNTAX, INVALID_SYNTAX))
}

static COUNTRY_QUERIES: Lazy<QueryRegistry> =
    Lazy::new(|| build_country_queries().expect("country query registry must compose"));

/// 进程内共享的 Countries 查询表
pub fn country_queries() -> &'static QueryRegistry {
    &COUNTRY_QUERIES
}
