/// GraphQL 查询注册表 - 片段组合与具名文档
mod document;
mod registry;

pub use document::{Fragment, QueryDocument};
pub use registry::{COUNTRY_CORE_FIELDS, QueryRegistry, country_queries, country_query};
