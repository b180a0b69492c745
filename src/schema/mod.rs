/// 结构契约校验 - 声明式 schema 与通用校验器
pub mod contracts;
mod types;
mod validator;

pub use types::{FieldError, ObjectSchema, Observed, Schema, SchemaViolation, ValueKind};
pub use validator::{validate, validate_as};
