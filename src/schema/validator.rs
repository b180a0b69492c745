use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

use crate::Result;
use crate::schema::types::{FieldError, Observed, Schema, SchemaViolation, ValueKind};

/// 路径片段
#[derive(Debug, Clone)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// 含 `.`、`[`、`]` 或为空的键写成 `["a.b"]`
fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']'])
}

fn render_path(segments: &[Segment<'_>]) -> String {
    if segments.is_empty() {
        return "$".to_string();
    }

    let mut path = String::new();
    for segment in segments {
        match segment {
            Segment::Key(key) if needs_quoting(key) => {
                path.push_str(&format!("[{:?}]", key));
            }
            Segment::Key(key) => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
            }
            Segment::Index(index) => {
                path.push_str(&format!("[{}]", index));
            }
        }
    }
    path
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .unwrap()
    })
}

fn is_email(text: &str) -> bool {
    !text.starts_with('.') && !text.contains("..") && email_regex().is_match(text)
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

/// 只比较根节点的种类
fn kind_matches(schema: &Schema, value: &Value) -> bool {
    match schema {
        Schema::Any => true,
        Schema::String | Schema::Email => value.is_string(),
        Schema::Number | Schema::Integer => value.is_number(),
        Schema::Boolean => value.is_boolean(),
        Schema::Null => value.is_null(),
        Schema::Literal(expected) => ValueKind::of(expected) == ValueKind::of(value),
        Schema::Array(_) | Schema::NonEmptyArray(_) => value.is_array(),
        Schema::Object(_) => value.is_object(),
        Schema::Nullable(inner) => value.is_null() || kind_matches(inner, value),
        Schema::Optional(inner) => kind_matches(inner, value),
    }
}

struct Validator<'s> {
    path: Vec<Segment<'s>>,
    errors: Vec<FieldError>,
}

impl<'s> Validator<'s> {
    fn report(&mut self, expected: String, observed: Observed) {
        self.errors.push(FieldError {
            path: render_path(&self.path),
            expected,
            observed,
        });
    }

    fn check(&mut self, schema: &'s Schema, value: &'s Value) {
        let observed = Observed::Kind(ValueKind::of(value));
        if !kind_matches(schema, value) {
            self.report(schema.describe(), observed);
            return;
        }

        match schema {
            Schema::Nullable(inner) | Schema::Optional(inner) => {
                if !(value.is_null() && matches!(schema, Schema::Nullable(_))) {
                    self.check(inner, value);
                }
            }
            Schema::Email => {
                if !value.as_str().is_some_and(is_email) {
                    self.report(schema.describe(), observed);
                }
            }
            Schema::Integer => {
                if !is_integer(value) {
                    self.report(schema.describe(), observed);
                }
            }
            Schema::Literal(expected) => {
                if value != expected {
                    self.report(schema.describe(), observed);
                }
            }
            Schema::Array(items) | Schema::NonEmptyArray(items) => {
                let elements = value.as_array().map(Vec::as_slice).unwrap_or_default();
                if elements.is_empty() && matches!(schema, Schema::NonEmptyArray(_)) {
                    self.report(schema.describe(), observed);
                }
                for (index, element) in elements.iter().enumerate() {
                    self.path.push(Segment::Index(index));
                    self.check(items, element);
                    self.path.pop();
                }
            }
            Schema::Object(object) => {
                let Some(map) = value.as_object() else {
                    return;
                };
                for (name, field) in object.fields() {
                    self.path.push(Segment::Key(name));
                    match map.get(name) {
                        Some(child) => self.check(field, child),
                        None if field.is_optional() => {}
                        None => self.report(field.describe(), Observed::Absent),
                    }
                    self.path.pop();
                }
                if object.is_strict() {
                    for (key, child) in map {
                        if object.field(key).is_none() {
                            self.path.push(Segment::Key(key));
                            self.report("absent".to_string(), Observed::Kind(ValueKind::of(child)));
                            self.path.pop();
                        }
                    }
                }
            }
            Schema::Any
            | Schema::String
            | Schema::Number
            | Schema::Boolean
            | Schema::Null => {}
        }
    }
}

/// 按 schema 校验任意 JSON 值
///
/// 不会在第一个错误处停止：嵌套对象和数组里的所有不匹配都会收集后一起返回。
pub fn validate<'v>(schema: &Schema, value: &'v Value) -> std::result::Result<&'v Value, SchemaViolation> {
    let mut validator = Validator {
        path: Vec::new(),
        errors: Vec::new(),
    };
    validator.check(schema, value);

    if validator.errors.is_empty() {
        Ok(value)
    } else {
        Err(SchemaViolation::new(validator.errors))
    }
}

/// 校验通过后再反序列化为具体类型
pub fn validate_as<T: DeserializeOwned>(schema: &Schema, value: &Value) -> Result<T> {
    validate(schema, value)?;
    Ok(serde_json::from_value(value.clone())?)
}

impl Schema {
    pub fn validate<'v>(&self, value: &'v Value) -> std::result::Result<&'v Value, SchemaViolation> {
        validate(self, value)
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        validate(self, value).is_ok()
    }
}
