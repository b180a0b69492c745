use serde_json::Value;
use std::fmt;

/// 声明式结构契约
///
/// 纯数据：校验时既不修改 schema 也不修改被校验的值。
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// 任意值
    Any,
    String,
    /// 满足邮箱格式的字符串
    Email,
    Number,
    /// 没有小数部分的数字
    Integer,
    Boolean,
    Null,
    /// 必须与给定值完全相等
    Literal(Value),
    Array(Box<Schema>),
    /// 至少包含一个元素的数组
    NonEmptyArray(Box<Schema>),
    Object(ObjectSchema),
    /// 接受 null 或内部 schema
    Nullable(Box<Schema>),
    /// 作为对象字段时允许缺省；出现时按内部 schema 校验
    Optional(Box<Schema>),
}

impl Schema {
    pub fn object<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Schema)>,
    {
        Schema::Object(ObjectSchema::new(fields))
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn non_empty_array(items: Schema) -> Self {
        Schema::NonEmptyArray(Box::new(items))
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::Nullable(Box::new(inner))
    }

    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(Box::new(inner))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Schema::Literal(value.into())
    }

    /// 字段可以缺失；`Nullable` 不影响是否可缺失
    pub(crate) fn is_optional(&self) -> bool {
        match self {
            Schema::Optional(_) => true,
            Schema::Nullable(inner) => inner.is_optional(),
            _ => false,
        }
    }

    /// 期望类型的简短描述，用于错误信息
    pub fn describe(&self) -> String {
        match self {
            Schema::Any => "any".to_string(),
            Schema::String => "string".to_string(),
            Schema::Email => "email".to_string(),
            Schema::Number => "number".to_string(),
            Schema::Integer => "integer".to_string(),
            Schema::Boolean => "boolean".to_string(),
            Schema::Null => "null".to_string(),
            Schema::Literal(value) => format!("literal {}", value),
            Schema::Array(_) => "array".to_string(),
            Schema::NonEmptyArray(_) => "non-empty array".to_string(),
            Schema::Object(_) => "object".to_string(),
            Schema::Nullable(inner) => format!("{} | null", inner.describe()),
            Schema::Optional(inner) => inner.describe(),
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

/// 对象契约：有序字段表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
    strict: bool,
}

impl ObjectSchema {
    pub fn new<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Schema)>,
    {
        Self::default().extend(fields)
    }

    /// 派生契约：追加字段，同名字段被覆盖
    pub fn extend<'a, I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Schema)>,
    {
        for (name, schema) in fields {
            match self.fields.iter_mut().find(|(existing, _)| existing == name) {
                Some(slot) => slot.1 = schema,
                None => self.fields.push((name.to_string(), schema)),
            }
        }
        self
    }

    /// 未声明的字段也视为错误（默认忽略）
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }
}

/// JSON 值的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 实际观察到的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    Absent,
    Kind(ValueKind),
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Absent => f.write_str("absent"),
            Observed::Kind(kind) => kind.fmt(f),
        }
    }
}

/// 单个字段的结构不匹配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// `data.countries[0].name` 形式；根节点为 `$`
    pub path: String,
    pub expected: String,
    pub observed: Observed,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path, self.expected, self.observed
        )
    }
}

/// 一次校验得到的全部字段错误，至少一个
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    errors: Vec<FieldError>,
}

impl SchemaViolation {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn paths(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn error_at(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaViolation {}
