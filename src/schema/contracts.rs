//! 两个公共 API 的响应契约，进程启动后只读
//!
//! `*_BROKEN` 契约故意声明了远端并不存在的字段，用来证明校验器能发现上游漂移；
//! 它们对真实响应必然校验失败，不要"修复"。

use once_cell::sync::Lazy;

use crate::schema::types::{ObjectSchema, Schema};

fn user() -> ObjectSchema {
    ObjectSchema::new([
        ("id", Schema::Number),
        ("name", Schema::String),
        ("username", Schema::String),
        ("email", Schema::Email),
        ("phone", Schema::String),
        ("website", Schema::String),
    ])
}

fn country() -> ObjectSchema {
    ObjectSchema::new([
        ("code", Schema::String),
        ("name", Schema::String),
        ("capital", Schema::nullable(Schema::String)),
        ("currency", Schema::nullable(Schema::String)),
    ])
}

fn named() -> Schema {
    Schema::object([("name", Schema::String)])
}

pub static USER: Lazy<Schema> = Lazy::new(|| user().into());

pub static USERS_LIST: Lazy<Schema> = Lazy::new(|| Schema::array(user().into()));

/// 真实字段是 `name`，并且没有 `department`
pub static USER_BROKEN: Lazy<Schema> = Lazy::new(|| {
    Schema::object([
        ("id", Schema::Number),
        ("fullName", Schema::String),
        ("department", Schema::String),
    ])
});

/// `POST /posts` 的回显
pub static CREATED_POST: Lazy<Schema> = Lazy::new(|| {
    Schema::object([
        ("id", Schema::Number),
        ("title", Schema::String),
        ("body", Schema::String),
        ("userId", Schema::Number),
    ])
});

pub static COUNTRY: Lazy<Schema> = Lazy::new(|| country().into());

pub static COUNTRIES_RESPONSE: Lazy<Schema> = Lazy::new(|| {
    Schema::object([(
        "data",
        Schema::object([("countries", Schema::array(country().into()))]),
    )])
});

pub static COUNTRY_DETAIL: Lazy<Schema> = Lazy::new(|| {
    let detail = country().extend([
        ("languages", Schema::array(named())),
        ("continent", named()),
    ]);
    Schema::object([("data", Schema::object([("country", detail.into())]))])
});

pub static GRAPHQL_ERROR: Lazy<Schema> = Lazy::new(|| {
    Schema::object([(
        "errors",
        Schema::non_empty_array(Schema::object([("message", Schema::String)])),
    )])
});

/// Countries API 没有 `population` 和 `area`
pub static COUNTRY_BROKEN: Lazy<Schema> = Lazy::new(|| {
    Schema::object([(
        "data",
        Schema::object([(
            "countries",
            Schema::array(Schema::object([
                ("code", Schema::String),
                ("name", Schema::String),
                ("population", Schema::Number),
                ("area", Schema::Number),
            ])),
        )]),
    )])
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_country_detail_extends_country() {
        let value = json!({"data": {"country": {
            "code": "HU",
            "name": "Hungary",
            "capital": "Budapest",
            "currency": "HUF",
            "languages": [{"name": "Hungarian"}],
            "continent": {"name": "Europe"}
        }}});
        assert!(COUNTRY_DETAIL.is_valid(&value));
    }

    #[test]
    fn test_country_allows_null_capital() {
        let antarctica = json!({"code": "AQ", "name": "Antarctica", "capital": null, "currency": null});
        assert!(COUNTRY.is_valid(&antarctica));
    }

    #[test]
    fn test_graphql_error_requires_messages() {
        assert!(GRAPHQL_ERROR.is_valid(&json!({"errors": [{"message": "Syntax Error"}]})));
        assert!(!GRAPHQL_ERROR.is_valid(&json!({"errors": []})));
        assert!(!GRAPHQL_ERROR.is_valid(&json!({"data": {}})));
    }

    #[test]
    fn test_country_broken_flags_missing_fields() {
        let value = json!({"data": {"countries": [
            {"code": "HU", "name": "Hungary", "capital": "Budapest", "currency": "HUF"}
        ]}});
        let violation = COUNTRY_BROKEN.validate(&value).unwrap_err();
        assert_eq!(
            violation.paths(),
            vec!["data.countries[0].population", "data.countries[0].area"]
        );
    }
}
