use serde::{Deserialize, Serialize};

/// JSONPlaceholder 用户（只保留契约关心的字段）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// `POST /posts` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub capital: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountryDetail {
    #[serde(flatten)]
    pub country: Country,
    pub languages: Vec<Named>,
    pub continent: Named,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountriesData {
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryData {
    pub country: Option<CountryDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// GraphQL 响应信封：`data` 与 `errors` 都可能缺省
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_post_uses_camel_case_user_id() {
        let post = NewPost {
            title: "t".to_string(),
            body: "b".to_string(),
            user_id: 1,
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({"title": "t", "body": "b", "userId": 1})
        );
    }

    #[test]
    fn test_country_detail_flattens_core_fields() {
        let detail: CountryDetail = serde_json::from_value(json!({
            "code": "HU",
            "name": "Hungary",
            "capital": "Budapest",
            "currency": "HUF",
            "languages": [{"name": "Hungarian"}],
            "continent": {"name": "Europe"}
        }))
        .unwrap();
        assert_eq!(detail.country.capital.as_deref(), Some("Budapest"));
        assert_eq!(detail.continent.name, "Europe");
    }

    #[test]
    fn test_graphql_error_envelope() {
        let response: GraphqlResponse<CountriesData> =
            serde_json::from_value(json!({"errors": [{"message": "Syntax Error"}]})).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "Syntax Error");
    }
}
