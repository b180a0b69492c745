#![allow(dead_code)]

use std::sync::Arc;

use rucontract::api::NewPost;
use rucontract::auth::StaticToken;
use rucontract::http::TransportClient;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-jwt-token";

/// JSONPlaceholder 的已知数据 - 用户 1
pub struct FirstUser;

impl FirstUser {
    pub const ID: u64 = 1;
    pub const NAME: &'static str = "Leanne Graham";
    pub const USERNAME: &'static str = "Bret";
    pub const EMAIL: &'static str = "Sincere@april.biz";
}

pub const TOTAL_USERS: usize = 10;

pub fn new_post() -> NewPost {
    NewPost {
        title: "Playwright API E2E Test".to_string(),
        body: "Created by automated test".to_string(),
        user_id: 1,
    }
}

/// Countries API 的已知数据 - 匈牙利
pub struct Hungary;

impl Hungary {
    pub const CODE: &'static str = "HU";
    pub const NAME: &'static str = "Hungary";
    pub const CAPITAL: &'static str = "Budapest";
    pub const CURRENCY: &'static str = "HUF";
    pub const CONTINENT: &'static str = "Europe";
}

/// 指向模拟服务器、使用固定 token 的客户端
pub fn rest_client(server: &MockServer) -> TransportClient {
    TransportClient::new(server.uri()).with_auth_source(Arc::new(StaticToken::new(TEST_TOKEN)))
}

pub fn graphql_client(server: &MockServer) -> TransportClient {
    TransportClient::new(format!("{}/graphql", server.uri()))
        .with_auth_source(Arc::new(StaticToken::new(TEST_TOKEN)))
}

pub fn user_one() -> Value {
    json!({
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": {"lat": "-37.3159", "lng": "81.1496"}
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

pub fn users() -> Value {
    let rest = [
        ("Ervin Howell", "Antonette", "Shanna@melissa.tv"),
        ("Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
        ("Patricia Lebsack", "Karianne", "Julianne.OConner@kory.org"),
        ("Chelsey Dietrich", "Kamren", "Lucio_Hettinger@annie.ca"),
        ("Mrs. Dennis Schulist", "Leopoldo_Corkery", "Karley_Dach@jasper.info"),
        ("Kurtis Weissnat", "Elwyn.Skiles", "Telly.Hoeger@billy.biz"),
        ("Nicholas Runolfsdottir V", "Maxime_Nienow", "Sherwood@rosamond.me"),
        ("Glenna Reichert", "Delphine", "Chaim_McDermott@dana.io"),
        ("Clementina DuBuque", "Moriah.Stanton", "Rey.Padberg@karina.biz"),
    ];

    let mut list = vec![user_one()];
    for (index, (name, username, email)) in rest.iter().enumerate() {
        list.push(json!({
            "id": index + 2,
            "name": name,
            "username": username,
            "email": email,
            "phone": format!("010-692-6593 x{}", 9125 + index),
            "website": format!("{}.example.org", username.to_lowercase()),
        }));
    }
    Value::Array(list)
}

pub fn hungary() -> Value {
    json!({
        "code": "HU",
        "name": "Hungary",
        "capital": "Budapest",
        "currency": "HUF",
        "languages": [{"name": "Hungarian"}],
        "continent": {"name": "Europe"}
    })
}

pub fn countries() -> Value {
    json!({"data": {"countries": [
        {"code": "AD", "name": "Andorra", "capital": "Andorra la Vella", "currency": "EUR"},
        {"code": "AQ", "name": "Antarctica", "capital": null, "currency": null},
        {"code": "HU", "name": "Hungary", "capital": "Budapest", "currency": "HUF"}
    ]}})
}

pub fn syntax_error() -> Value {
    json!({"errors": [{
        "message": "Syntax Error: Unexpected character: \"?\".",
        "locations": [{"line": 1, "column": 13}],
        "extensions": {"code": "GRAPHQL_PARSE_FAILED"}
    }]})
}
