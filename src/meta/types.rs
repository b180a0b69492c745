use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// 用例严重级别，未指定时为 `Normal`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocker,
    Critical,
    #[default]
    Normal,
    Minor,
    Trivial,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Blocker => "blocker",
            Severity::Critical => "critical",
            Severity::Normal => "normal",
            Severity::Minor => "minor",
            Severity::Trivial => "trivial",
        }
    }
}

impl FromStr for Severity {
    type Err = ContractError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blocker" => Ok(Severity::Blocker),
            "critical" => Ok(Severity::Critical),
            "normal" => Ok(Severity::Normal),
            "minor" => Ok(Severity::Minor),
            "trivial" => Ok(Severity::Trivial),
            _ => Err(ContractError::Other(format!("Invalid severity: {}", s))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个用例的分类信息
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestMeta {
    pub epic: String,
    pub feature: String,
    pub story: String,
    pub severity: Option<Severity>,
}

impl TestMeta {
    pub fn new(epic: impl Into<String>, feature: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            epic: epic.into(),
            feature: feature.into(),
            story: story.into(),
            severity: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

/// 一组用例共享的 epic/feature 与默认严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteMeta {
    pub epic: &'static str,
    pub feature: &'static str,
    pub severity: Severity,
}

impl SuiteMeta {
    pub fn story(&self, story: &str) -> TestMeta {
        TestMeta::new(self.epic, self.feature, story).with_severity(self.severity)
    }
}

pub const USERS: SuiteMeta = SuiteMeta {
    epic: "REST API",
    feature: "Users Endpoint",
    severity: Severity::Critical,
};

pub const COUNTRIES: SuiteMeta = SuiteMeta {
    epic: "GraphQL API",
    feature: "Countries Query",
    severity: Severity::Critical,
};

pub mod users_story {
    pub const LIST: &str = "GET /users — list all users";
    pub const BY_ID: &str = "GET /users/:id — single user by ID";
    pub const CREATE: &str = "POST /posts — create resource";
    pub const CONTENT_TYPE: &str = "Response content-type validation";
    pub const AUTH: &str = "Authentication header handling";
    pub const SCHEMA_BREAK: &str = "DEMO: Schema mismatch detection";
    pub const SLOW_RESPONSE: &str = "DEMO: Response time threshold";
}

pub mod countries_story {
    pub const LIST: &str = "List all countries";
    pub const BY_CODE: &str = "Get country by code";
    pub const SCHEMA: &str = "Schema validation";
    pub const MISSING_FIELD: &str = "DEMO: Missing field detection";
    pub const WRONG_VALUE: &str = "DEMO: Unexpected value detection";
}
