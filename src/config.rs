use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::{ContractError, Result};

pub const DEFAULT_REST_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://countries.trevorblades.com/graphql";

/// 运行所需的全部外部配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub rest_base_url: String,
    pub graphql_url: String,
    pub token: Option<String>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            token: None,
        }
    }
}

/// 配置文件中的单个环境，所有字段可选
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Environment {
    pub rest_base_url: Option<String>,
    pub graphql_url: Option<String>,
    pub token: Option<String>,
}

/// 完整的配置文件
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub environments: HashMap<String, Environment>,
}

impl ConfigFile {
    pub fn get_environment(&self, env_name: &str) -> Option<&Environment> {
        self.environments.get(env_name)
    }
}

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    const CONFIG_FILE: &'static str = "rucontract.toml";
    const ENV_SELECTOR: &'static str = "CONTRACT_ENV";
    const DEFAULT_ENVIRONMENT: &'static str = "default";

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
        let content = fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| ContractError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// 查找顺序：当前目录及其父目录，然后 ~/.config/rucontract/
    pub fn find() -> Result<Option<ConfigFile>> {
        if let Ok(mut current) = std::env::current_dir() {
            loop {
                let candidate = current.join(Self::CONFIG_FILE);
                if candidate.exists() {
                    return Self::load_from_path(candidate).map(Some);
                }
                if !current.pop() {
                    break;
                }
            }
        }

        if let Some(home) = dirs::home_dir() {
            let candidate = home
                .join(".config")
                .join("rucontract")
                .join(Self::CONFIG_FILE);
            if candidate.exists() {
                return Self::load_from_path(candidate).map(Some);
            }
        }

        Ok(None)
    }

    /// 合并默认值、配置文件中选中的环境和进程环境变量（优先级依次升高）
    pub fn build(file: Option<&ConfigFile>, env_name: &str) -> ContractConfig {
        let mut config = ContractConfig::default();

        if let Some(env) = file.and_then(|f| f.get_environment(env_name)) {
            if let Some(url) = &env.rest_base_url {
                config.rest_base_url = resolve_env_vars(url);
            }
            if let Some(url) = &env.graphql_url {
                config.graphql_url = resolve_env_vars(url);
            }
            config.token = env
                .token
                .as_deref()
                .map(resolve_env_vars)
                .filter(|t| !t.is_empty() && !has_unresolved_reference(t));
        }

        if let Ok(url) = std::env::var("BASE_URL_REST") {
            config.rest_base_url = url;
        }
        if let Ok(url) = std::env::var("BASE_URL_GRAPHQL") {
            config.graphql_url = url;
        }
        if let Ok(token) = std::env::var(crate::auth::TOKEN_ENV) {
            config.token = Some(token).filter(|t| !t.is_empty());
        }

        config
    }
}

impl ContractConfig {
    /// 读取一次外部配置；调用方负责把结果传下去
    pub fn load() -> Result<Self> {
        let file = ConfigLoader::find()?;
        let env_name = std::env::var(ConfigLoader::ENV_SELECTOR)
            .unwrap_or_else(|_| ConfigLoader::DEFAULT_ENVIRONMENT.to_string());
        let config = ConfigLoader::build(file.as_ref(), &env_name);
        tracing::debug!(
            env = %env_name,
            rest = %config.rest_base_url,
            graphql = %config.graphql_url,
            authenticated = config.token.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

fn env_regex() -> &'static Regex {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap())
}

/// 解析并替换系统环境变量 ${VAR}，未设置的保持原样
pub fn resolve_env_vars(text: &str) -> String {
    env_regex()
        .replace_all(text, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
}

fn has_unresolved_reference(text: &str) -> bool {
    env_regex().is_match(text)
}
