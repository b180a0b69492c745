use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use crate::{ContractError, Result};

/// 可复用的字段选择片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub name: &'static str,
    pub type_condition: &'static str,
    /// 字段选择，每行一个字段，可以包含对 `dependencies` 的 spread
    pub selection: &'static str,
    pub dependencies: &'static [&'static Fragment],
}

impl Fragment {
    /// 渲染为 `fragment Name on Type { ... }`
    pub fn definition(&self) -> String {
        let body: Vec<String> = self
            .selection
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| format!("  {}", line))
            .collect();
        format!(
            "fragment {} on {} {{\n{}\n}}",
            self.name,
            self.type_condition,
            body.join("\n")
        )
    }
}

/// 不可变的具名 GraphQL 文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    name: String,
    text: String,
}

impl QueryDocument {
    /// 原样注册，不做任何检查（包括故意写错的文档）
    pub fn raw(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// 组合操作与片段，生成自包含的文档
    ///
    /// 依赖闭包中每个片段只追加一次；同名但定义不同的片段、
    /// 未提供定义的 spread、从未被 spread 的片段都会被拒绝。
    pub fn compose(name: impl Into<String>, operation: &str, fragments: &[&Fragment]) -> Result<Self> {
        let name = name.into();
        let mut closure: Vec<&Fragment> = Vec::new();
        let mut pending: Vec<&Fragment> = fragments.iter().rev().copied().collect();

        while let Some(fragment) = pending.pop() {
            if let Some(existing) = closure.iter().find(|f| f.name == fragment.name) {
                if *existing != fragment {
                    return Err(ContractError::RegistryError(format!(
                        "{}: conflicting definitions for fragment {}",
                        name, fragment.name
                    )));
                }
                continue;
            }
            closure.push(fragment);
            pending.extend(fragment.dependencies.iter().rev().copied());
        }

        let mut spreads = spread_names(operation);
        for fragment in &closure {
            spreads.extend(spread_names(fragment.selection));
        }

        for spread in &spreads {
            if !closure.iter().any(|f| f.name == spread.as_str()) {
                return Err(ContractError::RegistryError(format!(
                    "{}: fragment {} is spread but not defined",
                    name, spread
                )));
            }
        }
        if let Some(unused) = closure.iter().find(|f| !spreads.contains(f.name)) {
            return Err(ContractError::RegistryError(format!(
                "{}: fragment {} is never spread",
                name, unused.name
            )));
        }

        let mut text = operation.trim().to_string();
        for fragment in &closure {
            text.push_str("\n\n");
            text.push_str(&fragment.definition());
        }

        Ok(Self { name, text })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for QueryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// 提取 `...Name` 形式的片段引用，忽略内联片段 `... on Type`
fn spread_names(text: &str) -> BTreeSet<String> {
    static SPREAD_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = SPREAD_REGEX.get_or_init(|| Regex::new(r"\.\.\.\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());

    re.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|name| name != "on")
        .collect()
}
