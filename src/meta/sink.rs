use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

use crate::{ContractError, Result};

/// 上报事件的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// 分类标签：epic / feature / story / severity
    Label { name: String, value: String },
    /// 具名参数，例如响应时间
    Parameter { name: String, value: String },
}

/// 一条上报记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEvent {
    pub case_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl ReportEvent {
    pub fn label(case_id: Uuid, name: &str, value: &str) -> Self {
        Self {
            case_id,
            timestamp: Utc::now(),
            kind: EventKind::Label {
                name: name.to_string(),
                value: value.to_string(),
            },
        }
    }

    pub fn parameter(case_id: Uuid, name: &str, value: &str) -> Self {
        Self {
            case_id,
            timestamp: Utc::now(),
            kind: EventKind::Parameter {
                name: name.to_string(),
                value: value.to_string(),
            },
        }
    }
}

/// 外部报告系统的接收端
pub trait ReportSink: Send + Sync {
    fn record(&self, event: &ReportEvent) -> Result<()>;
}

/// 以日志形式输出
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn record(&self, event: &ReportEvent) -> Result<()> {
        match &event.kind {
            EventKind::Label { name, value } => {
                info!(case_id = %event.case_id, label = %name, value = %value, "Test label");
            }
            EventKind::Parameter { name, value } => {
                info!(case_id = %event.case_id, parameter = %name, value = %value, "Test parameter");
            }
        }
        Ok(())
    }
}

/// 保存在内存中，克隆体共享同一份记录
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// 某个用例最后一次写入的标签值
    pub fn label(&self, case_id: Uuid, label: &str) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .filter(|event| event.case_id == case_id)
            .find_map(|event| match event.kind {
                EventKind::Label { name, value } if name == label => Some(value),
                _ => None,
            })
    }

    pub fn parameter(&self, case_id: Uuid, parameter: &str) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .filter(|event| event.case_id == case_id)
            .find_map(|event| match event.kind {
                EventKind::Parameter { name, value } if name == parameter => Some(value),
                _ => None,
            })
    }
}

impl ReportSink for MemorySink {
    fn record(&self, event: &ReportEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| ContractError::Other("memory sink poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}

/// 追加写入 JSONL 文件，供外部报告工具消费
///
/// 每次写入都持有排他文件锁，多个并行 worker 可以共用同一个文件。
#[derive(Debug, Clone)]
pub struct JsonlSink {
    file_path: PathBuf,
}

impl JsonlSink {
    const RESULTS_DIR: &'static str = "contract-results";
    const RESULTS_FILE: &'static str = "events.jsonl";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    /// `CONTRACT_RESULTS_DIR`（默认 `contract-results`）下的 events.jsonl
    pub fn from_env() -> Self {
        let dir = std::env::var("CONTRACT_RESULTS_DIR")
            .unwrap_or_else(|_| Self::RESULTS_DIR.to_string());
        Self::new(Path::new(&dir).join(Self::RESULTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 读取全部事件，跳过无法解析的行
    pub fn read_all(&self) -> Result<Vec<ReportEvent>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.file_path)?;
        file.lock_shared()?;

        let mut events = Vec::new();
        for line in BufReader::new(&file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(event) = serde_json::from_str::<ReportEvent>(&line) {
                events.push(event);
            }
        }
        Ok(events)
    }
}

impl ReportSink for JsonlSink {
    fn record(&self, event: &ReportEvent) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string(event)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        file.lock_exclusive()?;
        writeln!(file, "{}", json)?;
        drop(file);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_sink_last_label_wins() {
        let sink = MemorySink::new();
        let case_id = Uuid::new_v4();
        sink.record(&ReportEvent::label(case_id, "story", "first")).unwrap();
        sink.record(&ReportEvent::label(case_id, "story", "second")).unwrap();
        sink.record(&ReportEvent::label(Uuid::new_v4(), "story", "other case"))
            .unwrap();

        assert_eq!(sink.label(case_id, "story").as_deref(), Some("second"));
        assert_eq!(sink.events().len(), 3);
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = ReportEvent::parameter(Uuid::nil(), "Response time (ms)", "42");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "parameter");
        assert_eq!(value["name"], "Response time (ms)");
        assert_eq!(value["value"], "42");
        assert_eq!(value["case_id"], Uuid::nil().to_string());
    }

    #[test]
    fn test_jsonl_sink_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let sink = JsonlSink::new(temp_dir.path().join("nested").join("events.jsonl"));
        let case_id = Uuid::new_v4();

        sink.record(&ReportEvent::label(case_id, "epic", "REST API")).unwrap();
        sink.record(&ReportEvent::parameter(case_id, "Response time (ms)", "12"))
            .unwrap();

        let events = sink.read_all().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].kind,
            EventKind::Label {
                name: "epic".to_string(),
                value: "REST API".to_string()
            }
        );
    }

    #[test]
    fn test_jsonl_sink_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let sink = JsonlSink::new(temp_dir.path().join("events.jsonl"));
        assert!(sink.read_all().unwrap().is_empty());
    }
}
