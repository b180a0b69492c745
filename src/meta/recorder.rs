use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

use crate::meta::sink::{ReportEvent, ReportSink};
use crate::meta::types::TestMeta;

/// 响应时间参数名
pub const RESPONSE_TIME_PARAMETER: &str = "Response time (ms)";

/// 单个测试用例的元数据记录器
///
/// 每个用例新建一个，不在用例之间共享。上报是 best-effort：
/// 接收端写入失败只打印警告，不影响用例本身的断言。
pub struct MetaRecorder {
    case_id: Uuid,
    sink: Arc<dyn ReportSink>,
    meta: Option<TestMeta>,
}

impl MetaRecorder {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            case_id: Uuid::new_v4(),
            sink,
            meta: None,
        }
    }

    pub fn case_id(&self) -> Uuid {
        self.case_id
    }

    pub fn meta(&self) -> Option<&TestMeta> {
        self.meta.as_ref()
    }

    fn emit(&self, event: ReportEvent) {
        if let Err(e) = self.sink.record(&event) {
            warn!(case_id = %self.case_id, "Failed to report test metadata: {}", e);
        }
    }

    /// 设置分类信息；同一用例内多次调用以最后一次为准
    ///
    /// 同步完成，调用返回时标签已经交给接收端。四个标签每次都会上报，
    /// 未指定严重级别时上报默认的 `normal`，覆盖之前调用留下的值。
    pub fn set_meta(&mut self, meta: TestMeta) {
        self.emit(ReportEvent::label(self.case_id, "epic", &meta.epic));
        self.emit(ReportEvent::label(self.case_id, "feature", &meta.feature));
        self.emit(ReportEvent::label(self.case_id, "story", &meta.story));
        let severity = meta.severity.unwrap_or_default();
        self.emit(ReportEvent::label(self.case_id, "severity", severity.as_str()));
        self.meta = Some(meta);
    }

    /// 计算从 `start` 到现在的毫秒数，上报并返回
    pub fn record_duration(&self, start: Instant) -> u64 {
        let elapsed = start.elapsed().as_millis() as u64;
        self.emit(ReportEvent::parameter(
            self.case_id,
            RESPONSE_TIME_PARAMETER,
            &elapsed.to_string(),
        ));
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::sink::MemorySink;
    use crate::meta::types::{Severity, USERS, users_story};
    use crate::{ContractError, Result};
    use std::time::Duration;

    struct FailingSink;

    impl ReportSink for FailingSink {
        fn record(&self, _event: &ReportEvent) -> Result<()> {
            Err(ContractError::Other("sink offline".to_string()))
        }
    }

    #[test]
    fn test_set_meta_last_call_wins() {
        let sink = MemorySink::new();
        let mut recorder = MetaRecorder::new(Arc::new(sink.clone()));

        recorder.set_meta(USERS.story(users_story::LIST));
        recorder.set_meta(USERS.story(users_story::AUTH).with_severity(Severity::Normal));

        let id = recorder.case_id();
        assert_eq!(sink.label(id, "story").as_deref(), Some(users_story::AUTH));
        assert_eq!(sink.label(id, "severity").as_deref(), Some("normal"));
        assert_eq!(recorder.meta().unwrap().story, users_story::AUTH);
    }

    #[test]
    fn test_unset_severity_reports_default() {
        let sink = MemorySink::new();
        let mut recorder = MetaRecorder::new(Arc::new(sink.clone()));
        recorder.set_meta(TestMeta::new("E", "F", "S"));

        assert_eq!(sink.events().len(), 4);
        assert_eq!(sink.label(recorder.case_id(), "severity").as_deref(), Some("normal"));
    }

    #[test]
    fn test_later_call_without_severity_replaces_earlier_severity() {
        let sink = MemorySink::new();
        let mut recorder = MetaRecorder::new(Arc::new(sink.clone()));

        recorder.set_meta(TestMeta::new("E", "F", "S1").with_severity(Severity::Critical));
        recorder.set_meta(TestMeta::new("E", "F", "S2"));

        let id = recorder.case_id();
        assert_eq!(sink.label(id, "story").as_deref(), Some("S2"));
        assert_eq!(sink.label(id, "severity").as_deref(), Some("normal"));
        assert_eq!(recorder.meta().unwrap().severity, None);
    }

    #[test]
    fn test_record_duration_reports_and_returns() {
        let sink = MemorySink::new();
        let recorder = MetaRecorder::new(Arc::new(sink.clone()));

        let start = Instant::now();
        std::thread::sleep(Duration::from_millis(15));
        let elapsed = recorder.record_duration(start);

        assert!(elapsed >= 15);
        assert_eq!(
            sink.parameter(recorder.case_id(), RESPONSE_TIME_PARAMETER),
            Some(elapsed.to_string())
        );
    }

    #[test]
    fn test_recorders_have_distinct_case_ids() {
        let sink: Arc<dyn ReportSink> = Arc::new(MemorySink::new());
        let a = MetaRecorder::new(sink.clone());
        let b = MetaRecorder::new(sink);
        assert_ne!(a.case_id(), b.case_id());
    }

    #[test]
    fn test_failing_sink_does_not_panic() {
        let mut recorder = MetaRecorder::new(Arc::new(FailingSink));
        recorder.set_meta(USERS.story(users_story::CREATE));
        let _ = recorder.record_duration(Instant::now());
        assert!(recorder.meta().is_some());
    }
}
