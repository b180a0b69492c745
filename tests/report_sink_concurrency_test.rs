use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rucontract::meta::{EventKind, JsonlSink, MetaRecorder, TestMeta};
use tempfile::TempDir;

/// 多个 worker 同时写同一个 JSONL 文件，每行都完整
#[test]
fn test_concurrent_recorders_share_results_file() {
    let temp_dir = TempDir::new().unwrap();
    let results_file = Arc::new(temp_dir.path().join("events.jsonl"));

    let worker_count = 8;
    let cases_per_worker = 25;
    let mut handles = vec![];

    for worker in 0..worker_count {
        let path = results_file.clone();
        handles.push(thread::spawn(move || {
            // 每个用例各自构造 sink 与 recorder，不共享可变状态
            for case in 0..cases_per_worker {
                let sink = Arc::new(JsonlSink::new((*path).clone()));
                let mut recorder = MetaRecorder::new(sink);
                recorder.set_meta(TestMeta::new(
                    "REST API",
                    "Users Endpoint",
                    format!("worker {} case {}", worker, case),
                ));
                recorder.record_duration(Instant::now());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let events = JsonlSink::new((*results_file).clone()).read_all().unwrap();

    // 每个用例 4 个标签 + 1 个参数
    assert_eq!(events.len(), worker_count * cases_per_worker * 5);

    let parameters = events
        .iter()
        .filter(|event| matches!(event.kind, EventKind::Parameter { .. }))
        .count();
    assert_eq!(parameters, worker_count * cases_per_worker);
}
