pub mod recorder;
pub mod sink;
pub mod types;

pub use recorder::{MetaRecorder, RESPONSE_TIME_PARAMETER};
pub use sink::{EventKind, JsonlSink, MemorySink, ReportEvent, ReportSink, TracingSink};
pub use types::{COUNTRIES, Severity, SuiteMeta, TestMeta, USERS, countries_story, users_story};
