use log::{Level, LevelFilter, Metadata, Record};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

/// Create a temporary directory for test output
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Properties of a passing test case that partially verifies two needs
pub fn complete_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "test_requirement_links"),
        ("file", "src/linker_test.cc"),
        ("line", "42"),
        ("result", "passed"),
        ("TestType", "requirements-based"),
        ("DerivationTechnique", "requirements-analysis"),
        ("result_text", ""),
        ("PartiallyVerifies", "REQ_A, REQ_B"),
    ]
}

/// A log record seen by [`capture_logs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static CAPTURED: RefCell<Vec<CapturedLog>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured.borrow_mut().push(CapturedLog {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            })
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Run `f` and return what it logged on the current thread.
///
/// Records are kept per thread so tests running in parallel don't see each
/// other's output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedLog>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });

    CAPTURED.with(|captured| captured.borrow_mut().clear());
    let result = f();
    let logs = CAPTURED.with(|captured| captured.take());
    (result, logs)
}
