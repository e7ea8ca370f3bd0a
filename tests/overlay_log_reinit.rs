// One test per file: the global subscriber can only be installed once per
// test binary.
use std::{fs, thread::sleep, time::Duration};

use tempfile::tempdir;

#[test]
fn later_init_keeps_first_sink_and_creates_no_file() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");

    crosshair_overlay::logging::init(false, Some(first.clone()));
    crosshair_overlay::logging::init(true, Some(second.clone()));
    tracing::info!("overlay closed");
    tracing::debug!("filtered at info");

    sleep(Duration::from_millis(100));

    assert!(!second.exists(), "second init must not open a log file");
    let contents = fs::read_to_string(&first).unwrap();
    assert!(contents.contains("overlay closed"));
    assert!(!contents.contains("filtered at info"));
}
