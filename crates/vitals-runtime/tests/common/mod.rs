#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use tokio::sync::broadcast::Receiver;

use vitals_core::config::VitalsConfig;
use vitals_core::traits::ManualClock;
use vitals_runtime::{ServerMessage, VitalsEngine};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

/// Config rooted in `tmp`, with a small project of tracked files.
pub fn config(tmp: &TempDir) -> VitalsConfig {
    let root = tmp.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules")).unwrap();
    fs::write(root.join("package.json"), r#"{"name":"app"}"#).unwrap();
    fs::write(root.join("src/main.tsx"), "render(<App />);\n").unwrap();

    let mut config = VitalsConfig::default();
    config.storage.log_dir = tmp.path().join("logs").display().to_string();
    config.recovery.project_root = root.display().to_string();
    config.recovery.tracked_files = vec!["package.json".into(), "src/main.tsx".into()];
    config.recovery.required_dirs = vec!["node_modules".into()];
    config
}

pub struct Harness {
    pub tmp: TempDir,
    pub clock: Arc<ManualClock>,
    pub engine: Arc<VitalsEngine>,
}

pub fn harness() -> Harness {
    harness_with(|_| {})
}

pub fn harness_with(tweak: impl FnOnce(&mut VitalsConfig)) -> Harness {
    let tmp = TempDir::new().unwrap();
    let mut config = config(&tmp);
    tweak(&mut config);
    let clock = Arc::new(ManualClock::new(t0()));
    let engine = Arc::new(VitalsEngine::open(config, clock.clone()));
    Harness { tmp, clock, engine }
}

/// Everything currently buffered on `rx`.
pub fn drain(rx: &mut Receiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}
