#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use vitals_core::config::VitalsConfig;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

/// A project dir with three tracked files and a log dir, both under `tmp`.
pub fn project(tmp: &TempDir) -> VitalsConfig {
    let root = tmp.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules")).unwrap();
    fs::write(root.join("package.json"), r#"{"name":"app","version":"1.0.0"}"#).unwrap();
    fs::write(root.join("src/main.tsx"), "render(<App />);\n").unwrap();
    fs::write(root.join("vite.config.ts"), "export default {};\n").unwrap();

    let mut config = VitalsConfig::default();
    config.storage.log_dir = tmp.path().join("logs").display().to_string();
    config.recovery.project_root = root.display().to_string();
    config.recovery.tracked_files = vec![
        "package.json".into(),
        "src/main.tsx".into(),
        "vite.config.ts".into(),
        "tsconfig.json".into(),
    ];
    config.recovery.required_dirs = vec!["node_modules".into()];
    config
}

pub fn root(config: &VitalsConfig) -> PathBuf {
    config.project_root()
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}
