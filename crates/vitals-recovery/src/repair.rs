//! Best-effort checks for common breakage. Reports only; never edits files.

use std::fs;
use std::path::Path;

use serde::Serialize;

/// Findings from one repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub checked: usize,
    pub issues: Vec<String>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check that each required dir exists and each tracked config file that
/// exists is non-empty and, for `.json`/`.toml`, parses.
pub fn inspect(root: &Path, required_dirs: &[String], config_files: &[String]) -> RepairReport {
    let mut report = RepairReport::default();

    for dir in required_dirs {
        report.checked += 1;
        if !root.join(dir).is_dir() {
            report.issues.push(format!("missing directory {dir}"));
        }
    }

    for rel in config_files {
        let path = root.join(rel);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                report.checked += 1;
                report.issues.push(format!("{rel} is unreadable: {e}"));
                continue;
            }
        };
        report.checked += 1;

        if content.trim().is_empty() {
            report.issues.push(format!("{rel} is empty"));
            continue;
        }
        if let Some(problem) = parse_problem(rel, &content) {
            report.issues.push(format!("{rel} does not parse: {problem}"));
        }
    }
    report
}

fn parse_problem(rel: &str, content: &str) -> Option<String> {
    match Path::new(rel).extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str::<serde_json::Value>(content)
            .err()
            .map(|e| e.to_string()),
        Some("toml") => toml::from_str::<toml::Value>(content)
            .err()
            .map(|e| e.to_string()),
        _ => None,
    }
}
