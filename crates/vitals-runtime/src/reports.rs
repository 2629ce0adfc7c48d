//! Daily summary reports written to `{log_dir}/reports/report-YYYY-MM-DD.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use vitals_core::config::ErrorThresholds;
use vitals_core::errors::StorageError;
use vitals_core::models::{Event, EventPayload, HealthState, RecoveryAction, Severity};
use vitals_core::persist;
use vitals_events::samples;

const REPORT_PREFIX: &str = "report-";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One UTC day of activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    /// Health at generation time.
    pub health: HealthState,
    pub total_events: usize,
    pub events_by_type: BTreeMap<String, usize>,
    pub events_by_severity: BTreeMap<String, usize>,
    pub alerts_fired: usize,
    pub alerts_by_rule: BTreeMap<String, usize>,
    pub actions_by_type: BTreeMap<String, usize>,
    /// `None` when the day had no samples.
    pub mean_build_ms: Option<f64>,
    pub mean_response_ms: Option<f64>,
    /// Severities whose daily count reached the configured threshold.
    pub threshold_breaches: Vec<String>,
}

impl DailyReport {
    /// Summarize the events and actions stamped on `date`.
    pub fn build<'a>(
        date: NaiveDate,
        events: impl Iterator<Item = &'a Event>,
        actions: impl Iterator<Item = &'a RecoveryAction>,
        health: &HealthState,
        thresholds: &ErrorThresholds,
        now: DateTime<Utc>,
    ) -> Self {
        let day: Vec<&Event> = events.filter(|e| e.timestamp.date_naive() == date).collect();

        let mut events_by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut events_by_severity: BTreeMap<String, usize> = BTreeMap::new();
        let mut alerts_by_rule: BTreeMap<String, usize> = BTreeMap::new();
        for event in &day {
            *events_by_type.entry(event.kind().as_str().to_string()).or_insert(0) += 1;
            *events_by_severity
                .entry(event.severity.as_str().to_string())
                .or_insert(0) += 1;
            if let EventPayload::Error(detail) = &event.payload {
                if let Some(rule) = &detail.alert_rule {
                    *alerts_by_rule.entry(rule.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut actions_by_type: BTreeMap<String, usize> = BTreeMap::new();
        for action in actions.filter(|a| a.timestamp.date_naive() == date) {
            *actions_by_type
                .entry(action.action_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        let threshold_breaches = [
            (Severity::Critical, thresholds.critical),
            (Severity::High, thresholds.high),
            (Severity::Medium, thresholds.medium),
            (Severity::Low, thresholds.low),
        ]
        .into_iter()
        .filter_map(|(severity, limit)| {
            let count = events_by_severity.get(severity.as_str()).copied().unwrap_or(0);
            (count >= limit).then(|| format!("{count} {} events (threshold {limit})", severity.as_str()))
        })
        .collect();

        Self {
            date,
            generated_at: now,
            health: health.clone(),
            total_events: day.len(),
            events_by_type,
            events_by_severity,
            alerts_fired: alerts_by_rule.values().sum(),
            alerts_by_rule,
            actions_by_type,
            mean_build_ms: samples::mean(day.iter().filter_map(|e| samples::build_duration_ms(e))),
            mean_response_ms: samples::mean(day.iter().filter_map(|e| samples::response_time_ms(e))),
            threshold_breaches,
        }
    }
}

pub fn report_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{REPORT_PREFIX}{}.json", date.format(DATE_FORMAT)))
}

pub fn write(dir: &Path, report: &DailyReport) -> Result<PathBuf, StorageError> {
    let path = report_path(dir, report.date);
    persist::write_json(&path, report)?;
    Ok(path)
}

pub fn read(dir: &Path, date: NaiveDate) -> Result<Option<DailyReport>, StorageError> {
    persist::read_json(&report_path(dir, date))
}

/// Delete report files dated before `cutoff`. Unrelated files are ignored.
pub fn sweep(dir: &Path, cutoff: NaiveDate) -> Result<usize, StorageError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(StorageError::io(dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::io(dir, e))?;
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(report_date) else {
            continue;
        };
        if date < cutoff {
            fs::remove_file(entry.path()).map_err(|e| StorageError::io(&entry.path(), e))?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn report_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_prefix(REPORT_PREFIX)?.strip_suffix(".json")?;
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}
