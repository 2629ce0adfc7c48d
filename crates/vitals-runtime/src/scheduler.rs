//! Recurring tasks: fixed intervals plus an optional daily wall-clock
//! alignment, driven by whatever clock the engine was built with.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tokio::sync::watch;

use vitals_core::config::ScheduleConfig;

use crate::engine::VitalsEngine;
use crate::tracing_setup::events;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    HealthCheck,
    Backup,
    FlushEvents,
    RetentionSweep,
    DailyReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringTask {
    pub job: Job,
    pub interval: Duration,
    /// When set, the task fires once a day at this UTC time instead of
    /// stepping by `interval`.
    pub align: Option<NaiveTime>,
    pub next_due: DateTime<Utc>,
}

impl RecurringTask {
    /// First run one `interval` after `now`. Intervals under a second are
    /// raised to one second.
    pub fn every(job: Job, interval: Duration, now: DateTime<Utc>) -> Self {
        let interval = interval.max(Duration::seconds(1));
        Self {
            job,
            interval,
            align: None,
            next_due: now + interval,
        }
    }

    /// First run at the next occurrence of `at` strictly after `now`.
    pub fn daily_at(job: Job, at: NaiveTime, now: DateTime<Utc>) -> Self {
        Self {
            job,
            interval: Duration::days(1),
            align: Some(at),
            next_due: next_daily(at, now),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_due
    }

    /// Move `next_due` past `now`. Missed runs collapse into one.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        match self.align {
            Some(at) => self.next_due = next_daily(at, now),
            None => {
                while self.next_due <= now {
                    self.next_due += self.interval;
                }
            }
        }
    }
}

fn next_daily(at: NaiveTime, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<RecurringTask>,
}

impl Scheduler {
    pub fn new(tasks: Vec<RecurringTask>) -> Self {
        Self { tasks }
    }

    /// The standard job set. Zero intervals disable a job; the daily report
    /// is skipped when the report time does not parse.
    pub fn from_config(config: &ScheduleConfig, now: DateTime<Utc>) -> Self {
        let mut tasks = Vec::new();
        for (job, secs) in [
            (Job::HealthCheck, config.health_check_interval_secs),
            (Job::Backup, config.backup_interval_secs),
            (Job::FlushEvents, config.flush_interval_secs),
            (Job::RetentionSweep, config.retention_sweep_interval_secs),
        ] {
            if secs > 0 {
                tasks.push(RecurringTask::every(job, Duration::seconds(secs as i64), now));
            }
        }
        if let Some(at) = config.report_time_of_day() {
            tasks.push(RecurringTask::daily_at(Job::DailyReport, at, now));
        }
        Self { tasks }
    }

    pub fn tasks(&self) -> &[RecurringTask] {
        &self.tasks
    }

    /// Jobs whose due time has passed, in registration order. Each returned
    /// task is advanced past `now`.
    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<Job> {
        let mut jobs = Vec::new();
        for task in &mut self.tasks {
            if task.is_due(now) {
                jobs.push(task.job);
                task.advance(now);
            }
        }
        jobs
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.tasks.iter().map(|t| t.next_due).min()
    }
}

impl VitalsEngine {
    /// Run one scheduled job. Failures are logged, never propagated.
    pub fn run_job(&self, job: Job) {
        let result = match job {
            Job::HealthCheck => self.run_health_check().map(|_| ()),
            Job::Backup => self.create_backup("scheduled").map(|_| ()),
            Job::FlushEvents => self.flush_events().map(|_| ()),
            Job::RetentionSweep => self.retention_sweep().map(|_| ()),
            Job::DailyReport => {
                let yesterday = (self.now() - Duration::days(1)).date_naive();
                self.generate_report(yesterday).map(|_| ())
            }
        };
        match result {
            Ok(()) => events::job_completed(job),
            Err(e) => events::job_failed(job, &e.to_string()),
        }
    }
}

/// Drive `scheduler` until `shutdown` flips to true or its sender drops,
/// then persist everything once. Jobs and the final persist run on the
/// blocking pool, since they do file I/O under the engine lock.
pub async fn run_scheduler(
    engine: Arc<VitalsEngine>,
    mut scheduler: Scheduler,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }
        let wait = scheduler
            .next_due()
            .map(|due| (due - engine.now()).to_std().unwrap_or_default())
            .unwrap_or(std::time::Duration::from_secs(60));

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                let due = scheduler.due(engine.now());
                if !due.is_empty() {
                    let worker = Arc::clone(&engine);
                    let run = tokio::task::spawn_blocking(move || {
                        for job in due {
                            worker.run_job(job);
                        }
                    });
                    if let Err(e) = run.await {
                        events::blocking_task_failed("scheduled jobs", &e.to_string());
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    let persisted = tokio::task::spawn_blocking(move || engine.persist_all()).await;
    match persisted {
        Ok(Ok(())) => {}
        Ok(Err(e)) => events::persist_failed("shutdown", &e.to_string()),
        Err(e) => events::blocking_task_failed("shutdown persist", &e.to_string()),
    }
    events::scheduler_stopped();
}
