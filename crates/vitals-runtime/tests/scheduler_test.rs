mod common;

use chrono::{Duration, NaiveTime, TimeZone, Utc};
use tokio::sync::watch;

use vitals_core::config::ScheduleConfig;
use vitals_core::models::{NewEvent, Severity};
use vitals_runtime::reports;
use vitals_runtime::{run_scheduler, Job, RecurringTask, Scheduler, ServerMessage};

use common::{drain, harness, t0};

#[test]
fn interval_task_fires_on_time_and_collapses_missed_runs() {
    let mut task = RecurringTask::every(Job::HealthCheck, Duration::seconds(300), t0());
    assert!(!task.is_due(t0() + Duration::seconds(299)));
    assert!(task.is_due(t0() + Duration::seconds(300)));

    task.advance(t0() + Duration::seconds(1000));
    assert_eq!(task.next_due, t0() + Duration::seconds(1200));
}

#[test]
fn daily_task_aligns_to_wall_clock() {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let mut task = RecurringTask::daily_at(Job::DailyReport, midnight, t0());
    assert_eq!(task.next_due, Utc.with_ymd_and_hms(2026, 5, 2, 0, 0, 0).unwrap());

    let late = Utc.with_ymd_and_hms(2026, 5, 4, 7, 30, 0).unwrap();
    task.advance(late);
    assert_eq!(task.next_due, Utc.with_ymd_and_hms(2026, 5, 5, 0, 0, 0).unwrap());

    let evening = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    let task = RecurringTask::daily_at(Job::DailyReport, evening, t0());
    assert_eq!(task.next_due, Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap());
}

#[test]
fn scheduler_returns_due_jobs_in_order() {
    let config = ScheduleConfig {
        health_check_interval_secs: 60,
        backup_interval_secs: 120,
        flush_interval_secs: 0,
        retention_sweep_interval_secs: 86_400,
        report_time: "13:00".into(),
    };
    let mut scheduler = Scheduler::from_config(&config, t0());
    assert_eq!(scheduler.tasks().len(), 4);
    assert_eq!(scheduler.next_due(), Some(t0() + Duration::seconds(60)));

    assert!(scheduler.due(t0() + Duration::seconds(59)).is_empty());
    assert_eq!(scheduler.due(t0() + Duration::seconds(60)), vec![Job::HealthCheck]);
    assert_eq!(
        scheduler.due(t0() + Duration::seconds(120)),
        vec![Job::HealthCheck, Job::Backup]
    );
    assert_eq!(
        scheduler.due(t0() + Duration::hours(1)),
        vec![Job::HealthCheck, Job::Backup, Job::DailyReport]
    );
}

#[test]
fn unparseable_report_time_drops_report_job() {
    let config = ScheduleConfig {
        report_time: "noon".into(),
        ..ScheduleConfig::default()
    };
    let scheduler = Scheduler::from_config(&config, t0());
    assert!(scheduler.tasks().iter().all(|t| t.job != Job::DailyReport));
}

#[test]
fn run_job_dispatches_to_engine() {
    let h = harness();
    h.engine.run_job(Job::Backup);
    assert_eq!(h.engine.status().unwrap().backups.len(), 1);

    h.engine.run_job(Job::DailyReport);
    let yesterday = (t0() - Duration::days(1)).date_naive();
    let report = reports::read(&h.engine.config().reports_dir(), yesterday)
        .unwrap()
        .expect("report written");
    assert_eq!(report.date, yesterday);
}

#[tokio::test]
async fn scheduler_persists_and_stops_on_shutdown() {
    let h = harness();
    h.engine
        .add_event(NewEvent::error(Severity::Low, "browser", "boom"))
        .unwrap();
    let scheduler = Scheduler::from_config(&h.engine.config().schedule, h.engine.now());

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(run_scheduler(h.engine.clone(), scheduler, rx));
    tx.send(true).unwrap();
    handle.await.unwrap();

    let flushed: Vec<vitals_core::models::Event> =
        vitals_core::persist::read_json(&h.engine.config().events_path())
            .unwrap()
            .unwrap();
    assert_eq!(flushed.len(), 1);
}

#[tokio::test]
async fn scheduler_stops_when_sender_drops() {
    let h = harness();
    let scheduler = Scheduler::new(Vec::new());
    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(run_scheduler(h.engine.clone(), scheduler, rx));
    drop(tx);
    handle.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn due_jobs_run_off_the_async_workers() {
    let h = harness();
    let mut sub = h.engine.subscribe().unwrap();
    let scheduler = Scheduler::new(vec![RecurringTask::every(
        Job::Backup,
        Duration::seconds(1),
        t0() - Duration::seconds(10),
    )]);

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(run_scheduler(h.engine.clone(), scheduler, rx));
    let mut backups = 0;
    for _ in 0..200 {
        backups = h.engine.status().unwrap().backups.len();
        if backups > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    tx.send(true).unwrap();
    handle.await.unwrap();

    assert_eq!(backups, 1);
    let scheduled = drain(&mut sub.receiver).into_iter().any(|m| {
        matches!(m, ServerMessage::Action { action } if action.reason == "scheduled")
    });
    assert!(scheduled);
}

proptest::proptest! {
    #[test]
    fn due_always_moves_tasks_past_now(interval in 1i64..10_000, elapsed in 0i64..100_000) {
        let mut scheduler = Scheduler::new(vec![
            RecurringTask::every(Job::FlushEvents, Duration::seconds(interval), t0()),
        ]);
        let now = t0() + Duration::seconds(elapsed);
        let fired = scheduler.due(now);
        proptest::prop_assert_eq!(fired.len(), usize::from(elapsed >= interval));
        proptest::prop_assert!(scheduler.next_due().unwrap() > now);
    }
}
