// Single source of truth for all default values.

// --- Health ---
pub const DEFAULT_RECENT_WINDOW_SECS: u64 = 3_600;
pub const DEFAULT_BUILD_TIME_BENCHMARK_MS: f64 = 30_000.0;
pub const DEFAULT_BUNDLE_SIZE_BENCHMARK_BYTES: u64 = 5_242_880; // 5 MB
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 3;
pub const DEFAULT_CRITICAL_THRESHOLD: usize = 3;
pub const DEFAULT_HIGH_THRESHOLD: usize = 10;
pub const DEFAULT_MEDIUM_THRESHOLD: usize = 25;
pub const DEFAULT_LOW_THRESHOLD: usize = 50;

// --- Alerts ---
pub const DEFAULT_ERROR_RATE_WINDOW_SECS: u64 = 60;
pub const DEFAULT_ERROR_RATE_MAX: usize = 10;
pub const DEFAULT_SLOW_RESPONSE_WINDOW_SECS: u64 = 60;
pub const DEFAULT_SLOW_RESPONSE_MS: f64 = 2_000.0;
pub const DEFAULT_MEMORY_WINDOW_SECS: u64 = 300;
pub const DEFAULT_MEMORY_MAX_MB: f64 = 512.0;
pub const DEFAULT_BUILD_WINDOW_SECS: u64 = 3_600;
pub const DEFAULT_BUILD_MAX_MEAN_MS: f64 = 60_000.0;
pub const DEFAULT_ALERT_COOLDOWN_SECS: u64 = 300;

// --- Recovery ---
pub const DEFAULT_AUTO_RESTART: bool = false;
pub const DEFAULT_ROLLBACK_ON_FAILURE: bool = true;
pub const DEFAULT_MAX_BACKUPS: usize = 10;
pub const DEFAULT_MAX_ACTIONS: usize = 100;
pub const DEFAULT_ERROR_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_CRITICAL_WINDOW_SECS: u64 = 300;
pub const DEFAULT_MIN_TRIGGER_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_PROJECT_ROOT: &str = ".";
pub const DEFAULT_TRACKED_FILES: &[&str] = &[
    "package.json",
    "vite.config.ts",
    "tsconfig.json",
    "src/main.tsx",
    "src/App.tsx",
];
pub const DEFAULT_REQUIRED_DIRS: &[&str] = &["node_modules"];

// --- Storage ---
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_EVENT_CAPACITY: usize = 10_000;
pub const DEFAULT_FLUSH_EVERY: u64 = 100;
pub const DEFAULT_FLUSH_LIMIT: usize = 1_000;
pub const DEFAULT_BACKFILL_COUNT: usize = 50;
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

// --- Schedule ---
pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_BACKUP_INTERVAL_SECS: u64 = 3_600;
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_RETENTION_SWEEP_INTERVAL_SECS: u64 = 86_400;
pub const DEFAULT_REPORT_TIME: &str = "00:00";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
