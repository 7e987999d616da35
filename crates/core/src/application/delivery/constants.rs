// Delivery constants (no magic values in the worker loop)
use std::time::Duration;

/// Sleep duration when no jobs are available (100ms)
pub const IDLE_SLEEP_DURATION: Duration = Duration::from_millis(100);

/// Sleep duration after a worker error before retry (1s)
pub const ERROR_RECOVERY_SLEEP_DURATION: Duration = Duration::from_secs(1);

/// Total send attempts per job, including the first
pub const DEFAULT_MAX_SEND_ATTEMPTS: u32 = 3;

/// Unit of the linear backoff schedule between attempts (1s, 2s, ...)
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Pub/sub channel carrying delivery completion signals
pub const NOTIFICATION_CHANNEL: &str = "notifications";

/// List of notification ids that exhausted all retry attempts
pub const DEAD_LETTER_LIST: &str = "notifications:dead_letter";

/// Best-effort backlog of status writes that failed to persist
pub const STATUS_REPAIR_LIST: &str = "notifications:status_repair";

/// How often the reconciliation sweep re-scans stale pending records (60s)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Age after which a pending record is considered stale (5 minutes)
pub const DEFAULT_STALE_PENDING_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Page size used by the reconciliation sweep
pub const SWEEP_PAGE_SIZE: usize = 100;
