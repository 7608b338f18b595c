//! Repository metrics.
//!
//! Records per-operation latency and the reported outcome of each call.
//! Nothing is exported unless the host installs a `metrics` recorder.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record a repository operation duration.
pub fn record_query_duration(operation: &'static str, duration_secs: f64) {
    histogram!("database_query_duration_seconds", "query" => operation).record(duration_secs);
}

/// Count a reported outcome (e.g. `added`, `duplicate`, `not_found`).
pub fn record_outcome(operation: &'static str, outcome: &'static str) {
    counter!(
        "repository_outcomes_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Times one repository operation.
///
/// ```ignore
/// let timer = QueryTimer::new("delete_customer");
/// // ... statements ...
/// timer.finish("deleted");
/// ```
pub struct QueryTimer {
    operation: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Records the elapsed duration and the outcome of the operation.
    pub fn finish(self, outcome: &'static str) {
        record_query_duration(self.operation, self.start.elapsed().as_secs_f64());
        record_outcome(self.operation, outcome);
    }
}
