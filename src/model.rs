use bytes::Bytes;
use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// What every request sends. Shared by all workers.
#[derive(Debug, Clone)]
pub struct Target {
    pub url: String,
    pub body: Bytes,
    pub cookie: String,
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub workers: usize,
    pub total_requests: u64,
    /// Configured duration, not measured wall time.
    pub duration: Duration,
}

impl Summary {
    /// Successful requests per configured second. A zero duration yields 0.0.
    pub fn qps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total_requests as f64 / secs
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total requests: {}", self.total_requests)?;
        writeln!(f, "Total Time: {}", humantime::format_duration(self.duration))?;
        write!(f, "QPS: {:.2}", self.qps())
    }
}

pub fn format_start(ts: DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
