use crate::config::Config;
use crate::model::{format_start, Summary};
use crate::worker::worker;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error};

/// Idle pooled connections are closed after this long.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct LoadTest {
    config: Config,
    client: Client,
    progress: bool,
}

impl LoadTest {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        // Single target host, so the per-host ceiling is also the overall one.
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency.saturating_mul(2))
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .build()?;

        Ok(Self {
            config,
            client,
            progress: false,
        })
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Runs every worker until the deadline and waits for all of them.
    pub async fn run(&self) -> Summary {
        let started_at = Local::now();
        println!("Starting stress test at {}", format_start(started_at));
        debug!(
            url = %self.config.url,
            workers = self.config.concurrency,
            duration = %humantime::format_duration(self.config.duration),
            "load test started"
        );

        let pb = self.progress_bar();
        let ticker = {
            let pb = pb.clone();
            let start = Instant::now();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_millis(100));
                loop {
                    interval.tick().await;
                    pb.set_position(start.elapsed().as_millis() as u64);
                }
            })
        };

        let end = Instant::now() + self.config.duration;
        let target = Arc::new(self.config.target());

        let mut set = JoinSet::new();
        for rank in 0..self.config.concurrency {
            set.spawn(worker(rank, self.client.clone(), target.clone(), end));
        }

        let mut total_requests = 0;
        while let Some(res) = set.join_next().await {
            match res {
                Ok(count) => total_requests += count,
                Err(e) => error!("worker failed: {e}"),
            }
        }

        ticker.abort();
        pb.finish_and_clear();

        let summary = Summary {
            workers: self.config.concurrency,
            total_requests,
            duration: self.config.duration,
        };
        debug!(total_requests, qps = summary.qps(), "load test finished");
        summary
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.config.duration.as_millis() as u64);
        let template = "{spinner} {elapsed_precise} [{bar:40}] {percent}%";
        if let Ok(sty) = ProgressStyle::with_template(template) {
            pb.set_style(sty);
        }
        pb
    }
}
