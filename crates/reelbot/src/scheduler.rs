//! Background job scheduler.
//!
//! Started on startup and shut down on exit. Each registered job runs on its
//! own `tokio` interval. Missed ticks are not coalesced: after a stall every
//! missed tick fires. A job may have at most [`MAX_INSTANCES`] runs in flight;
//! ticks beyond that are skipped with a warning.
//!
//! The bot registers no jobs today. Subscription polling for the notifier
//! button is meant to plug in here.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Default cap on concurrent runs of one job.
pub const MAX_INSTANCES: usize = 100;

type JobFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type JobFn = Arc<dyn Fn() -> JobFuture + Send + Sync>;

struct Job {
    name: String,
    period: Duration,
    max_instances: usize,
    run: JobFn,
}

/// Interval scheduler backed by a `TaskTracker`.
pub struct Scheduler {
    jobs: Vec<Job>,
    token: CancellationToken,
    tracker: TaskTracker,
    running: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
            running: false,
        }
    }

    /// Register `job` to run every `period`, first after one full period.
    pub fn every<F, Fut>(&mut self, name: impl Into<String>, period: Duration, job: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.every_with_max_instances(name, period, MAX_INSTANCES, job);
    }

    /// Same as [`every`](Self::every) with an explicit concurrency cap.
    pub fn every_with_max_instances<F, Fut>(
        &mut self,
        name: impl Into<String>,
        period: Duration,
        max_instances: usize,
        job: F,
    ) where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        if self.running {
            log::warn!("Scheduler: job '{}' registered after start, it will run after the next start", name);
        }
        self.jobs.push(Job {
            name,
            period,
            max_instances: max_instances.max(1),
            run: Arc::new(move || Box::pin(job()) as JobFuture),
        });
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Spawn one ticker task per registered job.
    pub fn start(&mut self) {
        if self.running {
            log::warn!("Scheduler: start called twice, ignoring");
            return;
        }
        self.running = true;
        log::info!("Scheduler started with {} job(s)", self.jobs.len());

        for job in &self.jobs {
            let name = job.name.clone();
            let period = job.period;
            let run = Arc::clone(&job.run);
            let limit = Arc::new(Semaphore::new(job.max_instances));
            let token = self.token.clone();
            let tracker = self.tracker.clone();

            self.tracker.spawn(async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = ticker.tick() => {
                            let Ok(permit) = Arc::clone(&limit).try_acquire_owned() else {
                                log::warn!("Scheduler: job '{}' skipped, maximum running instances reached", name);
                                continue;
                            };
                            let run = Arc::clone(&run);
                            tracker.spawn(async move {
                                run().await;
                                drop(permit);
                            });
                        }
                    }
                }
                log::debug!("Scheduler: ticker for '{}' stopped", name);
            });
        }
    }

    /// Stop all tickers and wait for in-flight runs to finish.
    ///
    /// The scheduler can be started again afterwards.
    pub async fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.token.cancel();
        self.tracker.close();
        self.tracker.wait().await;

        self.token = CancellationToken::new();
        self.tracker = TaskTracker::new();
        self.running = false;
        log::info!("Scheduler shut down");
    }
}
