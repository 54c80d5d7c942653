use crate::resync_queue::ZoneResyncReceiver;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use zoneward_application::ports::ZoneResyncTask;
use zoneward_application::use_cases::SyncZoneUseCase;

/// Worker pool draining the resync queue.
pub struct ZoneResyncJob {
    sync_zone: Arc<SyncZoneUseCase>,
    receiver: Arc<Mutex<ZoneResyncReceiver>>,
    workers: usize,
    max_attempts: u32,
    retry_backoff: Duration,
    shutdown: CancellationToken,
}

impl ZoneResyncJob {
    pub fn new(sync_zone: Arc<SyncZoneUseCase>, receiver: ZoneResyncReceiver) -> Self {
        Self {
            sync_zone,
            receiver: Arc::new(Mutex::new(receiver)),
            workers: 2,
            max_attempts: 3,
            retry_backoff: Duration::from_secs(1),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Attempt `n` waits `n * backoff` before the next one.
    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_backoff = backoff;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            workers = self.workers,
            max_attempts = self.max_attempts,
            "Starting zone resync workers"
        );

        for worker in 0..self.workers {
            let job = Arc::clone(&self);
            tokio::spawn(async move { job.run_worker(worker).await });
        }
    }

    async fn run_worker(&self, worker: usize) {
        loop {
            let task = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(worker, "ZoneResyncJob: shutting down");
                    break;
                }
                task = Self::next_task(&self.receiver) => task,
            };

            let Some(task) = task else {
                info!(worker, "Resync queue closed, worker exiting");
                break;
            };

            self.resync(worker, task).await;
        }
    }

    async fn next_task(receiver: &Mutex<ZoneResyncReceiver>) -> Option<ZoneResyncTask> {
        receiver.lock().await.recv().await
    }

    async fn resync(&self, worker: usize, task: ZoneResyncTask) {
        let zone = &task.zone;

        for attempt in 1..=self.max_attempts {
            match self
                .sync_zone
                .execute(&task.context, zone, &task.masters)
                .await
            {
                Ok(serial) => {
                    info!(worker, zone = %zone.name, serial, attempt, request_id = %task.context, "Zone resync completed");
                    return;
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(worker, zone = %zone.name, attempt, error = %e, "Zone resync failed, retrying");
                    let backoff = self.retry_backoff * attempt;
                    tokio::select! {
                        _ = self.shutdown.cancelled() => return,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
                Err(e) => {
                    error!(worker, zone = %zone.name, attempts = attempt, error = %e, "Zone resync abandoned");
                }
            }
        }
    }
}
