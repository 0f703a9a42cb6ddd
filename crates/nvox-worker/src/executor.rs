//! Job runner: single-slot consume loop with unconditional ack.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{error, info, warn};
use uuid::Uuid;

use nvox_models::{truncate_error, JobId, JobStatus};
use nvox_queue::{GenerateVideoJob, JobQueue};

use crate::error::WorkerResult;
use crate::processor::{process_job, ProcessingContext};

/// How long one consume call blocks waiting for a new message.
const CONSUME_BLOCK_MS: u64 = 1000;

/// How often orphaned deliveries are checked for.
const CLAIM_INTERVAL: Duration = Duration::from_secs(30);

/// Delay between queue connection attempts at startup.
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Job runner that consumes jobs one at a time.
///
/// Exactly one job is in flight at any moment; the next message is not
/// read until the current job has reached a terminal outcome and its
/// delivery has been acknowledged.
pub struct Executor {
    ctx: ProcessingContext,
    queue: JobQueue,
    consumer_name: String,
    shutdown: watch::Sender<bool>,
}

impl Executor {
    /// Create a new executor.
    pub fn new(ctx: ProcessingContext, queue: JobQueue) -> Self {
        let (shutdown, _) = watch::channel(false);
        let consumer_name = format!("worker-{}", Uuid::new_v4());

        Self {
            ctx,
            queue,
            consumer_name,
            shutdown,
        }
    }

    /// Signal shutdown: stop consuming after the current job finishes.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Run the consume loop until shutdown.
    pub async fn run(&self) -> WorkerResult<()> {
        info!(consumer = %self.consumer_name, "starting job runner");

        self.init_queue_with_retry().await?;

        let mut shutdown_rx = self.shutdown.subscribe();
        let mut last_claim: Option<Instant> = None;

        info!("Waiting for jobs");

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            let try_claim = last_claim.map_or(true, |t| t.elapsed() >= CLAIM_INTERVAL);
            if try_claim {
                last_claim = Some(Instant::now());
            }

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received, draining");
                        break;
                    }
                }
                next = self.next_job(try_claim) => match next {
                    Ok(Some((message_id, payload))) => {
                        self.handle_job(message_id, payload).await;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        error!("Error consuming jobs: {}", e);
                        // Back off on error
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        }

        info!("Job runner stopped");
        Ok(())
    }

    /// Initialize the queue, retrying while the broker is unavailable.
    async fn init_queue_with_retry(&self) -> WorkerResult<()> {
        let mut shutdown_rx = self.shutdown.subscribe();
        loop {
            match self.queue.init().await {
                Ok(()) => {
                    info!("Queue connection established");
                    return Ok(());
                }
                Err(e) => {
                    warn!("Queue unavailable ({}), retrying in {:?}", e, CONNECT_RETRY_DELAY);
                }
            }
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        return Ok(());
                    }
                }
                _ = tokio::time::sleep(CONNECT_RETRY_DELAY) => {}
            }
        }
    }

    /// Redeliver an orphaned message if one is due, else block briefly
    /// for a new one.
    async fn next_job(
        &self,
        try_claim: bool,
    ) -> WorkerResult<Option<(String, GenerateVideoJob)>> {
        if try_claim {
            if let Some(claimed) = self.queue.claim_pending(&self.consumer_name).await? {
                return Ok(Some(claimed));
            }
        }
        Ok(self.queue.consume(&self.consumer_name, CONSUME_BLOCK_MS).await?)
    }

    /// Drive one job to a terminal outcome, persist it, then ack.
    ///
    /// The ack is unconditional: a permanently-failed job must never be
    /// redelivered and retried forever. If even the FAILED mark cannot
    /// be written, the record may stay PROCESSING in the store; that
    /// discrepancy is logged, not papered over.
    async fn handle_job(&self, message_id: String, payload: GenerateVideoJob) {
        let job_id = JobId::from_string(payload.id.clone());

        match process_job(&self.ctx, &payload).await {
            Ok(job) => {
                info!(job_id = %job.id, status = %JobStatus::Complete, "job finished");
            }
            Err(e) => {
                error!(job_id = %job_id, error = %e, "job failed");
                let message = truncate_error(&e.to_string());
                if let Err(mark_err) = self.ctx.store.mark_failed(&job_id, &message).await {
                    error!(
                        job_id = %job_id,
                        error = %mark_err,
                        "failed to mark job FAILED; store record may remain PROCESSING"
                    );
                }
            }
        }

        if let Err(e) = self.queue.ack(&message_id).await {
            error!(job_id = %job_id, error = %e, "failed to ack delivery");
        }
    }
}
