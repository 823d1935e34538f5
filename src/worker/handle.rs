//! Worker task and its caller-side handle.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::model::RouteResult;
use crate::routing::aggregator::BatchAggregator;
use crate::routing::error::{RoutingError, RoutingResult};
use crate::worker::messages::{WorkerRequest, WorkerResponse};

struct Job {
    request: WorkerRequest,
    reply: oneshot::Sender<RoutingResult<Vec<RouteResult>>>,
}

/// Cloneable sender side of the worker queue.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Job>,
}

impl WorkerHandle {
    /// Submit one batch and wait for its outcome.
    ///
    /// Dropping the returned future cancels the batch.
    pub async fn submit(&self, request: WorkerRequest) -> RoutingResult<Vec<RouteResult>> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Job { request, reply })
            .await
            .map_err(|_| RoutingError::WorkerUnavailable("worker is not running".into()))?;

        response
            .await
            .map_err(|_| RoutingError::WorkerUnavailable("worker stopped before replying".into()))?
    }

    /// Like [`submit`](Self::submit), folded into the wire message.
    pub async fn calculate(&self, request: WorkerRequest) -> WorkerResponse {
        self.submit(request).await.into()
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Single consumer of the batch queue.
pub struct RoutingWorker {
    aggregator: Arc<BatchAggregator>,
    rx: mpsc::Receiver<Job>,
    shutdown: broadcast::Receiver<()>,
}

impl RoutingWorker {
    /// Start the worker task.
    pub fn spawn(
        aggregator: Arc<BatchAggregator>,
        queue_depth: usize,
        shutdown: broadcast::Receiver<()>,
    ) -> (WorkerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let worker = Self {
            aggregator,
            rx,
            shutdown,
        };
        let task = tokio::spawn(worker.run());
        (WorkerHandle { tx }, task)
    }

    async fn run(mut self) {
        tracing::info!("Routing worker started");
        // A dropped coordinator is not a stop signal; the queue closing is.
        let mut watch_shutdown = true;
        loop {
            tokio::select! {
                signal = self.shutdown.recv(), if watch_shutdown => match signal {
                    Err(broadcast::error::RecvError::Closed) => watch_shutdown = false,
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        tracing::info!("Routing worker shutting down");
                        break;
                    }
                },
                job = self.rx.recv() => match job {
                    Some(job) => self.process(job).await,
                    None => break,
                },
            }
        }
        tracing::info!("Routing worker stopped");
    }

    async fn process(&self, job: Job) {
        let Job { request, mut reply } = job;
        let batch_id = Uuid::new_v4();

        let result = match request.resolve() {
            Ok((start, destinations)) => {
                let span = tracing::info_span!("batch", %batch_id, destinations = destinations.len());
                let compute = self.aggregator.compute_batch(&start, &destinations).instrument(span);
                tokio::select! {
                    batch = compute => Ok(batch.to_vec()),
                    _ = reply.closed() => {
                        tracing::info!(%batch_id, "Caller went away, batch cancelled");
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(%batch_id, error = %e, "Rejected batch request");
                Err(e)
            }
        };

        if reply.send(result).is_err() {
            tracing::debug!(%batch_id, "Caller dropped before reply");
        }
    }
}
