/*
[INPUT]:  Completion callbacks produced by finished requests
[OUTPUT]: Callbacks executed on a caller-selected context
[POS]:    HTTP layer - response delivery contexts
[UPDATE]: When adding delivery contexts
*/

use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Unit of work handed to a delivery context
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where `Request::perform` callbacks run
pub trait DeliveryContext: Send + Sync {
    fn deliver(&self, job: Job);
}

/// Runs each callback as its own task on the runtime
impl DeliveryContext for Handle {
    fn deliver(&self, job: Job) {
        self.spawn(async move { job() });
    }
}

/// Serial callback queue drained by the caller.
///
/// Callbacks run in arrival order on whichever task drives the paired
/// [`CallbackQueueRunner`].
///
/// Dropping the runner forfeits delivery: callbacks still queued, and any
/// delivered afterwards, are dropped without running (a warning is logged for
/// the latter). Keep the runner alive until every performed request has
/// reported back.
#[derive(Debug, Clone)]
pub struct CallbackQueue {
    tx: mpsc::UnboundedSender<Job>,
}

/// Receiving half of a [`CallbackQueue`]
#[derive(Debug)]
pub struct CallbackQueueRunner {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl CallbackQueue {
    pub fn new() -> (Self, CallbackQueueRunner) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, CallbackQueueRunner { rx })
    }
}

impl DeliveryContext for CallbackQueue {
    fn deliver(&self, job: Job) {
        if self.tx.send(job).is_err() {
            tracing::warn!("callback queue runner dropped; discarding callback");
        }
    }
}

impl CallbackQueueRunner {
    /// Wait for the next callback and run it.
    /// Returns `false` once every queue handle is dropped and the queue is empty.
    pub async fn run_one(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run callbacks until every queue handle is dropped
    pub async fn run(mut self) {
        while self.run_one().await {}
    }

    /// Run the callbacks already queued without waiting; returns how many ran
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_queue_runs_in_order() {
        let (queue, mut runner) = CallbackQueue::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let seen = seen.clone();
            queue.deliver(Box::new(move || seen.lock().unwrap().push(i)));
        }

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(runner.run_pending(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(runner.run_pending(), 0);
    }

    #[tokio::test]
    async fn test_runner_stops_when_queue_dropped() {
        let (queue, runner) = CallbackQueue::new();
        let seen = Arc::new(Mutex::new(0));
        let counter = seen.clone();
        queue.deliver(Box::new(move || *counter.lock().unwrap() += 1));
        drop(queue);

        runner.run().await;
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_delivery_after_runner_dropped_discards_callback() {
        let (queue, runner) = CallbackQueue::new();
        drop(runner);

        let ran = Arc::new(Mutex::new(false));
        let flag = ran.clone();
        queue.deliver(Box::new(move || *flag.lock().unwrap() = true));

        assert!(!*ran.lock().unwrap());
        // The discarded job, and the clone it captured, are gone.
        assert_eq!(Arc::strong_count(&ran), 1);
    }

    #[tokio::test]
    async fn test_handle_delivery_spawns_task() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        Handle::current().deliver(Box::new(move || {
            let _ = tx.send("delivered");
        }));
        assert_eq!(rx.await.unwrap(), "delivered");
    }
}
