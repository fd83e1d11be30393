use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, TryRecvError},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use logger::Logger;
use threadpool::ThreadPool;

// How often a sleeping load checks whether it was cancelled.
const CANCEL_POLL_MILLIS: u64 = 25;

/// Outcome of polling a [`PendingLoad`].
#[derive(Debug, PartialEq)]
pub enum LoadPoll<T> {
    Pending,
    Ready(T),
    /// The job ended without a result (cancelled or panicked).
    Abandoned,
}

/// Runs simulated loads on a small worker pool.
///
/// Each load waits the configured latency before running its job, mimicking
/// a network round trip, and can be cancelled at any point before delivery.
#[derive(Clone)]
pub struct LoadRunner {
    pool: ThreadPool,
    delay: Duration,
    logger: Logger,
}

impl LoadRunner {
    pub fn new(workers: usize, delay: Duration, logger: Logger) -> Self {
        Self {
            pool: ThreadPool::with_name("flight-loader".to_string(), workers.max(1)),
            delay,
            logger,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `job` to run after the simulated latency.
    ///
    /// The returned handle owns the load: dropping it cancels the job, so a
    /// screen that goes away never receives a stale result.
    pub fn spawn<T, F>(&self, label: &str, job: F) -> PendingLoad<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));

        let job_cancelled = Arc::clone(&cancelled);
        let delay = self.delay;
        let logger = self.logger.clone();
        let job_label = label.to_string();

        self.pool.execute(move || {
            if !sleep_unless_cancelled(delay, &job_cancelled) {
                let _ = logger.debug(&format!("Load '{}' cancelled before running.", job_label));
                return;
            }

            let value = job();

            if job_cancelled.load(Ordering::SeqCst) {
                let _ = logger.debug(&format!("Load '{}' finished after cancellation.", job_label));
                return;
            }

            // The receiver may already be gone; that is a cancellation too.
            let _ = sender.send(value);
        });

        let _ = self
            .logger
            .debug(&format!("Load '{}' scheduled ({} ms).", label, delay.as_millis()));

        PendingLoad {
            label: label.to_string(),
            receiver,
            cancelled,
        }
    }
}

/// Sleeps for `delay` in short slices. Returns `false` as soon as the flag is set.
fn sleep_unless_cancelled(delay: Duration, cancelled: &AtomicBool) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if cancelled.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        let slice = Duration::from_millis(CANCEL_POLL_MILLIS).min(deadline - now);
        thread::sleep(slice);
    }
}

/// Handle to a load scheduled by [`LoadRunner::spawn`].
pub struct PendingLoad<T> {
    label: String,
    receiver: Receiver<T>,
    cancelled: Arc<AtomicBool>,
}

impl<T> PendingLoad<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Non-blocking check, meant to be called once per frame.
    pub fn poll(&self) -> LoadPoll<T> {
        if self.is_cancelled() {
            return LoadPoll::Abandoned;
        }
        match self.receiver.try_recv() {
            Ok(value) => LoadPoll::Ready(value),
            Err(TryRecvError::Empty) => LoadPoll::Pending,
            Err(TryRecvError::Disconnected) => LoadPoll::Abandoned,
        }
    }

    /// Blocks until the result arrives or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> LoadPoll<T> {
        if self.is_cancelled() {
            return LoadPoll::Abandoned;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(value) => LoadPoll::Ready(value),
            Err(RecvTimeoutError::Timeout) => LoadPoll::Pending,
            Err(RecvTimeoutError::Disconnected) => LoadPoll::Abandoned,
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl<T> Drop for PendingLoad<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
