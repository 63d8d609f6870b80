//! Debounce primitive: hold a rapidly changing value until it settles

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to one pending timer with an explicit cancel contract. Dropping
/// the handle cancels the timer too, so a pending emission can never
/// outlive its debouncer.
struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Delays propagation of a changing input until it has been stable for the
/// quiet period. Each `update` supersedes any pending emission, so at most
/// one value comes out per quiet period and it is always the latest one.
pub struct Debouncer<T> {
    quiet_period: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<TimerHandle>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Emissions arrive on the returned receiver once the input has been
    /// stable for `quiet_period`.
    pub fn new(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                quiet_period,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Record a new input value. Any pending emission is cancelled and the
    /// timer restarts from now.
    pub fn update(&mut self, value: T) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        let tx = self.tx.clone();
        let quiet = self.quiet_period;
        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let _ = tx.send(value);
        });
        self.pending = Some(TimerHandle { task });
    }
}
