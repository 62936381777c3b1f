//! Periodic polling of an upstream resource
//!
//! One `Poller` per observed resource. Each owns its task: the latest result
//! is published on a `watch` channel, `refresh()` forces an early fetch, and
//! the task stops on `shutdown()` or when the poller is dropped.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::AppError;

/// Latest known state of a polled resource
///
/// A failed fetch keeps the previous value and records the error.
#[derive(Debug, Clone)]
pub struct PollState<T> {
    pub value: Option<T>,
    pub last_error: Option<AppError>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            value: None,
            last_error: None,
            updated_at: None,
        }
    }
}

pub struct Poller<T> {
    state_rx: watch::Receiver<PollState<T>>,
    refresh: Arc<Notify>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn the polling task; the first fetch happens immediately
    pub fn spawn<F, Fut>(name: &'static str, interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let (state_tx, state_rx) = watch::channel(PollState::default());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let refresh = Arc::new(Notify::new());

        let handle = tokio::spawn(Self::run(
            name,
            interval,
            fetch,
            state_tx,
            shutdown_rx,
            refresh.clone(),
        ));

        tracing::debug!(poller = name, ?interval, "poller started");

        Self {
            state_rx,
            refresh,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    async fn run<F, Fut>(
        name: &'static str,
        interval: Duration,
        fetch: F,
        state_tx: watch::Sender<PollState<T>>,
        mut shutdown_rx: oneshot::Receiver<()>,
        refresh: Arc<Notify>,
    ) where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {}
                _ = refresh.notified() => ticker.reset(),
            }

            let result = tokio::select! {
                _ = &mut shutdown_rx => break,
                result = fetch() => result,
            };

            match result {
                Ok(value) => state_tx.send_modify(|state| {
                    state.value = Some(value);
                    state.last_error = None;
                    state.updated_at = Some(Utc::now());
                }),
                Err(err) => {
                    tracing::warn!(poller = name, error = %err, "poll failed");
                    state_tx.send_modify(|state| {
                        state.last_error = Some(err);
                    });
                }
            }
        }

        tracing::debug!(poller = name, "poller stopped");
    }

    /// Snapshot of the latest state
    pub fn latest(&self) -> PollState<T> {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every completed fetch
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state_rx.clone()
    }

    /// Fetch now instead of waiting for the next tick
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
