//! Trailing-edge debouncing of asynchronous actions.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Coalesces bursts of triggers into one delayed invocation
///
/// Each `trigger` cancels the invocation scheduled by the previous one (if it
/// has not fired yet) and schedules a new one `delay` later with the newest
/// arguments. An invocation that has already fired runs to completion.
pub struct Debouncer<A, F> {
    delay: Duration,
    action: Arc<F>,
    pending: Arc<Mutex<Pending>>,
    _args: PhantomData<fn(A)>,
}

#[derive(Default)]
struct Pending {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl<A, F, Fut> Debouncer<A, F>
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    pub fn new(delay: Duration, action: F) -> Self {
        Self {
            delay,
            action: Arc::new(action),
            pending: Arc::new(Mutex::new(Pending::default())),
            _args: PhantomData,
        }
    }

    pub fn with_default_delay(action: F) -> Self {
        Self::new(DEFAULT_DELAY, action)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `action(args)` after the delay, replacing anything pending
    pub async fn trigger(&self, args: A) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.generation += 1;

        let generation = pending.generation;
        let delay = self.delay;
        let action = Arc::clone(&self.action);
        let shared = Arc::clone(&self.pending);

        pending.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut pending = shared.lock().await;
                if pending.generation != generation {
                    return;
                }
                // Fired: from here on a new trigger must not abort us.
                pending.handle = None;
            }
            action(args).await;
        }));
    }

    /// Drops the pending invocation, if any, without running it
    pub async fn cancel(&self) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.generation += 1;
    }

    /// True while an invocation is scheduled but has not fired
    pub async fn is_pending(&self) -> bool {
        self.pending.lock().await.handle.is_some()
    }
}

impl<A, F> Drop for Debouncer<A, F> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.try_lock() {
            if let Some(handle) = pending.handle.take() {
                handle.abort();
            }
        }
    }
}
