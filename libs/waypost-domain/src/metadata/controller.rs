//! Refresh/supersede controller
//!
//! One controller backs each pipeline. It merges navigation completions and
//! manual refresh requests into a single trigger loop; every trigger cancels
//! the in-flight resolution pass and starts a fresh one against the current
//! chain. Published results go through a generation fence into the last-value
//! cache, so a superseded pass that completes late can never overwrite a
//! newer pass's result, not even transiently.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::navigation::RouteChain;
use crate::ports::NavigationSource;

/// Write half of the last-value cache, fenced by pass generation
///
/// Handed to exactly one resolution pass. A publish is accepted only while
/// that pass is still the newest one started; the check runs inside the
/// watch channel's modify lock, so fencing and writing are atomic.
pub(crate) struct PassPublisher<T> {
    tx: watch::Sender<T>,
    latest: Arc<AtomicU64>,
    generation: u64,
}

impl<T> PassPublisher<T> {
    /// Publish a value unless this pass has been superseded
    ///
    /// Returns whether the value was accepted; a rejected publish means the
    /// pass should stop doing work.
    pub(crate) fn publish(&self, value: T) -> bool {
        let mut accepted = false;
        self.tx.send_if_modified(|slot| {
            if self.latest.load(Ordering::Acquire) == self.generation {
                *slot = value;
                accepted = true;
                true
            } else {
                false
            }
        });
        accepted
    }
}

/// Trigger loop plus last-value cache for one pipeline
pub(crate) struct SupersedeController<T> {
    value_tx: watch::Sender<T>,
    refresh_tx: mpsc::UnboundedSender<()>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl<T> SupersedeController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn the trigger loop
    ///
    /// `run` is invoked once per trigger with the freshly extracted chain,
    /// a cancellation token scoped to that pass, and the pass's publisher.
    pub(crate) fn spawn<N, F, Fut>(source: Arc<N>, initial: T, run: F) -> Self
    where
        N: NavigationSource + 'static,
        F: Fn(RouteChain, CancellationToken, PassPublisher<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (value_tx, _) = watch::channel(initial);
        let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let latest = Arc::new(AtomicU64::new(0));

        let loop_tx = value_tx.clone();
        let loop_shutdown = shutdown.clone();
        let mut nav_rx = source.subscribe();

        let task = tokio::spawn(async move {
            let mut pass: Option<CancellationToken> = None;
            let mut generation: u64 = 0;

            loop {
                tokio::select! {
                    _ = loop_shutdown.cancelled() => break,
                    event = nav_rx.recv() => match event {
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            trace!(skipped, "Navigation events lagged, resolving latest chain");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    Some(()) = refresh_rx.recv() => {}
                }

                // Supersede: the previous pass stops before the new one starts.
                if let Some(token) = pass.take() {
                    token.cancel();
                }

                generation += 1;
                latest.store(generation, Ordering::Release);

                let token = loop_shutdown.child_token();
                pass = Some(token.clone());

                let publisher = PassPublisher {
                    tx: loop_tx.clone(),
                    latest: Arc::clone(&latest),
                    generation,
                };

                let pass_id = Uuid::now_v7();
                debug!(pass_id = %pass_id, generation, "Starting resolution pass");

                tokio::spawn(run(source.current_chain(), token, publisher));
            }

            if let Some(token) = pass.take() {
                token.cancel();
            }
        });

        Self {
            value_tx,
            refresh_tx,
            shutdown,
            task,
        }
    }

    /// Synchronous snapshot of the last published value
    pub(crate) fn current(&self) -> T {
        self.value_tx.borrow().clone()
    }

    /// Live sequence of published values; late observers immediately see the
    /// most recent one
    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.value_tx.subscribe()
    }

    /// Request a fresh resolution pass
    pub(crate) fn refresh(&self) {
        let _ = self.refresh_tx.send(());
    }

    /// Stop the trigger loop and cancel any in-flight pass
    pub(crate) fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl<T> Drop for SupersedeController<T> {
    fn drop(&mut self) {
        // Pass tokens are children of the shutdown token, so cancelling it
        // tears down in-flight resolutions as well.
        self.shutdown.cancel();
        self.task.abort();
    }
}
