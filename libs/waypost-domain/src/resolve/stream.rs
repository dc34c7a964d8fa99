//! The uniform asynchronous value sequence
//!
//! Every dispatch normalizes its resolver's result into a `ValueStream`:
//! a sequence that may emit zero or more values, may complete, and carries
//! first-class cancellation. Cancellation is checked at the suspension point,
//! so a cancelled stream stops before delivering a now-stale value, and
//! dropping the stream releases the underlying resolver subscription.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

/// A finite-or-infinite sequence of resolved values over time
pub struct ValueStream<T> {
    inner: BoxStream<'static, T>,
}

impl<T: Send + 'static> ValueStream<T> {
    /// A sequence that emits exactly one value and completes
    pub fn once(value: T) -> Self {
        Self {
            inner: stream::once(future::ready(value)).boxed(),
        }
    }

    /// Wrap a sequence, ending it as soon as the token is cancelled
    pub fn cancellable(
        stream: impl Stream<Item = T> + Send + 'static,
        cancel: &CancellationToken,
    ) -> Self {
        Self {
            inner: stream
                .take_until(cancel.clone().cancelled_owned())
                .boxed(),
        }
    }

    /// Await the first emission, if any
    ///
    /// Returns `None` when the sequence completes or is cancelled before
    /// emitting. The rest of the sequence is dropped, unsubscribing any
    /// live resolver behind it.
    pub async fn first(mut self) -> Option<T> {
        self.inner.next().await
    }
}

impl<T> Stream for ValueStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.inner.poll_next_unpin(cx)
    }
}
