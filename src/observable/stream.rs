//! [`Stream`] adapter for observables.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use testkit_autospy::observable::Observable;
//!
//! let mut stream = Observable::<i32, String>::of(1).into_stream();
//! assert_eq!(stream.next().await, Some(Ok(1)));
//! assert_eq!(stream.next().await, None);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use futures_core::Stream;
use parking_lot::Mutex;

use super::{Observable, Observer, Payload, Subscription};

struct StreamQueue<T, E> {
    /// Notifications waiting to be polled.
    items: VecDeque<Result<T, E>>,
    /// Set once the observable terminated.
    finished: bool,
    /// Waker for a consumer waiting on the next item.
    waker: Option<Waker>,
}

impl<T, E> StreamQueue<T, E> {
    fn wake(&mut self) -> Option<Waker> {
        self.waker.take()
    }
}

struct QueueObserver<T, E> {
    queue: Arc<Mutex<StreamQueue<T, E>>>,
}

impl<T, E> QueueObserver<T, E> {
    fn push(&self, item: Option<Result<T, E>>, finished: bool) {
        let waker = {
            let mut queue = self.queue.lock();
            if let Some(item) = item {
                queue.items.push_back(item);
            }
            queue.finished |= finished;
            queue.wake()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T: Send, E: Send> Observer<T, E> for QueueObserver<T, E> {
    fn next(&mut self, value: T) {
        self.push(Some(Ok(value)), false);
    }

    fn error(&mut self, error: E) {
        self.push(Some(Err(error)), true);
    }

    fn complete(&mut self) {
        self.push(None, true);
    }
}

/// An observable consumed as a [`Stream`] of `Result<T, E>`.
///
/// Yields `Ok` for every value, a single `Err` if the observable fails, and
/// ends after completion or after the error. Dropping the stream unsubscribes.
pub struct ObservableStream<T, E> {
    queue: Arc<Mutex<StreamQueue<T, E>>>,
    subscription: Subscription,
}

impl<T: Payload, E: Payload> ObservableStream<T, E> {
    pub(crate) fn new(observable: &Observable<T, E>) -> Self {
        let queue = Arc::new(Mutex::new(StreamQueue {
            items: VecDeque::new(),
            finished: false,
            waker: None,
        }));
        let subscription = observable.subscribe(QueueObserver {
            queue: Arc::clone(&queue),
        });
        Self {
            queue,
            subscription,
        }
    }

    /// Number of items buffered and not yet polled.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.queue.lock().items.len()
    }
}

impl<T, E> Stream for ObservableStream<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut queue = self.queue.lock();
        if let Some(item) = queue.items.pop_front() {
            return Poll::Ready(Some(item));
        }
        if queue.finished {
            return Poll::Ready(None);
        }
        queue.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl<T, E> Drop for ObservableStream<T, E> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl<T, E> std::fmt::Debug for ObservableStream<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.queue.lock();
        f.debug_struct("ObservableStream")
            .field("buffered", &queue.items.len())
            .field("finished", &queue.finished)
            .finish()
    }
}
