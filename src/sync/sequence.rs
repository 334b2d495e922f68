use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};
use pin_project::{pin_project, pinned_drop};

use super::Shared;
use crate::queue;
use crate::try_sequence::{Abort, TrySequence};

/// The consuming half of a thread-safe chain of streams.
///
/// Behaves like [`crate::Sequence`], but can be sent to another thread when
/// `S: Send`.
///
/// This `struct` is created by the [`sequencer`] function. See its
/// documentation for more.
///
/// [`sequencer`]: super::sequencer
#[must_use = "streams do nothing unless polled or .awaited"]
#[pin_project(PinnedDrop)]
pub struct Sequence<S> {
    #[pin]
    head: Option<S>,
    shared: Arc<Shared<S>>,
    done: bool,
}

impl<S> Sequence<S> {
    pub(super) fn new(shared: Arc<Shared<S>>) -> Self {
        Self {
            head: None,
            shared,
            done: false,
        }
    }

    /// The number of appended streams which have not been started yet.
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// Returns `true` if no appended stream is waiting to be started.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop at the first error yielded by any appended stream.
    ///
    /// See [`TrySequence`] for more.
    pub fn fail_fast<T, E>(self) -> TrySequence<Self>
    where
        S: Stream<Item = Result<T, E>>,
    {
        TrySequence::new(self)
    }
}

impl<S: Stream> Stream for Sequence<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let shared = this.shared;
        let poll = queue::poll_next(this.head, cx, |waker| shared.lock().next(waker));
        if let Poll::Ready(None) = poll {
            *this.done = true;
        }
        poll
    }
}

impl<S: Stream> FusedStream for Sequence<S> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

impl<S> Abort for Sequence<S> {
    crate::private_impl! {}

    fn abort(self: Pin<&mut Self>) {
        let mut this = self.project();
        this.head.set(None);
        *this.done = true;
        let streams = this.shared.lock().close();
        drop(streams);
    }
}

#[pinned_drop]
impl<S> PinnedDrop for Sequence<S> {
    fn drop(self: Pin<&mut Self>) {
        let streams = self.shared.lock().close();
        drop(streams);
    }
}

impl<S> fmt::Debug for Sequence<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("started", &self.head.is_some())
            .field("queued", &self.shared.lock().len())
            .field("done", &self.done)
            .finish()
    }
}
