use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};
use pin_project::{pin_project, pinned_drop};

use crate::queue::{self, Queue};
use crate::try_sequence::{Abort, TrySequence};

/// The consuming half of a chain of streams.
///
/// Yields every item of the first appended stream, then every item of the
/// second, and so on. When all appended streams are exhausted the sequence
/// waits for the next append, and ends once the chain has been terminated.
/// A sequence is single-pass: after it returned `None` it keeps returning
/// `None`.
///
/// Dropping the sequence drops every stream still waiting in the chain without
/// polling it.
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
    queue: Rc<RefCell<Queue<S>>>,
    done: bool,
}

impl<S> Sequence<S> {
    pub(super) fn new(queue: Rc<RefCell<Queue<S>>>) -> Self {
        Self {
            head: None,
            queue,
            done: false,
        }
    }

    /// The number of appended streams which have not been started yet.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
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

        let queue = this.queue;
        let poll = queue::poll_next(this.head, cx, |waker| queue.borrow_mut().next(waker));
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
        let streams = this.queue.borrow_mut().close();
        drop(streams);
    }
}

#[pinned_drop]
impl<S> PinnedDrop for Sequence<S> {
    fn drop(self: Pin<&mut Self>) {
        let streams = self.queue.borrow_mut().close();
        drop(streams);
    }
}

impl<S> fmt::Debug for Sequence<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("started", &self.head.is_some())
            .field("queued", &self.queue.borrow().len())
            .field("done", &self.done)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::{gate, CountingWaker};
    use crate::Chain;
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use core::pin::pin;
    use core::task::Poll;
    use futures_core::stream::{FusedStream, LocalBoxStream};
    use futures_core::Stream;
    use futures_lite::future::block_on;
    use futures_lite::prelude::*;
    use futures_lite::stream;

    #[test]
    fn chain_3() {
        block_on(async {
            let (chain, mut s) = crate::sequencer();
            chain.append(stream::once(1)).unwrap();
            chain.append(stream::once(2)).unwrap();
            chain.append(stream::once(3)).unwrap();
            chain.terminate();

            assert_eq!(s.next().await, Some(1));
            assert_eq!(s.next().await, Some(2));
            assert_eq!(s.next().await, Some(3));
            assert_eq!(s.next().await, None);
            assert_eq!(s.next().await, None);
        })
    }

    #[test]
    fn empty_terminated_chain_ends() {
        block_on(async {
            let (chain, s) = crate::sequencer::<stream::Empty<u8>>();
            chain.terminate();
            assert!(s.collect::<Vec<_>>().await.is_empty());
        })
    }

    #[test]
    fn empty_streams_are_skipped() {
        block_on(async {
            let (chain, s) = crate::sequencer();
            chain.append(stream::iter(vec![])).unwrap();
            chain.append(stream::iter(vec![1, 2])).unwrap();
            chain.append(stream::iter(vec![])).unwrap();
            chain.append(stream::iter(vec![3])).unwrap();
            chain.terminate();
            assert_eq!(s.collect::<Vec<_>>().await, [1, 2, 3]);
        })
    }

    #[test]
    fn pending_head_does_not_start_next_stream() {
        let (first, a) = gate();
        let (second, b) = gate();
        let (chain, sequence) = crate::sequencer();
        let mut sequence = pin!(sequence);
        let waker = CountingWaker::new();

        chain.append(a).unwrap();
        chain.append(b).unwrap();
        second.send(10);

        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Pending));
        assert_eq!(first.polls(), 1);
        assert_eq!(second.polls(), 0);

        first.send(1);
        assert_eq!(waker.wakes(), 1);
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Ready(Some(1))));

        first.close();
        waker.with_context(|cx| {
            assert_eq!(sequence.as_mut().poll_next(cx), Poll::Ready(Some(10)))
        });
        assert!(first.is_dropped());
        assert_eq!(second.polls(), 1);
    }

    #[test]
    fn suspends_on_empty_queue_then_resumes() {
        let (chain, sequence) = crate::sequencer();
        let mut sequence = pin!(sequence);
        let waker = CountingWaker::new();

        chain.append(stream::once(1)).unwrap();
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Ready(Some(1))));
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Pending));
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Pending));
        assert_eq!(waker.wakes(), 0);

        chain.append(stream::once(2)).unwrap();
        assert_eq!(waker.wakes(), 1);
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Ready(Some(2))));
        assert!(!sequence.is_terminated());

        chain.terminate();
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Ready(None)));
        assert!(sequence.is_terminated());
    }

    #[test]
    fn dropping_sequence_drops_unstarted_streams() {
        let (head, a) = gate::<u8>();
        let (queued, b) = gate::<u8>();
        let (chain, sequence) = crate::sequencer();
        let mut sequence = Box::pin(sequence);
        let waker = CountingWaker::new();

        chain.append(a).unwrap();
        chain.append(b).unwrap();
        waker.with_context(|cx| assert_eq!(sequence.as_mut().poll_next(cx), Poll::Pending));
        assert_eq!(sequence.len(), 1);

        drop(sequence);
        assert!(head.is_dropped());
        assert!(queued.is_dropped());
        assert_eq!(queued.polls(), 0);
        assert!(chain.is_closed());
    }

    #[test]
    fn reentrant_append_from_head_stream() {
        block_on(async {
            let (chain, sequence) = crate::sequencer::<LocalBoxStream<'static, u32>>();
            let inner = chain.clone();
            let appended = Cell::new(false);
            let head = stream::iter(vec![1, 2]).map(move |n| {
                if !appended.replace(true) {
                    inner.append(stream::once(3).boxed_local()).unwrap();
                    inner.terminate();
                }
                n
            });
            chain.append(head.boxed_local()).unwrap();
            drop(chain);

            assert_eq!(sequence.collect::<Vec<_>>().await, [1, 2, 3]);
        })
    }

    #[test]
    fn append_after_exhaustion() {
        block_on(async {
            let (chain, mut s): (Chain<_>, _) = crate::sequencer();
            chain.append(stream::iter(vec![1, 2])).unwrap();
            assert_eq!(s.next().await, Some(1));
            assert_eq!(s.next().await, Some(2));

            chain.append(stream::iter(vec![3])).unwrap();
            chain.terminate();
            assert_eq!(s.next().await, Some(3));
            assert_eq!(s.next().await, None);
        })
    }
}
