//! The append queue shared by a [`Chain`] and its [`Sequence`].
//!
//! The queue itself is plain data. Each flavor wraps it in its own cell
//! (`Rc<RefCell<_>>` or `Arc<Mutex<_>>`) and is responsible for never holding
//! that cell across a call into user code: polling a stream, dropping a stream,
//! or waking a waker.
//!
//! [`Chain`]: crate::Chain
//! [`Sequence`]: crate::Sequence

use alloc::collections::VecDeque;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use futures_core::Stream;

use crate::error::{AppendError, Reason};

/// What the consumer should do once its head stream is exhausted.
#[derive(Debug)]
pub(crate) enum Next<S> {
    /// Start pulling from this stream.
    Stream(S),
    /// Nothing queued yet; the waker has been stored.
    Pending,
    /// Terminated and drained, or closed.
    Done,
}

#[derive(Debug)]
pub(crate) struct Queue<S> {
    streams: VecDeque<S>,
    waker: Option<Waker>,
    senders: usize,
    terminated: bool,
    closed: bool,
}

impl<S> Queue<S> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            streams: VecDeque::with_capacity(capacity),
            waker: None,
            senders: 1,
            terminated: false,
            closed: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.streams.len()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Queue `stream` at the tail. On success returns the parked consumer's
    /// waker, which the caller must wake once the cell is released.
    pub(crate) fn push(&mut self, stream: S) -> Result<Option<Waker>, AppendError<S>> {
        if self.closed {
            return Err(AppendError::new(stream, Reason::Closed));
        }
        if self.terminated {
            return Err(AppendError::new(stream, Reason::Terminated));
        }
        self.streams.push_back(stream);
        tracing::trace!(queued = self.streams.len(), "sequence appended");
        Ok(self.waker.take())
    }

    /// Mark the queue terminated. Returns whether this call did it, along with
    /// the parked waker to wake.
    pub(crate) fn terminate(&mut self) -> (bool, Option<Waker>) {
        if self.terminated {
            return (false, None);
        }
        self.terminated = true;
        tracing::debug!(queued = self.streams.len(), "chain terminated");
        (true, self.waker.take())
    }

    /// Dequeue the next stream, or park `waker` if there is none yet.
    pub(crate) fn next(&mut self, waker: &Waker) -> Next<S> {
        if self.closed {
            return Next::Done;
        }
        if let Some(stream) = self.streams.pop_front() {
            tracing::trace!(queued = self.streams.len(), "advancing to next sequence");
            return Next::Stream(stream);
        }
        if self.terminated {
            return Next::Done;
        }
        match &mut self.waker {
            Some(parked) if parked.will_wake(waker) => {}
            parked => *parked = Some(waker.clone()),
        }
        tracing::trace!("waiting for the next sequence");
        Next::Pending
    }

    /// The consumer is gone. Hands back every stream that was never started
    /// so the caller can drop them outside the cell.
    pub(crate) fn close(&mut self) -> VecDeque<S> {
        if self.closed {
            return VecDeque::new();
        }
        self.closed = true;
        self.waker = None;
        let streams = core::mem::take(&mut self.streams);
        tracing::debug!(discarded = streams.len(), "sequence closed");
        streams
    }

    pub(crate) fn add_sender(&mut self) {
        self.senders += 1;
    }

    /// Returns the waker to wake if the last sender just went away.
    pub(crate) fn remove_sender(&mut self) -> Option<Waker> {
        self.senders -= 1;
        if self.senders == 0 {
            self.terminate().1
        } else {
            None
        }
    }
}

/// Drive one `poll_next` of a chain consumer.
///
/// `head` is the stream currently being pulled from. `advance` is called with
/// the task's waker whenever `head` is empty or exhausted, and must release the
/// queue's cell before returning.
pub(crate) fn poll_next<S: Stream>(
    mut head: Pin<&mut Option<S>>,
    cx: &mut Context<'_>,
    mut advance: impl FnMut(&Waker) -> Next<S>,
) -> Poll<Option<S::Item>> {
    loop {
        if let Some(stream) = head.as_mut().as_pin_mut() {
            match stream.poll_next(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => head.set(None),
                Poll::Pending => return Poll::Pending,
            }
        }
        match advance(cx.waker()) {
            Next::Stream(stream) => head.set(Some(stream)),
            Next::Pending => return Poll::Pending,
            Next::Done => return Poll::Ready(None),
        }
    }
}
