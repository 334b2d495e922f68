use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::error::AppendError;
use crate::queue::Queue;
use crate::IntoStream;

/// The producing half of a chain of streams.
///
/// Streams appended through a `Chain` are yielded by the linked [`Sequence`]
/// one after another, in the order they were appended. A `Chain` never waits
/// on the sequence: appending only queues the stream.
///
/// `Chain` can be cloned to append from more than one place. Once the last
/// handle is dropped the chain is terminated, as if [`terminate`] had been
/// called.
///
/// This `struct` is created by the [`sequencer`] function. See its
/// documentation for more.
///
/// [`Sequence`]: super::Sequence
/// [`terminate`]: Chain::terminate
/// [`sequencer`]: super::sequencer
pub struct Chain<S> {
    queue: Rc<RefCell<Queue<S>>>,
}

impl<S> Chain<S> {
    pub(super) fn new(queue: Rc<RefCell<Queue<S>>>) -> Self {
        Self { queue }
    }

    /// Append a stream to the end of the chain.
    ///
    /// The stream is not polled until every stream appended before it has been
    /// exhausted. This may be called from inside a stream which is itself
    /// being polled by the sequence.
    ///
    /// # Errors
    ///
    /// Fails if the chain was terminated, or if the sequence was dropped or
    /// failed. The stream is handed back inside the error.
    ///
    /// # Example
    ///
    /// ```
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let (chain, mut sequence) = futures_sequencer::sequencer();
    ///     chain.append(stream::once("hello")).unwrap();
    ///     assert_eq!(sequence.next().await, Some("hello"));
    ///
    ///     chain.append(stream::once("world")).unwrap();
    ///     assert_eq!(sequence.next().await, Some("world"));
    /// })
    /// ```
    pub fn append<T>(&self, stream: T) -> Result<(), AppendError<S>>
    where
        T: IntoStream<IntoStream = S>,
    {
        let stream = stream.into_stream();
        let waker = self.queue.borrow_mut().push(stream)?;
        if let Some(waker) = waker {
            waker.wake();
        }
        Ok(())
    }

    /// Signal that no more streams will be appended.
    ///
    /// The sequence ends once every stream appended so far has been exhausted.
    /// Terminating is idempotent: only the first call has an effect, and it is
    /// the only one which returns `true`.
    ///
    /// # Example
    ///
    /// ```
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let (chain, mut sequence) = futures_sequencer::sequencer();
    ///     chain.append(stream::once(1)).unwrap();
    ///     assert!(chain.terminate());
    ///     assert!(!chain.terminate());
    ///
    ///     assert_eq!(sequence.next().await, Some(1));
    ///     assert_eq!(sequence.next().await, None);
    /// })
    /// ```
    pub fn terminate(&self) -> bool {
        let (terminated, waker) = self.queue.borrow_mut().terminate();
        if let Some(waker) = waker {
            waker.wake();
        }
        terminated
    }

    /// Returns `true` if the chain has been terminated.
    pub fn is_terminated(&self) -> bool {
        self.queue.borrow().is_terminated()
    }

    /// Returns `true` if the sequence has been dropped or has failed, after
    /// which every append is rejected.
    pub fn is_closed(&self) -> bool {
        self.queue.borrow().is_closed()
    }

    /// The number of streams appended but not yet started.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns `true` if no appended stream is waiting to be started.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Clone for Chain<S> {
    fn clone(&self) -> Self {
        self.queue.borrow_mut().add_sender();
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<S> Drop for Chain<S> {
    fn drop(&mut self) {
        let waker = self.queue.borrow_mut().remove_sender();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<S> fmt::Debug for Chain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("Chain")
            .field("queued", &queue.len())
            .field("terminated", &queue.is_terminated())
            .field("closed", &queue.is_closed())
            .finish()
    }
}
