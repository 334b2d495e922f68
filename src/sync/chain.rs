use std::fmt;
use std::sync::Arc;

use super::Shared;
use crate::error::AppendError;
use crate::IntoStream;

/// The producing half of a thread-safe chain of streams.
///
/// Behaves like [`crate::Chain`], but can be sent to and shared between
/// threads when `S: Send`.
///
/// This `struct` is created by the [`sequencer`] function. See its
/// documentation for more.
///
/// [`sequencer`]: super::sequencer
pub struct Chain<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Chain<S> {
    pub(super) fn new(shared: Arc<Shared<S>>) -> Self {
        Self { shared }
    }

    /// Append a stream to the end of the chain.
    ///
    /// # Errors
    ///
    /// Fails if the chain was terminated, or if the sequence was dropped or
    /// failed. The stream is handed back inside the error.
    pub fn append<T>(&self, stream: T) -> Result<(), AppendError<S>>
    where
        T: IntoStream<IntoStream = S>,
    {
        let stream = stream.into_stream();
        let waker = self.shared.lock().push(stream)?;
        if let Some(waker) = waker {
            waker.wake();
        }
        Ok(())
    }

    /// Signal that no more streams will be appended.
    ///
    /// Idempotent: returns `true` only for the call which terminated the chain.
    pub fn terminate(&self) -> bool {
        let (terminated, waker) = self.shared.lock().terminate();
        if let Some(waker) = waker {
            waker.wake();
        }
        terminated
    }

    /// Returns `true` if the chain has been terminated.
    pub fn is_terminated(&self) -> bool {
        self.shared.lock().is_terminated()
    }

    /// Returns `true` if the sequence has been dropped or has failed.
    pub fn is_closed(&self) -> bool {
        self.shared.lock().is_closed()
    }

    /// The number of streams appended but not yet started.
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// Returns `true` if no appended stream is waiting to be started.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Clone for Chain<S> {
    fn clone(&self) -> Self {
        self.shared.lock().add_sender();
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S> Drop for Chain<S> {
    fn drop(&mut self) {
        let waker = self.shared.lock().remove_sender();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<S> fmt::Debug for Chain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.shared.lock();
        f.debug_struct("Chain")
            .field("queued", &queue.len())
            .field("terminated", &queue.is_terminated())
            .field("closed", &queue.is_closed())
            .finish()
    }
}
