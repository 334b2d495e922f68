use core::fmt;

/// Why an append was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reason {
    Terminated,
    Closed,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Terminated => f.write_str("chain was terminated"),
            Reason::Closed => f.write_str("sequence was dropped or failed"),
        }
    }
}

/// An error returned from [`Chain::append`] when the stream can no longer be
/// consumed.
///
/// The rejected stream is handed back and can be recovered with
/// [`into_inner`](AppendError::into_inner).
///
/// # Example
///
/// ```
/// use futures_lite::stream;
///
/// let (chain, _sequence) = futures_sequencer::sequencer();
/// chain.terminate();
///
/// let err = chain.append(stream::once(1)).unwrap_err();
/// assert!(err.is_terminated());
/// let _stream = err.into_inner();
/// ```
///
/// [`Chain::append`]: crate::Chain::append
#[derive(thiserror::Error)]
#[error("cannot append sequence: {reason}")]
pub struct AppendError<S> {
    stream: S,
    reason: Reason,
}

impl<S> AppendError<S> {
    pub(crate) fn new(stream: S, reason: Reason) -> Self {
        Self { stream, reason }
    }

    /// Returns `true` if the chain had already been terminated.
    pub fn is_terminated(&self) -> bool {
        self.reason == Reason::Terminated
    }

    /// Returns `true` if the consuming sequence had been dropped or had failed.
    pub fn is_closed(&self) -> bool {
        self.reason == Reason::Closed
    }

    /// Returns the stream that could not be appended.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> fmt::Debug for AppendError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppendError")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

/// The error yielded by [`TrySequence`] once a source stream produced an
/// error.
///
/// [`TrySequence`]: crate::TrySequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError<E> {
    /// A source stream yielded this error. The chain stopped at that point.
    #[error("source sequence failed")]
    Source(#[source] E),
    /// The chain already failed on an earlier pull.
    #[error("sequence already failed")]
    Failed,
}

impl<E> SequenceError<E> {
    /// Returns the error of the source stream, if this is the pull that
    /// observed it.
    pub fn into_source(self) -> Option<E> {
        match self {
            SequenceError::Source(err) => Some(err),
            SequenceError::Failed => None,
        }
    }
}

/// An error returned when writing to a [`Writable`].
///
/// [`Writable`]: crate::delegate::Writable
#[derive(thiserror::Error)]
pub enum WriteError<S> {
    /// A delegate hook could not append to the chain.
    #[error(transparent)]
    Append(#[from] AppendError<S>),
    /// The writable side was already closed.
    #[error("write after close")]
    Closed,
}

impl<S> fmt::Debug for WriteError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Append(err) => f.debug_tuple("Append").field(err).finish(),
            WriteError::Closed => f.write_str("Closed"),
        }
    }
}
