use core::pin::Pin;
use core::task::{ready, Context, Poll};

use futures_core::stream::{FusedStream, Stream};
use pin_project::pin_project;

use crate::error::SequenceError;
use crate::private_decl;

/// A chain consumer which can be torn down early.
///
/// Aborting drops the current stream and every queued stream without polling
/// them, and closes the chain so later appends are rejected.
///
/// This trait is sealed and implemented by the sequences of this crate.
pub trait Abort {
    private_decl! {}

    /// Drop every remaining stream and close the chain.
    fn abort(self: Pin<&mut Self>);
}

/// A sequence which stops at the first error of any appended stream.
///
/// Items are passed through until a stream yields `Err(e)`. That pull returns
/// [`SequenceError::Source`] with `e` unchanged, the rest of the failing stream
/// and every stream queued after it are dropped without being polled, and the
/// chain is closed. Every pull after that returns [`SequenceError::Failed`],
/// and [`FusedStream::is_terminated`] keeps returning `false`.
///
/// This `struct` is created by the `fail_fast` method on the sequences of this
/// crate. See its documentation for more.
///
/// # Example
///
/// ```
/// use futures_lite::future::block_on;
/// use futures_lite::{stream, StreamExt};
/// use futures_sequencer::SequenceError;
///
/// block_on(async {
///     let (chain, sequence) = futures_sequencer::sequencer();
///     chain.append(stream::iter(vec![Ok(1), Err("oh no"), Ok(2)])).unwrap();
///     chain.append(stream::iter(vec![Ok(3)])).unwrap();
///     chain.terminate();
///
///     let mut sequence = sequence.fail_fast();
///     assert_eq!(sequence.next().await.unwrap().unwrap(), 1);
///     let err = sequence.next().await.unwrap().unwrap_err();
///     assert_eq!(err.into_source(), Some("oh no"));
///     assert!(matches!(sequence.next().await, Some(Err(SequenceError::Failed))));
/// })
/// ```
#[derive(Debug)]
#[must_use = "streams do nothing unless polled or .awaited"]
#[pin_project]
pub struct TrySequence<Q> {
    #[pin]
    sequence: Q,
    failed: bool,
}

impl<Q> TrySequence<Q> {
    pub(crate) fn new(sequence: Q) -> Self {
        Self {
            sequence,
            failed: false,
        }
    }

    /// Returns `true` once a source stream has yielded an error.
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

impl<Q, T, E> Stream for TrySequence<Q>
where
    Q: Stream<Item = Result<T, E>> + Abort,
{
    type Item = Result<T, SequenceError<E>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.failed {
            return Poll::Ready(Some(Err(SequenceError::Failed)));
        }

        match ready!(this.sequence.as_mut().poll_next(cx)) {
            Some(Ok(item)) => Poll::Ready(Some(Ok(item))),
            Some(Err(err)) => {
                tracing::debug!("source sequence failed, aborting chain");
                *this.failed = true;
                this.sequence.abort();
                Poll::Ready(Some(Err(SequenceError::Source(err))))
            }
            None => Poll::Ready(None),
        }
    }
}

impl<Q, T, E> FusedStream for TrySequence<Q>
where
    Q: FusedStream<Item = Result<T, E>> + Abort,
{
    fn is_terminated(&self) -> bool {
        // A failed sequence keeps yielding `Failed`, so it is never done.
        !self.failed && self.sequence.is_terminated()
    }
}
