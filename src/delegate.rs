//! Bridge a write-side into a chain of streams.
//!
//! A [`Delegate`] decides which streams to append in response to the
//! lifecycle of a writer: once when it is created, once per written chunk,
//! and once when it is closed. [`DelegateStream`] wires a delegate to a fresh
//! chain and exposes the two halves: a [`Writable`] to write chunks into, and
//! the chain's [`Sequence`] to read items from.
//!
//! # Examples
//!
//! ```
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//! use futures_sequencer::delegate::{self, DelegateStream};
//!
//! block_on(async {
//!     // Every written number `n` becomes the items `0..n`.
//!     let delegate = delegate::from_fn(|n: u8, chain| chain.append(stream::iter(0..n)));
//!     let DelegateStream { mut writable, readable } = DelegateStream::new(delegate).unwrap();
//!
//!     writable.write(2).unwrap();
//!     writable.write(3).unwrap();
//!     writable.close().unwrap();
//!
//!     assert_eq!(readable.collect::<Vec<_>>().await, [0, 1, 0, 1, 2]);
//! })
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::pin::{pin, Pin};
use core::task::{Context, Poll};

use futures_core::Stream;
use futures_lite::StreamExt;
use futures_sink::Sink;

use crate::error::{AppendError, WriteError};
use crate::{sequencer, Chain, Sequence};

/// Decides which streams to append to a chain as a writer progresses.
///
/// Only [`transform`](Delegate::transform) is required. The chain is
/// terminated by the [`Writable`] after [`finish`](Delegate::finish) returns,
/// so `finish` only has to append whatever trailing streams it wants.
pub trait Delegate<I> {
    /// The type of stream appended to the chain.
    type Stream;

    /// Called once, before any chunk is written.
    fn start(&mut self, chain: &Chain<Self::Stream>) -> Result<(), AppendError<Self::Stream>> {
        let _ = chain;
        Ok(())
    }

    /// Called for every chunk written.
    fn transform(
        &mut self,
        chunk: I,
        chain: &Chain<Self::Stream>,
    ) -> Result<(), AppendError<Self::Stream>>;

    /// Called once when the writer is closed, before the chain is terminated.
    fn finish(&mut self, chain: &Chain<Self::Stream>) -> Result<(), AppendError<Self::Stream>> {
        let _ = chain;
        Ok(())
    }
}

/// A [`Delegate`] which only transforms chunks.
///
/// This `struct` is created by the [`from_fn`] function. See its
/// documentation for more.
pub struct FromFn<F, S> {
    transform: F,
    _stream: PhantomData<fn() -> S>,
}

/// Create a [`Delegate`] from a closure called for every written chunk.
pub fn from_fn<I, S, F>(transform: F) -> FromFn<F, S>
where
    F: FnMut(I, &Chain<S>) -> Result<(), AppendError<S>>,
{
    FromFn {
        transform,
        _stream: PhantomData,
    }
}

impl<I, S, F> Delegate<I> for FromFn<F, S>
where
    F: FnMut(I, &Chain<S>) -> Result<(), AppendError<S>>,
{
    type Stream = S;

    fn transform(&mut self, chunk: I, chain: &Chain<S>) -> Result<(), AppendError<S>> {
        (self.transform)(chunk, chain)
    }
}

impl<F, S> fmt::Debug for FromFn<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// A writer and a reader joined by a delegate.
///
/// Chunks written to `writable` are turned into streams by the delegate, and
/// `readable` yields the items of those streams in the order they were
/// appended.
pub struct DelegateStream<I, D: Delegate<I>> {
    /// The side chunks are written to.
    pub writable: Writable<I, D>,
    /// The side items are read from.
    pub readable: Sequence<D::Stream>,
}

impl<I, D: Delegate<I>> DelegateStream<I, D> {
    /// Create a new chain driven by `delegate`, running its
    /// [`start`](Delegate::start) hook.
    ///
    /// # Errors
    ///
    /// Returns the error of the `start` hook.
    pub fn new(mut delegate: D) -> Result<Self, AppendError<D::Stream>> {
        let (chain, readable) = sequencer();
        delegate.start(&chain)?;
        Ok(Self {
            writable: Writable {
                delegate,
                chain: Some(chain),
                _chunk: PhantomData,
            },
            readable,
        })
    }

    /// Split into the writable and readable halves.
    pub fn split(self) -> (Writable<I, D>, Sequence<D::Stream>) {
        (self.writable, self.readable)
    }
}

impl<I, D: Delegate<I> + fmt::Debug> fmt::Debug for DelegateStream<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateStream")
            .field("writable", &self.writable)
            .field("readable", &self.readable)
            .finish()
    }
}

/// The write side of a [`DelegateStream`].
///
/// Writing never waits on the reader. Dropping a `Writable` without closing it
/// terminates the chain without running the [`finish`](Delegate::finish) hook.
pub struct Writable<I, D: Delegate<I>> {
    delegate: D,
    chain: Option<Chain<D::Stream>>,
    _chunk: PhantomData<fn(I)>,
}

impl<I, D: Delegate<I>> Writable<I, D> {
    /// Hand `chunk` to the delegate's [`transform`](Delegate::transform) hook.
    ///
    /// # Errors
    ///
    /// Fails if the writable was closed, or with the error of the hook.
    pub fn write(&mut self, chunk: I) -> Result<(), WriteError<D::Stream>> {
        let chain = self.chain.as_ref().ok_or(WriteError::Closed)?;
        self.delegate.transform(chunk, chain)?;
        Ok(())
    }

    /// Run the delegate's [`finish`](Delegate::finish) hook and terminate the
    /// chain.
    ///
    /// The chain is terminated even if the hook fails.
    ///
    /// # Errors
    ///
    /// Fails if the writable was already closed, or with the error of the
    /// hook.
    pub fn close(&mut self) -> Result<(), WriteError<D::Stream>> {
        let chain = self.chain.take().ok_or(WriteError::Closed)?;
        let finished = self.delegate.finish(&chain);
        chain.terminate();
        tracing::debug!(queued = chain.len(), "writable closed");
        finished.map_err(WriteError::from)
    }

    /// Returns `true` once [`close`](Writable::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.chain.is_none()
    }

    /// Write every chunk of `input`, then close.
    ///
    /// Stops at the first error.
    pub async fn pipe_from<St>(&mut self, input: St) -> Result<(), WriteError<D::Stream>>
    where
        St: Stream<Item = I>,
    {
        let mut input = pin!(input);
        while let Some(chunk) = input.next().await {
            self.write(chunk)?;
        }
        self.close()
    }

    /// Returns a reference to the delegate.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }
}

impl<I, D> Sink<I> for Writable<I, D>
where
    D: Delegate<I> + Unpin,
{
    type Error = WriteError<D::Stream>;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.is_closed() {
            Poll::Ready(Err(WriteError::Closed))
        } else {
            Poll::Ready(Ok(()))
        }
    }

    fn start_send(self: Pin<&mut Self>, item: I) -> Result<(), Self::Error> {
        self.get_mut().write(item)
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let this = self.get_mut();
        if this.is_closed() {
            return Poll::Ready(Ok(()));
        }
        Poll::Ready(this.close())
    }
}

impl<I, D: Delegate<I> + fmt::Debug> fmt::Debug for Writable<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writable")
            .field("delegate", &self.delegate)
            .field("chain", &self.chain)
            .finish()
    }
}
