//! Append streams to a single ordered stream while it is being consumed.
//!
//! A chain of streams is made of two linked halves:
//!
//! - [`Chain`]: the producing handle. It [appends](Chain::append) streams over
//!   time and eventually [terminates](Chain::terminate) the chain.
//! - [`Sequence`]: the consuming stream. It yields every item of the first
//!   appended stream, then every item of the second, and so on, waiting for
//!   the next append whenever it catches up, and ending once the chain has
//!   been terminated and drained.
//!
//! Appending never waits on the consumer, and an appended stream is not polled
//! until every stream before it has been exhausted. Output order is append
//! order, regardless of when streams are appended or how long each of them
//! takes to produce its items.
//!
//! # Examples
//!
//! ```rust
//! use futures_lite::future::block_on;
//! use futures_lite::{future, stream, StreamExt};
//!
//! block_on(async {
//!     let (chain, mut sequence) = futures_sequencer::sequencer();
//!     chain.append(stream::iter(vec![1, 2])).unwrap();
//!
//!     let producer = async {
//!         future::yield_now().await;
//!         chain.append(stream::iter(vec![3])).unwrap();
//!         chain.terminate();
//!     };
//!     let consumer = async {
//!         let mut items = vec![];
//!         while let Some(item) = sequence.next().await {
//!             items.push(item);
//!         }
//!         items
//!     };
//!
//!     let ((), items) = future::zip(producer, consumer).await;
//!     assert_eq!(items, [1, 2, 3]);
//! })
//! ```
//!
//! # Flavors
//!
//! - [`sequencer()`]: single-threaded, only needs `alloc`.
//! - [`sync::sequencer`]: the chain and the sequence may live on different
//!   threads. Requires the `std` feature.
//!
//! # Errors
//!
//! Appending fails with an [`AppendError`] once the chain was terminated, or
//! once the sequence was dropped. A sequence of `Result`s can be made to stop
//! at the first error with `fail_fast`, which returns a [`TrySequence`].
//!
//! # Adapters
//!
//! The [`delegate`] module drives a chain from the lifecycle of a writer.

#![no_std]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod into_stream;
mod queue;
mod sequencer;
mod try_sequence;
mod utils;

pub mod delegate;
#[cfg(feature = "std")]
pub mod sync;

#[doc(hidden)]
pub use utils::private;

pub use error::{AppendError, SequenceError, WriteError};
pub use into_stream::IntoStream;
pub use sequencer::{sequencer, with_capacity, Chain, Sequence};
pub use try_sequence::{Abort, TrySequence};

/// The futures sequencer prelude.
pub mod prelude {
    pub use super::delegate::Delegate;
    pub use super::Abort as _;
    pub use super::IntoStream as _;
}
