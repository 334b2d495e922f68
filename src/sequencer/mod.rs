//! Single-threaded chain of streams.
//!
//! A call to [`sequencer`] returns a linked pair: a [`Chain`] which appends
//! streams, and a [`Sequence`] which yields the items of every appended stream
//! in append order. Streams may be appended before, during, and after the
//! sequence has been polled, until the chain is terminated.
//!
//! # Examples
//!
//! ```
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! block_on(async {
//!     let (chain, sequence) = futures_sequencer::sequencer();
//!     chain.append(stream::iter(vec![1, 2])).unwrap();
//!     chain.append(stream::iter(vec![3])).unwrap();
//!     chain.terminate();
//!
//!     let items: Vec<_> = sequence.collect().await;
//!     assert_eq!(items, [1, 2, 3]);
//! })
//! ```
//!
//! Sequences which yield more than one stream type can append boxed streams:
//!
//! ```
//! use futures_core::stream::LocalBoxStream;
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! block_on(async {
//!     let (chain, sequence) = futures_sequencer::sequencer::<LocalBoxStream<'static, u8>>();
//!     chain.append(stream::once(1).boxed_local()).unwrap();
//!     chain.append(stream::repeat(2).take(2).boxed_local()).unwrap();
//!     drop(chain);
//!
//!     assert_eq!(sequence.collect::<Vec<_>>().await, [1, 2, 2]);
//! })
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::queue::Queue;

pub use chain::Chain;
pub use sequence::Sequence;

mod chain;
mod sequence;

/// Create a new chain of streams of type `S`.
///
/// Returns the producing [`Chain`] handle and the consuming [`Sequence`].
pub fn sequencer<S>() -> (Chain<S>, Sequence<S>) {
    with_capacity(0)
}

/// Create a new chain of streams which can queue `capacity` streams without
/// reallocating.
pub fn with_capacity<S>(capacity: usize) -> (Chain<S>, Sequence<S>) {
    let queue = Rc::new(RefCell::new(Queue::with_capacity(capacity)));
    (Chain::new(queue.clone()), Sequence::new(queue))
}
