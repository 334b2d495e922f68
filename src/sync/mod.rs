//! Thread-safe chain of streams.
//!
//! The same protocol as the single-threaded [`sequencer`](crate::sequencer),
//! with the queue behind a mutex so the [`Chain`] and the [`Sequence`] can be
//! sent to different threads or tasks. The mutex is never held while a stream
//! is polled or dropped, or while a waker is woken.
//!
//! # Examples
//!
//! ```
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//! use std::thread;
//!
//! let (chain, sequence) = futures_sequencer::sync::sequencer();
//! let producer = thread::spawn(move || {
//!     for n in 0..3 {
//!         chain.append(stream::iter(vec![n * 2, n * 2 + 1])).unwrap();
//!     }
//!     chain.terminate();
//! });
//!
//! let items: Vec<_> = block_on(sequence.collect());
//! producer.join().unwrap();
//! assert_eq!(items, [0, 1, 2, 3, 4, 5]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::queue::Queue;

pub use chain::Chain;
pub use sequence::Sequence;

mod chain;
mod sequence;

/// Create a new thread-safe chain of streams of type `S`.
pub fn sequencer<S>() -> (Chain<S>, Sequence<S>) {
    with_capacity(0)
}

/// Create a new thread-safe chain of streams which can queue `capacity`
/// streams without reallocating.
pub fn with_capacity<S>(capacity: usize) -> (Chain<S>, Sequence<S>) {
    let shared = Arc::new(Shared(Mutex::new(Queue::with_capacity(capacity))));
    (Chain::new(shared.clone()), Sequence::new(shared))
}

#[derive(Debug)]
struct Shared<S>(Mutex<Queue<S>>);

impl<S> Shared<S> {
    /// The queue is left consistent by every operation, so a poisoned lock is
    /// still safe to use.
    fn lock(&self) -> MutexGuard<'_, Queue<S>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
