//! Utilities to implement the chain flavors of this crate.

#[doc(hidden)]
pub mod private;

#[cfg(test)]
mod channel;
#[cfg(test)]
mod waker;

#[cfg(test)]
pub(crate) use channel::gate;
#[cfg(test)]
pub(crate) use waker::CountingWaker;
