use futures_core::Stream;

/// Conversion into a [`Stream`].
///
/// [`Chain::append`] accepts anything which converts into the chain's stream
/// type. Every stream converts into itself.
///
/// # Example
///
/// ```
/// use futures_lite::future::block_on;
/// use futures_lite::{stream, StreamExt};
/// use futures_sequencer::IntoStream;
///
/// struct Countdown(u8);
///
/// impl IntoStream for Countdown {
///     type Item = u8;
///     type IntoStream = stream::Iter<std::iter::Rev<std::ops::Range<u8>>>;
///
///     fn into_stream(self) -> Self::IntoStream {
///         stream::iter((0..self.0).rev())
///     }
/// }
///
/// block_on(async {
///     let (chain, sequence) = futures_sequencer::sequencer();
///     chain.append(Countdown(3)).unwrap();
///     chain.terminate();
///     assert_eq!(sequence.collect::<Vec<_>>().await, [2, 1, 0]);
/// })
/// ```
///
/// [`Chain::append`]: crate::Chain::append
pub trait IntoStream {
    /// The type of the items yielded by the stream.
    type Item;

    /// Which kind of stream are we turning this into?
    type IntoStream: Stream<Item = Self::Item>;

    /// Creates a stream from a value.
    fn into_stream(self) -> Self::IntoStream;
}

impl<S: Stream> IntoStream for S {
    type Item = S::Item;
    type IntoStream = S;

    #[inline]
    fn into_stream(self) -> S {
        self
    }
}
