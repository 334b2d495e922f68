//! Pin safety tests: a stream is never moved once the sequence has started
//! polling it, even while the queue behind it grows.

use std::{
    marker::PhantomPinned,
    pin::{pin, Pin},
    task::{Context, Poll},
};

use futures::{Stream, StreamExt};

struct PinCheckStream {
    remaining: usize,
    self_ptr: Option<*const Self>,
    _pinned: PhantomPinned,
}

impl PinCheckStream {
    fn items(items: usize) -> Self {
        Self {
            remaining: items,
            self_ptr: None,
            _pinned: PhantomPinned,
        }
    }
}

impl Stream for PinCheckStream {
    type Item = usize;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<usize>> {
        // SAFETY: nothing is moved out of `this`; we only record its address.
        let this = unsafe { self.get_unchecked_mut() };
        let current = this as *const Self;
        let stored = *this.self_ptr.get_or_insert(current);
        assert_eq!(stored, current, "moved after pinning");

        if this.remaining == 0 {
            return Poll::Ready(None);
        }
        this.remaining -= 1;
        if this.remaining % 2 == 0 {
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        Poll::Ready(Some(this.remaining))
    }
}

#[test]
fn head_is_not_moved_while_queue_grows() {
    futures_lite::future::block_on(async {
        let (chain, sequence) = futures_sequencer::sequencer();
        for _ in 0..10 {
            chain.append(PinCheckStream::items(6)).unwrap();
        }

        let mut sequence = pin!(sequence);
        let first = sequence.as_mut().take(2).collect::<Vec<_>>().await;
        assert_eq!(first, [5, 3]);

        for _ in 0..100 {
            chain.append(PinCheckStream::items(6)).unwrap();
        }
        chain.terminate();

        let rest = sequence.as_mut().count().await;
        assert_eq!(rest, 110 * 3 - 2);
    });
}

#[test]
fn sync_head_is_not_moved() {
    futures_lite::future::block_on(async {
        let (chain, sequence) = futures_sequencer::sync::sequencer();
        for n in 0..20 {
            chain.append(PinCheckStream::items(n)).unwrap();
        }
        drop(chain);

        let total = pin!(sequence).count().await;
        assert_eq!(total, (0..20).map(|n| n / 2).sum::<usize>());
    });
}
