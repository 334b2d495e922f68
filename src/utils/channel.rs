use std::{
    cell::RefCell,
    collections::VecDeque,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
};

use futures_core::Stream;

struct GateState<T> {
    queue: VecDeque<T>,
    waker: Option<Waker>,
    closed: bool,
    polls: usize,
    dropped: bool,
}

/// A stream whose items are released by hand through its [`Valve`].
pub(crate) struct Gate<T> {
    state: Rc<RefCell<GateState<T>>>,
}

/// The controlling end of a [`Gate`].
pub(crate) struct Valve<T> {
    state: Rc<RefCell<GateState<T>>>,
}

impl<T> Stream for Gate<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut state = self.state.borrow_mut();
        state.polls += 1;

        match state.queue.pop_front() {
            Some(item) => Poll::Ready(Some(item)),
            None if state.closed => Poll::Ready(None),
            None => {
                state.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl<T> Drop for Gate<T> {
    fn drop(&mut self) {
        self.state.borrow_mut().dropped = true;
    }
}

impl<T> Valve<T> {
    pub(crate) fn send(&self, item: T) {
        let waker = {
            let mut state = self.state.borrow_mut();
            state.queue.push_back(item);
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    pub(crate) fn close(&self) {
        let waker = {
            let mut state = self.state.borrow_mut();
            state.closed = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// How many times the gate has been polled.
    pub(crate) fn polls(&self) -> usize {
        self.state.borrow().polls
    }

    pub(crate) fn is_dropped(&self) -> bool {
        self.state.borrow().dropped
    }
}

pub(crate) fn gate<T>() -> (Valve<T>, Gate<T>) {
    let state = Rc::new(RefCell::new(GateState {
        queue: VecDeque::new(),
        waker: None,
        closed: false,
        polls: 0,
        dropped: false,
    }));

    (
        Valve {
            state: state.clone(),
        },
        Gate { state },
    )
}
